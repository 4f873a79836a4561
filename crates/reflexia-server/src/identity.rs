//! Anonymous Identity Resolution
//!
//! Sessions are grouped per browser by an `anon_id` cookie rather than by
//! authentication. A valid inbound token is returned unchanged; anything
//! else mints a fresh identity and instructs the client to persist it for
//! a year.

use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

/// Cookie carrying the anonymous identity token.
pub const ANON_COOKIE: &str = "anon_id";

/// One year, the lifetime of the identity cookie.
const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// The resolved identity for one request. `set_cookie` is present only
/// when a fresh identity was minted and must reach the client.
pub struct ResolvedIdentity {
    pub anon_id: Uuid,
    pub set_cookie: Option<HeaderValue>,
}

/// Resolve the anonymous identity from the inbound cookie header(s).
///
/// Idempotent as long as the cookie round-trips: the same inbound token
/// resolves to the same identity with no new `Set-Cookie`.
pub fn resolve(headers: &HeaderMap) -> ResolvedIdentity {
    if let Some(anon_id) = existing_anon_id(headers) {
        return ResolvedIdentity {
            anon_id,
            set_cookie: None,
        };
    }

    let anon_id = Uuid::new_v4();
    let cookie = format!(
        "{ANON_COOKIE}={anon_id}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax; Secure"
    );
    let set_cookie =
        HeaderValue::from_str(&cookie).expect("cookie value contains only ASCII");

    ResolvedIdentity {
        anon_id,
        set_cookie: Some(set_cookie),
    }
}

fn existing_anon_id(headers: &HeaderMap) -> Option<Uuid> {
    for header in headers.get_all(header::COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            if let Some(value) = pair.trim().strip_prefix("anon_id=") {
                if let Some(anon_id) = parse_token(value) {
                    return Some(anon_id);
                }
            }
        }
    }
    None
}

/// Accept only the canonical lowercase hyphenated UUID form. The token is
/// stored into a `UUID` column, so a looser match would turn a stale
/// cookie into an insert failure.
fn parse_token(value: &str) -> Option<Uuid> {
    let id = Uuid::try_parse(value).ok()?;
    (id.as_hyphenated().to_string() == value).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn existing_token_is_returned_unchanged() {
        let id = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("anon_id={id}"));

        let first = resolve(&headers);
        let second = resolve(&headers);

        assert_eq!(first.anon_id, id);
        assert_eq!(second.anon_id, id);
        assert!(first.set_cookie.is_none());
        assert!(second.set_cookie.is_none());
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let id = Uuid::new_v4();
        let headers = headers_with_cookie(&format!("theme=dark; anon_id={id}; lang=es"));
        assert_eq!(resolve(&headers).anon_id, id);
    }

    #[test]
    fn missing_cookie_mints_identity_with_attributes() {
        let resolved = resolve(&HeaderMap::new());
        let cookie = resolved.set_cookie.expect("a new cookie is issued");
        let cookie = cookie.to_str().unwrap();

        assert!(cookie.starts_with(&format!("anon_id={}", resolved.anon_id)));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=31536000"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn malformed_token_is_replaced() {
        for bad in [
            "not-a-uuid",
            "ABCDEF12-3456-7890-ABCD-EF1234567890",
            "deadbeef",
            "",
        ] {
            let headers = headers_with_cookie(&format!("anon_id={bad}"));
            let resolved = resolve(&headers);
            assert!(resolved.set_cookie.is_some(), "token {bad:?} was trusted");
        }
    }
}
