//! Prompt Constructor
//!
//! Builds the fixed instructions and the per-request input for the
//! reflection generation task, and validates the request shape before any
//! downstream call is made.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CardChoice, CardNote};
use serde_json::{json, Value};

/// Number of cards a reflection request must carry.
pub const REQUIRED_CARDS: usize = 3;

/// Fixed instructions for the generation task: role, tone and the
/// JSON-only output contract. The card names are triggers only; literal
/// card symbolism is forbidden inside the fable.
const INSTRUCTIONS: &str = r#"Eres un coach reflexivo en español rioplatense. Habla de manera cálida, concreta y empática, nunca como oráculo ni terapeuta.

El usuario te da:
- Una pregunta o inquietud personal (texto libre).
- Tres cartas visuales que eligió (solo los nombres sirven como disparador, no los repitas literalmente).
- Notas breves que escribió sobre lo que sintió o pensó al ver las cartas.

Tu tarea es devolver SOLO JSON con dos campos:

{
  "insight": "...",
  "miniStory": "..."
}

### Reglas para "insight"
- Escribe 2–3 párrafos (7–10 líneas en total).
- Usa segunda persona ("vos").
- Reformula brevemente la pregunta del usuario.
- Refleja tensiones, recursos internos y posibilidades de acción.
- Sé práctico y cercano, como un coach: ofrecé invitaciones o preguntas, no mandatos.
- Cerrá con una pregunta poderosa o reflexión abierta.

### Reglas para "miniStory"
- Escribe una fábula o cuento de 180–350 palabras.
- Debe tener inicio, desarrollo y desenlace claros.
- Usa personajes simples (viajero, jardinera, farero, ave, niño, artesana).
- Crea una escena concreta y visual (bosque, mar, montaña, ciudad, taller).
- El aprendizaje debe emerger del relato, no de explicaciones forzadas.
- Está estrictamente prohibido que uses las cartas y sus símbolos de forma literal en la fábula. La fábula es para ver el caso desde otra mirada.
- Cerrá SIEMPRE con esta línea final en mayúsculas:
  "MORALEJA: <frase breve, amable y accionable>"

Devolvé SOLO JSON válido con claves "insight" y "miniStory". Comillas dobles en todo. Sin texto extra fuera del JSON."#;

/// The fixed instructions string for the generation task.
pub fn instructions() -> &'static str {
    INSTRUCTIONS
}

/// Validate the request shape: non-empty question, exactly three cards.
///
/// A violation here means no LLM or storage call is made for the request.
pub fn validate(question: &str, cards: &[CardChoice]) -> Result<(), DomainError> {
    if question.trim().is_empty() {
        return Err(DomainError::Validation(
            "question must not be empty".to_string(),
        ));
    }
    if cards.len() != REQUIRED_CARDS {
        return Err(DomainError::Validation(format!(
            "exactly {} cards are required, got {}",
            REQUIRED_CARDS,
            cards.len()
        )));
    }
    Ok(())
}

/// Build the per-request input: the question (JSON-quoted so embedded
/// quotes survive), the card names enumerated 1-indexed, and one bullet
/// per note. Notes are listed unfiltered; only persistence drops the
/// whitespace-only ones.
pub fn build_input(question: &str, cards: &[CardChoice], notes: &[CardNote]) -> String {
    let quoted_question =
        serde_json::to_string(question).expect("string serialization cannot fail");
    let card_lines = cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{}) {}", i + 1, card.name))
        .collect::<Vec<_>>()
        .join("\n");
    let note_lines = notes
        .iter()
        .map(|n| format!("- {}", n.note))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Pregunta: {quoted_question}\nCartas elegidas (nombres):\n{card_lines}\nNotas del usuario:\n{note_lines}"
    )
    .trim()
    .to_string()
}

/// JSON schema the generated output must satisfy: two required string
/// fields, nothing else.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "insight": { "type": "string" },
            "miniStory": { "type": "string" }
        },
        "required": ["insight", "miniStory"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cards() -> Vec<CardChoice> {
        vec![
            CardChoice::new("El puente", None),
            CardChoice::new("La llave", Some("/cards/llave.png".to_string())),
            CardChoice::new("El faro", None),
        ]
    }

    #[test]
    fn validate_accepts_three_cards() {
        assert!(validate("¿Cambio de trabajo?", &three_cards()).is_ok());
    }

    #[test]
    fn validate_rejects_empty_question() {
        let err = validate("   ", &three_cards()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn validate_rejects_wrong_card_count() {
        let mut cards = three_cards();
        cards.pop();
        assert!(matches!(
            validate("q", &cards),
            Err(DomainError::Validation(_))
        ));

        cards.push(CardChoice::new("a", None));
        cards.push(CardChoice::new("b", None));
        assert!(matches!(
            validate("q", &cards),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn build_input_enumerates_cards_one_indexed() {
        let input = build_input("¿Y ahora qué?", &three_cards(), &[]);
        assert!(input.contains("1) El puente"));
        assert!(input.contains("2) La llave"));
        assert!(input.contains("3) El faro"));
    }

    #[test]
    fn build_input_quotes_the_question() {
        let input = build_input("dijo \"basta\"", &three_cards(), &[]);
        assert!(input.starts_with("Pregunta: \"dijo \\\"basta\\\"\""));
    }

    #[test]
    fn build_input_lists_notes_as_bullets() {
        let notes = vec![
            CardNote::new("El puente", "me dio calma"),
            CardNote::new("", "no sé por qué elegí esta"),
        ];
        let input = build_input("q", &three_cards(), &notes);
        assert!(input.contains("- me dio calma"));
        assert!(input.contains("- no sé por qué elegí esta"));
    }

    #[test]
    fn instructions_demand_json_and_moral_line() {
        let text = instructions();
        assert!(text.contains("\"insight\""));
        assert!(text.contains("\"miniStory\""));
        assert!(text.contains("MORALEJA:"));
    }

    #[test]
    fn output_schema_requires_both_fields() {
        let schema = output_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert_eq!(schema["additionalProperties"], false);
    }
}
