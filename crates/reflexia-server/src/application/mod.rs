//! Application Services (Use Cases)

mod reflection_service;

pub use reflection_service::ReflectionService;
