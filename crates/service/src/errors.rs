use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(id: &str) -> Self { Self::NotFound(format!("pokemon {} not found", id)) }
}
