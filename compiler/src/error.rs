use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid name \"{0}\"")]
    InvalidName(String),

    #[error("The type \"{0}\" is not defined")]
    UnknownType(String),

    #[error("Verifier error: {0}")]
    VerifierError(String),
}
