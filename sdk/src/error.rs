use lancaster_compiler::SchemaError;
use lancaster_schema::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LancasterError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(serde_json::Error),

    #[error("{remaining} bytes remaining but could not continue reading from stream")]
    UnexpectedEof { remaining: usize },
}
