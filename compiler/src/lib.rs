//! lancaster-compiler
//!
//! Turns Avro JSON schema text into a [lancaster_schema::Schema]:
//!  1) JSON parsing with `serde_json`,
//!  2) a tree builder that resolves named references into links,
//!  3) a verifier (duplicate names, bad unions, missing or infinitely nested types),
//!  4) error types (`SchemaError`).

pub mod compiler;
pub mod error;
pub mod parser;
pub mod utils;
pub mod verifier;

pub use compiler::{compile_schema, compile_schema_file};
pub use error::SchemaError;
pub use parser::parse_schema;
pub use verifier::verify_schema;
