use crate::{error::SchemaError, parser::parse_schema, verifier::verify_schema};
use lancaster_schema::Schema;
use std::{fs, path::Path};

/// Compile Avro JSON schema text into a verified [Schema].
/// Returns `Err(SchemaError)` if JSON parsing, tree building or verification fails.
pub fn compile_schema(text: &str) -> Result<Schema, SchemaError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    let schema = parse_schema(&json)?;
    verify_schema(&schema)?;
    Ok(schema)
}

/// Reads a schema file and compiles it with [compile_schema].
pub fn compile_schema_file(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let text = fs::read_to_string(path)?;
    compile_schema(&text)
}
