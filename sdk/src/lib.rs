//! lancaster
//!
//! Runtime entry points for decoding streams of Avro binary values:
//!
//! - [Reader] binds a schema given as Avro JSON text,
//! - [read_stream] pulls values out of any [std::io::Read],
//! - [to_json] renders decoded values as `serde_json` documents.
//!
//! ```
//! use lancaster::{read_stream, to_json, Reader, StreamConfig};
//!
//! let schema = r#"{"type": "record", "name": "Point",
//!     "fields": [{"name": "x", "type": "int"}, {"name": "y", "type": "int"}]}"#;
//! let mut reader = Reader::new(schema)?;
//! let data: &[u8] = &[0x02, 0x01, 0x04, 0x03];
//!
//! let points = read_stream(&mut reader, data, StreamConfig::default())
//!     .map(|point| point.map(|point| to_json(&point).to_string()))
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(points, [r#"{"x":1,"y":-1}"#, r#"{"x":2,"y":-2}"#]);
//! # Ok::<(), lancaster::LancasterError>(())
//! ```

pub mod config;
pub mod error;
pub mod json;
pub mod reader;

pub use config::{StreamConfig, DEFAULT_BUFFER_SIZE};
pub use error::LancasterError;
pub use json::to_json;
pub use reader::{read_stream, Reader, ValueStream};

pub use lancaster_compiler::{compile_schema, compile_schema_file, SchemaError};
pub use lancaster_schema::{DecodeError, Field, Node, Schema, StreamReader, TypeId, Value};
