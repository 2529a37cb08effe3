//! Schema model, dynamic values and the streaming decoder behind lancaster.
//!
//! The input is a buffer of Avro binary encoded values written back to back
//! with no framing between them. A [StreamReader] bound to a [Schema] decodes
//! as many complete values as the buffer holds and reports how many bytes
//! they occupied, so a caller reading from a socket or file can carry the
//! incomplete tail over to the next read.
//!
//! ```
//! use std::sync::Arc;
//! use lancaster_schema::*;
//!
//! let schema = Schema::new(vec![
//!     Node::Record {
//!         name: "Point".to_owned(),
//!         fields: vec![Field::new("x", 1), Field::new("y", 1)],
//!     },
//!     Node::Int32,
//! ], 0);
//!
//! let value = Value::decode(&schema, &[2, 1]).unwrap();
//! assert_eq!(format!("{:?}", value), "{x: 1, y: -1}");
//!
//! let mut reader = StreamReader::new(Arc::new(schema));
//! let (values, consumed) = reader.decode_sequence(&[2, 1, 4, 3, 6]).unwrap();
//! assert_eq!(values.len(), 2);
//! assert_eq!(consumed, 4);
//! ```

pub mod bb;
pub mod error;
pub mod reader;
pub mod schema;
pub mod value;

pub use bb::*;
pub use error::*;
pub use reader::*;
pub use schema::*;
pub use value::*;
