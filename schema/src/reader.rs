use crate::{bb::ByteBuffer, error::DecodeError, schema::Schema, value::Value};

use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Decodes runs of consecutive values that all share one schema.
///
/// A reader is bound to its schema once and then fed buffers one at a time.
/// Each call reports how many leading bytes held complete values, so that the
/// caller can keep the tail and retry once more data has arrived.
///
/// ```
/// use std::sync::Arc;
/// use lancaster_schema::*;
///
/// let schema = Arc::new(Schema::new(vec![Node::String], 0));
/// let mut reader = StreamReader::new(schema);
///
/// // "hi", "yo", then the first byte of a third string
/// let (values, consumed) = reader.decode_sequence(&[4, b'h', b'i', 4, b'y', b'o', 4, b'h']).unwrap();
/// assert_eq!(values, vec![Value::String("hi".into()), Value::String("yo".into())]);
/// assert_eq!(consumed, 6);
/// ```
pub struct StreamReader {
    schema: Arc<Schema>,
    // Values decoded during the current call. Drained into a fresh vector on
    // success and cleared on failure, so nothing leaks between calls.
    staging: Vec<Value>,
}

impl StreamReader {
    pub fn new(schema: Arc<Schema>) -> StreamReader {
        StreamReader {
            schema,
            staging: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Decodes as many complete values as `buffer` holds.
    ///
    /// Returns the values and the offset just past the last complete one. A
    /// value cut off by the end of the buffer ends the run without an error.
    /// Any other failure discards every value decoded by this call and is
    /// returned as is.
    pub fn decode_sequence(&mut self, buffer: &[u8]) -> Result<(Vec<Value>, usize), DecodeError> {
        self.staging.clear();

        match self.fill(buffer) {
            Ok(consumed) => {
                debug!(
                    values = self.staging.len(),
                    consumed,
                    remaining = buffer.len() - consumed,
                    "decoded sequence"
                );
                Ok((self.staging.drain(..).collect(), consumed))
            }
            Err(err) => {
                warn!(error = %err, discarded = self.staging.len(), "decode failed");
                self.staging.clear();
                Err(err)
            }
        }
    }

    fn fill(&mut self, buffer: &[u8]) -> Result<usize, DecodeError> {
        let root = self.schema.root();
        let mut bb = ByteBuffer::new(buffer);
        let mut consumed = 0;

        while bb.remaining() > 0 {
            match Value::decode_bb(&self.schema, root, &mut bb) {
                Ok(value) => {
                    if bb.index() == consumed {
                        return Err(DecodeError::Unsupported(
                            "values of the root type take no bytes, so a stream of them has no boundaries"
                                .to_owned(),
                        ));
                    }
                    consumed = bb.index();
                    trace!(offset = consumed, "decoded value");
                    self.staging.push(value);
                }
                Err(err) if err.is_truncated() => {
                    trace!(offset = consumed, "incomplete value at end of buffer");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(consumed)
    }
}
