use crate::{config::StreamConfig, error::LancasterError};
use lancaster_compiler::compile_schema;
use lancaster_schema::{Schema, StreamReader, Value};
use std::{collections::VecDeque, io, io::Read, sync::Arc};
use tracing::{debug, warn};

/// A [StreamReader] bound to a schema compiled from Avro JSON.
pub struct Reader {
    inner: StreamReader,
}

impl Reader {
    /// Compiles `schema_json` and binds a reader to it.
    pub fn new(schema_json: &str) -> Result<Reader, LancasterError> {
        let schema = compile_schema(schema_json)?;
        Ok(Reader::from_schema(Arc::new(schema)))
    }

    pub fn from_schema(schema: Arc<Schema>) -> Reader {
        Reader {
            inner: StreamReader::new(schema),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.inner.schema()
    }

    /// Decodes every complete value at the front of `buf`, returning them with
    /// the number of bytes they took up.
    pub fn read_seq(&mut self, buf: &[u8]) -> Result<(Vec<Value>, usize), LancasterError> {
        Ok(self.inner.decode_sequence(buf)?)
    }
}

/// Decodes consecutive values from `source`, reading `config.buffer_size`
/// bytes at a time and carrying any incomplete value over to the next read.
///
/// ```
/// use lancaster::{read_stream, Reader, StreamConfig};
///
/// let mut reader = Reader::new(r#"{"type": "array", "items": "int"}"#).unwrap();
/// let data: &[u8] = &[0x04, 0x02, 0x01, 0x00, 0x00];
///
/// let values: Vec<_> = read_stream(&mut reader, data, StreamConfig::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[0].as_list().len(), 2);
/// ```
pub fn read_stream<R: Read>(reader: &mut Reader, source: R, config: StreamConfig) -> ValueStream<'_, R> {
    ValueStream {
        reader,
        source,
        buffer_size: config.buffer_size.max(1),
        pending: Vec::new(),
        attempted: 0,
        retry_at: 0,
        ready: VecDeque::new(),
        exhausted: false,
        done: false,
    }
}

/// Iterator returned by [read_stream].
///
/// Yields each decoded value in order. The first error ends the stream, and
/// so does the source running dry. If bytes of an unfinished value are left
/// over at that point, [LancasterError::UnexpectedEof] is yielded last.
pub struct ValueStream<'r, R> {
    reader: &'r mut Reader,
    source: R,
    buffer_size: usize,
    // Undecoded tail of earlier reads followed by the latest chunk
    pending: Vec<u8>,
    // Length of `pending` right after the last decode
    attempted: usize,
    // An unfinished value is only retried once `pending` has grown this far
    retry_at: usize,
    ready: VecDeque<Value>,
    exhausted: bool,
    done: bool,
}

impl<R: Read> ValueStream<'_, R> {
    /// Bytes read from the source that do not yet form a complete value.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    fn read_chunk(&mut self) -> io::Result<usize> {
        let start = self.pending.len();
        self.pending.resize(start + self.buffer_size, 0);
        loop {
            match self.source.read(&mut self.pending[start..]) {
                Ok(read) => {
                    self.pending.truncate(start + read);
                    return Ok(read);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.pending.truncate(start);
                    return Err(err);
                }
            }
        }
    }

    fn fill(&mut self) -> Result<(), LancasterError> {
        if self.exhausted {
            self.done = true;
            if !self.pending.is_empty() {
                warn!(remaining = self.pending.len(), "stream ended inside a value");
                return Err(LancasterError::UnexpectedEof {
                    remaining: self.pending.len(),
                });
            }
            debug!("stream finished");
            return Ok(());
        }

        if self.read_chunk()? == 0 {
            self.exhausted = true;
            if self.pending.len() > self.attempted {
                self.decode()?;
            }
        } else if self.pending.len() >= self.retry_at {
            self.decode()?;
        }
        Ok(())
    }

    fn decode(&mut self) -> Result<(), LancasterError> {
        let (values, consumed) = self.reader.read_seq(&self.pending)?;
        self.pending.drain(..consumed);
        self.ready.extend(values);
        self.attempted = self.pending.len();
        // Doubling keeps the total work linear when one value spans many reads
        self.retry_at = self.pending.len() * 2;
        Ok(())
    }
}

impl<R: Read> Iterator for ValueStream<'_, R> {
    type Item = Result<Value, LancasterError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.ready.pop_front() {
                return Some(Ok(value));
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.fill() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lancaster_schema::DecodeError;

    const STRINGS: &str = r#""string""#;

    #[test]
    fn reader_read_seq() {
        let mut reader = Reader::new(STRINGS).unwrap();
        let (values, consumed) = reader.read_seq(&[4, b'h', b'i', 4, b'y']).unwrap();
        assert_eq!(values, vec![Value::String("hi".to_owned())]);
        assert_eq!(consumed, 3);
        assert_eq!(reader.schema().len(), 1);
    }

    #[test]
    fn reader_bad_schema() {
        assert!(matches!(
            Reader::new(r#"{"type": "nope"}"#),
            Err(LancasterError::Schema(_))
        ));
    }

    #[test]
    fn stream_across_chunks() {
        let mut reader = Reader::new(STRINGS).unwrap();
        let data: &[u8] = &[4, b'h', b'i', 6, b'a', b'b', b'c', 0];
        let config = StreamConfig::default().with_buffer_size(2);

        let values: Vec<String> = read_stream(&mut reader, data, config)
            .map(|value| value.unwrap().as_str().to_owned())
            .collect();
        assert_eq!(values, ["hi", "abc", ""]);
    }

    #[test]
    fn stream_unexpected_eof() {
        let mut reader = Reader::new(STRINGS).unwrap();
        let data: &[u8] = &[4, b'h', b'i', 6, b'a'];
        let mut stream = read_stream(&mut reader, data, StreamConfig::default());

        assert_eq!(stream.next().unwrap().unwrap(), Value::String("hi".to_owned()));
        assert!(matches!(
            stream.next(),
            Some(Err(LancasterError::UnexpectedEof { remaining: 2 }))
        ));
        assert!(stream.next().is_none());
    }

    #[test]
    fn stream_stops_at_hard_error() {
        let mut reader = Reader::new(r#"{"type": "enum", "name": "E", "symbols": ["A"]}"#).unwrap();
        let data: &[u8] = &[0, 0, 8, 0];
        let results: Vec<_> = read_stream(&mut reader, data, StreamConfig::default()).collect();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(LancasterError::Decode(DecodeError::Malformed { .. }))
        ));
    }

    #[test]
    fn stream_waits_for_tail_to_double() {
        let mut reader = Reader::new(r#"{"type": "array", "items": "int"}"#).unwrap();
        // [1, 2, 3, 4, 5, 6, 7] then the end of the array
        let data: &[u8] = &[0x0E, 2, 4, 6, 8, 10, 12, 14, 0];
        let mut stream = read_stream(&mut reader, data, StreamConfig::default().with_buffer_size(1));

        let mut retries = Vec::new();
        let mut decoded_at = Vec::new();
        for _ in 0..data.len() {
            let before = stream.attempted;
            stream.fill().unwrap();
            if stream.attempted != before || !stream.ready.is_empty() {
                decoded_at.push(stream.pending.len());
            }
            retries.push(stream.retry_at);
        }

        assert_eq!(retries, [2, 4, 4, 8, 8, 8, 8, 16, 16]);
        assert_eq!(decoded_at, [1, 2, 4, 8]);
        assert!(stream.ready.is_empty());

        // The last byte is decoded once the source runs dry
        stream.fill().unwrap();
        assert_eq!(stream.ready.len(), 1);
        assert_eq!(stream.remaining(), 0);
        assert_eq!(stream.next().unwrap().unwrap().as_list().len(), 7);
        assert!(stream.next().is_none());
    }

    #[test]
    fn stream_empty_source() {
        let mut reader = Reader::new(STRINGS).unwrap();
        let mut stream = read_stream(&mut reader, io::empty(), StreamConfig::default());
        assert!(stream.next().is_none());
        assert_eq!(stream.remaining(), 0);
    }
}
