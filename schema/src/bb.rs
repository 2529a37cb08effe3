use crate::error::DecodeError;
use std::str;

/// A byte buffer meant for reading Avro binary data.
///
/// The read position is explicit: [`index`](#method.index) always reports how
/// many bytes of [`data`](#method.data) have been consumed so far.
///
/// Example usage:
///
/// ```
/// let mut bb = lancaster_schema::ByteBuffer::new(&[0x08, 0xF0, 0x9F, 0x8D, 0x95, 0x96, 0x01]);
/// assert_eq!(bb.read_string(), Ok("🍕"));
/// assert_eq!(bb.read_var_int(), Ok(75));
/// assert_eq!(bb.index(), 7);
/// ```
///
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Create a new ByteBuffer that wraps the provided byte slice. The lifetime
    /// of the returned ByteBuffer must not outlive the lifetime of the byte
    /// slice.
    pub fn new(data: &'a [u8]) -> ByteBuffer<'a> {
        ByteBuffer { data, index: 0 }
    }

    /// Create a ByteBuffer whose cursor starts at `index` instead of zero.
    pub fn at(data: &'a [u8], index: usize) -> ByteBuffer<'a> {
        ByteBuffer { data, index }
    }

    /// Retrieves the underlying byte slice.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Retrieves the current index into the underlying byte slice. This starts
    /// off as 0 and ends up as `self.data().len()` when everything has been
    /// read.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of bytes left between the cursor and the end of the data.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.index)
    }

    /// Try to read a boolean value starting at the current index. Any nonzero
    /// byte is accepted as `true`.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_byte()? != 0)
    }

    /// Try to read a byte starting at the current index.
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        if self.index >= self.data.len() {
            Err(DecodeError::Truncated { offset: self.index })
        } else {
            let value = self.data[self.index];
            self.index += 1;
            Ok(value)
        }
    }

    /// Try to read exactly `len` raw bytes starting at the current index.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.index > self.data.len() || len > self.remaining() {
            Err(DecodeError::Truncated { offset: self.index })
        } else {
            let value = &self.data[self.index..self.index + len];
            self.index += len;
            Ok(value)
        }
    }

    /// Try to read a zig-zag encoded variable-length signed 32-bit integer
    /// starting at the current index.
    pub fn read_var_int(&mut self) -> Result<i32, DecodeError> {
        let start = self.index;
        let value = self.read_var_uint(5)?;
        let value = u32::try_from(value).map_err(|_| {
            DecodeError::malformed(start, "varint does not fit in 32 bits")
        })?;
        Ok(((value >> 1) as i32) ^ -((value & 1) as i32))
    }

    /// Try to read a zig-zag encoded variable-length signed 64-bit integer
    /// starting at the current index.
    pub fn read_var_int64(&mut self) -> Result<i64, DecodeError> {
        let value = self.read_var_uint(10)?;
        Ok(((value >> 1) as i64) ^ -((value & 1) as i64))
    }

    /// Reads an unsigned little-endian base-128 varint of at most `max_bytes`
    /// bytes.
    fn read_var_uint(&mut self, max_bytes: usize) -> Result<u64, DecodeError> {
        let start = self.index;
        let mut shift: u32 = 0;
        let mut result: u64 = 0;

        for _ in 0..max_bytes {
            let byte = self.read_byte()?;

            // The tenth byte only has room for the top bit of a u64
            if shift == 63 && (byte & 0x7E) != 0 {
                return Err(DecodeError::malformed(start, "varint overflows 64 bits"));
            }
            result |= ((byte & 127) as u64) << shift;

            if (byte & 128) == 0 {
                return Ok(result);
            }
            shift += 7;
        }

        Err(DecodeError::malformed(
            start,
            format!("varint is longer than {} bytes", max_bytes),
        ))
    }

    /// Try to read a 32-bit little-endian IEEE-754 float.
    pub fn read_float(&mut self) -> Result<f32, DecodeError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.read_bytes(4)?);
        Ok(f32::from_le_bytes(raw))
    }

    /// Try to read a 64-bit little-endian IEEE-754 float.
    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.read_bytes(8)?);
        Ok(f64::from_le_bytes(raw))
    }

    /// Try to read a `long` length prefix. Negative lengths are malformed.
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let start = self.index;
        let len = self.read_var_int64()?;
        usize::try_from(len)
            .map_err(|_| DecodeError::malformed(start, format!("invalid length {}", len)))
    }

    /// Try to read a length-prefixed run of raw bytes. The returned slice
    /// aliases the underlying memory.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    /// Try to read a length-prefixed UTF-8 string. No terminator is part of
    /// the encoding, so none is part of the result.
    pub fn read_string(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.index;
        let bytes = self.read_length_prefixed()?;
        str::from_utf8(bytes).map_err(|_| DecodeError::malformed(start, "invalid UTF-8 in string"))
    }

    /// Try to read the item count that opens an array or map block. A negative
    /// count is followed by the block size in bytes, which is consumed and
    /// dropped. Returns `0` for the block that terminates the collection.
    pub fn read_block_count(&mut self) -> Result<u64, DecodeError> {
        let count = self.read_var_int64()?;
        if count < 0 {
            self.read_var_int64()?;
        }
        Ok(count.unsigned_abs())
    }
}

#[test]
fn read_bool() {
    let read = |bytes| ByteBuffer::new(bytes).read_bool();
    assert_eq!(read(&[]), Err(DecodeError::Truncated { offset: 0 }));
    assert_eq!(read(&[0]), Ok(false));
    assert_eq!(read(&[1]), Ok(true));
    assert_eq!(read(&[2]), Ok(true));
}

#[test]
fn read_byte() {
    let read = |bytes| ByteBuffer::new(bytes).read_byte();
    assert_eq!(read(&[]), Err(DecodeError::Truncated { offset: 0 }));
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[254]), Ok(254));
    assert_eq!(read(&[255]), Ok(255));
}

#[test]
fn read_bytes() {
    let read = |bytes, len| ByteBuffer::new(bytes).read_bytes(len);
    assert_eq!(read(&[], 0), Ok(vec![].as_slice()));
    assert!(read(&[], 1).is_err());
    assert_eq!(read(&[0], 1), Ok(vec![0].as_slice()));
    assert!(read(&[0], 2).is_err());
    assert!(read(&[0], usize::MAX).is_err());

    let mut bb = ByteBuffer::new(&[1, 2, 3, 4, 5]);
    assert_eq!(bb.read_bytes(3), Ok(vec![1, 2, 3].as_slice()));
    assert_eq!(bb.read_bytes(2), Ok(vec![4, 5].as_slice()));
    assert_eq!(bb.read_bytes(1), Err(DecodeError::Truncated { offset: 5 }));
}

#[test]
fn read_var_int() {
    let read = |bytes| ByteBuffer::new(bytes).read_var_int();
    assert!(read(&[]).is_err());
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[1]), Ok(-1));
    assert_eq!(read(&[2]), Ok(1));
    assert_eq!(read(&[3]), Ok(-2));
    assert_eq!(read(&[4]), Ok(2));
    assert_eq!(read(&[127]), Ok(-64));
    assert_eq!(read(&[128, 1]), Ok(64));
    assert_eq!(read(&[128, 2]), Ok(128));
    assert_eq!(read(&[129, 2]), Ok(-129));
    assert_eq!(read(&[253, 255, 7]), Ok(-65535));
    assert_eq!(read(&[254, 255, 7]), Ok(65535));
    assert_eq!(read(&[254, 255, 255, 255, 15]), Ok(2147483647));
    assert_eq!(read(&[255, 255, 255, 255, 15]), Ok(-2147483648));
}

#[test]
fn read_var_int_failures() {
    let read = |bytes| ByteBuffer::new(bytes).read_var_int();
    assert_eq!(read(&[128]), Err(DecodeError::Truncated { offset: 1 }));
    assert_eq!(read(&[255, 255, 255]), Err(DecodeError::Truncated { offset: 3 }));
    assert!(matches!(
        read(&[255, 255, 255, 255, 31]),
        Err(DecodeError::Malformed { offset: 0, .. })
    ));
    assert!(matches!(
        read(&[128, 128, 128, 128, 128, 0]),
        Err(DecodeError::Malformed { offset: 0, .. })
    ));
}

#[test]
fn read_var_int64() {
    let read = |bytes| ByteBuffer::new(bytes).read_var_int64();
    assert!(read(&[]).is_err());
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[1]), Ok(-1));
    assert_eq!(read(&[2]), Ok(1));
    assert_eq!(read(&[127]), Ok(-64));
    assert_eq!(read(&[128, 1]), Ok(64));
    assert_eq!(read(&[254, 255, 255, 255, 15]), Ok(2147483647));
    assert_eq!(read(&[255, 255, 255, 255, 15]), Ok(-2147483648));
    assert_eq!(read(&[128, 128, 128, 128, 16]), Ok(2147483648));
    assert_eq!(
        read(&[0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]),
        Ok(i64::MAX)
    );
    assert_eq!(
        read(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]),
        Ok(i64::MIN)
    );
}

#[test]
fn read_var_int64_failures() {
    let read = |bytes| ByteBuffer::new(bytes).read_var_int64();
    assert_eq!(
        read(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
        Err(DecodeError::Truncated { offset: 9 })
    );
    assert!(matches!(
        read(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02]),
        Err(DecodeError::Malformed { .. })
    ));
    assert!(matches!(
        read(&[0x80; 11]),
        Err(DecodeError::Malformed { .. })
    ));
}

#[test]
fn read_floats() {
    assert_eq!(ByteBuffer::new(&[0, 0, 0, 63]).read_float(), Ok(0.5));
    assert_eq!(ByteBuffer::new(&[0, 0, 128, 191]).read_float(), Ok(-1.0));
    assert!(ByteBuffer::new(&[0, 0, 128]).read_float().is_err());
    assert_eq!(
        ByteBuffer::new(&[0, 0, 0, 0, 0, 0, 224, 63]).read_double(),
        Ok(0.5)
    );
    assert_eq!(
        ByteBuffer::new(&[0x77, 0xBE, 0x9F, 0x1A, 0x2F, 0xDD, 0x5E, 0x40]).read_double(),
        Ok(123.456)
    );
    assert_eq!(
        ByteBuffer::new(&[0, 0, 0, 0, 0, 0, 224]).read_double(),
        Err(DecodeError::Truncated { offset: 0 })
    );
}

#[test]
fn read_bytes_past_end() {
    let mut bb = ByteBuffer::at(&[1, 2], 5);
    assert_eq!(bb.remaining(), 0);
    assert_eq!(bb.read_bytes(0), Err(DecodeError::Truncated { offset: 5 }));
    assert_eq!(bb.read_float(), Err(DecodeError::Truncated { offset: 5 }));

    let mut bb = ByteBuffer::at(&[1, 2], 2);
    assert_eq!(bb.read_bytes(0), Ok(&b""[..]));
    assert_eq!(bb.index(), 2);
}

#[test]
fn read_string() {
    let read = |bytes| ByteBuffer::new(bytes).read_string();
    assert!(read(&[]).is_err());
    assert_eq!(read(&[0]), Ok(""));
    assert_eq!(read(&[2, 104]), Ok("h"));
    assert_eq!(read(&[4, 104, 105]), Ok("hi"));
    assert_eq!(read(&[8, 240, 159, 141, 149]), Ok("🍕"));
    assert_eq!(read(&[4, 104]), Err(DecodeError::Truncated { offset: 1 }));
    assert!(matches!(read(&[1]), Err(DecodeError::Malformed { .. })));
    assert!(matches!(
        read(&[6, 97, 237, 160]),
        Err(DecodeError::Malformed { offset: 0, .. })
    ));
}

#[test]
fn read_block_count() {
    let read = |bytes| ByteBuffer::new(bytes).read_block_count();
    assert_eq!(read(&[0]), Ok(0));
    assert_eq!(read(&[4]), Ok(2));
    assert_eq!(read(&[3, 10]), Ok(2));
    assert_eq!(read(&[3]), Err(DecodeError::Truncated { offset: 1 }));

    let mut bb = ByteBuffer::new(&[3, 10, 7]);
    assert_eq!(bb.read_block_count(), Ok(2));
    assert_eq!(bb.index(), 2);
}

#[test]
fn read_sequence() {
    let mut bb = ByteBuffer::new(&[
        1, 0, 0, 0, 63, 8, 240, 159, 141, 149, 170, 180, 222, 117,
    ]);
    assert_eq!(bb.read_bool(), Ok(true));
    assert_eq!(bb.read_float(), Ok(0.5));
    assert_eq!(bb.read_string(), Ok("🍕"));
    assert_eq!(bb.read_var_int(), Ok(123456789));
    assert_eq!(bb.remaining(), 0);
}

/// A byte buffer meant for writing Avro binary data. It only knows the
/// primitive encodings and is mostly useful for assembling fixtures.
///
/// Example usage:
///
/// ```
/// let mut bb = lancaster_schema::ByteBufferMut::new();
/// bb.write_string("hi");
/// bb.write_var_int(-1);
/// assert_eq!(bb.data(), [4, 104, 105, 1]);
/// ```
///
#[derive(Default)]
pub struct ByteBufferMut {
    data: Vec<u8>,
}

impl ByteBufferMut {
    /// Creates an empty ByteBufferMut ready for writing.
    pub fn new() -> ByteBufferMut {
        ByteBufferMut { data: vec![] }
    }

    /// Consumes this buffer and returns the underlying backing store. Use this
    /// to get the data out when you're done writing to the buffer.
    pub fn data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a boolean value to the end of the buffer.
    pub fn write_bool(&mut self, value: bool) {
        self.data.push(if value { 1 } else { 0 });
    }

    /// Write a byte to the end of the buffer.
    pub fn write_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Write a raw byte slice to the end of the buffer.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
    }

    /// Write a zig-zag encoded variable-length signed 32-bit integer.
    pub fn write_var_int(&mut self, value: i32) {
        self.write_var_uint(((value << 1) ^ (value >> 31)) as u32 as u64);
    }

    /// Write a zig-zag encoded variable-length signed 64-bit integer.
    pub fn write_var_int64(&mut self, value: i64) {
        self.write_var_uint(((value << 1) ^ (value >> 63)) as u64);
    }

    fn write_var_uint(&mut self, mut value: u64) {
        loop {
            let byte = value as u8 & 127;
            value >>= 7;

            if value == 0 {
                self.write_byte(byte);
                return;
            }

            self.write_byte(byte | 128);
        }
    }

    /// Write a 32-bit little-endian float.
    pub fn write_float(&mut self, value: f32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a 64-bit little-endian float.
    pub fn write_double(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a length-prefixed run of raw bytes.
    pub fn write_length_prefixed(&mut self, value: &[u8]) {
        self.write_var_int64(value.len() as i64);
        self.write_bytes(value);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.write_length_prefixed(value.as_bytes());
    }
}

#[cfg(test)]
fn write_once(cb: fn(&mut ByteBufferMut)) -> Vec<u8> {
    let mut bb = ByteBufferMut::new();
    cb(&mut bb);
    bb.data()
}

#[test]
fn write_var_int() {
    assert_eq!(write_once(|bb| bb.write_var_int(0)), [0]);
    assert_eq!(write_once(|bb| bb.write_var_int(-1)), [1]);
    assert_eq!(write_once(|bb| bb.write_var_int(1)), [2]);
    assert_eq!(write_once(|bb| bb.write_var_int(-64)), [127]);
    assert_eq!(write_once(|bb| bb.write_var_int(64)), [128, 1]);
    assert_eq!(write_once(|bb| bb.write_var_int(-65535)), [253, 255, 7]);
    assert_eq!(
        write_once(|bb| bb.write_var_int(i32::MIN)),
        [255, 255, 255, 255, 15]
    );
}

#[test]
fn write_var_int64() {
    assert_eq!(write_once(|bb| bb.write_var_int64(0)), [0]);
    assert_eq!(write_once(|bb| bb.write_var_int64(-1)), [1]);
    assert_eq!(write_once(|bb| bb.write_var_int64(2147483648)), [128, 128, 128, 128, 16]);
    assert_eq!(
        write_once(|bb| bb.write_var_int64(i64::MAX)),
        [0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
    );
    assert_eq!(
        write_once(|bb| bb.write_var_int64(i64::MIN)),
        [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
    );
}

#[test]
fn write_sequence() {
    let mut bb = ByteBufferMut::new();
    bb.write_bool(true);
    bb.write_float(0.5);
    bb.write_string("🍕");
    bb.write_var_int(123456789);
    assert_eq!(
        bb.data(),
        [1, 0, 0, 0, 63, 8, 240, 159, 141, 149, 170, 180, 222, 117]
    );
}
