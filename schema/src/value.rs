use crate::{
    bb::ByteBuffer,
    error::DecodeError,
    schema::{Node, Schema, TypeId},
};

use std::fmt;
use std::ops::Index;

/// How many composite values may be nested inside one another before the
/// input is rejected. Recursive schemas would otherwise let a hostile buffer
/// exhaust the stack.
pub const MAX_DEPTH: usize = 512;

/// Upper bound on the items of a single block whose encoding takes no bytes.
const MAX_ZERO_WIDTH_ITEMS: u64 = 1 << 20;

// Deep values continue on a fresh heap-allocated stack segment once less than
// the red zone is left on the current one.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

/// This type holds dynamic data decoded from an Avro binary buffer.
///
/// Records and maps are both represented as [Map](#variant.Map), an ordered
/// list of key/value pairs. Record entries follow the schema's field order and
/// map entries follow the order they appeared in the input. Values own all of
/// their data, so they outlive both the input buffer and the schema.
#[derive(Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    String(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A convenience method to extract the value out of a [Bool](#variant.Bool).
    /// Returns `false` for other value kinds.
    pub fn as_bool(&self) -> bool {
        match *self {
            Value::Bool(value) => value,
            _ => false,
        }
    }

    /// A convenience method to extract the value out of an [Int](#variant.Int).
    /// Returns `0` for other value kinds.
    pub fn as_int(&self) -> i64 {
        match *self {
            Value::Int(value) => value,
            _ => 0,
        }
    }

    /// A convenience method to extract the value out of a [Float](#variant.Float).
    /// Returns `0.0` for other value kinds.
    pub fn as_float(&self) -> f64 {
        match *self {
            Value::Float(value) => value,
            _ => 0.0,
        }
    }

    /// A convenience method to extract the value out of a [String](#variant.String).
    /// Returns `""` for other value kinds.
    pub fn as_str(&self) -> &str {
        match *self {
            Value::String(ref value) => value.as_str(),
            _ => "",
        }
    }

    /// A convenience method to extract the value out of [Bytes](#variant.Bytes).
    /// Returns an empty slice for other value kinds.
    pub fn as_bytes(&self) -> &[u8] {
        match *self {
            Value::Bytes(ref value) => value.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to get the items out of a [List](#variant.List).
    /// Returns an empty slice for other value kinds.
    pub fn as_list(&self) -> &[Value] {
        match *self {
            Value::List(ref values) => values.as_slice(),
            _ => &[],
        }
    }

    /// A convenience method to get the entries out of a [Map](#variant.Map).
    /// Returns an empty slice for other value kinds.
    pub fn as_map(&self) -> &[(String, Value)] {
        match *self {
            Value::Map(ref entries) => entries.as_slice(),
            _ => &[],
        }
    }

    /// The number of items in a [List](#variant.List) or entries in a
    /// [Map](#variant.Map). Returns `0` for other value kinds.
    pub fn len(&self) -> usize {
        match *self {
            Value::List(ref values) => values.len(),
            Value::Map(ref entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A convenience method to look up the first entry named `key` in a
    /// [Map](#variant.Map). Returns `None` for other value kinds or if the key
    /// isn't present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Decodes one value of the schema's root type from the start of `bytes`.
    pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Value, DecodeError> {
        Value::decode_bb(schema, schema.root(), &mut ByteBuffer::new(bytes))
    }

    /// Decodes one value of `type_id` from `bytes` starting at `position`.
    /// Returns the value together with the position just past its encoding.
    pub fn decode_at(
        schema: &Schema,
        type_id: TypeId,
        bytes: &[u8],
        position: usize,
    ) -> Result<(Value, usize), DecodeError> {
        let mut bb = ByteBuffer::at(bytes, position);
        let value = Value::decode_bb(schema, type_id, &mut bb)?;
        Ok((value, bb.index()))
    }

    /// Decodes the type specified by `type_id` and `schema` from `bb` starting
    /// at the current index. After this function returns successfully, the
    /// current index will be advanced by exactly the size of the encoding. On
    /// failure the index is left wherever the failure was detected.
    pub fn decode_bb(
        schema: &Schema,
        type_id: TypeId,
        bb: &mut ByteBuffer,
    ) -> Result<Value, DecodeError> {
        Value::decode_nested(schema, type_id, bb, 0)
    }

    fn decode_nested(
        schema: &Schema,
        type_id: TypeId,
        bb: &mut ByteBuffer,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            Value::decode_node(schema, type_id, bb, depth)
        })
    }

    fn decode_node(
        schema: &Schema,
        type_id: TypeId,
        bb: &mut ByteBuffer,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let type_id = schema
            .resolve(type_id)
            .ok_or_else(|| unresolved(schema, type_id))?;

        match &schema.nodes[type_id] {
            Node::Null => Ok(Value::Null),
            Node::Boolean => Ok(Value::Bool(bb.read_bool()?)),
            Node::Int32 => Ok(Value::Int(i64::from(bb.read_var_int()?))),
            Node::Int64 => Ok(Value::Int(bb.read_var_int64()?)),
            Node::Float32 => Ok(Value::Float(f64::from(bb.read_float()?))),
            Node::Float64 => Ok(Value::Float(bb.read_double()?)),
            Node::Bytes => Ok(Value::Bytes(bb.read_length_prefixed()?.to_vec())),
            Node::String => Ok(Value::String(bb.read_string()?.to_owned())),
            Node::Fixed { size, .. } => Ok(Value::Bytes(bb.read_bytes(*size)?.to_vec())),

            Node::Enum { symbols, .. } => {
                let start = bb.index();
                let index = bb.read_var_int()?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| symbols.get(i))
                    .map(|symbol| Value::String(symbol.clone()))
                    .ok_or_else(|| bad_symbol(schema, type_id, start, index))
            }

            Node::Array { items } => {
                let depth = nest(bb, depth)?;
                let mut list = Vec::new();
                loop {
                    let count = Value::read_block(schema, *items, bb)?;
                    if count == 0 {
                        return Ok(Value::List(list));
                    }
                    list.reserve(count.min(bb.remaining() as u64) as usize);
                    for _ in 0..count {
                        list.push(Value::decode_nested(schema, *items, bb, depth)?);
                    }
                }
            }

            Node::Map { values } => {
                let depth = nest(bb, depth)?;
                let mut entries = Vec::new();
                loop {
                    let count = bb.read_block_count()?;
                    if count == 0 {
                        return Ok(Value::Map(entries));
                    }
                    // Every entry spends at least one byte on its key
                    if count > bb.remaining() as u64 {
                        return Err(DecodeError::Truncated {
                            offset: bb.data().len(),
                        });
                    }
                    entries.reserve(count as usize);
                    for _ in 0..count {
                        let key = bb.read_string()?.to_owned();
                        let value = Value::decode_nested(schema, *values, bb, depth)?;
                        entries.push((key, value));
                    }
                }
            }

            Node::Record { fields, .. } => {
                let depth = nest(bb, depth)?;
                let mut entries = Vec::with_capacity(fields.len());
                for field in fields {
                    let value = Value::decode_nested(schema, field.type_id, bb, depth)?;
                    entries.push((field.name.clone(), value));
                }
                Ok(Value::Map(entries))
            }

            Node::Union { branches } => {
                let start = bb.index();
                let discriminant = bb.read_var_int()?;
                let branch = usize::try_from(discriminant)
                    .ok()
                    .and_then(|i| branches.get(i).copied())
                    .ok_or_else(|| bad_branch(start, discriminant, branches.len()))?;

                // A union only adds a level when it holds another union directly
                let depth = match schema.resolve(branch).and_then(|id| schema.node(id)) {
                    Some(Node::Union { .. }) => nest(bb, depth)?,
                    _ => depth,
                };
                Value::decode_nested(schema, branch, bb, depth)
            }

            Node::Link { .. } => Err(unresolved(schema, type_id)),
        }
    }

    /// Reads the count of the next array block and rejects counts the rest of
    /// the buffer cannot possibly hold.
    fn read_block(schema: &Schema, items: TypeId, bb: &mut ByteBuffer) -> Result<u64, DecodeError> {
        let start = bb.index();
        let count = bb.read_block_count()?;
        if count > bb.remaining() as u64 {
            if schema.resolve(items).is_none() {
                return Err(unresolved(schema, items));
            }
            if !schema.is_zero_width(items) {
                return Err(DecodeError::Truncated {
                    offset: bb.data().len(),
                });
            }
            if count > MAX_ZERO_WIDTH_ITEMS {
                return Err(DecodeError::malformed(
                    start,
                    format!("block of {} empty items is too large", count),
                ));
            }
        }
        Ok(count)
    }
}

/// Enters one more level of nesting, failing once `MAX_DEPTH` is reached.
#[inline]
fn nest(bb: &ByteBuffer, depth: usize) -> Result<usize, DecodeError> {
    if depth >= MAX_DEPTH {
        return Err(too_deep(bb.index()));
    }
    Ok(depth + 1)
}

#[cold]
fn too_deep(offset: usize) -> DecodeError {
    DecodeError::malformed(
        offset,
        format!("values are nested more than {} levels deep", MAX_DEPTH),
    )
}

#[cold]
fn unresolved(schema: &Schema, type_id: TypeId) -> DecodeError {
    match schema.node(type_id) {
        Some(Node::Link { name, .. }) => DecodeError::Unsupported(format!(
            "reference to named type {} does not resolve to a definition",
            name
        )),
        Some(_) => DecodeError::Unsupported(format!("type id {} cannot be resolved", type_id)),
        None => DecodeError::Unsupported(format!(
            "type id {} is not part of the schema",
            type_id
        )),
    }
}

#[cold]
fn bad_symbol(schema: &Schema, type_id: TypeId, offset: usize, index: i32) -> DecodeError {
    let name = schema.node(type_id).and_then(Node::name).unwrap_or_default();
    DecodeError::malformed(
        offset,
        format!("index {} is not a symbol of enum {}", index, name),
    )
}

#[cold]
fn bad_branch(offset: usize, discriminant: i32, branches: usize) -> DecodeError {
    DecodeError::malformed(
        offset,
        format!(
            "union branch {} is out of range for {} branches",
            discriminant, branches
        ),
    )
}

impl Index<usize> for Value {
    type Output = Value;

    /// A convenience method that adds support for `self[index]` expressions.
    /// It will panic if this value isn't a [List](#variant.List) or if the
    /// provided index is out of bounds.
    fn index(&self, index: usize) -> &Value {
        match *self {
            Value::List(ref values) => &values[index],
            _ => panic!("cannot index into a non-list value"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => value.fmt(f),
            Value::Int(value) => value.fmt(f),
            Value::Float(value) => value.fmt(f),
            Value::Bytes(ref value) => write!(f, "b\"{}\"", value.escape_ascii()),
            Value::String(ref value) => value.fmt(f),
            Value::List(ref values) => values.fmt(f),

            Value::Map(ref entries) => {
                let mut first = true;
                write!(f, "{{")?;

                for (key, value) in entries {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", key, value)?;
                }

                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bb::ByteBufferMut;
    use crate::schema::Field;

    fn single(node: Node) -> Schema {
        Schema::new(vec![node], 0)
    }

    fn entry(key: &str, value: Value) -> (String, Value) {
        (key.to_owned(), value)
    }

    #[test]
    fn value_basic() {
        let value = Value::List(vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(-1),
            Value::Float(0.5),
            Value::Bytes(vec![0, b'a']),
            Value::String("abc".to_owned()),
            Value::Map(vec![
                entry("key2", Value::String("value2".to_owned())),
                entry("key1", Value::String("value1".to_owned())),
            ]),
        ]);

        assert_eq!(value.len(), 7);
        assert!(value[0].is_null());
        assert_eq!(value[1].as_bool(), true);
        assert_eq!(value[2].as_int(), -1);
        assert_eq!(value[3].as_float(), 0.5);
        assert_eq!(value[4].as_bytes(), b"\0a");
        assert_eq!(value[5].as_str(), "abc");
        assert_eq!(value.get("key1"), None);
        assert_eq!(
            value[6].get("key1"),
            Some(&Value::String("value1".to_owned()))
        );
        assert_eq!(value[6].as_map()[0].0, "key2");

        assert_eq!(
            format!("{:?}", value),
            "[null, true, -1, 0.5, b\"\\x00a\", \"abc\", {key2: \"value2\", key1: \"value1\"}]"
        );
    }

    #[test]
    fn decode_primitives() {
        assert_eq!(Value::decode(&single(Node::Null), &[]), Ok(Value::Null));
        assert_eq!(Value::decode(&single(Node::Boolean), &[0]), Ok(Value::Bool(false)));
        assert_eq!(Value::decode(&single(Node::Boolean), &[7]), Ok(Value::Bool(true)));
        assert_eq!(Value::decode(&single(Node::Int32), &[1]), Ok(Value::Int(-1)));
        assert_eq!(
            Value::decode(&single(Node::Int64), &[128, 128, 128, 128, 16]),
            Ok(Value::Int(2147483648))
        );
        assert_eq!(
            Value::decode(&single(Node::Float32), &[0, 0, 0, 63]),
            Ok(Value::Float(0.5))
        );
        assert_eq!(
            Value::decode(&single(Node::Float64), &[0, 0, 0, 0, 0, 0, 224, 63]),
            Ok(Value::Float(0.5))
        );
        assert_eq!(
            Value::decode(&single(Node::Bytes), &[4, 0, 255]),
            Ok(Value::Bytes(vec![0, 255]))
        );
        assert_eq!(
            Value::decode(&single(Node::String), &[0x04, b'h', b'i']),
            Ok(Value::String("hi".to_owned()))
        );
        assert_eq!(
            Value::decode(
                &single(Node::Fixed {
                    name: "MD5".to_owned(),
                    size: 3
                }),
                &[1, 2, 3, 4]
            ),
            Ok(Value::Bytes(vec![1, 2, 3]))
        );
    }

    #[test]
    fn decode_enum() {
        let schema = single(Node::Enum {
            name: "Suit".to_owned(),
            symbols: vec!["CLUBS".to_owned(), "HEARTS".to_owned()],
        });
        assert_eq!(
            Value::decode(&schema, &[2]),
            Ok(Value::String("HEARTS".to_owned()))
        );
        assert!(matches!(
            Value::decode(&schema, &[4]),
            Err(DecodeError::Malformed { offset: 0, .. })
        ));
        assert!(matches!(
            Value::decode(&schema, &[1]),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn decode_array_blocks() {
        let schema = Schema::new(vec![Node::Array { items: 1 }, Node::Int32], 0);
        assert_eq!(
            Value::decode(&schema, &[0x04, 0x02, 0x01, 0x00]),
            Ok(Value::List(vec![Value::Int(1), Value::Int(-1)]))
        );
        assert_eq!(Value::decode(&schema, &[0]), Ok(Value::List(vec![])));

        // One block of 1 item, then a sized block of 2 items (size 2 bytes)
        assert_eq!(
            Value::decode(&schema, &[0x02, 0x06, 0x03, 0x04, 0x08, 0x0A, 0x00]),
            Ok(Value::List(vec![Value::Int(3), Value::Int(4), Value::Int(5)]))
        );

        assert!(Value::decode(&schema, &[0x04, 0x02, 0x01]).unwrap_err().is_truncated());
        assert!(Value::decode(&schema, &[0x7E, 0x02]).unwrap_err().is_truncated());
    }

    #[test]
    fn decode_zero_width_items() {
        let schema = Schema::new(vec![Node::Array { items: 1 }, Node::Null], 0);
        assert_eq!(
            Value::decode(&schema, &[0x06, 0x00]),
            Ok(Value::List(vec![Value::Null, Value::Null, Value::Null]))
        );

        let mut bb = ByteBufferMut::new();
        bb.write_var_int64(i64::MAX);
        bb.write_byte(0);
        assert!(matches!(
            Value::decode(&schema, &bb.data()),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn decode_map_keeps_order() {
        let schema = Schema::new(vec![Node::Map { values: 1 }, Node::Int64], 0);
        let mut bb = ByteBufferMut::new();
        bb.write_var_int64(3);
        bb.write_string("zeta");
        bb.write_var_int64(1);
        bb.write_string("alpha");
        bb.write_var_int64(2);
        bb.write_string("zeta");
        bb.write_var_int64(3);
        bb.write_var_int64(0);

        assert_eq!(
            Value::decode(&schema, &bb.data()),
            Ok(Value::Map(vec![
                entry("zeta", Value::Int(1)),
                entry("alpha", Value::Int(2)),
                entry("zeta", Value::Int(3)),
            ]))
        );
    }

    #[test]
    fn decode_record_in_field_order() {
        let schema = Schema::new(
            vec![
                Node::Record {
                    name: "Person".to_owned(),
                    fields: vec![
                        Field::new("name", 1),
                        Field::new("age", 2),
                        Field::new("emails", 3),
                    ],
                },
                Node::String,
                Node::Int32,
                Node::Array { items: 1 },
            ],
            0,
        );

        let mut bb = ByteBufferMut::new();
        bb.write_string("Ada");
        bb.write_var_int(36);
        bb.write_var_int64(1);
        bb.write_string("ada@example.com");
        bb.write_var_int64(0);
        let bytes = bb.data();

        let (value, end) = Value::decode_at(&schema, 0, &bytes, 0).unwrap();
        assert_eq!(end, bytes.len());
        assert_eq!(
            value,
            Value::Map(vec![
                entry("name", Value::String("Ada".to_owned())),
                entry("age", Value::Int(36)),
                entry(
                    "emails",
                    Value::List(vec![Value::String("ada@example.com".to_owned())])
                ),
            ])
        );
        assert_eq!(
            format!("{:?}", value),
            "{name: \"Ada\", age: 36, emails: [\"ada@example.com\"]}"
        );
    }

    #[test]
    fn decode_union() {
        let schema = Schema::new(
            vec![
                Node::Union {
                    branches: vec![1, 2],
                },
                Node::Null,
                Node::String,
            ],
            0,
        );
        assert_eq!(Value::decode(&schema, &[0]), Ok(Value::Null));
        assert_eq!(
            Value::decode(&schema, &[2, 4, b'h', b'i']),
            Ok(Value::String("hi".to_owned()))
        );
        assert!(matches!(
            Value::decode(&schema, &[4, 4, b'h', b'i']),
            Err(DecodeError::Malformed { offset: 0, .. })
        ));
        assert!(matches!(
            Value::decode(&schema, &[1]),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn decode_at_offset() {
        let schema = single(Node::Int32);
        let bytes = [2, 4, 6];
        assert_eq!(Value::decode_at(&schema, 0, &bytes, 1), Ok((Value::Int(2), 2)));
        assert_eq!(
            Value::decode_at(&schema, 0, &bytes, 3),
            Err(DecodeError::Truncated { offset: 3 })
        );

        let empty = single(Node::Fixed {
            name: "Empty".to_owned(),
            size: 0,
        });
        assert_eq!(Value::decode_at(&empty, 0, &bytes, 3), Ok((Value::Bytes(vec![]), 3)));
        assert_eq!(
            Value::decode_at(&empty, 0, &bytes, 5),
            Err(DecodeError::Truncated { offset: 5 })
        );
    }

    // record Node { long value; union { null, Node } next; }
    fn linked_list() -> Schema {
        Schema::new(
            vec![
                Node::Record {
                    name: "Node".to_owned(),
                    fields: vec![Field::new("value", 1), Field::new("next", 2)],
                },
                Node::Int64,
                Node::Union {
                    branches: vec![3, 4],
                },
                Node::Null,
                Node::Link {
                    name: "Node".to_owned(),
                    target: Some(0),
                },
            ],
            0,
        )
    }

    fn encode_list(len: usize) -> Vec<u8> {
        let mut bb = ByteBufferMut::new();
        for i in 0..len {
            bb.write_var_int64(i as i64);
            bb.write_var_int(if i + 1 < len { 1 } else { 0 });
        }
        bb.data()
    }

    fn list_len(mut value: &Value) -> usize {
        let mut len = 1;
        while let Some(next) = value.get("next").filter(|next| !next.is_null()) {
            len += 1;
            value = next;
        }
        len
    }

    #[test]
    fn decode_recursive_link() {
        let schema = linked_list();

        assert_eq!(
            Value::decode(&schema, &[2, 2, 4, 0]),
            Ok(Value::Map(vec![
                entry("value", Value::Int(1)),
                entry(
                    "next",
                    Value::Map(vec![entry("value", Value::Int(2)), entry("next", Value::Null)])
                ),
            ]))
        );

        // Each element costs one level, so the limit is exactly MAX_DEPTH
        let value = Value::decode(&schema, &encode_list(MAX_DEPTH)).unwrap();
        assert_eq!(list_len(&value), MAX_DEPTH);
        assert!(matches!(
            Value::decode(&schema, &encode_list(MAX_DEPTH + 1)),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn decode_long_list_on_small_stack() {
        let bytes = encode_list(500);
        let handle = std::thread::Builder::new()
            .stack_size(1024 * 1024)
            .spawn(move || {
                let schema = linked_list();
                let deep = Value::decode(&schema, &bytes).map(|value| list_len(&value));
                let too_deep = Value::decode(&schema, &encode_list(10_000));
                (deep, too_deep)
            })
            .unwrap();

        let (deep, too_deep) = handle.join().unwrap();
        assert_eq!(deep, Ok(500));
        assert!(matches!(too_deep, Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn decode_nested_unions_count_depth() {
        // A hand-built union whose only branch is itself
        let schema = single(Node::Union { branches: vec![0] });
        assert!(matches!(
            Value::decode(&schema, &vec![0; 4 * MAX_DEPTH]),
            Err(DecodeError::Malformed { .. })
        ));

        // Links that point at each other never reach a definition
        let cycle = Schema::new(
            vec![
                Node::Link { name: "A".to_owned(), target: Some(1) },
                Node::Link { name: "B".to_owned(), target: Some(0) },
            ],
            0,
        );
        assert!(matches!(
            Value::decode(&cycle, &[0]),
            Err(DecodeError::Unsupported(_))
        ));
    }

    #[test]
    fn decode_unresolved_link() {
        let schema = single(Node::Link {
            name: "Later".to_owned(),
            target: None,
        });
        assert!(matches!(
            Value::decode(&schema, &[0]),
            Err(DecodeError::Unsupported(_))
        ));

        let dangling = Schema::new(vec![Node::Array { items: 7 }], 0);
        assert!(matches!(
            Value::decode(&dangling, &[2, 0]),
            Err(DecodeError::Unsupported(_))
        ));

        // A large block of items that can never decode is not a truncation
        let array = Schema::new(
            vec![
                Node::Array { items: 1 },
                Node::Link {
                    name: "Later".to_owned(),
                    target: None,
                },
            ],
            0,
        );
        assert!(matches!(
            Value::decode(&array, &[0x7E]),
            Err(DecodeError::Unsupported(_))
        ));
        assert!(matches!(
            Value::decode(&dangling, &[0x7E]),
            Err(DecodeError::Unsupported(_))
        ));
    }
}
