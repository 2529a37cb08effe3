use std::collections::HashMap;

/// Index of a node inside a [Schema](struct.Schema.html).
pub type TypeId = usize;

/// A single named member of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_id: TypeId,
}

impl Field {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Field {
        Field {
            name: name.into(),
            type_id,
        }
    }
}

/// One node of the schema tree. Composite nodes refer to their children by
/// [TypeId](type.TypeId.html), so a tree may point back at itself through a
/// [Link](#variant.Link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Null,
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Bytes,
    String,
    Fixed { name: String, size: usize },
    Enum { name: String, symbols: Vec<String> },
    Array { items: TypeId },
    Map { values: TypeId },
    Record { name: String, fields: Vec<Field> },
    Union { branches: Vec<TypeId> },
    /// A reference to a named type. `target` is `None` while unresolved.
    Link { name: String, target: Option<TypeId> },
}

impl Node {
    /// The full name of a named type, or of the type a link refers to.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Fixed { name, .. }
            | Node::Enum { name, .. }
            | Node::Record { name, .. }
            | Node::Link { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The Avro type name of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Boolean => "boolean",
            Node::Int32 => "int",
            Node::Int64 => "long",
            Node::Float32 => "float",
            Node::Float64 => "double",
            Node::Bytes => "bytes",
            Node::String => "string",
            Node::Fixed { .. } => "fixed",
            Node::Enum { .. } => "enum",
            Node::Array { .. } => "array",
            Node::Map { .. } => "map",
            Node::Record { .. } => "record",
            Node::Union { .. } => "union",
            Node::Link { .. } => "link",
        }
    }

    /// Returns true for nodes that declare a name of their own.
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            Node::Fixed { .. } | Node::Enum { .. } | Node::Record { .. }
        )
    }
}

/// An immutable schema tree stored as an arena of nodes.
///
/// ```
/// use lancaster_schema::*;
///
/// let schema = Schema::new(vec![
///     Node::Record {
///         name: "Point".to_owned(),
///         fields: vec![Field::new("x", 1), Field::new("y", 1)],
///     },
///     Node::Int32,
/// ], 0);
///
/// assert_eq!(schema.get("Point"), Some(0));
/// assert_eq!(schema.node(1), Some(&Node::Int32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub nodes: Vec<Node>,
    pub root: TypeId,
    pub name_to_index: HashMap<String, TypeId>,
}

impl Schema {
    pub fn new(nodes: Vec<Node>, root: TypeId) -> Schema {
        let mut name_to_index = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            if node.is_named() {
                if let Some(name) = node.name() {
                    name_to_index.entry(name.to_owned()).or_insert(i);
                }
            }
        }
        Schema {
            nodes,
            root,
            name_to_index,
        }
    }

    /// The node every top-level value is decoded with.
    pub fn root(&self) -> TypeId {
        self.root
    }

    pub fn node(&self, type_id: TypeId) -> Option<&Node> {
        self.nodes.get(type_id)
    }

    /// Looks up a named type by its full name.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.name_to_index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follows links starting at `type_id` until a concrete node is reached.
    /// Returns `None` for dangling ids, unresolved links and link cycles.
    pub fn resolve(&self, mut type_id: TypeId) -> Option<TypeId> {
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(type_id)? {
                Node::Link { target, .. } => type_id = (*target)?,
                _ => return Some(type_id),
            }
        }
        None
    }

    /// True when every value of `type_id` encodes to zero bytes, which is the
    /// case for `null`, empty fixed types and records built only from those.
    pub fn is_zero_width(&self, type_id: TypeId) -> bool {
        let mut visiting = vec![false; self.nodes.len()];
        self.zero_width(type_id, &mut visiting)
    }

    fn zero_width(&self, type_id: TypeId, visiting: &mut [bool]) -> bool {
        let Some(type_id) = self.resolve(type_id) else {
            return false;
        };
        match &self.nodes[type_id] {
            Node::Null => true,
            Node::Fixed { size, .. } => *size == 0,
            Node::Record { fields, .. } => {
                if visiting[type_id] {
                    return false;
                }
                visiting[type_id] = true;
                let result = fields
                    .iter()
                    .all(|field| self.zero_width(field.type_id, visiting));
                visiting[type_id] = false;
                result
            }
            _ => false,
        }
    }
}
