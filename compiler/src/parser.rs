use crate::{
    error::SchemaError,
    utils::{full_name, quote},
};
use lancaster_schema::{Field, Node, Schema, TypeId};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::collections::HashMap;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

pub const PRIMITIVE_TYPES: [&str; 8] = [
    "null", "boolean", "int", "long", "float", "double", "bytes", "string",
];

fn primitive(name: &str) -> Option<Node> {
    match name {
        "null" => Some(Node::Null),
        "boolean" => Some(Node::Boolean),
        "int" => Some(Node::Int32),
        "long" => Some(Node::Int64),
        "float" => Some(Node::Float32),
        "double" => Some(Node::Float64),
        "bytes" => Some(Node::Bytes),
        "string" => Some(Node::String),
        _ => None,
    }
}

/// Builds a schema tree out of parsed Avro JSON.
///
/// Every reference to a named type becomes a [Node::Link] to the node that
/// defined it. A record's name is visible inside its own fields, which is how
/// recursive types are written. Names must be defined before they are used.
pub fn parse_schema(json: &Json) -> Result<Schema, SchemaError> {
    let mut parser = Parser::default();
    let root = parser.parse(json, "")?;
    Ok(Schema::new(parser.nodes, root))
}

#[derive(Default)]
struct Parser {
    nodes: Vec<Node>,
    names: HashMap<String, TypeId>,
}

impl Parser {
    fn push(&mut self, node: Node) -> TypeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn parse(&mut self, json: &Json, namespace: &str) -> Result<TypeId, SchemaError> {
        match json {
            Json::String(name) => self.parse_reference(name, namespace),
            Json::Array(branches) => {
                let branches = branches
                    .iter()
                    .map(|branch| self.parse(branch, namespace))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.push(Node::Union { branches }))
            }
            Json::Object(object) => self.parse_object(object, namespace),
            other => Err(SchemaError::InvalidSchema(format!(
                "Expected a type but found {}",
                other
            ))),
        }
    }

    fn parse_reference(&mut self, name: &str, namespace: &str) -> Result<TypeId, SchemaError> {
        if let Some(node) = primitive(name) {
            return Ok(self.push(node));
        }

        let (name, target) = self
            .lookup(name, namespace)
            .ok_or_else(|| SchemaError::UnknownType(name.to_owned()))?;
        Ok(self.push(Node::Link {
            name,
            target: Some(target),
        }))
    }

    fn lookup(&self, name: &str, namespace: &str) -> Option<(String, TypeId)> {
        if !name.contains('.') {
            let qualified = full_name(namespace, name);
            if let Some(&id) = self.names.get(&qualified) {
                return Some((qualified, id));
            }
        }
        self.names.get(name).map(|&id| (name.to_owned(), id))
    }

    fn parse_object(
        &mut self,
        object: &Map<String, Json>,
        namespace: &str,
    ) -> Result<TypeId, SchemaError> {
        let type_name = match required(object, "type")? {
            Json::String(type_name) => type_name.as_str(),
            // {"type": {...}} and {"type": [...]} just wrap another type
            nested => return self.parse(nested, namespace),
        };

        match type_name {
            "record" | "error" => self.parse_record(object, namespace),

            "enum" => {
                let (name, _) = define(object, namespace)?;
                let symbols = required_array(object, "symbols")?
                    .iter()
                    .map(|symbol| match symbol {
                        Json::String(symbol) if IDENTIFIER.is_match(symbol) => Ok(symbol.clone()),
                        Json::String(symbol) => Err(SchemaError::InvalidName(symbol.clone())),
                        other => Err(SchemaError::InvalidSchema(format!(
                            "Enum {} has a non-string symbol {}",
                            quote(&name),
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let id = self.push(Node::Enum {
                    name: name.clone(),
                    symbols,
                });
                self.names.entry(name).or_insert(id);
                Ok(id)
            }

            "fixed" => {
                let (name, _) = define(object, namespace)?;
                let size = required(object, "size")?
                    .as_u64()
                    .and_then(|size| usize::try_from(size).ok())
                    .ok_or_else(|| {
                        SchemaError::InvalidSchema(format!(
                            "Fixed {} needs a non-negative integer size",
                            quote(&name)
                        ))
                    })?;
                let id = self.push(Node::Fixed {
                    name: name.clone(),
                    size,
                });
                self.names.entry(name).or_insert(id);
                Ok(id)
            }

            "array" => {
                let items = self.parse(required(object, "items")?, namespace)?;
                Ok(self.push(Node::Array { items }))
            }

            "map" => {
                let values = self.parse(required(object, "values")?, namespace)?;
                Ok(self.push(Node::Map { values }))
            }

            // {"type": "string", "logicalType": ...} and references to named types
            other => self.parse_reference(other, namespace),
        }
    }

    fn parse_record(
        &mut self,
        object: &Map<String, Json>,
        namespace: &str,
    ) -> Result<TypeId, SchemaError> {
        let (name, namespace) = define(object, namespace)?;

        // Register the name first so fields can refer back to the record
        let id = self.push(Node::Null);
        self.names.entry(name.clone()).or_insert(id);

        let mut fields = Vec::new();
        for field in required_array(object, "fields")? {
            let field = field.as_object().ok_or_else(|| {
                SchemaError::InvalidSchema(format!(
                    "Record {} has a field that is not an object",
                    quote(&name)
                ))
            })?;
            let field_name = required_str(field, "name")?;
            if !IDENTIFIER.is_match(field_name) {
                return Err(SchemaError::InvalidName(field_name.to_owned()));
            }
            let type_id = self.parse(required(field, "type")?, &namespace)?;
            fields.push(Field::new(field_name, type_id));
        }

        self.nodes[id] = Node::Record { name, fields };
        Ok(id)
    }
}

/// Works out the full name and the namespace its children inherit for a
/// named type definition.
fn define(object: &Map<String, Json>, namespace: &str) -> Result<(String, String), SchemaError> {
    let name = required_str(object, "name")?;

    let (name, namespace) = match name.rfind('.') {
        Some(dot) => (name.to_owned(), name[..dot].to_owned()),
        None => {
            let namespace = match object.get("namespace") {
                Some(Json::String(namespace)) => namespace.as_str(),
                Some(Json::Null) | None => namespace,
                Some(other) => {
                    return Err(SchemaError::InvalidSchema(format!(
                        "Namespace of {} must be a string, found {}",
                        quote(name),
                        other
                    )))
                }
            };
            (full_name(namespace, name), namespace.to_owned())
        }
    };

    let short = name.rsplit('.').next().unwrap_or_default();
    if PRIMITIVE_TYPES.contains(&short) || !name.split('.').all(|part| IDENTIFIER.is_match(part)) {
        return Err(SchemaError::InvalidName(name));
    }
    Ok((name, namespace))
}

fn required<'a>(object: &'a Map<String, Json>, key: &str) -> Result<&'a Json, SchemaError> {
    object.get(key).ok_or_else(|| {
        SchemaError::InvalidSchema(format!("Missing required attribute {}", quote(key)))
    })
}

fn required_str<'a>(object: &'a Map<String, Json>, key: &str) -> Result<&'a str, SchemaError> {
    required(object, key)?.as_str().ok_or_else(|| {
        SchemaError::InvalidSchema(format!("Attribute {} must be a string", quote(key)))
    })
}

fn required_array<'a>(
    object: &'a Map<String, Json>,
    key: &str,
) -> Result<&'a Vec<Json>, SchemaError> {
    required(object, key)?.as_array().ok_or_else(|| {
        SchemaError::InvalidSchema(format!("Attribute {} must be an array", quote(key)))
    })
}
