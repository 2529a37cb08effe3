use std::collections::{HashMap, HashSet};
use crate::{error::SchemaError, utils::quote};
use lancaster_schema::{Node, Schema, TypeId};

/// Returns `Ok(())` if verification passed, or `Err(SchemaError::VerifierError(_))` otherwise.
pub fn verify_schema(schema: &Schema) -> Result<(), SchemaError> {
    let error = |msg: String| Err(SchemaError::VerifierError(msg));
    let defined = |id: TypeId| id < schema.len();

    if !defined(schema.root()) {
        return error(format!("The root type id {} is out of range", schema.root()));
    }

    // 1) Check duplicate type names
    let mut names = HashSet::new();
    for node in schema.nodes.iter().filter(|node| node.is_named()) {
        let name = node.name().unwrap_or_default();
        if !names.insert(name) {
            return error(format!("The type {} is defined twice", quote(name)));
        }
    }

    // 2) Check each node's own invariants
    for node in &schema.nodes {
        match node {
            Node::Record { name, fields } => {
                let mut seen = HashSet::new();
                for field in fields {
                    if !seen.insert(field.name.as_str()) {
                        return error(format!(
                            "The field {} is defined twice in {}",
                            quote(&field.name),
                            quote(name)
                        ));
                    }
                    if !defined(field.type_id) {
                        return error(format!(
                            "The type of field {} is not defined",
                            quote(&field.name)
                        ));
                    }
                }
            }

            Node::Enum { name, symbols } => {
                if symbols.is_empty() {
                    return error(format!("The enum {} has no symbols", quote(name)));
                }
                let mut seen = HashSet::new();
                for symbol in symbols {
                    if !seen.insert(symbol.as_str()) {
                        return error(format!(
                            "The symbol {} is used twice in {}",
                            quote(symbol),
                            quote(name)
                        ));
                    }
                }
            }

            Node::Array { items: child } | Node::Map { values: child } => {
                if !defined(*child) {
                    return error(format!("The {} item type is not defined", node.kind()));
                }
            }

            Node::Union { branches } => {
                let mut seen = HashSet::new();
                for &branch in branches {
                    let Some(resolved) = schema.resolve(branch) else {
                        return error("A union branch is not defined".to_owned());
                    };
                    let branch_node = &schema.nodes[resolved];
                    if let Node::Union { .. } = branch_node {
                        return error("Unions may not immediately contain other unions".to_owned());
                    }
                    let key = branch_node.name().unwrap_or(branch_node.kind());
                    if !seen.insert(key) {
                        return error(format!("The union contains {} twice", quote(key)));
                    }
                }
            }

            Node::Link { name, target } => {
                let points_at_named = target
                    .and_then(|target| schema.node(target))
                    .map_or(false, Node::is_named);
                if !points_at_named {
                    return error(format!("The type {} is not defined", quote(name)));
                }
            }

            _ => {}
        }
    }

    // 3) Check that records do not contain themselves without an array, map
    //    or union in between, since such a value could never end
    let mut state: HashMap<TypeId, u8> = HashMap::new();
    fn check_recursion(
        type_id: TypeId,
        schema: &Schema,
        state: &mut HashMap<TypeId, u8>,
    ) -> Result<(), SchemaError> {
        let Some(type_id) = schema.resolve(type_id) else {
            return Ok(());
        };
        if let Node::Record { name, fields } = &schema.nodes[type_id] {
            match state.get(&type_id) {
                Some(1) => {
                    return Err(SchemaError::VerifierError(format!(
                        "Recursive nesting of {} is not allowed",
                        quote(name)
                    )))
                }
                Some(2) => return Ok(()),
                _ => {}
            }
            state.insert(type_id, 1);
            for field in fields {
                check_recursion(field.type_id, schema, state)?;
            }
            state.insert(type_id, 2);
        }
        Ok(())
    }

    for (type_id, node) in schema.nodes.iter().enumerate() {
        if let Node::Record { .. } = node {
            check_recursion(type_id, schema, &mut state)?;
        }
    }

    Ok(())
}
