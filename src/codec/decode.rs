//! Reference-table decoding.
//!
//! # Responsibilities
//! - Parse the table with `serde_json`
//! - Reserve one node per table entry so references can point forward
//! - Resolve nested strings into node ids
//!
//! # Design Decisions
//! - References must be canonical decimal indices ("7", not "07" or "+7")
//! - Inline containers nested in an entry get fresh nodes and their
//!   children are resolved like any other container
//! - Single pass over the table, no recursion through references

use serde_json::Value;

use crate::codec::graph::{Graph, Node, NodeId};
use crate::codec::{value_kind, DecodeError};

/// Decode a reference-table payload into a graph rooted at entry 0.
pub fn decode(raw: &str) -> Result<Graph, DecodeError> {
    let table: Value = serde_json::from_str(raw)?;

    let entries = match table {
        Value::Array(entries) => entries,
        other => {
            return Err(DecodeError::NotATable {
                found: value_kind(&other),
            })
        }
    };

    if entries.is_empty() {
        return Err(DecodeError::EmptyTable);
    }

    let len = entries.len();
    let mut graph = Graph::with_capacity(len);
    for _ in 0..len {
        graph.push(Node::Null);
    }

    for (index, entry) in entries.into_iter().enumerate() {
        let node = match entry {
            // Top-level strings are values, not references
            Value::String(s) => Node::String(s),
            other => resolve(&mut graph, other, len)?,
        };
        if let Some(slot) = graph.get_mut(NodeId(index)) {
            *slot = node;
        }
    }

    graph.set_root(NodeId(0));
    Ok(graph)
}

fn resolve(graph: &mut Graph, value: Value, len: usize) -> Result<Node, DecodeError> {
    let node = match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => Node::Number(n),
        Value::String(s) => Node::String(s),
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                children.push(resolve_child(graph, item, len)?);
            }
            Node::Array(children)
        }
        Value::Object(map) => {
            let mut children = indexmap::IndexMap::with_capacity(map.len());
            for (key, item) in map {
                children.insert(key, resolve_child(graph, item, len)?);
            }
            Node::Object(children)
        }
    };
    Ok(node)
}

fn resolve_child(graph: &mut Graph, value: Value, len: usize) -> Result<NodeId, DecodeError> {
    match value {
        Value::String(reference) => parse_reference(&reference, len),
        other => {
            let node = resolve(graph, other, len)?;
            Ok(graph.push(node))
        }
    }
}

fn parse_reference(reference: &str, len: usize) -> Result<NodeId, DecodeError> {
    let canonical = !reference.is_empty()
        && reference.bytes().all(|b| b.is_ascii_digit())
        && (reference == "0" || !reference.starts_with('0'));

    if !canonical {
        return Err(DecodeError::InvalidReference(reference.to_string()));
    }

    let index: usize = reference
        .parse()
        .map_err(|_| DecodeError::InvalidReference(reference.to_string()))?;

    if index >= len {
        return Err(DecodeError::DanglingReference { index, len });
    }

    Ok(NodeId(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_simple_object() {
        // flatted.stringify({ originalUrl: "/users/42", n: 1 })
        let graph = decode(r#"[{"originalUrl":"1","n":1},"/users/42"]"#).unwrap();
        let value = graph.to_value(graph.root()).unwrap();
        assert_eq!(value, json!({ "originalUrl": "/users/42", "n": 1 }));
    }

    #[test]
    fn test_decode_self_cycle() {
        // const a = {}; a.self = a; flatted.stringify(a)
        let graph = decode(r#"[{"self":"0"}]"#).unwrap();
        let root = graph.root();
        assert_eq!(graph.field(root, "self"), Some(root));
    }

    #[test]
    fn test_decode_shared_reference() {
        // const s = { v: true }; flatted.stringify({ a: s, b: s })
        let graph = decode(r#"[{"a":"1","b":"1"},{"v":true}]"#).unwrap();
        let root = graph.root();
        let a = graph.field(root, "a").unwrap();
        let b = graph.field(root, "b").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_string_root() {
        let graph = decode(r#"["hello"]"#).unwrap();
        assert_eq!(graph.node(graph.root()).as_str(), Some("hello"));
    }

    #[test]
    fn test_decode_inline_container() {
        let graph = decode(r#"[{"list":[1,"1"]},"x"]"#).unwrap();
        let value = graph.to_value(graph.root()).unwrap();
        assert_eq!(value, json!({ "list": [1, "x"] }));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode("{not json"), Err(DecodeError::Json(_))));
        assert!(matches!(
            decode(r#"{"a":1}"#),
            Err(DecodeError::NotATable { found: "object" })
        ));
        assert!(matches!(decode("[]"), Err(DecodeError::EmptyTable)));
        assert!(matches!(
            decode(r#"[{"a":"5"}]"#),
            Err(DecodeError::DanglingReference { index: 5, len: 1 })
        ));
        assert!(matches!(
            decode(r#"[{"a":"abc"}]"#),
            Err(DecodeError::InvalidReference(_))
        ));
        assert!(matches!(
            decode(r#"[{"a":"01"},"x"]"#),
            Err(DecodeError::InvalidReference(_))
        ));
    }
}
