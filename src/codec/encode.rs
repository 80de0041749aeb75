//! Reference-table encoding.

use serde_json::Value;
use std::collections::HashMap;

use crate::codec::graph::{Graph, Node, NodeId};

/// Encode a graph into the reference-table format read by [`decode`].
///
/// Strings are interned by value and containers by node identity, so shared
/// and cyclic subgraphs are written once.
///
/// [`decode`]: crate::codec::decode
pub fn encode(graph: &Graph) -> String {
    let mut table = Table::default();
    table.intern(graph, graph.root());

    let mut output = Vec::new();
    let mut i = 0;
    while i < table.entries.len() {
        let id = table.entries[i];
        let entry = table.entry_value(graph, id);
        output.push(entry);
        i += 1;
    }

    Value::Array(output).to_string()
}

#[derive(Default)]
struct Table {
    entries: Vec<NodeId>,
    known_nodes: HashMap<NodeId, usize>,
    known_strings: HashMap<String, usize>,
}

impl Table {
    fn intern(&mut self, graph: &Graph, id: NodeId) -> usize {
        if let Node::String(s) = node(graph, id) {
            if let Some(index) = self.known_strings.get(s) {
                return *index;
            }
            let index = self.entries.len();
            self.entries.push(id);
            self.known_strings.insert(s.clone(), index);
            return index;
        }

        if let Some(index) = self.known_nodes.get(&id) {
            return *index;
        }
        let index = self.entries.len();
        self.entries.push(id);
        self.known_nodes.insert(id, index);
        index
    }

    fn entry_value(&mut self, graph: &Graph, id: NodeId) -> Value {
        match node(graph, id) {
            Node::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|child| self.child_value(graph, *child))
                    .collect(),
            ),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), self.child_value(graph, *child)))
                    .collect(),
            ),
            other => scalar(other),
        }
    }

    fn child_value(&mut self, graph: &Graph, id: NodeId) -> Value {
        let child = node(graph, id);
        if matches!(child, Node::String(_)) || child.is_container() {
            Value::String(self.intern(graph, id).to_string())
        } else {
            scalar(child)
        }
    }
}

fn node(graph: &Graph, id: NodeId) -> &Node {
    graph.get(id).unwrap_or(&Node::Null)
}

fn scalar(node: &Node) -> Value {
    match node {
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::String(s) => Value::String(s.clone()),
        _ => Value::Null,
    }
}
