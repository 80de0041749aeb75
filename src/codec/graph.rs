//! Arena representation of a decoded object graph.
//!
//! # Design Decisions
//! - Nodes live in one `Vec` and containers hold `NodeId`s, so shared and
//!   cyclic subgraphs need no reference counting
//! - Object keys keep insertion order
//! - The graph is append-only while building; nodes are never removed

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

use crate::codec::DecodeError;

/// Index of a node inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single value in the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    Object(IndexMap<String, NodeId>),
}

impl Node {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }
}

/// A possibly cyclic value graph with a designated root.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a graph whose root is `null`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Null],
            root: NodeId(0),
        }
    }

    /// Create a graph with pre-sized storage and no nodes.
    /// The caller must push at least one node before use.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NodeId(0),
        }
    }

    /// Build a tree-shaped graph from a JSON value.
    pub fn from_value(value: &Value) -> Self {
        let mut graph = Self::with_capacity(1);
        let root = graph.push_value(value);
        graph.root = root;
        graph
    }

    fn push_value(&mut self, value: &Value) -> NodeId {
        match value {
            Value::Null => self.push(Node::Null),
            Value::Bool(b) => self.push(Node::Bool(*b)),
            Value::Number(n) => self.push(Node::Number(n.clone())),
            Value::String(s) => self.push(Node::String(s.clone())),
            Value::Array(items) => {
                let children = items.iter().map(|v| self.push_value(v)).collect();
                self.push(Node::Array(children))
            }
            Value::Object(map) => {
                let children = map
                    .iter()
                    .map(|(k, v)| (k.clone(), self.push_value(v)))
                    .collect();
                self.push(Node::Object(children))
            }
        }
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Look up `key` on the object at `id`.
    pub fn field(&self, id: NodeId, key: &str) -> Option<NodeId> {
        match self.get(id)? {
            Node::Object(map) => map.get(key).copied(),
            _ => None,
        }
    }

    /// Insert or replace `key` on the object at `id`.
    /// Returns false if `id` is not an object.
    pub fn set_field(&mut self, id: NodeId, key: impl Into<String>, child: NodeId) -> bool {
        match self.get_mut(id) {
            Some(Node::Object(map)) => {
                map.insert(key.into(), child);
                true
            }
            _ => false,
        }
    }

    /// Append `child` to the array at `id`.
    /// Returns false if `id` is not an array.
    pub fn push_item(&mut self, id: NodeId, child: NodeId) -> bool {
        match self.get_mut(id) {
            Some(Node::Array(items)) => {
                items.push(child);
                true
            }
            _ => false,
        }
    }

    /// Materialize the subgraph at `id` as a JSON tree.
    ///
    /// Shared subgraphs are copied at each use. A cycle fails with
    /// [`DecodeError::Cycle`]; trees nested deeper than [`MAX_TREE_DEPTH`]
    /// or larger than [`MAX_TREE_NODES`] fail with `TooDeep` / `TooLarge`.
    pub fn to_value(&self, id: NodeId) -> Result<Value, DecodeError> {
        self.to_value_with_limits(id, MAX_TREE_DEPTH, MAX_TREE_NODES)
    }

    /// [`to_value`](Self::to_value) with explicit depth and node budgets.
    pub fn to_value_with_limits(
        &self,
        id: NodeId,
        max_depth: usize,
        max_nodes: usize,
    ) -> Result<Value, DecodeError> {
        let mut work = vec![Step::Enter(id)];
        let mut values: Vec<Value> = Vec::new();
        // Containers on the current path, for cycle and depth checks
        let mut on_path: HashSet<NodeId> = HashSet::new();
        let mut emitted = 0usize;

        while let Some(step) = work.pop() {
            match step {
                Step::Enter(id) => {
                    emitted += 1;
                    if emitted > max_nodes {
                        return Err(DecodeError::TooLarge { limit: max_nodes });
                    }

                    let node = self.get(id).ok_or(DecodeError::DanglingReference {
                        index: id.0,
                        len: self.len(),
                    })?;

                    let children: Vec<NodeId> = match node {
                        Node::Null => {
                            values.push(Value::Null);
                            continue;
                        }
                        Node::Bool(b) => {
                            values.push(Value::Bool(*b));
                            continue;
                        }
                        Node::Number(n) => {
                            values.push(Value::Number(n.clone()));
                            continue;
                        }
                        Node::String(s) => {
                            values.push(Value::String(s.clone()));
                            continue;
                        }
                        Node::Array(items) => items.clone(),
                        Node::Object(map) => map.values().copied().collect(),
                    };

                    if on_path.contains(&id) {
                        return Err(DecodeError::Cycle { index: id.0 });
                    }
                    if on_path.len() >= max_depth {
                        return Err(DecodeError::TooDeep { limit: max_depth });
                    }
                    on_path.insert(id);

                    work.push(Step::Exit(id));
                    work.extend(children.into_iter().rev().map(Step::Enter));
                }
                Step::Exit(id) => {
                    on_path.remove(&id);
                    let value = match self.node(id) {
                        Node::Array(items) => {
                            let start = values.len() - items.len();
                            Value::Array(values.split_off(start))
                        }
                        Node::Object(map) => {
                            let start = values.len() - map.len();
                            let children = values.split_off(start);
                            let mut out = Map::with_capacity(map.len());
                            for (key, child) in map.keys().zip(children) {
                                out.insert(key.clone(), child);
                            }
                            Value::Object(out)
                        }
                        // Only containers get an exit step
                        _ => continue,
                    };
                    values.push(value);
                }
            }
        }

        values
            .pop()
            .ok_or(DecodeError::DanglingReference { index: id.0, len: self.len() })
    }
}

/// Deepest container nesting [`Graph::to_value`] will build.
/// Matches the recursion limit `serde_json` applies when parsing.
pub const MAX_TREE_DEPTH: usize = 128;

/// Most nodes [`Graph::to_value`] will emit, counting every copy of a shared
/// subgraph.
pub const MAX_TREE_NODES: usize = 100_000;

enum Step {
    Enter(NodeId),
    Exit(NodeId),
}
