use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{DecodeError, Graph, Node, NodeId};
use crate::request::files::FileRecord;

/// A decoded request, enriched by the interceptor before it reaches the
/// handler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRequest {
    pub original_url: String,

    /// Alternating header names and values, as received.
    pub raw_headers: Vec<String>,

    /// Path parameters. `None` when the handler declares no route pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, String>>,

    /// Lower-cased header map, always present.
    pub headers: IndexMap<String, String>,

    /// Uploaded files. `None` unless file handling is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileRecord>>,

    /// The full decoded object graph.
    #[serde(skip)]
    pub payload: Graph,
}

impl ParsedRequest {
    /// Read the transport fields from a decoded graph.
    ///
    /// The root must be an object. A missing `originalUrl` reads as "" and a
    /// missing `rawHeaders` as an empty list. Derived fields start empty.
    pub fn from_graph(payload: Graph) -> Result<Self, DecodeError> {
        let root = payload.root();
        let root_node = lookup(&payload, root)?;
        if !matches!(root_node, Node::Object(_)) {
            return Err(DecodeError::Shape(format!(
                "request payload must decode to an object, found {}",
                root_node.kind()
            )));
        }

        let original_url = match field_node(&payload, root, "originalUrl")? {
            None | Some(Node::Null) => String::new(),
            Some(Node::String(url)) => url.clone(),
            Some(other) => {
                return Err(DecodeError::Shape(format!(
                    "originalUrl must be a string, found {}",
                    other.kind()
                )))
            }
        };

        let raw_headers = match field_node(&payload, root, "rawHeaders")? {
            None | Some(Node::Null) => Vec::new(),
            Some(Node::Array(items)) => read_strings(&payload, items)?,
            Some(other) => {
                return Err(DecodeError::Shape(format!(
                    "rawHeaders must be an array, found {}",
                    other.kind()
                )))
            }
        };

        Ok(Self {
            original_url,
            raw_headers,
            params: None,
            headers: IndexMap::new(),
            files: None,
            payload,
        })
    }

    /// Look up a normalized header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.as_ref()?.get(name).map(String::as_str)
    }

    /// Node of a top-level field of the decoded request object.
    pub fn field(&self, key: &str) -> Option<NodeId> {
        self.payload.field(self.payload.root(), key)
    }

    /// A top-level field as a JSON tree, e.g. `body`.
    /// Fails if the field's subgraph is cyclic.
    pub fn field_value(&self, key: &str) -> Option<Result<Value, DecodeError>> {
        self.field(key).map(|id| self.payload.to_value(id))
    }
}

pub(crate) fn lookup(graph: &Graph, id: NodeId) -> Result<&Node, DecodeError> {
    graph.get(id).ok_or(DecodeError::DanglingReference {
        index: id.index(),
        len: graph.len(),
    })
}

fn field_node<'g>(
    graph: &'g Graph,
    id: NodeId,
    key: &str,
) -> Result<Option<&'g Node>, DecodeError> {
    graph.field(id, key).map(|child| lookup(graph, child)).transpose()
}

fn read_strings(graph: &Graph, items: &[NodeId]) -> Result<Vec<String>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, id)| match lookup(graph, *id)? {
            Node::String(s) => Ok(s.clone()),
            other => Err(DecodeError::Shape(format!(
                "rawHeaders[{}] must be a string, found {}",
                i,
                other.kind()
            ))),
        })
        .collect()
}
