//! File attachments carried inside a request payload.

use serde::{Deserialize, Serialize};

use crate::codec::{DecodeError, Graph, Node};
use crate::request::parsed::lookup;

/// One uploaded file, as produced by a multipart parser upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub fieldname: String,
    pub buffer: FileBuffer,
    pub mimetype: String,
    pub size: u64,
    pub encoding: String,
    pub originalname: String,
}

/// Serialized file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBuffer {
    /// Buffer type tag, usually "Buffer".
    #[serde(rename = "type")]
    pub kind: String,
    pub data: FileData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileData {
    /// Raw bytes (`{"type":"Buffer","data":[104,105]}`).
    Bytes(Vec<u8>),
    /// Text-encoded contents, e.g. base64.
    Encoded(String),
}

/// Read the `files` field of the request object.
///
/// Absent or null means the payload carried no files.
pub(crate) fn decode_files(graph: &Graph) -> Result<Option<Vec<FileRecord>>, DecodeError> {
    let Some(id) = graph.field(graph.root(), "files") else {
        return Ok(None);
    };
    if matches!(lookup(graph, id)?, Node::Null) {
        return Ok(None);
    }

    let value = graph.to_value(id)?;
    let files = serde_json::from_value(value)
        .map_err(|e| DecodeError::Shape(format!("files: {}", e)))?;
    Ok(Some(files))
}
