//! Normalizing media host replies into playback references.
//!
//! The completion call answers with free-form text that is usually one JSON
//! object, sometimes followed by a second, possibly truncated one
//! (`{...}{...`). Only the first object is meaningful.

use crate::{UploadError, UploadResult};
use serde_json::Value;
use std::fmt;

const OBJECT_SEPARATOR: &str = "}{";
const IVR_MARKER: &str = "ivr";

/// What the driver got back from the final request of an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteReply {
    /// decoded reply of a single-shot upload
    Json(Value),
    /// raw body of a completion call
    Text(String),
}

impl fmt::Display for RemoteReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteReply::Json(value) => write!(f, "{}", value),
            RemoteReply::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    Structured(Value),
    /// the reply was a bare JSON string
    RawText(String),
    Unparseable(String),
}

pub fn parse_reply(reply: &RemoteReply) -> ParsedReply {
    match reply {
        RemoteReply::Json(value) => ParsedReply::Structured(value.clone()),
        RemoteReply::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> ParsedReply {
    let parsed = match text.find(OBJECT_SEPARATOR) {
        Some(end) => serde_json::from_str(&format!("{}}}", &text[..end])),
        None => serde_json::from_str(text),
    };

    match parsed {
        Ok(Value::String(s)) => ParsedReply::RawText(s),
        Ok(value) => ParsedReply::Structured(value),
        Err(_) => ParsedReply::Unparseable(text.to_owned()),
    }
}

/// `"/ivr/123/foo.mp3"` -> `"/123/foo"`
pub fn extract_reference(path: &str) -> Option<&str> {
    let start = path.find(IVR_MARKER)? + IVR_MARKER.len();
    let mut rest = &path[start..];

    if let Some(end) = rest.find(IVR_MARKER) {
        rest = &rest[..end];
    }
    if let Some(end) = rest.find('.') {
        rest = &rest[..end];
    }

    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

pub fn resolve_reference(reply: &RemoteReply) -> UploadResult<String> {
    match parse_reply(reply) {
        ParsedReply::Structured(value) => match value.get("path").and_then(Value::as_str) {
            Some(path) => extract_reference(path)
                .map(str::to_owned)
                .ok_or_else(|| UploadError::NoReference {
                    raw: path.to_owned(),
                }),
            None => Err(UploadError::NoReference {
                raw: value.to_string(),
            }),
        },
        ParsedReply::RawText(raw) => Err(UploadError::NoReference { raw }),
        ParsedReply::Unparseable(raw) => Err(UploadError::UnparseableReply { raw }),
    }
}
