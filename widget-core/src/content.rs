use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::RawPayload;

/// One unit of a tool-result envelope, as delivered by the host channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: "text".to_string(), text: Some(text.into()) }
    }
}

/// Why a tool-result envelope could not be turned into a payload.
///
/// Never fatal: the router logs the failure and substitutes a fixed message.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("tool result carried no content blocks")]
    EmptyContent,

    #[error("tool result carried no non-empty text block")]
    NoTextBlock,

    #[error("tool result text is not a weather payload: {source}")]
    MalformedJson {
        /// Offending text, kept for diagnostic logging.
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Extract the first non-empty text block and deserialize it as a raw weather
/// payload. Field validation is deferred to the renderer's tolerant access.
pub fn parse_tool_result(content: &[ContentBlock]) -> Result<RawPayload, ParseError> {
    if content.is_empty() {
        return Err(ParseError::EmptyContent);
    }

    let text = content
        .iter()
        .find_map(|block| match (block.kind.as_str(), block.text.as_deref()) {
            ("text", Some(t)) if !t.is_empty() => Some(t),
            _ => None,
        })
        .ok_or(ParseError::NoTextBlock)?;

    RawPayload::from_json(text)
        .map_err(|source| ParseError::MalformedJson { text: text.to_string(), source })
}
