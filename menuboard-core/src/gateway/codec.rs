//! Document content encoding for the storage wire format.
//!
//! The store transports the document as base64 of its UTF-8 JSON text.
//! Line breaks inside the base64 payload are tolerated on decode.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::error::GatewayError;
use crate::models::MenuDocument;

/// Serializes a document to pretty JSON and base64-encodes it.
pub fn encode_document(document: &MenuDocument) -> Result<String, GatewayError> {
    let json = document
        .to_pretty_json()
        .map_err(|e| GatewayError::transport(format!("Failed to serialize menu: {}", e)))?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decodes base64 content back into a document.
pub fn decode_document(content: &str) -> Result<MenuDocument, GatewayError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GatewayError::transport(format!("Invalid base64 content: {}", e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| GatewayError::transport(format!("Content is not UTF-8: {}", e)))?;
    MenuDocument::from_json(&text)
        .map_err(|e| GatewayError::transport(format!("Invalid menu JSON: {}", e)))
}
