//! Opaque continuation cursors
//!
//! A cursor is the `(id, created_at)` of the last row of a page, serialized
//! as JSON and encoded with the URL-safe base64 alphabet so it can travel in
//! a query string unescaped. Decoding anything else fails with a
//! validation error.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::store::CursorPosition;

/// Wire payload of a cursor.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorData {
    id: Uuid,
    created_at: DateTime<Utc>,
}

/// Encodes a page position into a transport-safe token.
pub fn encode_cursor(position: &CursorPosition) -> Result<String> {
    let data = CursorData {
        id: position.id,
        created_at: position.created_at,
    };
    let json = serde_json::to_vec(&data)
        .map_err(|e| ApiError::Internal(format!("failed to encode cursor: {}", e)))?;
    Ok(URL_SAFE.encode(json))
}

/// Decodes a token produced by [`encode_cursor`].
pub fn decode_cursor(token: &str) -> Result<CursorPosition> {
    let bytes = URL_SAFE
        .decode(token)
        .map_err(|e| ApiError::Validation(format!("invalid cursor: {}", e)))?;
    let data: CursorData = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Validation(format!("invalid cursor: {}", e)))?;

    Ok(CursorPosition {
        created_at: data.created_at,
        id: data.id,
    })
}
