//! # Body Decoding
//!
//! Request bodies are taken as raw bytes and decoded here so the pipeline
//! controls the order of decode, validation and store calls, and so decoder
//! text ends up in the 400 message.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON body, reporting failures as `malformed input: <reason>`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedInput(format!("malformed input: {e}")))
}
