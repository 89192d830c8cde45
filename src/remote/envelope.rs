//! Proxy envelope decoding.
//!
//! Both remote endpoints sit behind an API gateway that wraps every
//! response: the outer JSON object carries the real payload in its `body`
//! field, normally as a JSON-encoded *string* that needs a second decode.
//! Some deployments inline the payload object directly instead, so both
//! shapes are accepted here.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why a gateway response could not be decoded
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid envelope: {0}")]
    Envelope(String),

    #[error("invalid body: {0}")]
    Body(String),
}

#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    body: Value,
}

/// Decode the payload out of a raw gateway response.
///
/// Unwraps the outer envelope, then decodes `body` whether it arrives as a
/// JSON string or as an inline object.
pub fn decode_body<T: DeserializeOwned>(raw: &str) -> Result<T, EnvelopeError> {
    let envelope: ProxyEnvelope =
        serde_json::from_str(raw).map_err(|e| EnvelopeError::Envelope(e.to_string()))?;

    match envelope.body {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| EnvelopeError::Body(e.to_string()))
        }
        other => serde_json::from_value(other).map_err(|e| EnvelopeError::Body(e.to_string())),
    }
}
