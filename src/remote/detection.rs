//! Emotion detection client
//!
//! Wraps the remote classification endpoint: a captured frame goes out as
//! base64 JPEG, an emotion label comes back through the gateway envelope.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::remote::{envelope, REQUEST_TIMEOUT_SECS, USER_AGENT};

/// Request payload for the detection endpoint
#[derive(Debug, Serialize)]
struct DetectionRequest<'a> {
    #[serde(rename = "imageBase64")]
    image_base64: &'a str,
}

/// Inner payload of a detection response
#[derive(Debug, Deserialize)]
struct DetectionBody {
    emotion: String,
}

/// Client for the remote emotion detection endpoint
pub struct DetectionClient {
    http_client: reqwest::Client,
    url: String,
}

impl DetectionClient {
    pub fn new(url: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self { http_client, url })
    }

    /// Classify a captured frame.
    ///
    /// `image_base64` is JPEG data in base64 without a data-URL prefix.
    /// Returns the emotion label exactly as the service reports it; any
    /// network, HTTP, or decode problem is a detection failure.
    pub async fn detect(&self, image_base64: &str) -> Result<String> {
        tracing::debug!(
            url = %self.url,
            payload_bytes = image_base64.len(),
            "Requesting emotion detection"
        );

        let response = self
            .http_client
            .post(&self.url)
            .json(&DetectionRequest { image_base64 })
            .send()
            .await
            .map_err(|e| Error::Detection(format!("network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Detection(format!(
                "detection service returned {}",
                status
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| Error::Detection(format!("network error: {}", e)))?;

        let body: DetectionBody =
            envelope::decode_body(&raw).map_err(|e| Error::Detection(e.to_string()))?;

        tracing::info!(emotion = %body.emotion, "Emotion detected");
        Ok(body.emotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_succeeds() {
        assert!(DetectionClient::new("http://127.0.0.1:9/detect-emotion".to_string()).is_ok());
    }

    #[test]
    fn request_uses_camel_case_field() {
        let json = serde_json::to_string(&DetectionRequest {
            image_base64: "Zm9v",
        })
        .unwrap();
        assert_eq!(json, r#"{"imageBase64":"Zm9v"}"#);
    }
}
