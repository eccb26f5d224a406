//! HTTP NLP sidecar backend
//!
//! Request: `POST <endpoint>` with `{"text": "..."}`.
//! Response: `{"entities": [{"type": "PER", "start": 0, "end": 4, "score": 0.9}]}`
//! with char offsets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use redact_core::{EntityType, Span};

use crate::{Candidate, ContextualError, ContextualRecognizer, Result};

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(rename = "type", alias = "label", alias = "entity_type")]
    label: String,
    start: usize,
    end: usize,
    #[serde(alias = "confidence")]
    score: f64,
}

/// Contextual recognizer backed by an external NER service.
pub struct HttpRecognizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRecognizer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ContextualError::Unavailable(
                "endpoint must start with http:// or https://".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("redact/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ContextualError::Unavailable(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContextualRecognizer for HttpRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Candidate>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RecognizeRequest { text })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(ContextualError::Unavailable(format!(
                "HTTP error {}",
                response.status().as_u16()
            )));
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_response(&body, text.chars().count())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Decode a sidecar response for a text of `char_len` chars.
///
/// Unknown labels and spans that do not fit the text are skipped; scores
/// are clamped into `[0, 1]`.
pub fn parse_response(body: &str, char_len: usize) -> Result<Vec<Candidate>> {
    // position only; serde_json messages may quote the body
    let response: RecognizeResponse = serde_json::from_str(body).map_err(|e| {
        ContextualError::InvalidResponse(format!(
            "malformed JSON at line {} column {}",
            e.line(),
            e.column()
        ))
    })?;

    let total = response.entities.len();
    let candidates: Vec<Candidate> = response
        .entities
        .into_iter()
        .filter_map(|raw| {
            let entity_type: EntityType = raw.label.parse().ok()?;
            let span = Span::checked(raw.start, raw.end, char_len).ok()?;
            let score = if raw.score.is_nan() { 0.0 } else { raw.score.clamp(0.0, 1.0) };
            Some(Candidate::new(entity_type, span, score))
        })
        .collect();

    if candidates.len() < total {
        tracing::debug!(skipped = total - candidates.len(), "skipped unusable sidecar entities");
    }

    Ok(candidates)
}

fn transport_error(e: reqwest::Error) -> ContextualError {
    if e.is_timeout() {
        ContextualError::Timeout
    } else if e.is_decode() {
        ContextualError::InvalidResponse("failed to read response body".to_string())
    } else {
        ContextualError::Unavailable("request failed".to_string())
    }
}
