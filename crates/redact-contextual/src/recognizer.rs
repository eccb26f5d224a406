//! Contextual recognizer trait

use async_trait::async_trait;
use redact_core::{Detection, EntityType, Source, Span};

use crate::Result;

/// A candidate entity as reported by a contextual model.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entity_type: EntityType,
    /// Char offsets into the recognized text.
    pub span: Span,
    pub confidence: f64,
}

impl Candidate {
    pub fn new(entity_type: EntityType, span: Span, confidence: f64) -> Self {
        Self {
            entity_type,
            span,
            confidence,
        }
    }
}

/// Pluggable interface to a statistical / contextual entity recognizer.
///
/// Implementations must return an empty list (not an error) for empty or
/// very short input and must not retain the text.
#[async_trait]
pub trait ContextualRecognizer: Send + Sync {
    /// Recognize entities in `text`.
    async fn recognize(&self, text: &str) -> Result<Vec<Candidate>>;

    /// Human-readable backend name (used in logs and status).
    fn name(&self) -> &str;
}

/// Convert model candidates into detections, dropping spans that do not fit
/// a text of `char_len` chars.
pub fn to_detections(
    candidates: Vec<Candidate>,
    char_len: usize,
    recognizer: &str,
) -> Vec<Detection> {
    let total = candidates.len();
    let detections: Vec<Detection> = candidates
        .into_iter()
        .filter(|c| c.span.end() <= char_len)
        .map(|c| {
            Detection::new(c.entity_type, c.span, c.confidence, Source::Contextual, recognizer)
        })
        .collect();

    if detections.len() < total {
        tracing::debug!(
            recognizer,
            dropped = total - detections.len(),
            "dropped out-of-range contextual candidates"
        );
    }

    detections
}
