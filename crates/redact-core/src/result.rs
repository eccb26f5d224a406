//! Per-request result

use serde::{Deserialize, Serialize};

use crate::DetectionSet;

/// Outcome of the contextual recognizer for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextualStatus {
    Completed,
    Disabled,
    TimedOut,
    Unavailable,
}

impl ContextualStatus {
    /// Anything but `Completed` means only pattern coverage was applied.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, ContextualStatus::Completed)
    }
}

/// Result of one `process` call. Built once, owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RedactionResult {
    /// Input length in chars.
    pub original_length: usize,
    pub locale: String,
    pub detections: DetectionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymized_text: Option<String>,
    pub degraded: bool,
    pub contextual: ContextualStatus,
}

impl RedactionResult {
    pub fn new(
        original_length: usize,
        locale: impl Into<String>,
        detections: DetectionSet,
        anonymized_text: Option<String>,
        contextual: ContextualStatus,
    ) -> Self {
        Self {
            original_length,
            locale: locale.into(),
            detections,
            anonymized_text,
            degraded: contextual.is_degraded(),
            contextual,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.detections.len()
    }
}
