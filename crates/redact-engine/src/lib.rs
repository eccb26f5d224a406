//! Engine facade
//!
//! Runs the pattern set and the contextual recognizer concurrently, merges
//! their candidates and optionally anonymizes the text. Nothing about a
//! request outlives the call.

pub mod settings;

pub use settings::{ContextualBackend, EngineSettings, parse_operator};

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use redact_config::Config;
use redact_contextual::{
    ContextualError, ContextualRecognizer, HeuristicRecognizer, HttpRecognizer, to_detections,
};
use redact_core::{
    ContextualStatus, Detection, EntityType, Error, MergePolicy, Operator, RedactionResult, Result,
    TextIndex, anonymize_indexed, merge,
};
use redact_patterns::{Locale, PatternSet, RecognizerKind};

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub anonymize: bool,
    /// Locale identifier; the configured default when `None`
    pub locale: Option<String>,
    /// Only detect these types; every type when `None`
    pub entities: Option<Vec<EntityType>>,
    /// Overrides the configured operator
    pub operator: Option<Operator>,
}

/// Snapshot of how the engine is set up.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub contextual_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contextual_backend: Option<String>,
    pub contextual_timeout_ms: u64,
    pub confidence_floor: f64,
    pub default_locale: Locale,
    pub locales: Vec<Locale>,
    pub recognizers: Vec<RecognizerKind>,
    pub max_input_chars: usize,
    pub operator: Operator,
}

/// Shared, read-only detection engine. Cheap to clone.
#[derive(Clone)]
pub struct Engine {
    settings: Arc<EngineSettings>,
    patterns: Arc<HashMap<Locale, PatternSet>>,
    contextual: Option<Arc<dyn ContextualRecognizer>>,
}

impl Engine {
    /// Build an engine around an explicit contextual recognizer.
    pub fn new(
        settings: EngineSettings,
        contextual: Option<Arc<dyn ContextualRecognizer>>,
    ) -> Self {
        let patterns: HashMap<Locale, PatternSet> = settings
            .locales
            .iter()
            .map(|&locale| (locale, PatternSet::new(locale, &settings.recognizers)))
            .collect();

        tracing::debug!(
            locales = patterns.len(),
            recognizers = settings.recognizers.len(),
            contextual = contextual.as_ref().map(|c| c.name()).unwrap_or("disabled"),
            "engine initialized"
        );

        Self {
            settings: Arc::new(settings),
            patterns: Arc::new(patterns),
            contextual,
        }
    }

    /// Build an engine with the contextual backend named in `settings`.
    pub fn from_settings(settings: EngineSettings) -> Result<Self> {
        let contextual: Option<Arc<dyn ContextualRecognizer>> = match &settings.backend {
            ContextualBackend::Heuristic { extra_locations } => {
                Some(Arc::new(HeuristicRecognizer::with_places(extra_locations)))
            }
            ContextualBackend::Http { url } => {
                let recognizer = HttpRecognizer::new(url.as_str(), settings.contextual_timeout)
                    .map_err(|e| Error::Config(e.to_string()))?;
                Some(Arc::new(recognizer))
            }
            ContextualBackend::Disabled => None,
        };

        Ok(Self::new(settings, contextual))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_settings(EngineSettings::from_config(config)?)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Detect (and optionally anonymize) PII in `text`.
    pub async fn process(
        &self,
        text: &str,
        anonymize: bool,
        locale: Option<&str>,
    ) -> Result<RedactionResult> {
        let options = ProcessOptions {
            anonymize,
            locale: locale.map(str::to_string),
            ..Default::default()
        };
        self.process_with(text, &options).await
    }

    /// Like [`Engine::process_with`] for raw bytes that must be UTF-8.
    pub async fn process_bytes(
        &self,
        bytes: &[u8],
        options: &ProcessOptions,
    ) -> Result<RedactionResult> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            Error::MalformedInput(format!("invalid UTF-8 at byte {}", e.valid_up_to()))
        })?;
        self.process_with(text, options).await
    }

    pub async fn process_with(
        &self,
        text: &str,
        options: &ProcessOptions,
    ) -> Result<RedactionResult> {
        // chars <= bytes, so only count when the byte length is over
        let max = self.settings.max_input_chars;
        if text.len() > max {
            let length = text.chars().count();
            if length > max {
                return Err(Error::InputTooLarge { length, max });
            }
        }

        let locale = self.resolve_locale(options.locale.as_deref())?;
        let patterns = self
            .patterns
            .get(&locale)
            .ok_or_else(|| Error::InvalidLocale(locale.to_string()))?;
        let operator = options.operator.unwrap_or(self.settings.operator);
        if options.anonymize {
            operator.validate()?;
        }

        let index = TextIndex::new(text);
        let char_len = index.char_len();
        tracing::debug!(chars = char_len, locale = %locale, "processing request");

        let (pattern_candidates, (contextual_candidates, status)) = tokio::join!(
            async { patterns.recognize_indexed(&index) },
            self.recognize_contextual(text, char_len),
        );

        let mut candidates = pattern_candidates;
        candidates.extend(contextual_candidates);
        if let Some(entities) = &options.entities {
            let wanted: HashSet<EntityType> = entities.iter().copied().collect();
            candidates.retain(|d| wanted.contains(&d.entity_type()));
        }

        let candidate_count = candidates.len();
        let policy = MergePolicy {
            confidence_floor: self.settings.confidence_floor,
        };
        let detections = merge(candidates, &policy);

        tracing::debug!(
            candidates = candidate_count,
            accepted = detections.len(),
            contextual = ?status,
            "detection finished"
        );

        let anonymized_text = if options.anonymize {
            Some(anonymize_indexed(&index, &detections, &operator)?)
        } else {
            None
        };

        Ok(RedactionResult::new(
            char_len,
            locale.as_str(),
            detections,
            anonymized_text,
            status,
        ))
    }

    pub fn status(&self) -> EngineStatus {
        let settings = &self.settings;
        EngineStatus {
            contextual_enabled: self.contextual.is_some(),
            contextual_backend: self.contextual.as_ref().map(|c| c.name().to_string()),
            contextual_timeout_ms: settings.contextual_timeout_ms(),
            confidence_floor: settings.confidence_floor,
            default_locale: settings.default_locale,
            locales: settings.locales.clone(),
            recognizers: settings.recognizers.clone(),
            max_input_chars: settings.max_input_chars,
            operator: settings.operator,
        }
    }

    fn resolve_locale(&self, requested: Option<&str>) -> Result<Locale> {
        let Some(requested) = requested else {
            return Ok(self.settings.default_locale);
        };
        let locale: Locale = requested.parse()?;
        if !self.patterns.contains_key(&locale) {
            return Err(Error::InvalidLocale(format!("{} is not enabled", locale)));
        }
        Ok(locale)
    }

    /// Contextual candidates plus how the call went. Never fails the request.
    async fn recognize_contextual(
        &self,
        text: &str,
        char_len: usize,
    ) -> (Vec<Detection>, ContextualStatus) {
        let Some(recognizer) = &self.contextual else {
            return (Vec::new(), ContextualStatus::Disabled);
        };
        let backend = recognizer.name();

        let timeout = self.settings.contextual_timeout;
        match tokio::time::timeout(timeout, recognizer.recognize(text)).await {
            Ok(Ok(candidates)) => (
                to_detections(candidates, char_len, backend),
                ContextualStatus::Completed,
            ),
            Ok(Err(ContextualError::Timeout)) | Err(_) => {
                tracing::warn!(
                    backend,
                    timeout_ms = self.settings.contextual_timeout_ms(),
                    "contextual recognizer timed out, using pattern detections only"
                );
                (Vec::new(), ContextualStatus::TimedOut)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    backend,
                    error = %e,
                    "contextual recognizer failed, using pattern detections only"
                );
                (Vec::new(), ContextualStatus::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_only() -> Engine {
        let settings = EngineSettings {
            backend: ContextualBackend::Disabled,
            ..Default::default()
        };
        Engine::from_settings(settings).unwrap()
    }

    #[tokio::test]
    async fn test_anonymize_example() {
        let engine = pattern_only();
        let result = engine
            .process("Call 08123456789 or email budi@example.com", true, None)
            .await
            .unwrap();

        assert_eq!(result.entity_count(), 2);
        assert_eq!(
            result.anonymized_text.as_deref(),
            Some("Call [PHONE_NUMBER] or email [EMAIL]")
        );
        assert_eq!(result.contextual, ContextualStatus::Disabled);
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn test_detect_only_has_no_text() {
        let result = pattern_only().process("budi@example.com", false, None).await.unwrap();
        assert_eq!(result.entity_count(), 1);
        assert!(result.anonymized_text.is_none());
    }

    #[tokio::test]
    async fn test_input_too_large_counts_chars() {
        let settings = EngineSettings {
            max_input_chars: 4,
            backend: ContextualBackend::Disabled,
            ..Default::default()
        };
        let engine = Engine::from_settings(settings).unwrap();

        // 4 chars, 8 bytes
        assert!(engine.process("éééé", false, None).await.is_ok());
        let err = engine.process("12345", false, None).await.unwrap_err();
        assert!(matches!(err, Error::InputTooLarge { length: 5, max: 4 }));
    }

    #[tokio::test]
    async fn test_locale_resolution() {
        let settings = EngineSettings {
            locales: vec![Locale::Id, Locale::Us],
            backend: ContextualBackend::Disabled,
            ..Default::default()
        };
        let engine = Engine::from_settings(settings).unwrap();

        let result = engine.process("", false, Some("en-US")).await.unwrap();
        assert_eq!(result.locale, "us");
        assert!(matches!(
            engine.process("", false, Some("gb")).await,
            Err(Error::InvalidLocale(_))
        ));
        assert!(matches!(
            engine.process("", false, Some("klingon")).await,
            Err(Error::InvalidLocale(_))
        ));
    }

    #[tokio::test]
    async fn test_status() {
        let status = Engine::from_settings(EngineSettings::default()).unwrap().status();
        assert!(status.contextual_enabled);
        assert_eq!(status.contextual_backend.as_deref(), Some("heuristic"));
        assert_eq!(status.locales.len(), 3);
        assert_eq!(status.contextual_timeout_ms, 2_000);

        let status = pattern_only().status();
        assert!(!status.contextual_enabled);
        assert!(status.contextual_backend.is_none());
    }
}
