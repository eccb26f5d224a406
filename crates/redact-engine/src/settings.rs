//! Validated engine settings

use std::time::Duration;

use redact_config::Config;
use redact_core::{DEFAULT_CONFIDENCE_FLOOR, Error, Operator, Result};
use redact_patterns::{Locale, RecognizerKind};

/// Which contextual recognizer backs the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextualBackend {
    Heuristic { extra_locations: Vec<String> },
    Http { url: String },
    Disabled,
}

/// Immutable settings, built once at startup and shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub max_input_chars: usize,
    pub default_locale: Locale,
    pub locales: Vec<Locale>,
    pub recognizers: Vec<RecognizerKind>,
    pub backend: ContextualBackend,
    pub confidence_floor: f64,
    pub contextual_timeout: Duration,
    /// Operator used when a request does not choose one
    pub operator: Operator,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_input_chars: 100_000,
            default_locale: Locale::Id,
            locales: Locale::ALL.to_vec(),
            recognizers: RecognizerKind::ALL.to_vec(),
            backend: ContextualBackend::Heuristic {
                extra_locations: Vec::new(),
            },
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            contextual_timeout: Duration::from_millis(2_000),
            operator: Operator::Replace,
        }
    }
}

impl EngineSettings {
    /// Contextual timeout in whole milliseconds, saturating at `u64::MAX`.
    pub fn contextual_timeout_ms(&self) -> u64 {
        u64::try_from(self.contextual_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Validate a raw config and convert it to typed settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.max_input_chars == 0 {
            return Err(Error::Config("max_input_chars must be greater than 0".to_string()));
        }

        let mut locales = config
            .locales
            .enabled
            .iter()
            .map(|l| l.parse::<Locale>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        locales.sort();
        locales.dedup();
        if locales.is_empty() {
            return Err(Error::Config("at least one locale must be enabled".to_string()));
        }

        let default_locale: Locale = config.locales.default.parse()?;
        if !locales.contains(&default_locale) {
            return Err(Error::Config(format!(
                "default locale {} is not enabled",
                default_locale
            )));
        }

        let recognizers = config
            .recognizers
            .enabled
            .iter()
            .map(|r| r.parse::<RecognizerKind>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let contextual = &config.contextual;
        let backend = match contextual.backend.trim().to_ascii_lowercase().as_str() {
            "heuristic" => ContextualBackend::Heuristic {
                extra_locations: contextual.extra_locations.clone(),
            },
            "http" => match contextual.url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => ContextualBackend::Http {
                    url: url.to_string(),
                },
                _ => {
                    return Err(Error::Config(
                        "contextual.url is required for the http backend".to_string(),
                    ));
                }
            },
            "disabled" | "none" => ContextualBackend::Disabled,
            other => {
                return Err(Error::Config(format!("unknown contextual backend: {}", other)));
            }
        };

        if !(0.0..=1.0).contains(&contextual.confidence_floor) {
            return Err(Error::Config(
                "contextual.confidence_floor must be within 0..=1".to_string(),
            ));
        }
        if contextual.timeout_ms == 0 {
            return Err(Error::Config("contextual.timeout_ms must be greater than 0".to_string()));
        }

        let operator = parse_operator(&config.anonymizer.operator, config.anonymizer.mask_char)?;

        Ok(Self {
            max_input_chars: config.max_input_chars,
            default_locale,
            locales,
            recognizers,
            backend,
            confidence_floor: contextual.confidence_floor,
            contextual_timeout: Duration::from_millis(contextual.timeout_ms),
            operator,
        })
    }
}

/// Parse an operator name; `mask_char` only matters for `mask`.
pub fn parse_operator(name: &str, mask_char: char) -> Result<Operator> {
    match name.trim().to_ascii_lowercase().as_str() {
        "replace" => Ok(Operator::Replace),
        "numbered" => Ok(Operator::Numbered),
        "mask" => Operator::mask(mask_char),
        other => Err(Error::InvalidOperator(format!("unknown operator: {}", other))),
    }
}
