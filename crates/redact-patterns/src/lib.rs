//! Pattern recognizer set
//!
//! Deterministic, stateless rules (regex plus optional validator) for PII
//! with fixed syntax. Rules are compiled once and shared read-only.

pub mod error;
pub mod locale;
pub mod patterns;
pub mod recognizer;
pub mod validators;

pub use error::{PatternError, Result};
pub use locale::Locale;
pub use recognizer::{PatternRecognizer, RecognizerKind};

use redact_core::{Detection, TextIndex};

/// The enabled recognizers for one locale.
pub struct PatternSet {
    locale: Locale,
    recognizers: Vec<PatternRecognizer>,
}

impl PatternSet {
    /// Build a set from the enabled kinds; duplicates are ignored.
    pub fn new(locale: Locale, enabled: &[RecognizerKind]) -> Self {
        let mut kinds = enabled.to_vec();
        kinds.sort();
        kinds.dedup();

        let recognizers = kinds
            .into_iter()
            .map(|kind| PatternRecognizer::builtin(kind, locale))
            .collect();

        Self {
            locale,
            recognizers,
        }
    }

    /// Every built-in recognizer for `locale`.
    pub fn all(locale: Locale) -> Self {
        Self::new(locale, &RecognizerKind::ALL)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn recognizers(&self) -> &[PatternRecognizer] {
        &self.recognizers
    }

    /// Run every recognizer over `text`.
    pub fn recognize(&self, text: &str) -> Vec<Detection> {
        self.recognize_indexed(&TextIndex::new(text))
    }

    /// Run every recognizer over an indexed text.
    ///
    /// Each recognizer's own matches never overlap; matches of different
    /// recognizers may, and are reconciled by the merger.
    pub fn recognize_indexed(&self, index: &TextIndex<'_>) -> Vec<Detection> {
        let detections: Vec<Detection> = self
            .recognizers
            .iter()
            .flat_map(|recognizer| recognizer.recognize(index))
            .collect();

        tracing::debug!(
            locale = %self.locale,
            recognizers = self.recognizers.len(),
            candidates = detections.len(),
            "pattern recognition finished"
        );

        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redact_core::EntityType;

    #[test]
    fn test_mixed_identifiers() {
        let set = PatternSet::all(Locale::Id);
        let detections = set.recognize("Call 08123456789 or email budi@example.com");

        let mut found: Vec<_> = detections
            .iter()
            .map(|d| (d.entity_type(), d.start(), d.end()))
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                (EntityType::PhoneNumber, 5, 16),
                (EntityType::Email, 26, 42),
            ]
        );
    }

    #[test]
    fn test_short_digits_ignored() {
        assert!(PatternSet::all(Locale::Id).recognize("123").is_empty());
        assert!(PatternSet::all(Locale::Us).recognize("123").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(PatternSet::all(Locale::Gb).recognize("").is_empty());
    }

    #[test]
    fn test_disabled_kind_not_run() {
        let set = PatternSet::new(Locale::Id, &[RecognizerKind::Email, RecognizerKind::Email]);
        assert_eq!(set.recognizers().len(), 1);
        assert!(set.recognize("Call 08123456789").is_empty());
    }

    #[test]
    fn test_locale_selects_rules() {
        let text = "SSN 123-45-6789";
        assert!(PatternSet::all(Locale::Id).recognize(text).is_empty());
        assert_eq!(PatternSet::all(Locale::Us).recognize(text).len(), 1);
    }

    #[test]
    fn test_placeholders_not_recognized() {
        for locale in Locale::ALL {
            let set = PatternSet::all(locale);
            let text = "Call [PHONE_NUMBER] or email [EMAIL], [PERSON_1] at [ID_NUMBER_12]";
            assert!(set.recognize(text).is_empty());
        }
    }
}
