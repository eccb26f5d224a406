//! Pattern recognizers

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use redact_core::{Detection, EntityType, Source, TextIndex};

use crate::{Locale, PatternError, patterns, validators};

/// Recognizer families that can be enabled in configuration.
///
/// `Phone` and `NationalId` resolve to a locale-specific rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecognizerKind {
    Email,
    CreditCard,
    IpAddress,
    Iban,
    Url,
    Phone,
    NationalId,
}

impl RecognizerKind {
    pub const ALL: [RecognizerKind; 7] = [
        RecognizerKind::Email,
        RecognizerKind::CreditCard,
        RecognizerKind::IpAddress,
        RecognizerKind::Iban,
        RecognizerKind::Url,
        RecognizerKind::Phone,
        RecognizerKind::NationalId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecognizerKind::Email => "email",
            RecognizerKind::CreditCard => "credit_card",
            RecognizerKind::IpAddress => "ip_address",
            RecognizerKind::Iban => "iban",
            RecognizerKind::Url => "url",
            RecognizerKind::Phone => "phone",
            RecognizerKind::NationalId => "national_id",
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            RecognizerKind::Email => EntityType::Email,
            RecognizerKind::CreditCard => EntityType::CreditCard,
            RecognizerKind::IpAddress => EntityType::IpAddress,
            RecognizerKind::Iban => EntityType::Iban,
            RecognizerKind::Url => EntityType::Url,
            RecognizerKind::Phone => EntityType::PhoneNumber,
            RecognizerKind::NationalId => EntityType::IdNumber,
        }
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecognizerKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecognizerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PatternError::UnknownRecognizer(s.to_string()))
    }
}

impl Serialize for RecognizerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecognizerKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

type Validator = fn(&str) -> bool;

/// A single regex rule with a fixed confidence and optional validator.
pub struct PatternRecognizer {
    kind: RecognizerKind,
    name: &'static str,
    regex: &'static Regex,
    confidence: f64,
    validator: Option<Validator>,
    trim_trailing: &'static [char],
    split_on: &'static [char],
}

impl PatternRecognizer {
    /// The concrete rule for `kind` under `locale`.
    pub fn builtin(kind: RecognizerKind, locale: Locale) -> Self {
        use validators::*;

        match (kind, locale) {
            (RecognizerKind::Email, _) => Self::rule(kind, "email", &patterns::EMAIL, 0.95, None),
            (RecognizerKind::CreditCard, _) => {
                Self::rule(kind, "credit_card", &patterns::CREDIT_CARD, 0.95, Some(luhn))
                    .with_split_on(&[' ', '-'])
            }
            (RecognizerKind::IpAddress, _) => {
                Self::rule(kind, "ip_address", &patterns::IPV4, 0.85, None)
            }
            (RecognizerKind::Iban, _) => {
                Self::rule(kind, "iban", &patterns::IBAN, 0.95, Some(iban))
            }
            (RecognizerKind::Url, _) => Self::rule(kind, "url", &patterns::URL, 0.85, None)
                .with_trailing_trim(&['.', ',', ';', ':', '!', '?', ')', '\'']),
            (RecognizerKind::Phone, Locale::Id) => Self::rule(
                kind,
                "phone_id",
                &patterns::PHONE_ID,
                0.9,
                Some(indonesian_mobile),
            ),
            (RecognizerKind::Phone, Locale::Us) => {
                Self::rule(kind, "phone_us", &patterns::PHONE_US, 0.9, Some(nanp))
            }
            (RecognizerKind::Phone, Locale::Gb) => {
                Self::rule(kind, "phone_gb", &patterns::PHONE_GB, 0.9, Some(uk_mobile))
            }
            (RecognizerKind::NationalId, Locale::Id) => {
                Self::rule(kind, "nik_id", &patterns::NIK_ID, 0.9, Some(indonesian_nik))
            }
            (RecognizerKind::NationalId, Locale::Us) => {
                Self::rule(kind, "ssn_us", &patterns::SSN_US, 0.9, Some(us_ssn))
            }
            (RecognizerKind::NationalId, Locale::Gb) => {
                Self::rule(kind, "nino_gb", &patterns::NINO_GB, 0.9, Some(uk_nino))
            }
        }
    }

    fn rule(
        kind: RecognizerKind,
        name: &'static str,
        regex: &'static Regex,
        confidence: f64,
        validator: Option<Validator>,
    ) -> Self {
        Self {
            kind,
            name,
            regex,
            confidence,
            validator,
            trim_trailing: &[],
            split_on: &[],
        }
    }

    fn with_trailing_trim(mut self, chars: &'static [char]) -> Self {
        self.trim_trailing = chars;
        self
    }

    /// Separators at which a rejected match may be cut back to a shorter
    /// candidate, e.g. a card followed by a CVV group.
    fn with_split_on(mut self, chars: &'static [char]) -> Self {
        self.split_on = chars;
        self
    }

    pub fn kind(&self) -> RecognizerKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// All validated, non-overlapping matches of this rule.
    ///
    /// A rejected match is first cut back at its separators, longest
    /// prefix first, so `4111 1111 1111 1111 12/25` still yields the card.
    /// If no prefix passes, the match does not consume its text: the search
    /// resumes one char after its start, so `1 4111 1111 1111 1111` yields
    /// the card too. Matches are short, so this stays linear.
    pub fn recognize(&self, index: &TextIndex<'_>) -> Vec<Detection> {
        let text = index.text();
        let mut detections = Vec::new();
        let mut at = 0;

        while let Some(m) = self.regex.find_at(text, at) {
            let matched = m.as_str().trim_end_matches(self.trim_trailing);
            let accepted = if self.accepts(matched) {
                Some(matched)
            } else {
                self.accepted_prefix(matched)
            };

            let Some(accepted) = accepted else {
                at = next_char(text, m.start());
                continue;
            };

            let end = m.start() + accepted.len();
            if let Some(span) = index.span_from_bytes(m.start(), end) {
                detections.push(Detection::new(
                    self.entity_type(),
                    span,
                    self.confidence,
                    Source::Pattern,
                    self.name,
                ));
            }
            at = end;
        }

        detections
    }

    fn accepts(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.validator.is_none_or(|validate| validate(candidate))
    }

    fn accepted_prefix<'t>(&self, matched: &'t str) -> Option<&'t str> {
        matched
            .char_indices()
            .rev()
            .filter(|(_, c)| self.split_on.contains(c))
            .map(|(i, _)| matched[..i].trim_end_matches(self.split_on))
            .find(|prefix| self.accepts(prefix))
    }
}

fn next_char(text: &str, byte: usize) -> usize {
    text[byte..]
        .chars()
        .next()
        .map_or(text.len(), |c| byte + c.len_utf8())
}
