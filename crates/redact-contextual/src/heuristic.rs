//! Built-in rule-based contextual recognizer
//!
//! Stands in for a small NER model when no external service is configured.
//! Works on runs of Title-case words and classifies each run from:
//! - legal forms (`PT ...`, `... Inc`) and organization keywords
//! - honorifics (`Mr.`, `Dr.`, `Pak`, `Ibu`) and disclosure phrases
//!   (`my name is`, `nama saya`)
//! - a place gazetteer and residence phrases (`live in`, `tinggal di`)
//!
//! Upper-case tokens are never candidates, so `[PERSON]`-style
//! placeholders in already redacted text are ignored.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use redact_core::{EntityType, TextIndex};

use crate::{Candidate, ContextualRecognizer, Result};

const LEGAL_FORM_CONFIDENCE: f64 = 0.85;
const ORG_KEYWORD_CONFIDENCE: f64 = 0.75;
const HONORIFIC_CONFIDENCE: f64 = 0.85;
const STRONG_TRIGGER_CONFIDENCE: f64 = 0.8;
const WEAK_TRIGGER_CONFIDENCE: f64 = 0.6;
const GAZETTEER_CONFIDENCE: f64 = 0.85;
const RESIDENCE_CONFIDENCE: f64 = 0.7;

/// Chars of left context inspected for triggers.
const CONTEXT_CHARS: usize = 40;

lazy_static! {
    static ref TITLE_RUN: Regex =
        Regex::new(r"\b\p{Lu}\p{Ll}+\b(?: \p{Lu}\p{Ll}+\b)*").unwrap();

    static ref LEGAL_FORM: Regex = Regex::new(
        r"\b(?:PT|CV)\.? \p{Lu}\p{L}+(?: \p{Lu}\p{L}+)*|\b\p{Lu}\p{Ll}+(?: \p{Lu}\p{Ll}+)*,? (?:Inc|Ltd|LLC|Corp|PLC|GmbH|Tbk)\b\.?"
    )
    .unwrap();
}

const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam", "pak", "bu", "ibu", "bapak", "sdr",
    "sdri", "tuan", "nyonya",
];

const ORG_KEYWORDS: &[&str] = &[
    "university", "universitas", "bank", "corporation", "company", "foundation", "yayasan",
    "institute", "institut",
];

const STRONG_PERSON_TRIGGERS: &[&str] = &[
    "my name is",
    "name is",
    "name:",
    "call me",
    "nama saya",
    "nama saya adalah",
    "namaku",
];

const WEAK_PERSON_TRIGGERS: &[&str] = &["i am", "i'm", "dear", "hi", "hello", "halo"];

const RESIDENCE_TRIGGERS: &[&str] = &[
    "live in",
    "lives in",
    "living in",
    "based in",
    "located in",
    "moved to",
    "born in",
    "tinggal di",
    "lahir di",
    "berasal dari",
];

const DEFAULT_PLACES: &[&str] = &[
    // Indonesia
    "indonesia", "jakarta", "surabaya", "bandung", "medan", "semarang", "makassar", "palembang",
    "yogyakarta", "denpasar", "bali", "bogor", "depok", "bekasi", "tangerang", "malang", "solo",
    "batam", "pekanbaru", "balikpapan", "manado", "jawa barat", "jawa tengah", "jawa timur",
    "sumatera utara", "kalimantan", "sulawesi", "papua",
    // elsewhere
    "singapore", "malaysia", "kuala lumpur", "london", "manchester", "birmingham", "edinburgh",
    "glasgow", "england", "scotland", "wales", "new york", "los angeles", "san francisco",
    "chicago", "seattle", "boston", "texas", "california", "tokyo", "paris", "berlin", "sydney",
    "melbourne", "amsterdam",
];

struct Word {
    start: usize,
    end: usize,
    lower: String,
}

/// Gazetteer and trigger-phrase recognizer.
pub struct HeuristicRecognizer {
    places: HashSet<String>,
    max_place_words: usize,
}

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self::with_places(std::iter::empty::<String>())
    }

    /// Default gazetteer extended with `extra` place names.
    pub fn with_places<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let places: HashSet<String> = DEFAULT_PLACES
            .iter()
            .map(|p| p.to_string())
            .chain(extra.into_iter().map(|p| p.as_ref().trim().to_lowercase()))
            .filter(|p| !p.is_empty())
            .collect();
        let max_place_words = places
            .iter()
            .map(|p| p.split(' ').count())
            .max()
            .unwrap_or(1);

        Self {
            places,
            max_place_words,
        }
    }

    /// Synchronous core of [`ContextualRecognizer::recognize`].
    pub fn analyze(&self, text: &str) -> Vec<Candidate> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut found: Vec<(EntityType, usize, usize, f64)> = LEGAL_FORM
            .find_iter(text)
            .map(|m| (EntityType::Organization, m.start(), m.end(), LEGAL_FORM_CONFIDENCE))
            .collect();

        for run in TITLE_RUN.find_iter(text) {
            let words = split_words(text, run.start(), run.as_str());
            let context = left_context(text, run.start());
            self.classify_run(&words, &context, &mut found);
        }

        let index = TextIndex::new(text);
        found
            .into_iter()
            .filter_map(|(entity, start, end, confidence)| {
                let span = index.span_from_bytes(start, end)?;
                Some(Candidate::new(entity, span, confidence))
            })
            .collect()
    }

    fn classify_run(
        &self,
        words: &[Word],
        context: &str,
        found: &mut Vec<(EntityType, usize, usize, f64)>,
    ) {
        let (Some(first), Some(last)) = (words.first(), words.last()) else {
            return;
        };
        let mut push =
            |entity, start, end, confidence| found.push((entity, start, end, confidence));

        if words.len() >= 2 && words.iter().any(|w| ORG_KEYWORDS.contains(&w.lower.as_str())) {
            push(EntityType::Organization, first.start, last.end, ORG_KEYWORD_CONFIDENCE);
            return;
        }

        if words.len() >= 2 && HONORIFICS.contains(&first.lower.as_str()) {
            push(EntityType::Person, words[1].start, last.end, HONORIFIC_CONFIDENCE);
            return;
        }

        if HONORIFICS.contains(&first.lower.as_str()) {
            return;
        }

        let previous = context.trim_end_matches('.').split_whitespace().last();
        if previous.is_some_and(|w| HONORIFICS.contains(&w)) {
            push(EntityType::Person, first.start, last.end, HONORIFIC_CONFIDENCE);
            return;
        }

        if ends_with_any(context, STRONG_PERSON_TRIGGERS) {
            push(EntityType::Person, first.start, last.end, STRONG_TRIGGER_CONFIDENCE);
            return;
        }

        let places = self.place_hits(words);
        let residence = ends_with_any(context, RESIDENCE_TRIGGERS);

        // "tinggal di Kebayoran Jakarta": the whole run is the address
        if residence {
            let confidence = if places.is_empty() {
                RESIDENCE_CONFIDENCE
            } else {
                GAZETTEER_CONFIDENCE
            };
            push(EntityType::Location, first.start, last.end, confidence);
            return;
        }

        // triggered runs are always claimed whole
        if ends_with_any(context, WEAK_PERSON_TRIGGERS) {
            if places == [(first.start, last.end)] {
                push(EntityType::Location, first.start, last.end, GAZETTEER_CONFIDENCE);
            } else {
                push(EntityType::Person, first.start, last.end, WEAK_TRIGGER_CONFIDENCE);
            }
            return;
        }

        for (start, end) in places {
            push(EntityType::Location, start, end, GAZETTEER_CONFIDENCE);
        }
    }

    /// Longest gazetteer entries found inside a run, left to right.
    fn place_hits(&self, words: &[Word]) -> Vec<(usize, usize)> {
        let mut hits = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let longest = (1..=self.max_place_words.min(words.len() - i))
                .rev()
                .find(|&n| {
                    let phrase: Vec<&str> =
                        words[i..i + n].iter().map(|w| w.lower.as_str()).collect();
                    self.places.contains(&phrase.join(" "))
                });
            match longest {
                Some(n) => {
                    hits.push((words[i].start, words[i + n - 1].end));
                    i += n;
                }
                None => i += 1,
            }
        }
        hits
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextualRecognizer for HeuristicRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Candidate>> {
        Ok(self.analyze(text))
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

fn split_words(text: &str, run_start: usize, run: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut offset = run_start;
    for part in run.split(' ') {
        let start = offset;
        let end = start + part.len();
        words.push(Word {
            start,
            end,
            lower: text[start..end].to_lowercase(),
        });
        offset = end + 1;
    }
    words
}

/// Lowercased, right-trimmed text immediately before `byte`.
fn left_context(text: &str, byte: usize) -> String {
    let before = &text[..byte];
    let from = before
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    before[from..].trim_end().to_lowercase()
}

/// `context` ends with one of `phrases` on a word boundary.
fn ends_with_any(context: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| {
        context
            .strip_suffix(phrase)
            .is_some_and(|rest| !rest.chars().last().is_some_and(char::is_alphanumeric))
    })
}
