use serde::{Deserialize, Serialize};

use crate::{EntityType, Error, Result};

/// Half-open `[start, end)` interval of char offsets, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Returns `None` for empty or inverted intervals.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Like [`Span::new`] but also bounds-checked against a text length.
    pub fn checked(start: usize, end: usize, len: usize) -> Result<Self> {
        if start < end && end <= len {
            Ok(Self { start, end })
        } else {
            Err(Error::InvalidSpan { start, end, len })
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the spans share at least one offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies inside `self` and `self` is strictly longer.
    pub fn strictly_contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end && self.len() > other.len()
    }
}

/// Which recognizer family produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Pattern,
    Contextual,
}

/// A located PII candidate produced by exactly one recognizer.
///
/// Carries no copy of the matched text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    #[serde(rename = "type")]
    entity_type: EntityType,
    #[serde(flatten)]
    span: Span,
    confidence: f64,
    source: Source,
    recognizer: String,
}

impl Detection {
    /// Confidence is clamped into `[0, 1]`; NaN becomes 0.
    pub fn new(
        entity_type: EntityType,
        span: Span,
        confidence: f64,
        source: Source,
        recognizer: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            entity_type,
            span,
            confidence,
            source,
            recognizer: recognizer.into(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn recognizer(&self) -> &str {
        &self.recognizer
    }
}

/// Detections sorted by start with pairwise disjoint spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetectionSet(Vec<Detection>);

impl DetectionSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Validates ordering and disjointness.
    pub fn from_sorted(detections: Vec<Detection>) -> Result<Self> {
        for pair in detections.windows(2) {
            if pair[1].start() < pair[0].end() {
                return Err(Error::Other(anyhow::anyhow!(
                    "detections at {}..{} and {}..{} overlap or are out of order",
                    pair[0].start(),
                    pair[0].end(),
                    pair[1].start(),
                    pair[1].end()
                )));
            }
        }
        Ok(Self(detections))
    }

    /// Caller guarantees the invariant (used by the merger).
    pub(crate) fn from_sorted_unchecked(detections: Vec<Detection>) -> Self {
        debug_assert!(detections.windows(2).all(|w| w[0].end() <= w[1].start()));
        Self(detections)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.0
    }

    pub fn of_type(&self, entity_type: EntityType) -> impl Iterator<Item = &Detection> {
        self.0.iter().filter(move |d| d.entity_type == entity_type)
    }

    pub fn into_vec(self) -> Vec<Detection> {
        self.0
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(start: usize, end: usize) -> Detection {
        Detection::new(
            EntityType::Email,
            Span::new(start, end).unwrap(),
            0.9,
            Source::Pattern,
            "email",
        )
    }

    #[test]
    fn test_span_rejects_empty() {
        assert!(Span::new(3, 3).is_none());
        assert!(Span::new(4, 3).is_none());
        assert!(Span::checked(0, 6, 5).is_err());
        assert_eq!(Span::checked(0, 5, 5).unwrap().len(), 5);
    }

    #[test]
    fn test_span_overlap_is_half_open() {
        let a = Span::new(0, 5).unwrap();
        let b = Span::new(5, 8).unwrap();
        let c = Span::new(4, 6).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn test_strict_containment() {
        let wide = Span::new(0, 10).unwrap();
        let inner = Span::new(2, 6).unwrap();
        assert!(wide.strictly_contains(&inner));
        assert!(!inner.strictly_contains(&wide));
        assert!(!wide.strictly_contains(&wide));
    }

    #[test]
    fn test_confidence_clamped() {
        let span = Span::new(0, 1).unwrap();
        let high = Detection::new(EntityType::Person, span, 1.7, Source::Contextual, "x");
        let nan = Detection::new(EntityType::Person, span, f64::NAN, Source::Contextual, "x");
        assert_eq!(high.confidence(), 1.0);
        assert_eq!(nan.confidence(), 0.0);
    }

    #[test]
    fn test_detection_set_validates() {
        assert!(DetectionSet::from_sorted(vec![detection(0, 3), detection(3, 5)]).is_ok());
        assert!(DetectionSet::from_sorted(vec![detection(0, 4), detection(3, 5)]).is_err());
        assert!(DetectionSet::from_sorted(vec![detection(5, 7), detection(0, 2)]).is_err());
    }

    #[test]
    fn test_detection_serializes_flat() {
        let json = serde_json::to_value(detection(5, 16)).unwrap();
        assert_eq!(json["type"], "EMAIL");
        assert_eq!(json["start"], 5);
        assert_eq!(json["end"], 16);
        assert_eq!(json["source"], "pattern");
    }
}
