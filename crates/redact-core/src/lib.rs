//! Core domain model and algorithms for redact
//!
//! This crate contains:
//! - Domain models (EntityType, Span, Detection, DetectionSet, RedactionResult)
//! - Span merger (deterministic conflict resolution)
//! - Anonymizer (placeholder / mask substitution)

pub mod anonymize;
pub mod detection;
pub mod entity;
pub mod error;
pub mod merge;
pub mod result;
pub mod text;

pub use anonymize::{Operator, anonymize, anonymize_indexed};
pub use detection::{Detection, DetectionSet, Source, Span};
pub use entity::{EntityType, UnknownEntityType};
pub use error::{Error, Result};
pub use merge::{DEFAULT_CONFIDENCE_FLOOR, MergePolicy, merge};
pub use result::{ContextualStatus, RedactionResult};
pub use text::TextIndex;
