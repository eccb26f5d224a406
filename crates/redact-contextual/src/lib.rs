//! Contextual recognizers
//!
//! Entity types that need semantic judgment (person names, locations,
//! organizations) come from a pluggable [`ContextualRecognizer`]. Two
//! backends ship with the crate:
//! - [`HeuristicRecognizer`]: built-in honorific / gazetteer rules
//! - [`HttpRecognizer`]: an external NER service over HTTP

pub mod error;
pub mod heuristic;
pub mod http;
pub mod recognizer;

pub use error::{ContextualError, Result};
pub use heuristic::HeuristicRecognizer;
pub use http::HttpRecognizer;
pub use recognizer::{Candidate, ContextualRecognizer, to_detections};
