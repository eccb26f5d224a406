//! Anonymizer - rebuilds text with detected spans substituted
//!
//! Single forward pass: copy the gap before each span verbatim, then emit
//! the substitution. Nothing from inside a span reaches the output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{DetectionSet, EntityType, Error, Result, TextIndex};

/// How a detected span is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operator {
    /// `[EMAIL]`
    #[default]
    Replace,
    /// `[EMAIL_1]`, `[EMAIL_2]`, ... numbered per type in offset order
    Numbered,
    /// One `mask_char` per char of the span
    Mask { mask_char: char },
}

impl Operator {
    pub fn mask(mask_char: char) -> Result<Self> {
        let operator = Operator::Mask { mask_char };
        operator.validate()?;
        Ok(operator)
    }

    /// Mask chars must not themselves look like text a recognizer could pick up.
    pub fn validate(&self) -> Result<()> {
        match self {
            Operator::Mask { mask_char }
                if mask_char.is_alphanumeric()
                    || mask_char.is_whitespace()
                    || mask_char.is_control() =>
            {
                Err(Error::InvalidOperator(format!(
                    "mask char {:?} must be a visible non-alphanumeric symbol",
                    mask_char
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Anonymize `text` using the spans in `detections`.
pub fn anonymize(text: &str, detections: &DetectionSet, operator: &Operator) -> Result<String> {
    anonymize_indexed(&TextIndex::new(text), detections, operator)
}

/// Same as [`anonymize`] with a prebuilt index.
pub fn anonymize_indexed(
    index: &TextIndex<'_>,
    detections: &DetectionSet,
    operator: &Operator,
) -> Result<String> {
    operator.validate()?;

    let text = index.text();
    let mut output = String::with_capacity(text.len());
    let mut ordinals: HashMap<EntityType, usize> = HashMap::new();
    let mut cursor = 0;

    for detection in detections {
        let range = index.byte_range(detection.span())?;
        output.push_str(&text[cursor..range.start]);

        match operator {
            Operator::Replace => output.push_str(&detection.entity_type().placeholder()),
            Operator::Numbered => {
                let ordinal = ordinals.entry(detection.entity_type()).or_insert(0);
                *ordinal += 1;
                output.push_str(&detection.entity_type().numbered_placeholder(*ordinal));
            }
            Operator::Mask { mask_char } => {
                output.extend(std::iter::repeat_n(*mask_char, detection.span().len()));
            }
        }

        cursor = range.end;
    }

    output.push_str(&text[cursor..]);
    Ok(output)
}
