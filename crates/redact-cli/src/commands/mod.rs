pub mod batch;
pub mod config;
pub mod scan;
pub mod status;

use anyhow::{Context, Result};
use serde::Serialize;

use redact_config::Config;
use redact_core::{EntityType, Operator, RedactionResult};
use redact_engine::{Engine, parse_operator};

/// One result as printed by `scan` and `batch`.
#[derive(Serialize)]
pub struct Output<'a> {
    #[serde(flatten)]
    pub result: &'a RedactionResult,
    pub entity_count: usize,
}

impl<'a> Output<'a> {
    pub fn new(result: &'a RedactionResult) -> Self {
        Self {
            result,
            entity_count: result.entity_count(),
        }
    }
}

pub fn build_engine(config: &Config) -> Result<Engine> {
    Engine::from_config(config).context("Invalid configuration")
}

/// `None` when no filter was given.
pub fn parse_entities(names: &[String]) -> Result<Option<Vec<EntityType>>> {
    if names.is_empty() {
        return Ok(None);
    }
    let entities = names
        .iter()
        .map(|name| name.parse::<EntityType>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Some(entities))
}

/// Request-level operator; `None` keeps the configured one.
pub fn resolve_operator(
    name: Option<&str>,
    mask_char: Option<char>,
    config: &Config,
) -> Result<Option<Operator>> {
    if name.is_none() && mask_char.is_none() {
        return Ok(None);
    }
    let name = name.unwrap_or(&config.anonymizer.operator);
    let mask_char = mask_char.unwrap_or(config.anonymizer.mask_char);
    Ok(Some(parse_operator(name, mask_char)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entities() {
        assert!(parse_entities(&[]).unwrap().is_none());
        let parsed = parse_entities(&["email".to_string(), "PER".to_string()]).unwrap();
        assert_eq!(parsed, Some(vec![EntityType::Email, EntityType::Person]));
        assert!(parse_entities(&["SHOE_SIZE".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_operator() {
        let config = Config::default();
        assert_eq!(resolve_operator(None, None, &config).unwrap(), None);
        assert_eq!(
            resolve_operator(Some("numbered"), None, &config).unwrap(),
            Some(Operator::Numbered)
        );
        assert_eq!(
            resolve_operator(Some("mask"), Some('#'), &config).unwrap(),
            Some(Operator::Mask { mask_char: '#' })
        );
        assert!(resolve_operator(Some("mask"), Some('a'), &config).is_err());
    }

    #[test]
    fn test_output_includes_count() {
        let engine = build_engine(&Config::default()).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let result = runtime
            .block_on(engine.process("budi@example.com", false, None))
            .unwrap();

        let json = serde_json::to_value(Output::new(&result)).unwrap();
        assert_eq!(json["entity_count"], 1);
        assert_eq!(json["original_length"], 16);
        assert_eq!(json["detections"][0]["type"], "EMAIL");
    }
}
