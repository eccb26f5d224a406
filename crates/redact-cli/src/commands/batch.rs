use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use redact_config::Config;
use redact_core::EntityType;
use redact_engine::{Engine, ProcessOptions};

use super::{Output, build_engine, resolve_operator};

/// One JSON-lines request.
#[derive(Debug, Deserialize)]
struct BatchRequest {
    text: String,
    #[serde(default)]
    anonymize: bool,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    entities: Option<Vec<EntityType>>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    mask_char: Option<char>,
}

pub async fn handle(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let engine = build_engine(config)?;

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let summary = run(&engine, config, reader, BufWriter::new(writer)).await?;
    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        "batch finished"
    );

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    processed: usize,
    failed: usize,
}

/// Process every non-blank line independently. A bad line produces an
/// error record and does not stop the batch.
async fn run<R: BufRead, W: Write>(
    engine: &Engine,
    config: &Config,
    reader: R,
    mut writer: W,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line.context("Failed to read input")?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let line_number = number + 1;

        let record = match process_line(engine, config, &line).await {
            Ok(json) => {
                summary.processed += 1;
                json
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(line = line_number, "batch request failed");
                serde_json::json!({ "line": line_number, "error": e.to_string() })
            }
        };

        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(summary)
}

async fn process_line(engine: &Engine, config: &Config, line: &[u8]) -> Result<serde_json::Value> {
    // serde_json messages can quote the input, so only the position is kept
    let request: BatchRequest = serde_json::from_slice(line).map_err(|e| {
        anyhow::anyhow!("invalid request at column {}: {:?}", e.column(), e.classify())
    })?;

    let options = ProcessOptions {
        anonymize: request.anonymize,
        locale: request.locale,
        entities: request.entities,
        operator: resolve_operator(request.operator.as_deref(), request.mask_char, config)?,
    };

    let result = engine.process_with(&request.text, &options).await?;
    Ok(serde_json::to_value(Output::new(&result))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_lines(input: &str) -> (Summary, Vec<serde_json::Value>) {
        let config = Config::default();
        let engine = build_engine(&config).unwrap();
        let mut out = Vec::new();
        let summary = run(&engine, &config, input.as_bytes(), &mut out).await.unwrap();
        let records = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, records)
    }

    #[tokio::test]
    async fn test_batch_lines_are_independent() {
        let input = concat!(
            r#"{"text": "Call 08123456789 or email budi@example.com", "anonymize": true}"#,
            "\n",
            "\n",
            r#"{"text": "not json"#,
            "\n",
            r#"{"text": "x", "locale": "fr"}"#,
            "\n",
            r#"{"text": "a@example.com b@example.com", "anonymize": true, "operator": "numbered"}"#,
            "\n",
        );

        let (summary, records) = run_lines(input).await;
        assert_eq!(summary, Summary { processed: 2, failed: 2 });
        assert_eq!(records.len(), 4);

        assert_eq!(records[0]["entity_count"], 2);
        assert_eq!(records[0]["anonymized_text"], "Call [PHONE_NUMBER] or email [EMAIL]");

        assert_eq!(records[1]["line"], 3);
        assert!(!records[1]["error"].as_str().unwrap().contains("not json"));

        assert_eq!(records[2]["line"], 4);
        assert!(records[2]["error"].as_str().unwrap().contains("locale"));

        assert_eq!(records[3]["anonymized_text"], "[EMAIL_1] [EMAIL_2]");
    }

    #[tokio::test]
    async fn test_batch_entity_filter() {
        let input = r#"{"text": "Call 08123456789 or email budi@example.com", "entities": ["EMAIL"]}"#;
        let (summary, records) = run_lines(input).await;
        assert_eq!(summary.processed, 1);
        assert_eq!(records[0]["entity_count"], 1);
        assert_eq!(records[0]["detections"][0]["type"], "EMAIL");
        assert!(records[0].get("anonymized_text").is_none());
    }

    #[tokio::test]
    async fn test_batch_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.jsonl");
        let output = dir.path().join("out.jsonl");
        std::fs::write(&input, "{\"text\": \"budi@example.com\"}\n").unwrap();

        handle(Some(input), Some(output.clone()), &Config::default())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("\"entity_count\":1"));
        assert!(!written.contains("budi@example.com"));
    }
}
