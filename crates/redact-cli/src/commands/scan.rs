use anyhow::{Context, Result};
use std::io::Read;

use redact_config::Config;
use redact_engine::ProcessOptions;

use super::{Output, build_engine, parse_entities, resolve_operator};
use crate::cli::ScanArgs;

pub async fn handle(args: ScanArgs, config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    let options = ProcessOptions {
        anonymize: args.anonymize,
        locale: args.locale.clone(),
        entities: parse_entities(&args.entities)?,
        operator: resolve_operator(args.operator.as_deref(), args.mask_char, config)?,
    };

    let result = match &args.text {
        Some(text) => engine.process_with(text, &options).await?,
        None => {
            let bytes = read_input(&args)?;
            engine.process_bytes(&bytes, &options).await?
        }
    };

    let output = Output::new(&result);
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

fn read_input(args: &ScanArgs) -> Result<Vec<u8>> {
    match &args.file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}
