use anyhow::Result;

use redact_config::Config;

use super::build_engine;

pub fn handle(config: &Config) -> Result<()> {
    let engine = build_engine(config)?;
    println!("{}", serde_json::to_string_pretty(&engine.status())?);
    Ok(())
}
