use anyhow::Result;
use std::path::Path;

use redact_config::Config;

use crate::cli::ConfigCommands;

pub fn handle(cmd: ConfigCommands, config: &Config, explicit: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Path => {
            match explicit {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", Config::config_path().display()),
            }
            Ok(())
        }
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
