use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redact")]
#[command(about = "Detect and anonymize PII in text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: user config dir)
    #[arg(long, global = true, env = "REDACT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan text for PII and print the result as JSON
    Scan(ScanArgs),

    /// Process JSON-lines requests, one result per line
    Batch {
        /// Input file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show engine configuration
    Status,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Text to scan (default: stdin)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Also print the anonymized text
    #[arg(long)]
    pub anonymize: bool,

    /// Locale for phone and national ID rules (id, us, gb)
    #[arg(long)]
    pub locale: Option<String>,

    /// Only detect these entity types (e.g. EMAIL,PHONE_NUMBER)
    #[arg(long, value_delimiter = ',')]
    pub entities: Vec<String>,

    /// Anonymization operator: replace, numbered or mask
    #[arg(long)]
    pub operator: Option<String>,

    /// Mask character for the mask operator
    #[arg(long)]
    pub mask_char: Option<char>,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,

    /// Print the effective configuration
    Show,
}
