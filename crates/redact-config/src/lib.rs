use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for redact, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Longest accepted input, in chars
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    #[serde(default)]
    pub locales: LocalesConfig,

    #[serde(default)]
    pub recognizers: RecognizersConfig,

    #[serde(default)]
    pub contextual: ContextualConfig,

    #[serde(default)]
    pub anonymizer: AnonymizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalesConfig {
    /// Locale used when a request names none
    #[serde(default = "default_locale")]
    pub default: String,

    #[serde(default = "default_enabled_locales")]
    pub enabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizersConfig {
    /// Pattern recognizer families to run
    #[serde(default = "default_enabled_recognizers")]
    pub enabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualConfig {
    /// `heuristic`, `http` or `disabled`
    #[serde(default = "default_backend")]
    pub backend: String,

    /// NER sidecar endpoint, required for the `http` backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Place names added to the heuristic gazetteer
    #[serde(default)]
    pub extra_locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// `replace`, `numbered` or `mask`
    #[serde(default = "default_operator")]
    pub operator: String,

    #[serde(default = "default_mask_char")]
    pub mask_char: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            locales: LocalesConfig::default(),
            recognizers: RecognizersConfig::default(),
            contextual: ContextualConfig::default(),
            anonymizer: AnonymizerConfig::default(),
        }
    }
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: default_locale(),
            enabled: default_enabled_locales(),
        }
    }
}

impl Default for RecognizersConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_recognizers(),
        }
    }
}

impl Default for ContextualConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            confidence_floor: default_confidence_floor(),
            timeout_ms: default_timeout_ms(),
            extra_locations: Vec::new(),
        }
    }
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            mask_char: default_mask_char(),
        }
    }
}

fn default_max_input_chars() -> usize {
    100_000
}

fn default_locale() -> String {
    "id".to_string()
}

fn default_enabled_locales() -> Vec<String> {
    vec!["id".to_string(), "us".to_string(), "gb".to_string()]
}

fn default_enabled_recognizers() -> Vec<String> {
    [
        "email",
        "credit_card",
        "ip_address",
        "iban",
        "url",
        "phone",
        "national_id",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_backend() -> String {
    "heuristic".to_string()
}

fn default_confidence_floor() -> f64 {
    0.5
}

fn default_timeout_ms() -> u64 {
    2_000
}

fn default_operator() -> String {
    "replace".to_string()
}

fn default_mask_char() -> char {
    '*'
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, config.to_toml()?)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file; it must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "redact", "redact") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.redact/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_input_chars, 100_000);
        assert_eq!(config.locales.default, "id");
        assert_eq!(config.contextual.backend, "heuristic");
        assert_eq!(config.contextual.confidence_floor, 0.5);
        assert_eq!(config.contextual.timeout_ms, 2_000);
        assert_eq!(config.anonymizer.mask_char, '*');
        assert_eq!(config.recognizers.enabled.len(), 7);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.max_input_chars, config.max_input_chars);
        assert_eq!(parsed.locales.enabled, config.locales.enabled);
        assert_eq!(parsed.anonymizer.mask_char, config.anonymizer.mask_char);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            max_input_chars = 500

            [contextual]
            backend = "http"
            url = "http://127.0.0.1:8000/ner"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_input_chars, 500);
        assert_eq!(config.contextual.backend, "http");
        assert_eq!(config.contextual.url.as_deref(), Some("http://127.0.0.1:8000/ner"));
        assert_eq!(config.contextual.timeout_ms, 2_000);
        assert_eq!(config.locales.default, "id");
        assert_eq!(config.anonymizer.operator, "replace");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[locales]\ndefault = \"us\"\nenabled = [\"us\"]\n\n[anonymizer]\noperator = \"mask\"\nmask_char = \"#\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locales.default, "us");
        assert_eq!(config.locales.enabled, vec!["us".to_string()]);
        assert_eq!(config.anonymizer.operator, "mask");
        assert_eq!(config.anonymizer.mask_char, '#');
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_input_chars = \"lots\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
