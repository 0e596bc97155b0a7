//! Configuration types for lintel.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// The three method names of the default capability contract.
pub const DEFAULT_CAPABILITY_METHODS: [&str; 3] = ["len", "less", "swap"];

/// Opaque, ordered rule arguments.
///
/// The engine never interprets the values; it forwards them verbatim to the
/// rule they are configured for. Each rule documents the arguments it reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleArguments(pub Vec<toml::Value>);

impl RuleArguments {
    /// Creates an argument list from values.
    #[must_use]
    pub fn new(values: Vec<toml::Value>) -> Self {
        Self(values)
    }

    /// Whether no arguments were configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The argument at `index`, if configured.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&toml::Value> {
        self.0.get(index)
    }

    /// Iterates over the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, toml::Value> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RuleArguments {
    type Item = &'a toml::Value;
    type IntoIter = std::slice::Iter<'a, toml::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

static NO_ARGUMENTS: RuleArguments = RuleArguments(Vec::new());

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Whether the rule runs (default: true).
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Arguments forwarded verbatim to the rule.
    #[serde(default)]
    pub arguments: RuleArguments,
}

/// Top-level configuration for a lint session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The three designated method names of the capability contract.
    #[serde(default = "default_capability_methods")]
    pub capability_methods: [String; 3],

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capability_methods: default_capability_methods(),
            rules: HashMap::new(),
        }
    }
}

fn default_capability_methods() -> [String; 3] {
    DEFAULT_CAPABILITY_METHODS.map(String::from)
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |settings| settings.enabled.unwrap_or(true))
    }

    /// The arguments configured for a rule; empty when none are.
    #[must_use]
    pub fn arguments_for(&self, rule_name: &str) -> &RuleArguments {
        self.rules
            .get(rule_name)
            .map_or(&NO_ARGUMENTS, |settings| &settings.arguments)
    }

    /// The capability contract's method names as string slices.
    #[must_use]
    pub fn capability_method_names(&self) -> [&str; 3] {
        [
            self.capability_methods[0].as_str(),
            self.capability_methods[1].as_str(),
            self.capability_methods[2].as_str(),
        ]
    }
}

/// Errors that can occur loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config from {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Invalid TOML content.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
capability_methods = ["size", "compare", "exchange"]

[rules.context-first]
arguments = ["app.Context"]

[rules.noisy]
enabled = false
"#;

    #[test]
    fn parses_rule_arguments_in_order() {
        let config = Config::parse(SAMPLE).expect("sample config should parse");
        let args = config.arguments_for("context-first");
        assert_eq!(args.get(0).and_then(toml::Value::as_str), Some("app.Context"));
    }

    #[test]
    fn unknown_rule_has_empty_arguments_and_is_enabled() {
        let config = Config::parse(SAMPLE).expect("sample config should parse");
        assert!(config.arguments_for("does-not-exist").is_empty());
        assert!(config.is_rule_enabled("does-not-exist"));
    }

    #[test]
    fn disabled_rule_is_reported_disabled() {
        let config = Config::parse(SAMPLE).expect("sample config should parse");
        assert!(!config.is_rule_enabled("noisy"));
        assert!(config.is_rule_enabled("context-first"));
    }

    #[test]
    fn capability_methods_default_to_fixed_contract() {
        let config = Config::default();
        assert_eq!(
            config.capability_method_names(),
            DEFAULT_CAPABILITY_METHODS
        );
    }

    #[test]
    fn capability_methods_are_overridable() {
        let config = Config::parse(SAMPLE).expect("sample config should parse");
        assert_eq!(
            config.capability_method_names(),
            ["size", "compare", "exchange"]
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write config");
        let config = Config::from_file(file.path()).expect("config should load");
        assert!(!config.is_rule_enabled("noisy"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/lintel.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("rules = 3").expect_err("invalid config should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
