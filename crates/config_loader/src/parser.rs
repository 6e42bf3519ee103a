//! Configuration parsing
//!
//! Supports TOML (primary) and JSON (secondary) formats.

use contracts::{SinkConfig, SinkError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<SinkConfig, SinkError> {
    toml::from_str(content).map_err(|e| SinkError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<SinkConfig, SinkError> {
    serde_json::from_str(content).map_err(|e| SinkError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<SinkConfig, SinkError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_minimal() {
        let config = parse_toml("max_batch_size = 4\nclose_timeout_ms = 100\n").unwrap();
        assert_eq!(config.max_batch_size, 4);
        assert_eq!(config.close_timeout_ms, 100);
    }

    #[test]
    fn test_parse_json_minimal() {
        let config = parse_json(r#"{ "max_batch_size": 4, "close_timeout_ms": 100 }"#).unwrap();
        assert_eq!(config.max_batch_size, 4);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        let err = result.unwrap_err();
        assert!(matches!(err, SinkError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
