//! Error types for wordtally-core.

use thiserror::Error;

/// Errors loading or validating a [`WidgetConfig`](crate::WidgetConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or type error.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::invalid("reading.words_per_minute", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid value for 'reading.words_per_minute': must be positive"
        );
    }

    #[test]
    fn test_parse_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("not = = toml").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
