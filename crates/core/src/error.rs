//! Configuration error types.

use std::path::PathBuf;

/// Errors from loading, querying, or persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory could not be determined.
    #[error("cannot determine home directory for config file")]
    NoHomeDir,

    /// Reading or writing the config file failed.
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key is not one of the recognized configuration keys.
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value cannot be parsed for the given key.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownKey("colour".to_string());
        assert!(err.to_string().contains("unknown configuration key"));
        assert!(err.to_string().contains("colour"));

        let err = ConfigError::InvalidValue { key: "timeout".into(), value: "abc".into() };
        assert!(err.to_string().contains("timeout"));
        assert!(err.to_string().contains("abc"));
    }
}
