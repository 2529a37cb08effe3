use crate::error::LancasterError;
use serde::{de::Error as _, Deserialize, Serialize};
use std::{fs, path::Path};

/// Default chunk size for [read_stream](crate::read_stream).
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Settings for pulling values out of a byte source.
///
/// Loaded from JSON such as `{"buffer_size": 65536}`. Missing keys fall back
/// to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Number of bytes requested from the source per read.
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> StreamConfig {
        StreamConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl StreamConfig {
    pub fn with_buffer_size(mut self, buffer_size: usize) -> StreamConfig {
        self.buffer_size = buffer_size;
        self
    }

    pub fn from_json(text: &str) -> Result<StreamConfig, LancasterError> {
        let config: StreamConfig = serde_json::from_str(text).map_err(LancasterError::Config)?;
        if config.buffer_size == 0 {
            return Err(LancasterError::Config(serde_json::Error::custom(
                "buffer_size must be at least 1",
            )));
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<StreamConfig, LancasterError> {
        let text = fs::read_to_string(path)?;
        StreamConfig::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        assert_eq!(StreamConfig::default().buffer_size, 8192);
        assert_eq!(StreamConfig::from_json("{}").unwrap(), StreamConfig::default());
        assert_eq!(
            StreamConfig::default().with_buffer_size(16),
            StreamConfig { buffer_size: 16 }
        );
    }

    #[test]
    fn config_from_json() {
        let config = StreamConfig::from_json(r#"{"buffer_size": 65536}"#).unwrap();
        assert_eq!(config.buffer_size, 65536);
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"buffer_size":65536}"#
        );
    }

    #[test]
    fn config_errors() {
        assert!(matches!(
            StreamConfig::from_json(r#"{"buffer_size": -1}"#),
            Err(LancasterError::Config(_))
        ));
        assert!(matches!(
            StreamConfig::from_json(r#"{"buffer_size": 0}"#),
            Err(LancasterError::Config(_))
        ));
        assert!(matches!(
            StreamConfig::from_file("/definitely/not/here.json"),
            Err(LancasterError::Io(_))
        ));
    }
}
