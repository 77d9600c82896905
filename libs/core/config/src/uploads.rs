use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::path::PathBuf;

/// Default ceiling for a single uploaded file (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Where product images land on local disk and how large they may be.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl UploadConfig {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }
}

impl FromEnv for UploadConfig {
    /// - UPLOAD_DIR: defaults to `uploads`
    /// - UPLOAD_MAX_BYTES: defaults to 5 MiB
    fn from_env() -> Result<Self, ConfigError> {
        let dir = env_or_default("UPLOAD_DIR", "uploads");
        let max_bytes = env_parse_or("UPLOAD_MAX_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        if max_bytes == 0 {
            return Err(ConfigError::ParseError {
                key: "UPLOAD_MAX_BYTES".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self::new(dir, max_bytes))
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new("uploads", DEFAULT_MAX_UPLOAD_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_config_defaults() {
        temp_env::with_vars(
            [("UPLOAD_DIR", None::<&str>), ("UPLOAD_MAX_BYTES", None::<&str>)],
            || {
                let config = UploadConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("uploads"));
                assert_eq!(config.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
            },
        );
    }

    #[test]
    fn test_upload_config_custom_values() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", Some("/var/lib/catalog/images")),
                ("UPLOAD_MAX_BYTES", Some("1024")),
            ],
            || {
                let config = UploadConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("/var/lib/catalog/images"));
                assert_eq!(config.max_bytes, 1024);
            },
        );
    }

    #[test]
    fn test_upload_config_rejects_zero_limit() {
        temp_env::with_var("UPLOAD_MAX_BYTES", Some("0"), || {
            let err = UploadConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("UPLOAD_MAX_BYTES"));
        });
    }
}
