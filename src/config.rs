//! Store location configuration.
//!
//! Resolution order:
//! - `--store <PATH>` on the command line
//! - `DCF_STORE` environment variable
//! - `dcf_valuations.csv` in the working directory

use std::path::PathBuf;

/// Environment variable naming the store file.
pub const STORE_ENV: &str = "DCF_STORE";

/// Store file used when nothing else is configured.
pub const DEFAULT_STORE_FILE: &str = "dcf_valuations.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    /// Resolve from the command-line flag and the process environment.
    pub fn from_env(flag: Option<PathBuf>) -> Self {
        Self::resolve(flag, std::env::var(STORE_ENV).ok())
    }

    /// Resolve with explicit inputs. Blank environment values are ignored.
    pub fn resolve(flag: Option<PathBuf>, env: Option<String>) -> Self {
        let path = flag
            .or_else(|| {
                env.filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
        Self { path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let config = StoreConfig::resolve(
            Some(PathBuf::from("/tmp/flag.csv")),
            Some("/tmp/env.csv".to_string()),
        );
        assert_eq!(config.path, PathBuf::from("/tmp/flag.csv"));
    }

    #[test]
    fn test_env_used_without_flag() {
        let config = StoreConfig::resolve(None, Some("/tmp/env.csv".to_string()));
        assert_eq!(config.path, PathBuf::from("/tmp/env.csv"));
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        let config = StoreConfig::resolve(None, Some("  ".to_string()));
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.path, PathBuf::from(DEFAULT_STORE_FILE));
    }
}
