use crate::shell::Section;
use serde::Deserialize;
use std::path::PathBuf;

/// Console configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the store actor's request channel
    pub channel_capacity: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Section shown when the console opens
    pub initial_section: Section,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            log_filter: "info".to_string(),
            initial_section: Section::Category,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
            config = serde_yaml::from_str(&contents)
                .map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
        }

        if let Ok(capacity) = std::env::var("SHOP_ADMIN_CHANNEL_CAPACITY") {
            config.channel_capacity = capacity
                .parse()
                .map_err(|_| ConfigError::Env("SHOP_ADMIN_CHANNEL_CAPACITY", capacity))?;
        }
        if let Ok(filter) = std::env::var("SHOP_ADMIN_LOG") {
            config.log_filter = filter;
        }
        if let Ok(section) = std::env::var("SHOP_ADMIN_SECTION") {
            config.initial_section = section
                .parse()
                .map_err(|_| ConfigError::Env("SHOP_ADMIN_SECTION", section))?;
        }

        if config.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(config)
    }

    /// Default config file path: ~/.config/shop-admin/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".config")
            .join("shop-admin")
            .join("config.yaml")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {0}: '{1}'")]
    Env(&'static str, String),
    #[error("channel_capacity must be greater than zero")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.initial_section, Section::Category);
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "channel_capacity: 8").unwrap();
        writeln!(file, "log_filter: debug").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "initial_section: Product").unwrap();

        std::env::set_var("SHOP_ADMIN_SECTION", "order");
        let config = Config::load(Some(config_path));
        std::env::remove_var("SHOP_ADMIN_SECTION");

        assert_eq!(config.unwrap().initial_section, Section::Order);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "channel_capacity: 0").unwrap();

        let result = Config::load(Some(config_path));
        assert!(matches!(result, Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
