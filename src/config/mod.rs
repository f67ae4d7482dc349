use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Capture source address: `host:port`, `tcp://host:port` or `replay:<file>`.
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub lightweight: bool,
    /// Name of the tracked object, as the capture source reports it.
    #[serde(default = "default_object")]
    pub object: String,
    /// Output file template; `{timestamp}` becomes the session start time.
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
    #[serde(default = "default_teardown_ms")]
    pub teardown_ms: u64,
    #[serde(default = "default_occluded_marker")]
    pub occluded_marker: String,
}

fn default_address() -> String {
    "192.168.11.3:801".to_string()
}
fn default_object() -> String {
    "hk_test".to_string()
}
fn default_output() -> String {
    "rawData_{timestamp}.xlsx".to_string()
}
fn default_grace_ms() -> u64 {
    3000
}
fn default_teardown_ms() -> u64 {
    1000
}
fn default_occluded_marker() -> String {
    "nan".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            lightweight: false,
            object: default_object(),
            output: default_output(),
            grace_ms: default_grace_ms(),
            teardown_ms: default_teardown_ms(),
            occluded_marker: default_occluded_marker(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("poselog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".poselog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("poselog.conf")
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the configuration to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Reject values no session could run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.object.trim().is_empty() {
            return Err(AppError::Config("object name must not be empty".into()));
        }
        if self.address.trim().is_empty() {
            return Err(AppError::Config("capture address must not be empty".into()));
        }
        crate::export::OutputFormat::from_path(&self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("object: wand\nlightweight: true\n").unwrap();
        assert_eq!(cfg.object, "wand");
        assert!(cfg.lightweight);
        assert_eq!(cfg.address, "192.168.11.3:801");
        assert_eq!(cfg.grace_ms, 3000);
    }

    #[test]
    fn unsupported_output_is_rejected() {
        let cfg = Config {
            output: "take.txt".into(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::InvalidOutput(_))));
    }
}
