//! Backlight device selection.
//!
//! The device directory is resolved from built-in defaults, an optional
//! JSON file, environment variables and finally the command line.

use crate::errors::{BacklightError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLASS_DIR: &str = "/sys/class/backlight";
pub const DEFAULT_DEVICE: &str = "intel_backlight";

const ENV_CLASS_DIR: &str = "BACKLIGHT_CTL_CLASS_DIR";
const ENV_DEVICE: &str = "BACKLIGHT_CTL_DEVICE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding backlight devices, normally `/sys/class/backlight`
    pub class_dir: PathBuf,
    /// Name of the device directory inside `class_dir`
    pub device: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_dir: PathBuf::from(DEFAULT_CLASS_DIR),
            device: DEFAULT_DEVICE.to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration for this process.
    ///
    /// `device` is the `--device` override from the command line.
    pub fn resolve(device: Option<&str>) -> Result<Self> {
        let path = Self::get_config_path();
        let mut config = match path {
            Some(ref p) if p.exists() => Self::load_from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        if let Some(device) = device {
            config.device = device.to_string();
        }
        config.validate()?;
        debug!("Resolved backlight config: {:?}", config);
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&json)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_CLASS_DIR).filter(|v| !v.is_empty()) {
            self.class_dir = PathBuf::from(dir);
        }
        if let Some(device) = lookup(ENV_DEVICE).filter(|v| !v.is_empty()) {
            self.device = device;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.device.is_empty() {
            return Err(BacklightError::Config(
                "backlight device name is empty".to_string(),
            ));
        }
        if self.device.contains('/') || self.device == "." || self.device == ".." {
            return Err(BacklightError::Config(format!(
                "invalid backlight device name: {:?}",
                self.device
            )));
        }
        Ok(())
    }

    pub fn device_dir(&self) -> PathBuf {
        self.class_dir.join(&self.device)
    }

    /// `$XDG_CONFIG_HOME/backlight-ctl/config.json`, or the same under
    /// `$HOME/.config`.
    pub fn get_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("backlight-ctl").join("config.json"))
    }
}
