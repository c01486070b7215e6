//! # Configuration
//!
//! Chroniton configuration is loaded with [`confique`], layering environment
//! variables over `chroniton.toml` in the data directory over compiled defaults.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `badge_enabled` | `CHRONITON_BADGE_ENABLED` | `false` | Whether a due badge is shown at all |
//! | `badge_days` | `CHRONITON_BADGE_DAYS` | `0` | Lookahead in days for the badge count |
//! | `date_format` | `CHRONITON_DATE_FORMAT` | `%Y-%m-%d` | How the CLI prints and parses dates |
//!
//! ## CLI Usage
//!
//! - `chroniton config` shows the effective values.
//! - `chroniton config --template` prints a commented sample `chroniton.toml`.

use chrono::format::{Item, StrftimeItems};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChronitonError, Result};

pub const CONFIG_FILE: &str = "chroniton.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChronitonConfig {
    /// Show a count of due events as a badge.
    #[config(env = "CHRONITON_BADGE_ENABLED", default = false)]
    pub badge_enabled: bool,

    /// Days ahead to look when counting due events for the badge.
    /// 0 counts only events due today or overdue.
    #[config(env = "CHRONITON_BADGE_DAYS", default = 0)]
    pub badge_days: u32,

    /// strftime-style format for dates.
    #[config(env = "CHRONITON_DATE_FORMAT", default = "%Y-%m-%d")]
    pub date_format: String,
}

impl Default for ChronitonConfig {
    fn default() -> Self {
        Self {
            badge_enabled: false,
            badge_days: 0,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ChronitonConfig {
    /// Load from the environment and `<dir>/chroniton.toml`. A missing file is fine.
    pub fn load(dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(dir.join(CONFIG_FILE))
            .load()
            .map_err(|e| ChronitonError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, when first used.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ChronitonError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        Ok(())
    }

    /// A commented sample config file.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// Effective values as `(key, value)` pairs, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("badge_enabled", self.badge_enabled.to_string()),
            ("badge_days", self.badge_days.to_string()),
            ("date_format", self.date_format.clone()),
        ]
    }
}
