//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use jt_core::{ClockTime, PlacementOptions};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// First hour shown on the timeline.
    pub visible_start_hour: u32,
    /// Hour the timeline ends at.
    pub visible_end_hour: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visible_start_hour: 0,
            visible_end_hour: 24,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(path) = default_config_file() {
            figment = figment.merge(Toml::file(path));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (JT_*)
        figment = figment.merge(Env::prefixed("JT_"));

        figment.extract()
    }

    /// Rejects windows the timeline cannot draw.
    pub fn validate(&self) -> Result<()> {
        if self.visible_end_hour > 24 {
            bail!(
                "visible_end_hour must be at most 24, got {}",
                self.visible_end_hour
            );
        }
        if self.visible_start_hour >= self.visible_end_hour {
            bail!(
                "visible_start_hour ({}) must be before visible_end_hour ({})",
                self.visible_start_hour,
                self.visible_end_hour
            );
        }
        Ok(())
    }

    /// Placement options for one day under this configuration.
    pub const fn placement_options(
        &self,
        is_today: bool,
        is_future_day: bool,
        now: Option<ClockTime>,
    ) -> PlacementOptions {
        PlacementOptions {
            visible_start_hour: self.visible_start_hour,
            visible_end_hour: self.visible_end_hour,
            is_today,
            is_future_day,
            now,
        }
    }

    /// The config file contents `jt init` writes.
    pub fn to_toml(&self) -> String {
        format!(
            "# Timeline window, in whole hours.\nvisible_start_hour = {}\nvisible_end_hour = {}\n",
            self.visible_start_hour, self.visible_end_hour
        )
    }
}

/// Returns the platform-specific config directory for jt.
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("jt"))
}

/// Returns the config file read when no `--config` is given.
///
/// On Linux: `~/.config/jt/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs_config_path().map(|p| p.join("config.toml"))
}
