use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    alarm::AlarmSound,
    errors::{AppError, AppResult},
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// window title when no message is given
    pub default_title: String,
    /// how often the "ago" label is refreshed
    pub tick_interval_ms: u64,
    /// only does anything on windows
    pub hide_console: bool,
    /// wait for enter before exiting on a bad command line
    pub pause_on_error: bool,
    pub window: Window,
    pub sound: Sound,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: "Alarm".to_string(),
            tick_interval_ms: 1000,
            hide_console: true,
            pause_on_error: false,
            window: Window::default(),
            sound: Sound::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let config = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&config)
            .map_err(|e| AppError::Config(format!("couldn't parse {}: {e}", path.display())))?;
        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// like [`Config::load`] but a missing file just means the defaults
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let config = toml::to_string(self)
            .map_err(|e| AppError::Config(format!("couldn't serialize config: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, config)?;
        info!("wrote config to {}", path.display());
        Ok(())
    }

    pub fn config_path() -> AppResult<PathBuf> {
        let mut path = directories::ProjectDirs::from("", "", "roosty_alarm")
            .ok_or_else(|| AppError::Config("couldn't get config path".to_string()))?
            .config_dir()
            .to_path_buf();
        path.push("config.toml");
        Ok(path)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(AppError::Config(
                "tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.sound.volume) {
            return Err(AppError::Config(format!(
                "sound volume must be between 0 and 100, got {}",
                self.sound.volume
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Window {
    pub width: f32,
    pub height: f32,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 90.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Sound {
    /// play this file instead of the built in beep
    pub path: Option<PathBuf>,
    /// in percent
    pub volume: f32,
    pub beep_frequency: f32,
    pub beep_millis: u64,
}

impl Default for Sound {
    fn default() -> Self {
        Self {
            path: None,
            volume: 100.0,
            beep_frequency: 880.0,
            beep_millis: 400,
        }
    }
}

impl Sound {
    #[must_use]
    pub fn alarm_sound(&self) -> AlarmSound {
        self.path.as_ref().map_or(
            AlarmSound::Beep {
                frequency: self.beep_frequency,
                length: Duration::from_millis(self.beep_millis),
            },
            |path| AlarmSound::Custom(path.clone()),
        )
    }
}
