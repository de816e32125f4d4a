//! Player configuration resource.
//!
//! Settings for the headless playback driver, loaded from an INI file with
//! safe defaults when the file is missing. Command-line arguments override
//! loaded values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [playback]
//! tick_rate = 60.0
//! max_ticks = 600
//!
//! [output]
//! log_surfaces = false
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TICK_RATE: f32 = 60.0;
const DEFAULT_MAX_TICKS: u64 = 600;
const DEFAULT_LOG_SURFACES: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./player.ini";

/// Headless player settings.
#[derive(Resource, Debug, Clone)]
pub struct PlayerConfig {
    /// Simulation ticks per second driven through the schedule.
    pub tick_rate: f32,
    /// Hard cap on the number of ticks a run simulates.
    pub max_ticks: u64,
    /// Log every surface's derived state each tick.
    pub log_surfaces: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerConfig {
    /// Create a configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            max_ticks: DEFAULT_MAX_TICKS,
            log_surfaces: DEFAULT_LOG_SURFACES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns an
    /// error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(rate) = config.getfloat("playback", "tick_rate").ok().flatten() {
            self.tick_rate = rate as f32;
        }
        if let Some(ticks) = config.getuint("playback", "max_ticks").ok().flatten() {
            self.max_ticks = ticks;
        }
        if let Some(log_surfaces) = config.getbool("output", "log_surfaces").ok().flatten() {
            self.log_surfaces = log_surfaces;
        }

        info!(
            "Loaded player config: tick_rate={}, max_ticks={}, log_surfaces={}",
            self.tick_rate, self.max_ticks, self.log_surfaces
        );

        Ok(())
    }
}
