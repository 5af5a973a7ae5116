//! Engine configuration.
//!
//! Provides the run and host parameters for the headless binary.
//! Configuration can be loaded from and saved to a TOML file.

use granny_gameplay::{Difficulty, RunSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "granny.toml";

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be encoded
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Run Settings ===
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Random seed (None = random)
    pub seed: Option<u64>,
    /// Gameplay toggles
    pub run: RunSettings,

    // === Loop Settings ===
    /// Simulation frames per second
    pub target_fps: u32,
    /// Stop after this many frames (0 = until the run ends)
    pub max_frames: u64,
    /// Pace frames against the wall clock
    pub realtime: bool,

    // === Autopilot Settings ===
    /// Drive the player with the autopilot
    pub autopilot: bool,
    /// Frames between autopilot interact presses
    pub interact_interval: u32,

    // === Debug Settings ===
    /// Frames between trace snapshots (0 = disabled)
    pub trace_interval: u64,
    /// Print the run summary as JSON
    pub json_summary: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            seed: None,
            run: RunSettings::default(),

            target_fps: 60,
            max_frames: 60 * 60 * 10, // ten simulated minutes
            realtime: false,

            autopilot: true,
            interact_interval: 30,

            trace_interval: 600,
            json_summary: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to load config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration from a path, reporting every failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.target_fps = self.target_fps.clamp(10, 240);
        self.interact_interval = self.interact_interval.max(1);
        self.run = self.run.validated();
    }
}
