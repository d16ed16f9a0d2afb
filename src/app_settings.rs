use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::scenario::Pathway;
use crate::simulation::DriverTuning;

/// Digit keys 1 through 9.
const MAX_PATHWAY_KEYS: usize = 9;

/// Application settings that control the window, pacing and the phase driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Initial window width in logical pixels
    pub window_width: u32,
    /// Initial window height in logical pixels
    pub window_height: u32,
    /// Simulation ticks per second of wall-clock time
    pub ticks_per_second: f64,
    /// Fixed seed for reproducible jitter, entropy when absent
    pub rng_seed: Option<u64>,
    /// Whether the polypeptide trail is drawn behind the protein
    pub show_trail: bool,
    /// Pathway ids bound to the digit keys, in order from `1`
    pub pathway_keys: Vec<String>,
    /// Speeds and tick budgets of the phase driver
    pub driver: DriverTuning,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: 1200,
            window_height: 800,
            ticks_per_second: 60.0,
            rng_seed: None,
            show_trail: true,
            pathway_keys: Pathway::ALL.iter().map(|p| p.id().to_string()).collect(),
            driver: DriverTuning::default(),
        }
    }
}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "settings.toml";

    /// Loads settings from the settings file, or returns default settings if the file doesn't exist
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Self::SETTINGS_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Self::from_toml(&contents)
        } else {
            log::info!("No {} found, using default settings", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let settings: AppSettings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        fn positive(name: &'static str, value: f64) -> Result<(), AppError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(AppError::InvalidSetting {
                    name,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("ticks_per_second", self.ticks_per_second)?;
        positive("driver.move_speed", self.driver.move_speed)?;
        positive("driver.drift_step", self.driver.drift_step)?;
        self.pathway_bindings()?;
        if self.window_width == 0 || self.window_height == 0 {
            return Err(AppError::InvalidSetting {
                name: "window_width/window_height",
                reason: "window must have a non-zero size".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves `pathway_keys` into the pathways selected by digits 1..=n.
    pub fn pathway_bindings(&self) -> Result<Vec<Pathway>, AppError> {
        if self.pathway_keys.is_empty() || self.pathway_keys.len() > MAX_PATHWAY_KEYS {
            return Err(AppError::InvalidSetting {
                name: "pathway_keys",
                reason: format!(
                    "expected 1 to {} pathway ids, got {}",
                    MAX_PATHWAY_KEYS,
                    self.pathway_keys.len()
                ),
            });
        }
        let bindings = self
            .pathway_keys
            .iter()
            .map(|id| id.parse::<Pathway>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bindings)
    }
}
