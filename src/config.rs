use crate::error::{SfResult, SignForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timing and gating parameters of the confirmation engine.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries kept in the inspection history.
    #[arg(long, default_value_t = 10)]
    pub history_size: usize,

    /// Minimum per-frame confidence for a label to become or feed a candidate.
    #[arg(long, default_value_t = 0.7)]
    pub detection_threshold: f64,

    /// Sightings required before a candidate is confirmed.
    #[arg(long, default_value_t = 3)]
    pub confirmation_count: u32,

    /// Max time from first sighting to confirmation.
    #[arg(long, default_value_t = 1500)]
    pub confirmation_window_ms: u64,

    /// Display is held at "Detecting..." this long after a candidate change.
    #[arg(long, default_value_t = 500)]
    pub grace_period_ms: u64,

    /// Added to the candidate confidence on confirmation (capped at 1.0).
    #[arg(long, default_value_t = 0.1)]
    pub confirmation_bonus: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_size: 10,
            detection_threshold: 0.7,
            confirmation_count: 3,
            confirmation_window_ms: 1500,
            grace_period_ms: 500,
            confirmation_bonus: 0.1,
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SfResult<()> {
        if self.history_size == 0 {
            return Err(SignForgeError::Config(
                "history_size must be at least 1".to_string(),
            ));
        }
        if self.confirmation_count == 0 {
            return Err(SignForgeError::Config(
                "confirmation_count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detection_threshold) {
            return Err(SignForgeError::Config(format!(
                "detection_threshold {} is outside [0, 1]",
                self.detection_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.confirmation_bonus) {
            return Err(SignForgeError::Config(format!(
                "confirmation_bonus {} is outside [0, 1]",
                self.confirmation_bonus
            )));
        }
        Ok(())
    }

    /// Overwrites fields that were given explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(history_size, "history_size");
        update_if_present!(detection_threshold, "detection_threshold");
        update_if_present!(confirmation_count, "confirmation_count");
        update_if_present!(confirmation_window_ms, "confirmation_window_ms");
        update_if_present!(grace_period_ms, "grace_period_ms");
        update_if_present!(confirmation_bonus, "confirmation_bonus");
    }
}
