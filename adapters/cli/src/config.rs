//! Optional TOML tunables for a headless run.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use trophy_chase_core::{LevelSettings, DEFAULT_TILE_LENGTH};
use trophy_chase_system_session::SessionRules;

/// Tunables read from a configuration file. Omitted fields take defaults.
///
/// Speeds left unset scale with the tile length: four tiles per second for
/// the player and three for pursuers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) tile_length: Option<f32>,
    pub(crate) player_speed: Option<f32>,
    pub(crate) pursuer_speed: Option<f32>,
    pub(crate) invincibility_seconds: Option<f32>,
    pub(crate) lives: Option<u32>,
    pub(crate) bonus_score: Option<u32>,
}

/// Value rejected while validating a configuration.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    /// A length or speed that must be strictly positive was not.
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The invincibility window was negative, not finite, or too long.
    #[error("`invincibility_seconds` must be a non-negative duration in range, got {0}")]
    InvalidInvincibility(f32),
    /// The session would start without lives.
    #[error("`lives` must be at least 1")]
    NoLives,
}

impl GameConfig {
    /// Reads and validates a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tile_length", self.tile_length),
            ("player_speed", self.player_speed),
            ("pursuer_speed", self.pursuer_speed),
        ] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::NotPositive { field, value });
                }
            }
        }
        if let Some(seconds) = self.invincibility_seconds {
            let _ = Duration::try_from_secs_f32(seconds)
                .map_err(|_| ConfigError::InvalidInvincibility(seconds))?;
        }
        if self.lives == Some(0) {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    /// Level tunables with defaults filled in.
    pub(crate) fn level_settings(&self) -> LevelSettings {
        let defaults =
            LevelSettings::for_tile_length(self.tile_length.unwrap_or(DEFAULT_TILE_LENGTH));
        LevelSettings {
            player_speed: self.player_speed.unwrap_or(defaults.player_speed),
            pursuer_speed: self.pursuer_speed.unwrap_or(defaults.pursuer_speed),
            invincibility: self
                .invincibility_seconds
                .and_then(|seconds| Duration::try_from_secs_f32(seconds).ok())
                .unwrap_or(defaults.invincibility),
            ..defaults
        }
    }

    /// Session bookkeeping rules with defaults filled in.
    pub(crate) fn session_rules(&self) -> SessionRules {
        let defaults = SessionRules::default();
        SessionRules {
            lives: self.lives.unwrap_or(defaults.lives),
            bonus_score: self.bonus_score.unwrap_or(defaults.bonus_score),
        }
    }
}
