//! Session configuration: which players to simulate and how

use crate::generator::{
    default_match_start, GeneratorConfig, TelemetryGenerator, DEFAULT_MATCH_MINUTES, DEFAULT_SEED,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tkfit_core::{config_error, PlayerRole, Series, TkfitResult};
use tracing::info;

/// One simulated player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Label shown in the dashboard
    pub label: String,
    pub role: PlayerRole,
    /// Force the role's scheduled rest windows
    #[serde(default)]
    pub inject_rest_breaks: bool,
}

/// Everything needed to regenerate a dashboard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Configuration name/profile
    pub name: String,
    /// Seed shared by every player's generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_match_minutes")]
    pub match_minutes: u32,
    #[serde(default = "default_match_start", with = "tkfit_core::timestamp_format")]
    pub match_start: NaiveDateTime,
    pub players: Vec<PlayerConfig>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_match_minutes() -> u32 {
    DEFAULT_MATCH_MINUTES
}

impl SessionConfig {
    /// Post with scheduled rests against a Guard playing the whole match
    pub fn post_vs_guard() -> Self {
        SessionConfig {
            name: "Post vs Guard".to_string(),
            seed: DEFAULT_SEED,
            match_minutes: DEFAULT_MATCH_MINUTES,
            match_start: default_match_start(),
            players: vec![
                PlayerConfig {
                    label: "Post".to_string(),
                    role: PlayerRole::Post,
                    inject_rest_breaks: true,
                },
                PlayerConfig {
                    label: "Guard".to_string(),
                    role: PlayerRole::Guard,
                    inject_rest_breaks: false,
                },
            ],
        }
    }

    /// Both archetypes without any scheduled rest
    pub fn full_minutes() -> Self {
        let mut config = Self::post_vs_guard();
        config.name = "Full minutes".to_string();
        for player in &mut config.players {
            player.inject_rest_breaks = false;
        }
        config
    }

    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> TkfitResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)
            .map_err(|e| config_error!("failed to parse session config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> TkfitResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), name = %config.name, "loaded session config");
        Ok(config)
    }

    pub fn to_json(&self) -> TkfitResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| config_error!("failed to serialize session config: {}", e))
    }

    pub fn save(&self, path: &Path) -> TkfitResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check players and match parameters
    pub fn validate(&self) -> TkfitResult<()> {
        if self.players.is_empty() {
            return Err(config_error!("session '{}' has no players", self.name));
        }

        let mut labels = HashSet::new();
        for player in &self.players {
            if player.label.trim().is_empty() {
                return Err(config_error!("player label must not be empty"));
            }
            if !labels.insert(player.label.as_str()) {
                return Err(config_error!("duplicate player label '{}'", player.label));
            }
        }

        for player in &self.players {
            self.generator_config(player).validate()?;
        }

        Ok(())
    }

    /// Generator settings for one player of this session
    pub fn generator_config(&self, player: &PlayerConfig) -> GeneratorConfig {
        GeneratorConfig {
            role: player.role,
            inject_rest_breaks: player.inject_rest_breaks,
            seed: self.seed,
            match_minutes: self.match_minutes,
            match_start: self.match_start,
        }
    }

    /// Generate one series per player, in configuration order
    pub fn generate_all(&self) -> TkfitResult<Vec<(PlayerConfig, Series)>> {
        self.validate()?;

        let mut generated = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let generator = TelemetryGenerator::new(self.generator_config(player))?;
            generated.push((player.clone(), generator.generate()));
        }

        info!(
            session = %self.name,
            players = generated.len(),
            seed = self.seed,
            "generated session telemetry"
        );
        Ok(generated)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::post_vs_guard()
    }
}
