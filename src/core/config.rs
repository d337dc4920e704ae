//! Resolver configuration
//!
//! Collects the tunable values the availability resolver depends on.
//! A config is built once and handed to the resolver explicitly.

use serde::{Deserialize, Serialize};

use super::calendar::EraCalendar;
use super::error::{ArmoryError, Result};

/// Configuration for availability resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Era boundaries used to pick the availability rating
    pub eras: EraCalendar,

    /// Apply the tech phase as a rules tier
    ///
    /// When set, a weapon still in its experimental phase needs experimental
    /// rules and one in its advanced phase needs advanced rules, on top of
    /// the intro-level/unofficial tier of the record itself.
    pub strict_phase_gating: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            eras: EraCalendar::default(),
            strict_phase_gating: false,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResolverConfig =
            toml::from_str(content).map_err(|e| ArmoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let eras = &self.eras;
        if eras.star_league_end >= eras.succession_wars_end
            || eras.succession_wars_end >= eras.clan_invasion_end
        {
            tracing::warn!(?eras, "Rejected era calendar with unordered boundaries");
            return Err(ArmoryError::Config(format!(
                "era boundaries must be strictly increasing ({} < {} < {})",
                eras.star_league_end, eras.succession_wars_end, eras.clan_invasion_end
            )));
        }
        Ok(())
    }
}
