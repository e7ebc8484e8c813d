//! Engine configuration

use std::collections::{HashMap, HashSet};

use anyhow::{ensure, Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::movers::{ContinuousSettings, MoverSettings};
use structmover_domain::kinematics::SpeedLimits;
use structmover_domain::StructureType;

/// Prefix of the environment variables read by [`EngineConfig::load`].
pub const ENV_PREFIX: &str = "STRUCTMOVER";

/// Engine configuration.
///
/// Layered: built-in defaults, then an optional `structmover.toml`, then
/// `STRUCTMOVER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Above this many voxels, moves happen instantly
    pub max_animated_blocks: u64,
    /// Above this many voxels, structures cannot be moved at all
    pub max_structure_blocks: Option<u64>,

    /// Slowest allowed speed, blocks per second
    pub min_speed: f64,
    /// Fastest allowed speed, blocks per second
    pub max_speed: f64,
    /// Speed used when no duration is requested
    pub default_speed: f64,
    /// Per-archetype factor applied to `default_speed`
    pub speed_multipliers: HashMap<StructureType, f64>,

    /// Ticks the busy flag stays set after a move
    pub cooldown_ticks: u64,
    /// Additional ticks after an instant move
    pub instant_cooldown_ticks: u64,

    /// Run time of windmills, revolving doors and flags
    pub continuous_duration_secs: f64,
    /// Revolutions (or waves) per minute of continuous archetypes
    pub continuous_rpm: f64,

    /// Materials that are never detached
    pub excluded_materials: Vec<String>,
    /// Archetypes that cannot be opened
    pub disabled_types: Vec<StructureType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_animated_blocks: 1000,
            max_structure_blocks: None,
            min_speed: 0.5,
            max_speed: 12.0,
            default_speed: 3.0,
            speed_multipliers: HashMap::new(),
            cooldown_ticks: 10,
            instant_cooldown_ticks: 20,
            continuous_duration_secs: 10.0,
            continuous_rpm: 6.0,
            excluded_materials: Vec::new(),
            disabled_types: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load from `structmover.toml` (if present) and the environment.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(File::with_name("structmover").required(false))
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .try_parsing(true)
                        .list_separator(",")
                        .with_list_parse_key("excluded_materials")
                        .with_list_parse_key("disabled_types"),
                ),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()
            .context("Failed to read engine configuration")?
            .try_deserialize()
            .context("Invalid engine configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.min_speed > 0.0, "min_speed must be positive");
        ensure!(
            self.max_speed >= self.min_speed,
            "max_speed must not be below min_speed"
        );
        ensure!(self.default_speed > 0.0, "default_speed must be positive");
        ensure!(
            self.continuous_rpm > 0.0,
            "continuous_rpm must be positive"
        );
        ensure!(
            self.speed_multipliers.values().all(|factor| *factor > 0.0),
            "speed multipliers must be positive"
        );
        Ok(())
    }

    pub fn speed_limits(&self) -> SpeedLimits {
        SpeedLimits {
            min: self.min_speed,
            max: self.max_speed,
        }
    }

    /// Default speed of one archetype.
    pub fn default_speed_for(&self, kind: StructureType) -> f64 {
        self.default_speed * self.speed_multipliers.get(&kind).copied().unwrap_or(1.0)
    }

    pub fn is_disabled(&self, kind: StructureType) -> bool {
        self.disabled_types.contains(&kind)
    }

    pub fn continuous(&self) -> ContinuousSettings {
        ContinuousSettings {
            duration_secs: self.continuous_duration_secs,
            rpm: self.continuous_rpm,
        }
    }

    pub fn mover_settings(&self) -> MoverSettings {
        MoverSettings {
            cooldown_ticks: self.cooldown_ticks,
            instant_cooldown_ticks: self.instant_cooldown_ticks,
            excluded_materials: self
                .excluded_materials
                .iter()
                .cloned()
                .collect::<HashSet<_>>(),
        }
    }
}
