// vizstream_scenarios/src/config.rs

//! Loading and validating scenario configuration from disk. A scenario TOML
//! file selects one generator and its parameters plus the streaming rate.

use std::path::Path;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioFile
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioFile {
    pub scenario: ScenarioConfig,

    #[serde(default)] // Use defaults if the [stream] section is missing
    pub stream: StreamSettings,
}

/// How fast and how long to stream state updates.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSettings {
    /// State updates per second of simulation time.
    #[serde(default = "default_rate_hz")]
    pub rate_hz: f64,

    /// Number of state updates to emit. 0 streams the whole configured
    /// duration at `rate_hz`.
    #[serde(default)]
    pub frames: u32,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
            frames: 0,
        }
    }
}

// =========================================================================
// == Scenario Selection ==
// The `kind` field in TOML determines the variant.
// =========================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")] // e.g., "Orbit" in TOML maps to `Orbit` variant
pub enum ScenarioConfig {
    Orbit(OrbitConfig),
    Straight(StraightConfig),
}

impl ScenarioConfig {
    // Helper to get the string identifier for logging
    pub fn get_kind_str(&self) -> &str {
        match self {
            ScenarioConfig::Orbit(_) => "Orbit",
            ScenarioConfig::Straight(_) => "Straight",
        }
    }

    pub fn get_duration_seconds(&self) -> f64 {
        match self {
            ScenarioConfig::Orbit(c) => c.duration_seconds,
            ScenarioConfig::Straight(c) => c.duration_seconds,
        }
    }
}

/// Parameters for the orbiting-bodies scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitConfig {
    /// Live sessions omit the log window from metadata; recorded sessions
    /// embed `[origin, origin + duration_seconds]`.
    #[serde(default = "default_live")]
    pub live: bool,

    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,

    /// Accepted so older scenario files keep parsing; the orbit geometry
    /// itself uses fixed per-body radii.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Same compatibility note as `radius`.
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            live: default_live(),
            duration_seconds: default_duration_seconds(),
            radius: default_radius(),
            speed: default_speed(),
        }
    }
}

/// Parameters for the straight-track scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StraightConfig {
    #[serde(default = "default_live")]
    pub live: bool,

    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,

    /// Vehicle speed along the x-axis, meters per second.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Spacing between ground marker lines, meters.
    #[serde(default = "default_line_gap")]
    pub line_gap: f64,
}

impl Default for StraightConfig {
    fn default() -> Self {
        Self {
            live: default_live(),
            duration_seconds: default_duration_seconds(),
            speed: default_speed(),
            line_gap: default_line_gap(),
        }
    }
}

fn default_live() -> bool {
    true
}

fn default_duration_seconds() -> f64 {
    10.0
}

fn default_speed() -> f64 {
    10.0
}

fn default_radius() -> f64 {
    30.0
}

fn default_line_gap() -> f64 {
    5.0
}

fn default_rate_hz() -> f64 {
    10.0
}

// =========================================================================
// == Loading ==
// =========================================================================

/// Loads a scenario file from disk and extracts it into [`ScenarioFile`].
pub fn load_scenario_file(path: &Path) -> Result<ScenarioFile, figment::Error> {
    Figment::new().merge(Toml::file(path)).extract()
}
