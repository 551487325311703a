// vizstream_scenarios/src/scenarios/mod.rs

//! Scenario generators: deterministic mappings from a time offset to one
//! bundle of entity poses and drawable primitives, emitted as protocol
//! envelopes a viewer consumes.

pub mod orbit;
pub mod straight;

pub use orbit::OrbitScenario;
pub use straight::StraightScenario;

use std::time::{SystemTime, UNIX_EPOCH};

use vizstream_core::prelude::{BuildError, Envelope};

use crate::config::ScenarioConfig;

// --- SCENARIO TRAIT ---
/// The contract every scenario generator fulfills. Instances are
/// single-owner and non-reentrant: the only mutable state is the cached
/// metadata and (for generators that draw a one-time full frame) the
/// first-call flag.
pub trait Scenario {
    /// The one-time session schema, wrapped in a metadata envelope.
    /// Idempotent after the first call; the underlying metadata object is
    /// cached for the generator's lifetime.
    fn get_metadata(&mut self) -> Result<Envelope, BuildError>;

    /// One frame message for simulation time `origin + time_offset`
    /// seconds. The frame is built fresh per call and not retained.
    fn get_message(&mut self, time_offset: f64) -> Result<Envelope, BuildError>;
}

/// Builds the generator selected by the configuration.
pub fn build_scenario(config: &ScenarioConfig) -> Box<dyn Scenario> {
    match config {
        ScenarioConfig::Orbit(orbit) => Box::new(OrbitScenario::new(orbit.clone())),
        ScenarioConfig::Straight(straight) => Box::new(StraightScenario::new(straight.clone())),
    }
}

/// Wall-clock seconds since the Unix epoch; the origin timestamp captured
/// when a generator is constructed in live mode.
pub(crate) fn unix_time_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
