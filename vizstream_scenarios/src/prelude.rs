// vizstream_scenarios/src/prelude.rs

// Re-export the entire core prelude so you can easily access the protocol
// types like `Envelope`, `FrameBuilder`, `UpdateKind`, etc.
pub use vizstream_core::prelude::*;

// Re-export common scenario-layer types for easy access.
pub use crate::config::{
    OrbitConfig, ScenarioConfig, ScenarioFile, StraightConfig, StreamSettings,
};
pub use crate::scenarios::{build_scenario, OrbitScenario, Scenario, StraightScenario};
