// vizstream_scenarios/src/scenarios/orbit.rs

//! A solar-system-like hierarchy of bodies rotating around a shared system
//! origin. The first frame draws everything once (poses, the full link
//! topology, the orb primitives); every later frame is an incremental
//! update touching only the rotating poses and one scripted link.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use vizstream_core::prelude::*;

use crate::config::OrbitConfig;
use crate::scenarios::{unix_time_seconds, Scenario};

// --- Stream names ---
const VEHICLE_POSE: &str = "/vehicle_pose";
const SYSTEM: &str = "/system";
const EARTH_ORBIT: &str = "/earth_orbit";
const MOON_ORBIT: &str = "/moon_orbit";
const MARS_ORBIT: &str = "/mars_orbit";
const SUN_POSE: &str = "/sun_pose";
const EARTH_POSE: &str = "/earth_pose";
const MOON_POSE: &str = "/moon_pose";
const MARS_POSE: &str = "/mars_pose";
const SUN: &str = "/sun";
const EARTH: &str = "/earth";
const MOON: &str = "/moon";
const MARS: &str = "/mars";

/// Orbital phase advances 45 degrees per second of elapsed time.
const DEGREES_PER_SECOND: f64 = 45.0;

/// The moon flips which planet it nominally orbits halfway through this
/// cycle. Scripted demo behavior, not orbital mechanics.
const MOON_CYCLE_SECONDS: f64 = 10.0;

// Fixed offsets along the local x-axis; the orbit frames supply the rotation.
const EARTH_ORBIT_RADIUS: f64 = 25.0;
const MOON_ORBIT_RADIUS: f64 = 10.0;
const MARS_ORBIT_RADIUS: f64 = 50.0;

/// Whether the next frame is the one-time full draw or a steady-state delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramePhase {
    AwaitingFirstFrame,
    SteadyState,
}

pub struct OrbitScenario {
    origin: Timestamp,
    live: bool,
    duration: f64,
    metadata: Option<Metadata>,
    phase: FramePhase,
}

impl OrbitScenario {
    /// A generator anchored at the current wall-clock time.
    pub fn new(config: OrbitConfig) -> Self {
        Self::with_origin(unix_time_seconds(), config)
    }

    /// A generator anchored at an explicit origin timestamp, for
    /// deterministic playback.
    pub fn with_origin(origin: Timestamp, config: OrbitConfig) -> Self {
        Self {
            origin,
            live: config.live,
            duration: config.duration_seconds,
            metadata: None,
            phase: FramePhase::AwaitingFirstFrame,
        }
    }

    fn cached_metadata(&mut self) -> Result<&Metadata, BuildError> {
        let metadata = match self.metadata.take() {
            Some(metadata) => metadata,
            None => self.build_metadata()?,
        };
        Ok(self.metadata.insert(metadata))
    }

    fn build_metadata(&self) -> Result<Metadata, BuildError> {
        let mut builder = MetadataBuilder::new()
            .stream(StreamDeclaration::pose(VEHICLE_POSE))
            .stream(StreamDeclaration::pose(SYSTEM))
            .stream(StreamDeclaration::pose(EARTH_ORBIT))
            .stream(StreamDeclaration::pose(MOON_ORBIT))
            .stream(StreamDeclaration::pose(MARS_ORBIT))
            .stream(StreamDeclaration::pose(SUN_POSE))
            .stream(StreamDeclaration::pose(EARTH_POSE))
            .stream(StreamDeclaration::pose(MOON_POSE))
            .stream(StreamDeclaration::pose(MARS_POSE))
            .stream(StreamDeclaration::primitive(SUN, PrimitiveKind::Circle))
            .stream(StreamDeclaration::primitive(EARTH, PrimitiveKind::Circle))
            .stream(StreamDeclaration::primitive(MOON, PrimitiveKind::Circle))
            .stream(StreamDeclaration::primitive(MARS, PrimitiveKind::Circle));

        if !self.live {
            builder = builder.log_window(self.origin, self.origin + self.duration);
        }

        builder.build()
    }

    /// The one-time full draw: static anchor poses, the complete link
    /// topology, and the four orbs at their local origins.
    fn first_frame(metadata: &Metadata, timestamp: Timestamp) -> Result<Frame, BuildError> {
        FrameBuilder::new(metadata, timestamp)
            .update_kind(UpdateKind::Persistent)
            // The vehicle and the system anchor both sit at the origin.
            .pose(VEHICLE_POSE, Pose::stationary(timestamp))
            .pose(SYSTEM, Pose::stationary(timestamp))
            .link(SYSTEM, SUN_POSE)
            .link(SYSTEM, EARTH_ORBIT)
            .link(SYSTEM, MARS_ORBIT)
            .link(SUN_POSE, SUN)
            .link(EARTH_ORBIT, EARTH_POSE)
            .link(EARTH_POSE, EARTH)
            .link(MOON_ORBIT, MOON_POSE)
            .link(MOON_POSE, MOON)
            .link(MARS_ORBIT, MARS_POSE)
            .link(MARS_POSE, MARS)
            .circle(SUN, Point3::origin(), 9.0, Some(Style::fill([255, 180, 40])))
            .circle(EARTH, Point3::origin(), 5.0, Some(Style::fill([20, 50, 190])))
            .circle(MOON, Point3::origin(), 1.0, Some(Style::fill([200, 200, 200])))
            .circle(MARS, Point3::origin(), 4.0, Some(Style::fill([255, 0, 0])))
            .build()
    }

    /// Steady state: only the rotating poses and the scripted moon link.
    fn steady_frame(metadata: &Metadata, timestamp: Timestamp) -> Result<Frame, BuildError> {
        let angle = (timestamp * DEGREES_PER_SECOND).to_radians();

        let builder = FrameBuilder::new(metadata, timestamp)
            .update_kind(UpdateKind::Incremental)
            // Refresh the vehicle anchor at the frame timestamp.
            .pose(VEHICLE_POSE, Pose::stationary(timestamp))
            // Orbit anchors spin in place around the system origin; mars
            // runs retrograde.
            .pose(EARTH_ORBIT, Pose::yawed(timestamp, angle, Vector3::zeros()))
            .pose(MOON_ORBIT, Pose::yawed(timestamp, angle, Vector3::zeros()))
            .pose(MARS_ORBIT, Pose::yawed(timestamp, -angle, Vector3::zeros()))
            .pose(SUN_POSE, Pose::yawed(timestamp, angle, Vector3::zeros()))
            // Bodies sit at fixed offsets along their orbit frame's x-axis.
            .pose(
                EARTH_POSE,
                Pose::yawed(timestamp, angle, Vector3::new(EARTH_ORBIT_RADIUS, 0.0, 0.0)),
            )
            .pose(
                MOON_POSE,
                Pose::yawed(timestamp, angle, Vector3::new(MOON_ORBIT_RADIUS, 0.0, 0.0)),
            )
            .pose(
                MARS_POSE,
                Pose::yawed(timestamp, angle, Vector3::new(MARS_ORBIT_RADIUS, 0.0, 0.0)),
            );

        // The moon spends the first half of each cycle tied to earth and
        // the second half tied to mars.
        let cycle = timestamp % MOON_CYCLE_SECONDS;
        let builder = if cycle > MOON_CYCLE_SECONDS / 2.0 {
            builder.link(MOON_ORBIT, MARS_POSE)
        } else {
            builder.link(MOON_ORBIT, EARTH_POSE)
        };

        builder.build()
    }
}

impl Scenario for OrbitScenario {
    fn get_metadata(&mut self) -> Result<Envelope, BuildError> {
        let metadata = self.cached_metadata()?;
        let envelope = Envelope::metadata(metadata)?;
        debug!(message_type = envelope.message_type, "orbit metadata ready");
        Ok(envelope)
    }

    fn get_message(&mut self, time_offset: f64) -> Result<Envelope, BuildError> {
        let timestamp = self.origin + time_offset;
        let phase = self.phase;

        let envelope = {
            let metadata = self.cached_metadata()?;
            let frame = match phase {
                FramePhase::AwaitingFirstFrame => Self::first_frame(metadata, timestamp)?,
                FramePhase::SteadyState => Self::steady_frame(metadata, timestamp)?,
            };
            Envelope::state_update(&frame)?
        };

        self.phase = FramePhase::SteadyState;
        debug!(?phase, timestamp, "orbit frame emitted");
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;
    use std::f64::consts::FRAC_PI_4;

    fn recorded_scenario() -> OrbitScenario {
        OrbitScenario::with_origin(
            0.0,
            OrbitConfig {
                live: false,
                ..Default::default()
            },
        )
    }

    fn live_scenario() -> OrbitScenario {
        OrbitScenario::with_origin(0.0, OrbitConfig::default())
    }

    #[test]
    fn first_message_is_persistent_then_incremental() {
        let mut scenario = live_scenario();
        let first = scenario.get_message(0.0).unwrap();
        assert_eq!(first.data["update_type"], "PERSISTENT");

        for offset in [0.1, 0.2, 5.0] {
            let next = scenario.get_message(offset).unwrap();
            assert_eq!(next.data["update_type"], "INCREMENTAL");
        }
    }

    #[test]
    fn bodies_start_on_the_x_axis_with_zero_yaw() {
        let mut scenario = live_scenario();
        scenario.get_message(0.0).unwrap(); // consume the full draw

        let update = &scenario.get_message(0.0).unwrap().data["updates"][0];
        let poses = &update["poses"];
        assert_eq!(poses["/earth_pose"]["position"], json!([25.0, 0.0, 0.0]));
        assert_eq!(poses["/moon_pose"]["position"], json!([10.0, 0.0, 0.0]));
        assert_eq!(poses["/mars_pose"]["position"], json!([50.0, 0.0, 0.0]));
        assert_eq!(poses["/earth_pose"]["orientation"][2], 0.0);
        assert_eq!(poses["/mars_orbit"]["orientation"][2], 0.0);
    }

    #[test]
    fn orbit_anchors_advance_45_degrees_per_second() {
        let mut scenario = live_scenario();
        scenario.get_message(0.0).unwrap();

        let update = &scenario.get_message(1.0).unwrap().data["updates"][0];
        let poses = &update["poses"];
        let earth_yaw = poses["/earth_orbit"]["orientation"][2].as_f64().unwrap();
        let mars_yaw = poses["/mars_orbit"]["orientation"][2].as_f64().unwrap();
        assert_abs_diff_eq!(earth_yaw, FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(mars_yaw, -FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn moon_link_toggles_halfway_through_the_cycle() {
        let mut scenario = live_scenario();
        scenario.get_message(0.0).unwrap();

        let early = scenario.get_message(3.0).unwrap();
        let links = &early.data["updates"][0]["links"];
        assert_eq!(links["/earth_pose"]["target_pose"], "/moon_orbit");
        assert!(links.get("/mars_pose").is_none());

        let late = scenario.get_message(7.0).unwrap();
        let links = &late.data["updates"][0]["links"];
        assert_eq!(links["/mars_pose"]["target_pose"], "/moon_orbit");
        assert!(links.get("/earth_pose").is_none());
    }

    #[test]
    fn first_frame_draws_the_full_topology_and_orbs() {
        let mut scenario = live_scenario();
        let update = &scenario.get_message(0.0).unwrap().data["updates"][0];

        assert_eq!(update["links"].as_object().unwrap().len(), 10);
        assert_eq!(update["links"]["/sun_pose"]["target_pose"], "/system");
        assert_eq!(update["poses"]["/system"]["position"], json!([0.0, 0.0, 0.0]));

        let sun = &update["primitives"]["/sun"]["circles"][0];
        assert_eq!(sun["radius"], 9.0);
        assert_eq!(sun["base"]["style"]["fill_color"], json!([255, 180, 40]));
        let moon = &update["primitives"]["/moon"]["circles"][0];
        assert_eq!(moon["radius"], 1.0);
    }

    #[test]
    fn metadata_is_idempotent_and_embeds_the_log_window_when_recorded() {
        let mut scenario = recorded_scenario();
        let first = scenario.get_metadata().unwrap().to_json_string().unwrap();
        let second = scenario.get_metadata().unwrap().to_json_string().unwrap();
        assert_eq!(first, second);

        let envelope = scenario.get_metadata().unwrap();
        assert_eq!(envelope.message_type, "xviz/metadata");
        assert_eq!(
            envelope.data["log_info"],
            json!({ "log_start_time": 0.0, "log_end_time": 10.0 })
        );
        assert_eq!(envelope.data["streams"]["/sun"]["primitive_type"], "CIRCLE");
        assert_eq!(envelope.data["streams"].as_object().unwrap().len(), 13);

        let mut live = live_scenario();
        let envelope = live.get_metadata().unwrap();
        assert!(envelope.data.get("log_info").is_none());
    }
}
