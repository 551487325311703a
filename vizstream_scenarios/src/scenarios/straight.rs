// vizstream_scenarios/src/scenarios/straight.rs

//! A vehicle moving down the x-axis at constant speed, with perpendicular
//! ground marker lines recomputed around it every frame. Because the
//! visible line set changes membership as the vehicle advances, every
//! message is a complete snapshot rather than an incremental delta.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use vizstream_core::prelude::*;

use crate::config::StraightConfig;
use crate::scenarios::{unix_time_seconds, Scenario};

// --- Stream names ---
const VEHICLE_POSE: &str = "/vehicle_pose";
const GROUND_LINES: &str = "/ground_lines";

/// Marker lines cross the travel axis from y = -40 to y = +40.
const LINE_HALF_LENGTH: f64 = 40.0;

/// The visible window extends 15 m behind and 20 m ahead of the vehicle,
/// biasing the lines toward the direction of travel.
const WINDOW_BEHIND: f64 = 15.0;
const WINDOW_AHEAD: f64 = 20.0;

const LINE_STROKE_WIDTH: f64 = 0.2;

pub struct StraightScenario {
    origin: Timestamp,
    live: bool,
    duration: f64,
    speed: f64,
    line_gap: f64,
    metadata: Option<Metadata>,
}

impl StraightScenario {
    /// A generator anchored at the current wall-clock time.
    pub fn new(config: StraightConfig) -> Self {
        Self::with_origin(unix_time_seconds(), config)
    }

    /// A generator anchored at an explicit origin timestamp, for
    /// deterministic playback.
    pub fn with_origin(origin: Timestamp, config: StraightConfig) -> Self {
        Self {
            origin,
            live: config.live,
            duration: config.duration_seconds,
            speed: config.speed,
            line_gap: config.line_gap,
            metadata: None,
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
        // Ground lines are expressed directly in world space, so the stream
        // is tagged with the identity coordinate frame.
        let mut builder = MetadataBuilder::new()
            .stream(StreamDeclaration::pose(VEHICLE_POSE))
            .stream(
                StreamDeclaration::primitive(GROUND_LINES, PrimitiveKind::Polyline)
                    .with_coordinate(Coordinate::Identity)
                    .with_style(Style::stroked_with_width(LINE_STROKE_WIDTH)),
            );

        if !self.live {
            builder = builder.log_window(self.origin, self.origin + self.duration);
        }

        builder.build()
    }

    /// World x-coordinates of every marker line visible around vehicle
    /// position `x`, spaced evenly by `line_gap`.
    fn line_positions(&self, x: f64) -> Vec<f64> {
        let first = ((x - WINDOW_BEHIND) / self.line_gap).ceil() as i64;
        let last = ((x + WINDOW_AHEAD) / self.line_gap).floor() as i64;
        (first..last).map(|i| i as f64 * self.line_gap).collect()
    }
}

/// Cyclical color as a function of the line's world x-coordinate alone, so
/// a line keeps its color while it scrolls through the window. The cosine
/// arguments treat x as degrees.
fn line_color(x: f64) -> Color {
    [
        (120.0 + (x * 2.0).to_radians().cos() * 90.0) as u8,
        (200.0 + x.to_radians().cos() * 30.0) as u8,
        (170.0 + (x * 3.0).to_radians().cos() * 60.0) as u8,
    ]
}

impl Scenario for StraightScenario {
    fn get_metadata(&mut self) -> Result<Envelope, BuildError> {
        let metadata = self.cached_metadata()?;
        let envelope = Envelope::metadata(metadata)?;
        debug!(message_type = envelope.message_type, "straight metadata ready");
        Ok(envelope)
    }

    fn get_message(&mut self, time_offset: f64) -> Result<Envelope, BuildError> {
        let timestamp = self.origin + time_offset;
        let x = self.speed * time_offset;
        let line_xs = self.line_positions(x);
        let line_count = line_xs.len();

        let envelope = {
            let metadata = self.cached_metadata()?;
            let mut builder = FrameBuilder::new(metadata, timestamp)
                .update_kind(UpdateKind::Snapshot)
                .pose(
                    VEHICLE_POSE,
                    Pose::new(timestamp, Vector3::zeros(), Vector3::new(x, 0.0, 0.0)),
                );

            for line_x in line_xs {
                builder = builder.polyline(
                    GROUND_LINES,
                    vec![
                        Point3::new(line_x, -LINE_HALF_LENGTH, 0.0),
                        Point3::new(line_x, LINE_HALF_LENGTH, 0.0),
                    ],
                    Some(Style::stroke(line_color(line_x))),
                );
            }

            Envelope::state_update(&builder.build()?)?
        };

        debug!(timestamp, vehicle_x = x, lines = line_count, "straight frame emitted");
        Ok(envelope)
    }
}
