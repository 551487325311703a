// vizstream_core/src/types.rs

use serde::Serialize;

// --- Core Type Aliases ---
/// Simulation time in seconds. Generators anchor an origin timestamp at
/// construction and derive frame timestamps as `origin + offset`.
pub type Timestamp = f64;

/// What kind of entities a declared stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Pose,
    Primitive,
}

/// The shape subtype of a primitive stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveKind {
    Circle,
    Polyline,
}

/// How a stream's geometry is interpreted by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Coordinate {
    /// Relative to the pose hierarchy the stream is linked under.
    Default,
    /// Already in world space; not relative to any declared pose.
    Identity,
}

/// Update semantics of one frame message.
///
/// `Persistent` is a one-time full draw, `Incremental` touches only the
/// entities it names, `Snapshot` is complete independent state that
/// supersedes prior frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateKind {
    Persistent,
    Incremental,
    Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_as_screaming_snake_case() {
        let category = serde_json::to_value(Category::Pose).unwrap();
        assert_eq!(category, "POSE");

        let kind = serde_json::to_value(PrimitiveKind::Polyline).unwrap();
        assert_eq!(kind, "POLYLINE");

        let coordinate = serde_json::to_value(Coordinate::Identity).unwrap();
        assert_eq!(coordinate, "IDENTITY");

        let update = serde_json::to_value(UpdateKind::Persistent).unwrap();
        assert_eq!(update, "PERSISTENT");
    }
}
