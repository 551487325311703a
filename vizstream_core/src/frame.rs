// vizstream_core/src/frame.rs

//! Per-frame message assembly: poses, links, and drawable primitives for
//! one timestamp, validated against the session metadata and frozen into an
//! immutable [`Frame`].

use std::collections::BTreeMap;

use nalgebra::{Point3, Vector3};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::BuildError;
use crate::metadata::{Metadata, StreamDeclaration};
use crate::serde_helpers;
use crate::style::Style;
use crate::types::{Category, PrimitiveKind, Timestamp, UpdateKind};

/// A timestamped rigid transform for one named entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pose {
    pub timestamp: Timestamp,

    /// Roll, pitch, yaw in radians.
    #[serde(with = "serde_helpers::vec3_as_array")]
    pub orientation: Vector3<f64>,

    #[serde(with = "serde_helpers::vec3_as_array")]
    pub position: Vector3<f64>,
}

impl Pose {
    pub fn new(timestamp: Timestamp, orientation: Vector3<f64>, position: Vector3<f64>) -> Self {
        Self {
            timestamp,
            orientation,
            position,
        }
    }

    /// A pose at the origin with zero orientation.
    pub fn stationary(timestamp: Timestamp) -> Self {
        Self::new(timestamp, Vector3::zeros(), Vector3::zeros())
    }

    /// Yaw-only rotation at a fixed position offset.
    pub fn yawed(timestamp: Timestamp, yaw: f64, position: Vector3<f64>) -> Self {
        Self::new(timestamp, Vector3::new(0.0, 0.0, yaw), position)
    }
}

/// The optional per-instance attributes shared by every primitive shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrimitiveBase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl PrimitiveBase {
    fn is_empty(&self) -> bool {
        self.style.is_none()
    }
}

/// A circle: center plus radius.
#[derive(Debug, Clone, Serialize)]
pub struct Circle {
    #[serde(with = "serde_helpers::point3_as_array")]
    pub center: Point3<f64>,
    pub radius: f64,
    #[serde(skip_serializing_if = "PrimitiveBase::is_empty")]
    pub base: PrimitiveBase,
}

/// A polyline: ordered vertices, flattened on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Polyline {
    #[serde(with = "serde_helpers::points_as_flat_array")]
    pub vertices: Vec<Point3<f64>>,
    #[serde(skip_serializing_if = "PrimitiveBase::is_empty")]
    pub base: PrimitiveBase,
}

/// All primitives emitted on one stream in one frame, grouped by shape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrimitiveSet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub circles: Vec<Circle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub polylines: Vec<Polyline>,
}

/// Declares that the keyed stream's frame is relative to `target_pose`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub target_pose: String,
}

/// The entity bundle for one timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct StateUpdate {
    pub timestamp: Timestamp,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub poses: BTreeMap<String, Pose>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub primitives: BTreeMap<String, PrimitiveSet>,

    /// Keyed by child stream; the value names the parent pose.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
}

/// One complete frame message, tagged with its update semantics.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    #[serde(rename = "update_type")]
    pub update_kind: UpdateKind,

    /// The wire projection carries a list of update bundles; this kernel
    /// always emits exactly one per frame.
    #[serde(rename = "updates", serialize_with = "single_update_as_seq")]
    pub update: StateUpdate,
}

fn single_update_as_seq<S>(update: &StateUpdate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(std::iter::once(update))
}

impl Frame {
    /// The single update bundle carried by this frame.
    pub fn state(&self) -> &StateUpdate {
        &self.update
    }

    /// The plain-object projection consumed by the envelope layer.
    pub fn to_object(&self) -> Result<Value, BuildError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Staged builder for [`Frame`]. Accumulates declarations for one
/// timestamp, then validates every stream reference against the session
/// metadata when the frame is frozen.
#[derive(Debug)]
pub struct FrameBuilder<'a> {
    metadata: &'a Metadata,
    update_kind: UpdateKind,
    update: StateUpdate,
}

impl<'a> FrameBuilder<'a> {
    pub fn new(metadata: &'a Metadata, timestamp: Timestamp) -> Self {
        Self {
            metadata,
            update_kind: UpdateKind::Snapshot,
            update: StateUpdate {
                timestamp,
                poses: BTreeMap::new(),
                primitives: BTreeMap::new(),
                links: BTreeMap::new(),
            },
        }
    }

    pub fn update_kind(mut self, kind: UpdateKind) -> Self {
        self.update_kind = kind;
        self
    }

    pub fn pose(mut self, stream: impl Into<String>, pose: Pose) -> Self {
        self.update.poses.insert(stream.into(), pose);
        self
    }

    /// Declares that `child`'s frame is relative to `parent`'s pose.
    pub fn link(mut self, parent: impl Into<String>, child: impl Into<String>) -> Self {
        self.update.links.insert(
            child.into(),
            Link {
                target_pose: parent.into(),
            },
        );
        self
    }

    pub fn circle(
        mut self,
        stream: impl Into<String>,
        center: Point3<f64>,
        radius: f64,
        style: Option<Style>,
    ) -> Self {
        self.update
            .primitives
            .entry(stream.into())
            .or_default()
            .circles
            .push(Circle {
                center,
                radius,
                base: PrimitiveBase { style },
            });
        self
    }

    pub fn polyline(
        mut self,
        stream: impl Into<String>,
        vertices: Vec<Point3<f64>>,
        style: Option<Style>,
    ) -> Self {
        self.update
            .primitives
            .entry(stream.into())
            .or_default()
            .polylines
            .push(Polyline {
                vertices,
                base: PrimitiveBase { style },
            });
        self
    }

    /// Validates every stream reference and freezes the frame.
    pub fn build(self) -> Result<Frame, BuildError> {
        for name in self.update.poses.keys() {
            self.require_category(name, Category::Pose)?;
        }

        for (name, set) in &self.update.primitives {
            let declaration = self.require_category(name, Category::Primitive)?;
            if let Some(declared) = declaration.primitive_kind {
                if declared != PrimitiveKind::Circle && !set.circles.is_empty() {
                    return Err(BuildError::PrimitiveKindMismatch {
                        stream: name.clone(),
                        declared,
                        offered: PrimitiveKind::Circle,
                    });
                }
                if declared != PrimitiveKind::Polyline && !set.polylines.is_empty() {
                    return Err(BuildError::PrimitiveKindMismatch {
                        stream: name.clone(),
                        declared,
                        offered: PrimitiveKind::Polyline,
                    });
                }
            }
        }

        for (child, link) in &self.update.links {
            if self.metadata.stream(child).is_none() {
                return Err(BuildError::UndeclaredStream(child.clone()));
            }
            self.require_category(&link.target_pose, Category::Pose)?;
        }

        debug!(
            update_kind = ?self.update_kind,
            timestamp = self.update.timestamp,
            poses = self.update.poses.len(),
            primitives = self.update.primitives.len(),
            links = self.update.links.len(),
            "built frame message"
        );

        Ok(Frame {
            update_kind: self.update_kind,
            update: self.update,
        })
    }

    fn require_category(
        &self,
        name: &str,
        expected: Category,
    ) -> Result<&'a StreamDeclaration, BuildError> {
        let declaration = self
            .metadata
            .stream(name)
            .ok_or_else(|| BuildError::UndeclaredStream(name.to_string()))?;
        if declaration.category != expected {
            return Err(BuildError::CategoryMismatch {
                stream: name.to_string(),
                expected,
                actual: declaration.category,
            });
        }
        Ok(declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataBuilder, StreamDeclaration};
    use serde_json::json;

    fn orbit_like_metadata() -> Metadata {
        MetadataBuilder::new()
            .stream(StreamDeclaration::pose("/system"))
            .stream(StreamDeclaration::pose("/sun_pose"))
            .stream(StreamDeclaration::primitive("/sun", PrimitiveKind::Circle))
            .build()
            .unwrap()
    }

    #[test]
    fn undeclared_pose_stream_is_rejected() {
        let metadata = orbit_like_metadata();
        let result = FrameBuilder::new(&metadata, 1.0)
            .pose("/nope", Pose::stationary(1.0))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UndeclaredStream(name)) if name == "/nope"
        ));
    }

    #[test]
    fn primitive_on_pose_stream_is_a_category_mismatch() {
        let metadata = orbit_like_metadata();
        let result = FrameBuilder::new(&metadata, 1.0)
            .circle("/system", Point3::origin(), 2.0, None)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::CategoryMismatch {
                expected: Category::Primitive,
                actual: Category::Pose,
                ..
            })
        ));
    }

    #[test]
    fn wrong_shape_on_a_declared_stream_is_rejected() {
        let metadata = orbit_like_metadata();
        let result = FrameBuilder::new(&metadata, 1.0)
            .polyline("/sun", vec![Point3::origin()], None)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::PrimitiveKindMismatch {
                declared: PrimitiveKind::Circle,
                offered: PrimitiveKind::Polyline,
                ..
            })
        ));
    }

    #[test]
    fn link_parent_must_be_a_pose_stream() {
        let metadata = orbit_like_metadata();
        let result = FrameBuilder::new(&metadata, 1.0)
            .link("/sun", "/sun_pose")
            .build();

        assert!(matches!(result, Err(BuildError::CategoryMismatch { .. })));
    }

    #[test]
    fn links_project_child_to_target_pose() {
        let metadata = orbit_like_metadata();
        let frame = FrameBuilder::new(&metadata, 1.0)
            .link("/sun_pose", "/sun")
            .build()
            .unwrap();

        assert_eq!(
            frame.state().links.get("/sun"),
            Some(&Link {
                target_pose: "/sun_pose".to_string()
            })
        );
    }

    #[test]
    fn update_kind_defaults_to_snapshot() {
        let metadata = orbit_like_metadata();
        let frame = FrameBuilder::new(&metadata, 0.0).build().unwrap();
        assert_eq!(frame.update_kind, UpdateKind::Snapshot);
    }

    #[test]
    fn projection_matches_wire_shape() {
        let metadata = orbit_like_metadata();
        let frame = FrameBuilder::new(&metadata, 2.5)
            .update_kind(UpdateKind::Persistent)
            .pose("/system", Pose::stationary(2.5))
            .link("/system", "/sun_pose")
            .circle("/sun", Point3::origin(), 9.0, Some(Style::fill([255, 180, 40])))
            .build()
            .unwrap();

        assert_eq!(
            frame.to_object().unwrap(),
            json!({
                "update_type": "PERSISTENT",
                "updates": [{
                    "timestamp": 2.5,
                    "poses": {
                        "/system": {
                            "timestamp": 2.5,
                            "orientation": [0.0, 0.0, 0.0],
                            "position": [0.0, 0.0, 0.0]
                        }
                    },
                    "primitives": {
                        "/sun": {
                            "circles": [{
                                "center": [0.0, 0.0, 0.0],
                                "radius": 9.0,
                                "base": { "style": { "fill_color": [255, 180, 40] } }
                            }]
                        }
                    },
                    "links": {
                        "/sun_pose": { "target_pose": "/system" }
                    }
                }]
            })
        );
    }

    #[test]
    fn polyline_vertices_flatten_on_the_wire() {
        let metadata = MetadataBuilder::new()
            .stream(StreamDeclaration::primitive(
                "/ground_lines",
                PrimitiveKind::Polyline,
            ))
            .build()
            .unwrap();

        let frame = FrameBuilder::new(&metadata, 0.0)
            .polyline(
                "/ground_lines",
                vec![Point3::new(5.0, -40.0, 0.0), Point3::new(5.0, 40.0, 0.0)],
                None,
            )
            .build()
            .unwrap();

        let object = frame.to_object().unwrap();
        assert_eq!(
            object["updates"][0]["primitives"]["/ground_lines"]["polylines"][0]["vertices"],
            json!([5.0, -40.0, 0.0, 5.0, 40.0, 0.0])
        );
    }
}
