// vizstream_core/src/metadata.rs

//! The one-time session schema: which streams exist, what they carry, and
//! (for recorded sessions) the log time window.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::BuildError;
use crate::style::Style;
use crate::types::{Category, Coordinate, PrimitiveKind, Timestamp};

/// Protocol revision stamped into every metadata message.
pub const METADATA_VERSION: &str = "2.0.0";

/// The fixed `[log_start_time, log_end_time]` window embedded in recorded
/// (non-live) sessions. Live sessions omit it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogInfo {
    pub log_start_time: Timestamp,
    pub log_end_time: Timestamp,
}

/// One named channel declared in metadata.
///
/// Declarations are immutable once the metadata is built; frame messages
/// may only reference streams declared here.
#[derive(Debug, Clone, Serialize)]
pub struct StreamDeclaration {
    /// Stream name, e.g. `/vehicle_pose`. Used as the map key on the wire,
    /// so it is not repeated inside the entry itself.
    #[serde(skip)]
    pub name: String,

    pub category: Category,

    #[serde(rename = "primitive_type", skip_serializing_if = "Option::is_none")]
    pub primitive_kind: Option<PrimitiveKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,

    #[serde(rename = "stream_style", skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl StreamDeclaration {
    /// Declares a pose stream.
    pub fn pose(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: Category::Pose,
            primitive_kind: None,
            coordinate: None,
            style: None,
        }
    }

    /// Declares a primitive stream carrying the given shape subtype.
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            category: Category::Primitive,
            primitive_kind: Some(kind),
            coordinate: None,
            style: None,
        }
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Staged builder for [`Metadata`]. Collects declarations, then validates
/// and freezes them in one step.
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    streams: Vec<StreamDeclaration>,
    log_info: Option<LogInfo>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(mut self, declaration: StreamDeclaration) -> Self {
        self.streams.push(declaration);
        self
    }

    /// Embeds an explicit log window. Recorded sessions set this; live
    /// sessions leave it out.
    pub fn log_window(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.log_info = Some(LogInfo {
            log_start_time: start,
            log_end_time: end,
        });
        self
    }

    pub fn build(self) -> Result<Metadata, BuildError> {
        let mut streams = BTreeMap::new();
        for declaration in self.streams {
            let name = declaration.name.clone();
            if streams.insert(name.clone(), declaration).is_some() {
                return Err(BuildError::DuplicateStream(name));
            }
        }

        debug!(
            stream_count = streams.len(),
            recorded = self.log_info.is_some(),
            "built session metadata"
        );

        Ok(Metadata {
            version: METADATA_VERSION,
            streams,
            log_info: self.log_info,
        })
    }
}

/// The immutable session schema. Built once per generator instance, cached
/// for its lifetime, and serialized deterministically (streams are keyed in
/// a sorted map) so repeated projections are byte-identical.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub version: &'static str,

    pub streams: BTreeMap<String, StreamDeclaration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_info: Option<LogInfo>,
}

impl Metadata {
    /// Looks up a declaration by stream name.
    pub fn stream(&self, name: &str) -> Option<&StreamDeclaration> {
        self.streams.get(name)
    }

    /// The plain-object projection consumed by the envelope layer.
    pub fn to_object(&self) -> Result<Value, BuildError> {
        Ok(serde_json::to_value(self)?)
    }
}
