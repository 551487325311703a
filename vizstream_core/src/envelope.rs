// vizstream_core/src/envelope.rs

use serde::Serialize;
use serde_json::Value;

use crate::error::BuildError;
use crate::frame::Frame;
use crate::metadata::Metadata;

/// Envelope tag for session metadata messages.
pub const METADATA_MESSAGE_TYPE: &str = "xviz/metadata";
/// Envelope tag for per-frame state updates.
pub const STATE_UPDATE_MESSAGE_TYPE: &str = "xviz/state_update";

/// The outer message handed to a viewer or transport:
/// `{ "type": ..., "data": ... }`. The payload is the plain-object
/// projection of the metadata or frame it wraps.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub data: Value,
}

impl Envelope {
    pub fn metadata(metadata: &Metadata) -> Result<Self, BuildError> {
        Ok(Self {
            message_type: METADATA_MESSAGE_TYPE,
            data: metadata.to_object()?,
        })
    }

    pub fn state_update(frame: &Frame) -> Result<Self, BuildError> {
        Ok(Self {
            message_type: STATE_UPDATE_MESSAGE_TYPE,
            data: frame.to_object()?,
        })
    }

    pub fn to_json_string(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuilder;
    use crate::metadata::{MetadataBuilder, StreamDeclaration};

    #[test]
    fn envelopes_carry_the_protocol_type_literals() {
        let metadata = MetadataBuilder::new()
            .stream(StreamDeclaration::pose("/vehicle_pose"))
            .build()
            .unwrap();
        let frame = FrameBuilder::new(&metadata, 0.0).build().unwrap();

        let metadata_envelope = Envelope::metadata(&metadata).unwrap();
        assert_eq!(metadata_envelope.message_type, "xviz/metadata");

        let frame_envelope = Envelope::state_update(&frame).unwrap();
        assert_eq!(frame_envelope.message_type, "xviz/state_update");

        let json: serde_json::Value =
            serde_json::from_str(&frame_envelope.to_json_string().unwrap()).unwrap();
        assert_eq!(json["type"], "xviz/state_update");
        assert!(json["data"].is_object());
    }
}
