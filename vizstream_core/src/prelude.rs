// vizstream_core/src/prelude.rs

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::frame::{Frame, Link, Pose, StateUpdate};
pub use crate::metadata::{LogInfo, Metadata, StreamDeclaration};
pub use crate::style::{Color, Style};
pub use crate::types::{Category, Coordinate, PrimitiveKind, Timestamp, UpdateKind};

// --- Builders (The staged construction API) ---
pub use crate::frame::FrameBuilder;
pub use crate::metadata::MetadataBuilder;

// --- Output Layer ---
pub use crate::envelope::{Envelope, METADATA_MESSAGE_TYPE, STATE_UPDATE_MESSAGE_TYPE};
pub use crate::error::BuildError;
