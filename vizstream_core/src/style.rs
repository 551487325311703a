// vizstream_core/src/style.rs

use serde::Serialize;

/// An RGB color as emitted on the wire.
pub type Color = [u8; 3];

/// Drawing style for a stream or a single primitive.
///
/// Used in two places: as a stream-level default inside metadata
/// (`stream_style`) and as a per-instance override attached to one
/// primitive. Absent fields are omitted from the wire projection so a
/// style only says what it actually sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Style {
    /// A style that only sets a fill color.
    pub fn fill(color: Color) -> Self {
        Self {
            fill_color: Some(color),
            ..Default::default()
        }
    }

    /// A style that only sets a stroke color.
    pub fn stroke(color: Color) -> Self {
        Self {
            stroke_color: Some(color),
            ..Default::default()
        }
    }

    /// A stroked style with the given line width.
    pub fn stroked_with_width(width: f64) -> Self {
        Self {
            stroked: Some(true),
            stroke_width: Some(width),
            ..Default::default()
        }
    }
}
