//! What the tooltip shows on a given frame

use crate::domain::color::SampledColor;

/// Background for the label shown before the first successful sample
const PLACEHOLDER_BACKGROUND: SampledColor = SampledColor::new(40, 40, 40);

/// Background for the clipboard failure label
const FAILURE_BACKGROUND: SampledColor = SampledColor::new(200, 40, 40);

/// Kind of label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Nothing sampled yet
    Placeholder,
    /// Showing a sampled color
    Color(SampledColor),
    /// The clipboard write for this color failed
    CopyFailed(SampledColor),
}

/// Text and colors for one tooltip frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLabel {
    pub kind: LabelKind,
    pub text: String,
    pub background: SampledColor,
    pub foreground: SampledColor,
}

impl TooltipLabel {
    /// Label for a sampled color, e.g. "#FF0080  (255, 0, 128)"
    pub fn for_color(color: SampledColor) -> Self {
        Self {
            kind: LabelKind::Color(color),
            text: format!(
                "{}  ({}, {}, {})",
                color.to_hex(),
                color.red,
                color.green,
                color.blue
            ),
            background: color,
            foreground: color.contrast_color(),
        }
    }

    /// Label shown until a pixel has been read
    pub fn placeholder() -> Self {
        Self {
            kind: LabelKind::Placeholder,
            text: "--".to_string(),
            background: PLACEHOLDER_BACKGROUND,
            foreground: PLACEHOLDER_BACKGROUND.contrast_color(),
        }
    }

    /// Label shown after a clipboard write failed
    pub fn copy_failed(color: SampledColor) -> Self {
        Self {
            kind: LabelKind::CopyFailed(color),
            text: format!("{}  COPY FAILED", color.to_hex()),
            background: FAILURE_BACKGROUND,
            foreground: SampledColor::WHITE,
        }
    }

    /// The color this label displays, if any
    pub fn color(&self) -> Option<SampledColor> {
        match self.kind {
            LabelKind::Placeholder => None,
            LabelKind::Color(c) | LabelKind::CopyFailed(c) => Some(c),
        }
    }
}
