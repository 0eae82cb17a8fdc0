//! Text input surfaces and the style properties that affect text flow.

use super::geometry::{Insets, Point, Rect};
use crate::constants::DEFAULT_LINE_HEIGHT_FACTOR;
use serde::{Deserialize, Serialize};

/// How text wraps inside the content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// Lines only break at newlines.
    None,
    /// Break at whitespace; words wider than the line break anywhere.
    #[default]
    Word,
    /// Break between any two characters.
    Anywhere,
}

/// Case mapping applied at render time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

impl TextTransform {
    /// Map one char, keeping a one-to-one char correspondence so offsets into
    /// the rendered text stay valid offsets into the source.
    pub fn apply(self, ch: char) -> char {
        match self {
            TextTransform::None => ch,
            TextTransform::Uppercase => ch.to_uppercase().next().unwrap_or(ch),
            TextTransform::Lowercase => ch.to_lowercase().next().unwrap_or(ch),
        }
    }
}

/// Computed style of a text input surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub italic: bool,
    /// Explicit line height in pixels; `None` means a font-relative default.
    pub line_height: Option<f32>,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_transform: TextTransform,
    pub tab_size: usize,
    pub wrap: WrapMode,
    pub padding: Insets,
    pub border: Insets,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 14.0,
            font_weight: 400,
            italic: false,
            line_height: None,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_transform: TextTransform::None,
            tab_size: 4,
            wrap: WrapMode::Word,
            padding: Insets::ZERO,
            border: Insets::ZERO,
        }
    }
}

impl SurfaceStyle {
    pub fn resolved_line_height(&self) -> f32 {
        self.line_height
            .unwrap_or(self.font_size * DEFAULT_LINE_HEIGHT_FACTOR)
    }
}

/// A plain-text input surface the caret resolver can query.
///
/// All geometry is in viewport pixels.
pub trait TextSurface {
    /// Current text value.
    fn value(&self) -> &str;

    /// Border box of the surface in the viewport.
    fn bounding_rect(&self) -> Rect;

    /// Inner width including padding, excluding borders and scrollbars.
    fn client_width(&self) -> f32;

    /// Horizontal and vertical scroll offsets of the content.
    fn scroll_offset(&self) -> Point;

    fn style(&self) -> &SurfaceStyle;

    /// Width available to text after padding.
    fn content_width(&self) -> f32 {
        (self.client_width() - self.style().padding.horizontal()).max(0.0)
    }
}

/// Owned snapshot of a text surface.
///
/// Hosts that cannot hand out a live widget reference capture one of these
/// per query.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainSurface {
    pub value: String,
    pub rect: Rect,
    pub client_width: f32,
    pub scroll: Point,
    pub style: SurfaceStyle,
}

impl PlainSurface {
    /// Surface with default style, no scroll, and a client width equal to
    /// the border box width.
    pub fn new(value: impl Into<String>, rect: Rect) -> Self {
        Self {
            value: value.into(),
            rect,
            client_width: rect.width,
            scroll: Point::ZERO,
            style: SurfaceStyle::default(),
        }
    }

    /// Replace the style, recomputing client width from the new borders.
    pub fn with_style(mut self, style: SurfaceStyle) -> Self {
        self.client_width = (self.rect.width - style.border.horizontal()).max(0.0);
        self.style = style;
        self
    }

    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }
}

impl TextSurface for PlainSurface {
    fn value(&self) -> &str {
        self.value.as_str()
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn client_width(&self) -> f32 {
        self.client_width
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn style(&self) -> &SurfaceStyle {
        &self.style
    }
}
