//! Off-screen measurement surfaces.
//!
//! A mirror re-renders the target surface's text with the same flow-affecting
//! style so per-character geometry can be read back. Rects reported by a
//! mirror are relative to its own border-box origin.

use super::geometry::{Insets, Rect};
use super::surface::{TextSurface, TextTransform, WrapMode};
use crate::error::CoreError;
use std::ops::Range;

/// Style copied from a target surface into a mirror.
///
/// Padding is not carried: the mirror's content starts at its border and is
/// exactly as wide as the target's content box, so line breaks land in the
/// same places.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub italic: bool,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_transform: TextTransform,
    pub tab_size: usize,
    pub wrap: WrapMode,
    pub border: Insets,
    pub content_width: f32,
}

impl MirrorStyle {
    pub fn from_surface<S: TextSurface + ?Sized>(surface: &S) -> Self {
        let style = surface.style();
        Self {
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            font_weight: style.font_weight,
            italic: style.italic,
            line_height: style.resolved_line_height(),
            letter_spacing: style.letter_spacing,
            word_spacing: style.word_spacing,
            text_transform: style.text_transform,
            tab_size: style.tab_size,
            wrap: style.wrap,
            border: style.border,
            content_width: surface.content_width(),
        }
    }
}

/// Text rendered into a mirror.
///
/// `Marked` wraps one span so its box can be read back after layout. The
/// segments are kept apart structurally, so no escaping is involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorContent<'a> {
    Plain(&'a str),
    Marked {
        before: &'a str,
        target: &'a str,
        after: &'a str,
    },
}

impl<'a> MirrorContent<'a> {
    /// The three text segments in order; `Plain` has empty target and tail.
    pub fn segments(&self) -> [&'a str; 3] {
        match *self {
            MirrorContent::Plain(text) => [text, "", ""],
            MirrorContent::Marked {
                before,
                target,
                after,
            } => [before, target, after],
        }
    }

    /// All rendered chars in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        let [before, target, after] = self.segments();
        before.chars().chain(target.chars()).chain(after.chars())
    }

    /// Char range of the marked span, if any.
    pub fn marked_range(&self) -> Option<Range<usize>> {
        match *self {
            MirrorContent::Plain(_) => None,
            MirrorContent::Marked { before, target, .. } => {
                let start = before.chars().count();
                Some(start..start + target.chars().count())
            }
        }
    }
}

/// A measurement surface owned by a caret resolver.
///
/// Implementations are mutated by every query and are not reentrant; callers
/// must finish reading one render before starting the next.
pub trait MeasureSurface {
    /// Apply the target's flow-affecting style.
    ///
    /// # Errors
    /// Returns [`CoreError::MeasurementUnavailable`] when the backend cannot
    /// lay text out in this environment.
    fn sync_style(&mut self, style: &MirrorStyle) -> Result<(), CoreError>;

    /// Replace the rendered content and lay it out.
    ///
    /// # Errors
    /// Returns [`CoreError::MeasurementUnavailable`] when layout fails.
    fn render(&mut self, content: &MirrorContent<'_>) -> Result<(), CoreError>;

    /// Number of measurable chars in the last render.
    fn char_count(&self) -> usize;

    /// Box of the char at `index` in the last render.
    fn char_rect(&self, index: usize) -> Option<Rect>;

    /// Box of the marked span in the last render.
    fn marked_rect(&self) -> Option<Rect>;
}

/// Union of the char rects in `range`, for backends that measure per char.
pub fn union_char_rects<M: MeasureSurface + ?Sized>(
    mirror: &M,
    range: Range<usize>,
) -> Option<Rect> {
    range
        .filter_map(|index| mirror.char_rect(index))
        .reduce(|acc, rect| acc.union(&rect))
}
