//! Maps viewport coordinates over a plain-text surface to char offsets and
//! words.
//!
//! Plain multi-line inputs expose no hit-testing of their own, so the
//! resolver re-renders the surface text into a mirror with matching style and
//! scans the mirror's char boxes.

pub mod geometry;
pub mod mirror;
pub mod monospace;
pub mod surface;
pub mod word;

pub use geometry::{Insets, Point, Rect};
pub use mirror::{MeasureSurface, MirrorContent, MirrorStyle};
pub use monospace::MonospaceMirror;
pub use surface::{PlainSurface, SurfaceStyle, TextSurface, TextTransform, WrapMode};
pub use word::{word_bounds_at, WordInfo};

use crate::config::Config;
use crate::constants::{DEFAULT_HOVER_CACHE_RADIUS, DEFAULT_MONOSPACE_ADVANCE, MIRROR_SENTINEL};
use crate::error::CoreError;
use tracing::{debug, trace};
use word::char_to_byte;

/// The most recent word lookup.
#[derive(Clone, Debug)]
struct WordQuery {
    point: Point,
    result: Option<WordInfo>,
}

/// Resolves points over a text surface using a lazily created mirror.
///
/// Queries take `&mut self` because they rewrite the mirror; one resolver
/// serves one UI thread.
pub struct CaretResolver<M: MeasureSurface = MonospaceMirror> {
    mirror: Option<M>,
    make_mirror: Box<dyn FnMut() -> M>,
    fallback: Option<MonospaceMirror>,
    fallback_advance: f32,
    cache_radius: f32,
    last_query: Option<WordQuery>,
}

impl CaretResolver<MonospaceMirror> {
    /// Resolver backed only by coordinate arithmetic.
    pub fn monospace() -> Self {
        Self::new(MonospaceMirror::default)
    }
}

impl<M: MeasureSurface> CaretResolver<M> {
    /// Create a resolver; `make_mirror` runs on the first query.
    pub fn new(make_mirror: impl FnMut() -> M + 'static) -> Self {
        Self {
            mirror: None,
            make_mirror: Box::new(make_mirror),
            fallback: None,
            fallback_advance: DEFAULT_MONOSPACE_ADVANCE,
            cache_radius: DEFAULT_HOVER_CACHE_RADIUS,
            last_query: None,
        }
    }

    /// Create a resolver using the hover radius and fallback advance from
    /// `config`.
    pub fn from_config(config: &Config, make_mirror: impl FnMut() -> M + 'static) -> Self {
        Self::new(make_mirror)
            .with_cache_radius(config.hover_cache_radius)
            .with_fallback_advance(config.monospace_advance)
    }

    pub fn with_cache_radius(mut self, radius: f32) -> Self {
        self.cache_radius = radius;
        self
    }

    /// Column width ratio for the coordinate-arithmetic fallback.
    pub fn with_fallback_advance(mut self, advance_ratio: f32) -> Self {
        self.fallback_advance = advance_ratio;
        self.fallback = None;
        self
    }

    /// Drop the remembered word lookup, e.g. after the text changed.
    pub fn clear_cache(&mut self) {
        self.last_query = None;
    }

    /// Char offset nearest to viewport point (`x`, `y`).
    ///
    /// Points past the last character, or below the last line, resolve to
    /// the text length. Points above the first line resolve to 0.
    pub fn char_index_at_point<S: TextSurface + ?Sized>(
        &mut self,
        surface: &S,
        x: f32,
        y: f32,
    ) -> usize {
        let text = surface.value();
        let text_len = text.chars().count();
        let bounds = surface.bounding_rect();
        let padding = surface.style().padding;
        let scroll = surface.scroll_offset();
        let adjusted_x = x - bounds.left - padding.left;
        let adjusted_y = y - bounds.top - padding.top + scroll.y;

        let mut mirrored = String::with_capacity(text.len() + MIRROR_SENTINEL.len_utf8());
        mirrored.push_str(text);
        mirrored.push(MIRROR_SENTINEL);
        let style = MirrorStyle::from_surface(surface);
        let content = MirrorContent::Plain(mirrored.as_str());

        self.measure(&style, &content, |mirror| {
            scan_for_offset(mirror, adjusted_x, adjusted_y)
        })
        .flatten()
        .unwrap_or(text_len)
        .min(text_len)
    }

    /// Word under viewport point (`x`, `y`) with its viewport box.
    ///
    /// A query within the hover radius of the previous one, in both axes,
    /// returns the previous result without measuring. Whitespace and points
    /// past the end yield `None`.
    pub fn word_at_point<S: TextSurface + ?Sized>(
        &mut self,
        surface: &S,
        x: f32,
        y: f32,
    ) -> Option<WordInfo> {
        if let Some(cached) = self.cached_word(x, y) {
            trace!(x, y, "word lookup served from hover cache");
            return cached;
        }

        let text = surface.value();
        let offset = self.char_index_at_point(surface, x, y);
        let Some(bounds) = word_bounds_at(text, offset) else {
            self.remember(x, y, None);
            return None;
        };

        let start = char_to_byte(text, bounds.start);
        let end = char_to_byte(text, bounds.end);
        let style = MirrorStyle::from_surface(surface);
        let content = MirrorContent::Marked {
            before: &text[..start],
            target: &text[start..end],
            after: &text[end..],
        };
        let span = self
            .measure(&style, &content, |mirror| mirror.marked_rect())
            .flatten()?;

        let surface_rect = surface.bounding_rect();
        let padding = surface.style().padding;
        let scroll = surface.scroll_offset();
        let info = WordInfo {
            word: text[start..end].to_string(),
            rect: span.translate(
                surface_rect.left + padding.left - scroll.x,
                surface_rect.top + padding.top - scroll.y,
            ),
            index: bounds.start,
        };
        self.remember(x, y, Some(info.clone()));
        Some(info)
    }

    fn cached_word(&self, x: f32, y: f32) -> Option<Option<WordInfo>> {
        let query = self.last_query.as_ref()?;
        let near = (query.point.x - x).abs() < self.cache_radius
            && (query.point.y - y).abs() < self.cache_radius;
        near.then(|| query.result.clone())
    }

    fn remember(&mut self, x: f32, y: f32, result: Option<WordInfo>) {
        self.last_query = Some(WordQuery {
            point: Point::new(x, y),
            result,
        });
    }

    /// Render `content` and read from whichever mirror could lay it out.
    ///
    /// Returns `None` only if the fallback also fails.
    fn measure<R>(
        &mut self,
        style: &MirrorStyle,
        content: &MirrorContent<'_>,
        read: impl FnOnce(&dyn MeasureSurface) -> R,
    ) -> Option<R> {
        let mirror = self.mirror.get_or_insert_with(|| (self.make_mirror)());
        match prepare(mirror, style, content) {
            Ok(()) => return Some(read(&*mirror)),
            Err(err) => debug!(%err, "primary mirror failed; using monospace fallback"),
        }

        let advance = self.fallback_advance;
        let fallback = self
            .fallback
            .get_or_insert_with(|| MonospaceMirror::new(advance));
        match prepare(fallback, style, content) {
            Ok(()) => Some(read(&*fallback)),
            Err(err) => {
                debug!(%err, "monospace fallback failed");
                None
            }
        }
    }
}

fn prepare<M: MeasureSurface + ?Sized>(
    mirror: &mut M,
    style: &MirrorStyle,
    content: &MirrorContent<'_>,
) -> Result<(), CoreError> {
    mirror.sync_style(style)?;
    mirror.render(content)
}

/// Walk the rendered chars until one sits on the point's line at or right of
/// the point, or starts a line below it.
fn scan_for_offset(mirror: &dyn MeasureSurface, x: f32, y: f32) -> Option<usize> {
    for index in 0..mirror.char_count() {
        let Some(rect) = mirror.char_rect(index) else {
            continue;
        };
        if y >= rect.top && y <= rect.bottom() {
            if x < rect.left + rect.width / 2.0 {
                return Some(index);
            }
        } else if y < rect.top {
            return Some(index);
        }
    }
    None
}
