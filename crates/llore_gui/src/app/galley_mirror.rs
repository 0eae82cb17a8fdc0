//! Measurement surface backed by egui's text layout.

use eframe::egui::{
    self,
    text::{CCursor, LayoutJob, TextFormat},
    Color32, FontFamily, FontId, Galley,
};
use llore_core::caret::mirror::union_char_rects;
use llore_core::caret::{
    Insets, MeasureSurface, MirrorContent, MirrorStyle, Rect, TextTransform, WrapMode,
};
use llore_core::CoreError;
use std::ops::Range;
use std::sync::Arc;

/// Lays mirrored text out with the same font system the editor paints with.
pub(crate) struct GalleyMirror {
    ctx: egui::Context,
    disabled: bool,
    format: Option<TextFormat>,
    wrap_width: f32,
    break_anywhere: bool,
    transform: TextTransform,
    border: Insets,
    galley: Option<Arc<Galley>>,
    char_count: usize,
    marked: Option<Range<usize>>,
}

impl GalleyMirror {
    /// A disabled mirror reports itself unavailable so the resolver uses its
    /// coordinate-arithmetic fallback.
    pub(crate) fn new(ctx: egui::Context, disabled: bool) -> Self {
        Self {
            ctx,
            disabled,
            format: None,
            wrap_width: f32::INFINITY,
            break_anywhere: false,
            transform: TextTransform::None,
            border: Insets::ZERO,
            galley: None,
            char_count: 0,
            marked: None,
        }
    }
}

fn font_family(name: &str) -> FontFamily {
    if name.to_ascii_lowercase().contains("mono") {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    }
}

impl MeasureSurface for GalleyMirror {
    fn sync_style(&mut self, style: &MirrorStyle) -> Result<(), CoreError> {
        if self.disabled {
            return Err(CoreError::MeasurementUnavailable(
                "galley mirror disabled".to_string(),
            ));
        }
        self.format = Some(TextFormat {
            font_id: FontId::new(style.font_size, font_family(&style.font_family)),
            extra_letter_spacing: style.letter_spacing,
            line_height: Some(style.line_height),
            italics: style.italic,
            color: Color32::WHITE,
            ..Default::default()
        });
        self.wrap_width = match style.wrap {
            WrapMode::None => f32::INFINITY,
            _ if style.content_width <= 0.0 => f32::INFINITY,
            _ => style.content_width,
        };
        self.break_anywhere = style.wrap == WrapMode::Anywhere;
        self.transform = style.text_transform;
        self.border = style.border;
        Ok(())
    }

    fn render(&mut self, content: &MirrorContent<'_>) -> Result<(), CoreError> {
        let Some(format) = self.format.clone() else {
            return Err(CoreError::MeasurementUnavailable(
                "galley mirror style not synchronized".to_string(),
            ));
        };
        let transform = self.transform;
        let text: String = content.chars().map(|ch| transform.apply(ch)).collect();
        self.char_count = text.chars().count();
        let mut job = LayoutJob::single_section(text, format);
        job.wrap.max_width = self.wrap_width;
        job.wrap.break_anywhere = self.break_anywhere;
        self.galley = Some(self.ctx.fonts_mut(|fonts| fonts.layout_job(job)));
        self.marked = content.marked_range();
        Ok(())
    }

    fn char_count(&self) -> usize {
        self.char_count
    }

    fn char_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.char_count {
            return None;
        }
        let galley = self.galley.as_ref()?;
        let caret = galley.pos_from_cursor(CCursor::new(index));
        let next = galley.pos_from_cursor(CCursor::new(index + 1));
        // The last char of a wrapped row has its successor on the next row.
        let width = if (next.min.y - caret.min.y).abs() < 0.5 {
            (next.min.x - caret.min.x).max(0.0)
        } else {
            0.0
        };
        Some(Rect::new(
            self.border.left + caret.min.x,
            self.border.top + caret.min.y,
            width,
            caret.height(),
        ))
    }

    fn marked_rect(&self) -> Option<Rect> {
        let range = self.marked.clone()?;
        union_char_rects(self, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llore_core::caret::{PlainSurface, SurfaceStyle};
    use llore_core::CaretResolver;

    fn mirror_style(content_width: f32) -> MirrorStyle {
        let surface = PlainSurface::new("", Rect::new(0.0, 0.0, content_width, 100.0)).with_style(
            SurfaceStyle {
                font_size: 14.0,
                line_height: Some(18.0),
                ..SurfaceStyle::default()
            },
        );
        MirrorStyle::from_surface(&surface)
    }

    /// Like `egui::__run_test_ctx`, but keeps the default fonts so glyphs
    /// have real advances.
    fn run_test_ctx(mut run_ui: impl FnMut(&egui::Context)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| run_ui(ctx));
    }

    #[test]
    fn chars_advance_left_to_right_on_one_row() {
        run_test_ctx(|ctx| {
            let mut mirror = GalleyMirror::new(ctx.clone(), false);
            mirror.sync_style(&mirror_style(500.0)).expect("sync");
            mirror
                .render(&MirrorContent::Plain("abc|"))
                .expect("render");

            assert_eq!(mirror.char_count(), 4);
            let a = mirror.char_rect(0).expect("a");
            let b = mirror.char_rect(1).expect("b");
            assert!(a.width > 0.0);
            assert!(b.left > a.left);
            assert_eq!(a.top, b.top);
            assert!(mirror.char_rect(4).is_none());
        });
    }

    #[test]
    fn newline_moves_following_chars_down() {
        run_test_ctx(|ctx| {
            let mut mirror = GalleyMirror::new(ctx.clone(), false);
            mirror.sync_style(&mirror_style(500.0)).expect("sync");
            mirror
                .render(&MirrorContent::Marked {
                    before: "one\n",
                    target: "two",
                    after: "",
                })
                .expect("render");

            let first = mirror.char_rect(0).expect("o");
            let second_line = mirror.char_rect(4).expect("t");
            assert!(second_line.top > first.top);
            let marked = mirror.marked_rect().expect("marked");
            assert_eq!(marked.top, second_line.top);
            assert!(marked.width > 0.0);
        });
    }

    #[test]
    fn disabled_mirror_defers_to_fallback() {
        run_test_ctx(|ctx| {
            let mut mirror = GalleyMirror::new(ctx.clone(), true);
            assert!(mirror.sync_style(&mirror_style(200.0)).is_err());

            let context = ctx.clone();
            let mut resolver = CaretResolver::new(move || GalleyMirror::new(context.clone(), true));
            let surface = PlainSurface::new("quill", Rect::new(0.0, 0.0, 200.0, 40.0));
            let info = resolver.word_at_point(&surface, 3.0, 5.0).expect("word");
            assert_eq!(info.word, "quill");
            assert_eq!(info.index, 0);
        });
    }
}
