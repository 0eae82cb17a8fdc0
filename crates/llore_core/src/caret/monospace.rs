//! Coordinate-arithmetic mirror for fixed-advance fonts.
//!
//! Used when no real text-measurement backend is available, and as the
//! fallback when one fails. Every column is `font_size * advance_ratio` wide;
//! wide glyphs take two columns per `unicode-width`.

use super::geometry::Rect;
use super::mirror::{union_char_rects, MeasureSurface, MirrorContent, MirrorStyle};
use super::surface::WrapMode;
use crate::constants::DEFAULT_MONOSPACE_ADVANCE;
use crate::error::CoreError;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Mirror that lays text out on a fixed-width grid.
#[derive(Clone, Debug)]
pub struct MonospaceMirror {
    advance_ratio: f32,
    style: Option<MirrorStyle>,
    rects: Vec<Rect>,
    marked: Option<Range<usize>>,
}

impl Default for MonospaceMirror {
    fn default() -> Self {
        Self::new(DEFAULT_MONOSPACE_ADVANCE)
    }
}

impl MonospaceMirror {
    pub fn new(advance_ratio: f32) -> Self {
        Self {
            advance_ratio,
            style: None,
            rects: Vec::new(),
            marked: None,
        }
    }

    fn layout(&mut self, chars: &[char], style: &MirrorStyle) {
        let cell = (style.font_size * self.advance_ratio).max(0.0);
        let line_height = style.line_height.max(0.0);
        let tab_stop = cell * style.tab_size as f32;
        let max_width = match style.wrap {
            WrapMode::None => f32::INFINITY,
            _ if style.content_width <= 0.0 => f32::INFINITY,
            _ => style.content_width,
        };
        let advance = |ch: char, x: f32| -> f32 {
            match ch {
                '\n' => 0.0,
                '\t' if tab_stop > 0.0 => tab_stop - (x % tab_stop),
                '\t' => 0.0,
                _ => {
                    let columns = style.text_transform.apply(ch).width().unwrap_or(0) as f32;
                    let mut width = columns * cell + style.letter_spacing;
                    if ch == ' ' {
                        width += style.word_spacing;
                    }
                    width.max(0.0)
                }
            }
        };

        self.rects.clear();
        self.rects.reserve(chars.len());
        let mut x = 0.0f32;
        let mut line = 0usize;
        for (index, &ch) in chars.iter().enumerate() {
            let width = advance(ch, x);
            if !ch.is_whitespace() && x > 0.0 {
                let word_start = index == 0 || chars[index - 1].is_whitespace();
                let needed = if style.wrap == WrapMode::Word && word_start {
                    chars[index..]
                        .iter()
                        .take_while(|c| !c.is_whitespace())
                        .map(|&c| advance(c, 0.0))
                        .sum::<f32>()
                } else {
                    width
                };
                // A word that overflows always starts a fresh line first; only
                // there does an overlong word break char-by-char.
                if x + needed > max_width {
                    x = 0.0;
                    line += 1;
                }
            }
            self.rects.push(Rect::new(
                style.border.left + x,
                style.border.top + line as f32 * line_height,
                width,
                line_height,
            ));
            if ch == '\n' {
                x = 0.0;
                line += 1;
            } else {
                x += width;
            }
        }
    }
}

impl MeasureSurface for MonospaceMirror {
    fn sync_style(&mut self, style: &MirrorStyle) -> Result<(), CoreError> {
        self.style = Some(style.clone());
        Ok(())
    }

    fn render(&mut self, content: &MirrorContent<'_>) -> Result<(), CoreError> {
        let Some(style) = self.style.take() else {
            return Err(CoreError::MeasurementUnavailable(
                "mirror style not synchronized".to_string(),
            ));
        };
        let chars: Vec<char> = content.chars().collect();
        self.layout(&chars, &style);
        self.marked = content.marked_range();
        self.style = Some(style);
        Ok(())
    }

    fn char_count(&self) -> usize {
        self.rects.len()
    }

    fn char_rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    fn marked_rect(&self) -> Option<Rect> {
        let range = self.marked.clone()?;
        union_char_rects(self, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caret::geometry::Insets;
    use crate::caret::surface::TextTransform;

    fn style(content_width: f32, wrap: WrapMode) -> MirrorStyle {
        MirrorStyle {
            font_family: "monospace".to_string(),
            font_size: 16.0,
            font_weight: 400,
            italic: false,
            line_height: 20.0,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_transform: TextTransform::None,
            tab_size: 4,
            wrap,
            border: Insets::ZERO,
            content_width,
        }
    }

    fn rendered(text: &str, style: &MirrorStyle) -> MonospaceMirror {
        let mut mirror = MonospaceMirror::new(0.5);
        mirror.sync_style(style).expect("sync");
        mirror.render(&MirrorContent::Plain(text)).expect("render");
        mirror
    }

    fn line_of(mirror: &MonospaceMirror, index: usize) -> usize {
        (mirror.char_rect(index).expect("rect").top / 20.0) as usize
    }

    #[test]
    fn word_wrap_moves_whole_word_to_next_line() {
        // 10 columns of 8px.
        let mirror = rendered("hello world", &style(80.0, WrapMode::Word));
        assert_eq!(line_of(&mirror, 5), 0);
        assert_eq!(line_of(&mirror, 6), 1);
        assert_eq!(mirror.char_rect(6).expect("w").left, 0.0);
    }

    #[test]
    fn overlong_word_breaks_anywhere() {
        let mirror = rendered("abcdefghijkl", &style(80.0, WrapMode::Word));
        assert_eq!(line_of(&mirror, 9), 0);
        assert_eq!(line_of(&mirror, 10), 1);
    }

    #[test]
    fn overlong_word_mid_line_moves_down_before_breaking() {
        let mirror = rendered("ab abcdefghijkl", &style(80.0, WrapMode::Word));
        assert_eq!(line_of(&mirror, 2), 0);
        assert_eq!(line_of(&mirror, 3), 1);
        assert_eq!(mirror.char_rect(3).expect("a").left, 0.0);
        assert_eq!(line_of(&mirror, 12), 1);
        assert_eq!(line_of(&mirror, 13), 2);
        assert_eq!(mirror.char_rect(13).expect("k").left, 0.0);
    }

    #[test]
    fn anywhere_mode_splits_words() {
        let mirror = rendered("hello world", &style(80.0, WrapMode::Anywhere));
        assert_eq!(line_of(&mirror, 9), 0);
        assert_eq!(line_of(&mirror, 10), 1);
    }

    #[test]
    fn no_wrap_keeps_single_line_until_newline() {
        let mirror = rendered("hello world\nnext", &style(40.0, WrapMode::None));
        assert_eq!(line_of(&mirror, 10), 0);
        assert_eq!(mirror.char_rect(11).expect("newline").width, 0.0);
        assert_eq!(line_of(&mirror, 12), 1);
        assert_eq!(mirror.char_rect(12).expect("n").left, 0.0);
    }

    #[test]
    fn tabs_advance_to_next_stop_and_wide_chars_take_two_columns() {
        let mirror = rendered("a\tb", &style(0.0, WrapMode::Word));
        assert_eq!(mirror.char_rect(1).expect("tab").width, 24.0);
        assert_eq!(mirror.char_rect(2).expect("b").left, 32.0);

        let wide = rendered("日本", &style(0.0, WrapMode::Word));
        assert_eq!(wide.char_rect(0).expect("wide").width, 16.0);
        assert_eq!(wide.char_rect(1).expect("wide").left, 16.0);
    }

    #[test]
    fn border_offsets_every_rect() {
        let mut bordered = style(80.0, WrapMode::Word);
        bordered.border = Insets::uniform(2.0);
        let mirror = rendered("ab", &bordered);
        assert_eq!(mirror.char_rect(1), Some(Rect::new(10.0, 2.0, 8.0, 20.0)));
    }

    #[test]
    fn marked_rect_covers_target_span() {
        let mut mirror = MonospaceMirror::new(0.5);
        mirror.sync_style(&style(80.0, WrapMode::Word)).expect("sync");
        mirror
            .render(&MirrorContent::Marked {
                before: "one ",
                target: "two",
                after: " three",
            })
            .expect("render");
        assert_eq!(mirror.marked_rect(), Some(Rect::new(32.0, 0.0, 24.0, 20.0)));
    }

    #[test]
    fn render_without_style_is_unavailable() {
        let mut mirror = MonospaceMirror::default();
        assert!(matches!(
            mirror.render(&MirrorContent::Plain("x")),
            Err(CoreError::MeasurementUnavailable(_))
        ));
    }
}
