//! Snapshot of the scrolled editor widget as a caret-resolver surface.

use eframe::egui;
use llore_core::caret::{Insets, PlainSurface, Point, Rect, SurfaceStyle, WrapMode};

fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

/// Builds the surface the resolver sees for the editor this frame.
///
/// The scroll viewport plays the role of the surface's border box. Its
/// padding is the distance from the viewport to the unscrolled text origin,
/// so subtracting padding and adding the scroll offset lands in galley space.
///
/// # Arguments
/// - `text`: Current editor contents.
/// - `viewport`: Screen rect of the scroll area.
/// - `scroll`: Scroll offset reported by the scroll area.
/// - `editor_rect`: Screen rect of the text widget.
/// - `galley_pos`: Screen position of the widget's text origin.
/// - `font`: Editor font.
/// - `line_height`: Height of one text row.
pub(crate) fn editor_surface(
    text: &str,
    viewport: egui::Rect,
    scroll: egui::Vec2,
    editor_rect: egui::Rect,
    galley_pos: egui::Pos2,
    font: &egui::FontId,
    line_height: f32,
) -> PlainSurface {
    let margin_x = (galley_pos.x - editor_rect.min.x).max(0.0);
    let padding = Insets {
        top: galley_pos.y + scroll.y - viewport.min.y,
        right: margin_x,
        bottom: 0.0,
        left: galley_pos.x + scroll.x - viewport.min.x,
    };
    let font_family = match font.family {
        egui::FontFamily::Monospace => "monospace",
        _ => "proportional",
    };
    let style = SurfaceStyle {
        font_family: font_family.to_string(),
        font_size: font.size,
        line_height: Some(line_height),
        wrap: WrapMode::Word,
        padding,
        ..SurfaceStyle::default()
    };
    let mut surface = PlainSurface::new(text, to_rect(viewport))
        .with_style(style)
        .with_scroll(Point::new(scroll.x, scroll.y));
    surface.client_width = editor_rect.width();
    surface
}

/// Screen rect for a resolver rect.
pub(crate) fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.left, rect.top),
        egui::vec2(rect.width, rect.height),
    )
}
