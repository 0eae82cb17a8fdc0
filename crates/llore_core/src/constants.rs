//! Shared constants used across llore crates.

/// Maximum number of entries kept in the undo stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default trailing-edge delay for debounced history records, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Hover queries closer than this (in both axes) reuse the previous word lookup.
pub const DEFAULT_HOVER_CACHE_RADIUS: f32 = 5.0;

/// Advance width of one column as a fraction of the font size for the
/// coordinate-arithmetic mirror.
pub const DEFAULT_MONOSPACE_ADVANCE: f32 = 0.6;

/// Line height multiplier used when a surface reports no explicit line height.
pub const DEFAULT_LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Trailing character appended to mirrored text so a caret position past the
/// last character always has a rect.
pub const MIRROR_SENTINEL: char = '|';
