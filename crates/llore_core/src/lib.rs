//! Core editing library for llore (history, caret resolution, config).

/// Geometry-to-text resolution for plain-text input surfaces.
pub mod caret;
/// Configuration loading and defaults.
pub mod config;
/// Shared default values.
pub mod constants;
/// Process-global environment mutation helpers.
pub mod env;
/// Core error types.
pub mod error;
/// Undo/redo history for a single text buffer.
pub mod history;

pub use caret::{CaretResolver, MeasureSurface, MonospaceMirror, TextSurface, WordInfo};
pub use config::Config;
pub use error::CoreError;
pub use history::{HistoryChange, HistoryChangeKind, HistoryManager};
