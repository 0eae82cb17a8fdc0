//! Root crate facade for the llore editing core.

pub use llore_core::{
    caret, config, constants, error, history, CaretResolver, Config, CoreError, HistoryChange,
    HistoryChangeKind, HistoryManager, MeasureSurface, MonospaceMirror, TextSurface, WordInfo,
};

/// Launches the desktop editor. The `llore-gui` binary is the usual entry point.
#[cfg(feature = "gui")]
pub use llore_gui::run;
