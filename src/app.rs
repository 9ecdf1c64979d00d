//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current library,
//! selection, filter and tag-editor state.

mod model;

pub use model::*;
