//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and mirrors controller events plus
//! the selection and popup state owned by the UI.

mod model;

pub use model::*;
