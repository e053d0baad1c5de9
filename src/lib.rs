//! TUI Scene (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_scene::{core,term,types}` so binaries,
//! integration tests and benches share one import path.

pub use tui_scene_core as core;
pub use tui_scene_term as term;
pub use tui_scene_types as types;
