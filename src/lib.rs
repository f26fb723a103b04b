//! Cellviz - interactive 3D cell anatomy viewer.
//!
//! The library holds the canonical core: scene graph and index, two-stage
//! asset loading, pointer picking with highlight restoration, transform
//! control bindings, and the info panel state machine. Window attachment
//! (winit + egui) lives in the binary adapter, which the core never sees.

pub mod assets;
pub mod content;
pub mod render;
pub mod scene;
pub mod ui;
