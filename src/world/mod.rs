//! World module - mesh and scene data fed to the renderer backends
//!
//! A scene is a single model made of shapes; each shape carries its own
//! vertex and index lists and becomes one draw call. Scenes are stored as
//! RON files, and a built-in demo cube covers the no-arguments case.

mod mesh;
mod scene;

pub use mesh::*;
pub use scene::*;
