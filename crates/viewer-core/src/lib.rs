//! Platform-independent half of the model viewer.
//!
//! Holds the viewport controller (drag-to-rotate and resize handling), the
//! small scene description it mutates, the perspective camera, viewer
//! configuration and glTF decoding. Nothing here touches the DOM or the GPU;
//! the web crate supplies a [`Renderer`] and feeds browser events in.

pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod gltf_import;
pub mod input;
pub mod lighting;
pub mod model;
pub mod renderer;
pub mod scene;

pub use camera::*;
pub use color::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use input::*;
pub use lighting::*;
pub use model::*;
pub use renderer::*;
pub use scene::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
