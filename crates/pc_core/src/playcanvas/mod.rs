//! PlayCanvas model JSON support.
//!
//! This module reads PlayCanvas engine model documents and assembles them
//! into a [`ResolvedScene`](crate::scene::ResolvedScene) of node markers and
//! placed geometry.
//!
//! ## Supported Features
//!
//! - `nodes` + `parents`: node hierarchy with position, Euler rotation (degrees), scale
//! - `vertices`: flat position/normal/uv0/uv1 arrays
//! - `meshes`: indexed or sequential triangle lists
//! - `meshInstances`: mesh placements with material bindings
//! - `materials`: diffuse map path or 0-255 diffuse color
//!
//! ## Not Supported
//!
//! - Skinning and morph targets
//! - Animation
//! - Texture decoding (map paths are passed through)
//!
//! # Example
//!
//! ```ignore
//! use pc_core::playcanvas::load_playcanvas;
//! use pc_core::ImportOptions;
//!
//! let scene = load_playcanvas("path/to/model.json", &ImportOptions::default())?;
//! println!("Loaded {} nodes, {} meshes",
//!     scene.node_count(),
//!     scene.geometry_count());
//! ```

mod types;
mod parser;
mod transform;
mod builder;
mod loader;

pub use types::*;
pub use parser::*;
pub use transform::*;
pub use builder::*;
pub use loader::*;
