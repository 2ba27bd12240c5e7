//! PC Core - PlayCanvas model import.
//!
//! This crate provides:
//!
//! - **PlayCanvas support**: best-effort parsing of model JSON, node
//!   hierarchy resolution, mesh reconstruction
//! - **Scene types**: `ResolvedScene`, `PlacedNode`, `GeometryInstance`
//! - **Materials**: `MaterialBackend` with a standard `Material` backend
//! - **Options**: axis conversion and UV policy via `ImportOptions`
//!
//! # Example
//!
//! ```ignore
//! use pc_core::{load_playcanvas, ImportOptions};
//!
//! let scene = load_playcanvas("model.json", &ImportOptions::default())?;
//! println!("Loaded {} nodes, {} geometry instances",
//!     scene.node_count(),
//!     scene.geometry_count());
//! ```

pub mod material;
pub mod mesh;
pub mod options;
pub mod playcanvas;
pub mod scene;

// Re-export commonly used types
pub use material::{Material, MaterialBackend, MaterialSource, StandardMaterials};
pub use mesh::Geometry;
pub use options::{AxisConversion, ConfigError, ImportOptions, UvFlip};
pub use playcanvas::{
    import_files, load_playcanvas, load_playcanvas_from_str, load_playcanvas_with, ImportReport,
    LoadError,
};
pub use scene::{GeometryInstance, PlacedNode, ResolvedScene};
