//! High-level PlayCanvas scene loading.
//!
//! This module provides the entry points for importing PlayCanvas model
//! JSON: single files, strings, and sequential batches. Assembly itself is
//! done by [`SceneAssembler`], which owns the material backend and keeps all
//! per-file state (material cache, built geometry) local to one call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::material::{Material, MaterialBackend, MaterialSource, StandardMaterials};
use crate::mesh::Geometry;
use crate::options::ImportOptions;
use crate::playcanvas::builder::MeshBuilder;
use crate::playcanvas::parser::parse_model;
use crate::playcanvas::transform::resolve_world_matrices;
use crate::playcanvas::types::ParsedModel;
use crate::scene::{GeometryInstance, PlacedNode, ResolvedScene};

/// Root name used when a source has no usable file stem.
pub const DEFAULT_SCENE_NAME: &str = "PlayCanvas_Model";

/// Errors that make a whole file unusable.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Top-level JSON value is not an object")]
    InvalidRoot,
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Parse raw document bytes into a JSON value.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_json_bytes(bytes: &[u8]) -> LoadResult<Value> {
    let text = String::from_utf8_lossy(bytes);
    Ok(serde_json::from_str(&text)?)
}

/// Display name for a source path: its file stem, or the default name.
pub fn source_name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SCENE_NAME)
        .to_owned()
}

/// Load a PlayCanvas JSON file with the standard material backend.
///
/// # Example
///
/// ```ignore
/// use pc_core::{load_playcanvas, ImportOptions};
///
/// let scene = load_playcanvas("robot.json", &ImportOptions::default())?;
/// println!("{} nodes, {} meshes", scene.node_count(), scene.geometry_count());
/// ```
pub fn load_playcanvas<P: AsRef<Path>>(
    path: P,
    options: &ImportOptions,
) -> LoadResult<ResolvedScene<Arc<Material>>> {
    load_playcanvas_with(path, options, StandardMaterials)
}

/// Load a PlayCanvas JSON file with a caller-provided material backend.
pub fn load_playcanvas_with<P: AsRef<Path>, B: MaterialBackend>(
    path: P,
    options: &ImportOptions,
    backend: B,
) -> LoadResult<ResolvedScene<B::Handle>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let root = parse_json_bytes(&bytes)?;

    let mut assembler = SceneAssembler::new(options, backend);
    if options.resolve_textures_relative {
        assembler = assembler.with_base_dir(path.parent().map(Path::to_path_buf));
    }
    assembler.assemble_value(&root, &source_name_from_path(path))
}

/// Load PlayCanvas JSON from a string (useful for testing).
pub fn load_playcanvas_from_str(
    content: &str,
    name: &str,
    base_dir: Option<PathBuf>,
    options: &ImportOptions,
) -> LoadResult<ResolvedScene<Arc<Material>>> {
    let root: Value = serde_json::from_str(content)?;
    SceneAssembler::new(options, StandardMaterials)
        .with_base_dir(base_dir)
        .assemble_value(&root, name)
}

/// Builds a [`ResolvedScene`] from a parsed model.
pub struct SceneAssembler<'o, B> {
    options: &'o ImportOptions,
    backend: B,
    builder: MeshBuilder,
    /// Base directory for resolving relative texture paths
    base_dir: Option<PathBuf>,
}

impl<'o, B: MaterialBackend> SceneAssembler<'o, B> {
    pub fn new(options: &'o ImportOptions, backend: B) -> Self {
        Self {
            options,
            backend,
            builder: MeshBuilder::new(options.uv_v_flip),
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// Give the backend back to the caller.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Parse and assemble a JSON document.
    pub fn assemble_value(&mut self, root: &Value, source_name: &str) -> LoadResult<ResolvedScene<B::Handle>> {
        if !root.is_object() {
            return Err(LoadError::InvalidRoot);
        }
        let model = parse_model(root);
        Ok(self.assemble(&model, source_name))
    }

    /// Assemble one file's scene. Malformed entities are skipped, never fatal.
    pub fn assemble(&mut self, model: &ParsedModel, source_name: &str) -> ResolvedScene<B::Handle> {
        let name = if source_name.is_empty() {
            DEFAULT_SCENE_NAME
        } else {
            source_name
        };
        let mut scene = ResolvedScene::new(name);

        let conversion = self.options.axis_conversion.matrix();
        let world = resolve_world_matrices(&model.nodes);

        for node in &model.nodes {
            scene.nodes.push(PlacedNode {
                index: node.index,
                name: node.name.clone(),
                world_matrix: conversion * world.get_or_identity(Some(node.index)),
                marker_size: self.options.marker_size,
            });
        }

        // Realize each material once; bindings clone the handle
        let mut material_map: HashMap<usize, B::Handle> = HashMap::with_capacity(model.materials.len());
        for def in &model.materials {
            let source = MaterialSource::from_def(def, self.base_dir.as_deref());
            let handle = self.backend.realize(&def.name, &source);
            material_map.insert(def.index, handle.clone());
            scene.materials.push(handle);
        }

        // Instances of the same mesh share one build
        let mut built: HashMap<usize, Arc<Geometry>> = HashMap::new();
        for (i, instance) in model.instances.iter().enumerate() {
            let Some(mesh_index) = instance.mesh.filter(|&m| m < model.meshes.len()) else {
                log::debug!("Mesh instance {} has no valid mesh reference, skipping", i);
                continue;
            };
            let mesh = &model.meshes[mesh_index];
            let Some(buffer) = model
                .vertex_buffer_for(mesh)
                .filter(|vb| vb.vertex_count() > 0)
            else {
                log::debug!("Mesh instance {}: mesh '{}' has no positions, skipping", i, mesh.name);
                continue;
            };

            let geometry = built
                .entry(mesh_index)
                .or_insert_with(|| Arc::new(self.builder.build(mesh, buffer)))
                .clone();

            let material = instance.material.and_then(|m| material_map.get(&m).cloned());

            scene.geometry.push(GeometryInstance {
                node_index: instance.node.filter(|&n| n < model.nodes.len()),
                mesh_index,
                geometry,
                world_matrix: conversion * world.get_or_identity(instance.node),
                material,
            });
        }

        log::info!(
            "Assembled '{}': {} nodes, {} geometry instances ({} dropped), {} materials",
            scene.name(),
            scene.node_count(),
            scene.geometry_count(),
            model.instances.len() - scene.geometry_count(),
            scene.material_count()
        );

        scene
    }
}

/// Outcome of importing one file in a batch.
#[derive(Debug)]
pub struct FileImport<M = Arc<Material>> {
    pub path: PathBuf,
    pub result: LoadResult<ResolvedScene<M>>,
}

/// Outcomes of a batch import, in input order.
#[derive(Debug)]
pub struct ImportReport<M = Arc<Material>> {
    pub files: Vec<FileImport<M>>,
}

impl<M> ImportReport<M> {
    /// Successfully imported scenes.
    pub fn scenes(&self) -> impl Iterator<Item = &ResolvedScene<M>> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }

    /// Files that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &LoadError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.path.as_path(), e)))
    }

    /// `(succeeded, failed)` counts.
    pub fn summary(&self) -> (usize, usize) {
        let ok = self.scenes().count();
        (ok, self.files.len() - ok)
    }
}

/// Import files one after another. A failing file is logged and recorded;
/// it does not stop the rest of the batch.
pub fn import_files<I, P>(paths: I, options: &ImportOptions) -> ImportReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let files = paths
        .into_iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let result = load_playcanvas(&path, options);
            if let Err(e) = &result {
                let display = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                log::error!("Failed to read {}: {}", display, e);
            }
            FileImport { path, result }
        })
        .collect();

    ImportReport { files }
}
