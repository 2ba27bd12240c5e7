use anyhow::{bail, Context, Result};
use clap::Parser;
use pc_core::{import_files, AxisConversion, ImportOptions, ResolvedScene, UvFlip};
use pc_math::Vec3;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pc_import")]
#[command(about = "Import PlayCanvas model JSON files and summarize the resolved scenes")]
#[command(version)]
struct Cli {
    /// Input files (PlayCanvas model .json)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Options file (JSON); flags below are applied on top
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep source coordinates instead of rotating -90 degrees about X
    #[arg(long)]
    no_axis_conversion: bool,

    /// Keep the V texture coordinate as stored
    #[arg(long)]
    keep_v: bool,
}

impl Cli {
    /// Options file first, then flags on top.
    fn options(&self) -> Result<ImportOptions> {
        let mut options = match &self.config {
            Some(path) => ImportOptions::from_file(path)
                .with_context(|| format!("Failed to read options from {}", path.display()))?,
            None => ImportOptions::default(),
        };
        if self.no_axis_conversion {
            options.axis_conversion = AxisConversion::None;
        }
        if self.keep_v {
            options.uv_v_flip = UvFlip::Keep;
        }
        Ok(options)
    }
}

fn print_scene(scene: &ResolvedScene) {
    println!("\n=== {} ===", scene.name());
    println!(
        "  {} nodes, {} geometry instances, {} materials, {} triangles",
        scene.node_count(),
        scene.geometry_count(),
        scene.material_count(),
        scene.total_triangle_count()
    );

    for instance in &scene.geometry {
        let pos = instance.world_matrix.transform_point3(Vec3::ZERO);
        let material = instance.material.as_ref().map_or("<none>", |m| m.name.as_str());
        println!(
            "  {} at ({:.2}, {:.2}, {:.2}) - {} triangles, material {}",
            instance.name(),
            pos.x,
            pos.y,
            pos.z,
            instance.geometry.triangle_count(),
            material
        );
    }

    let bounds = scene.world_bounds();
    if !bounds.is_empty() {
        let (min, max) = (bounds.min(), bounds.max());
        println!(
            "  Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let options = cli.options()?;

    log::info!("Importing {} file(s)", cli.files.len());
    let report = import_files(&cli.files, &options);

    for scene in report.scenes() {
        print_scene(scene);
    }

    let (ok, failed) = report.summary();
    println!("\nImported {} file(s), {} failed", ok, failed);
    for (path, err) in report.failures() {
        println!("  {}: {}", path.display(), err);
    }

    if ok == 0 {
        bail!("No file could be imported");
    }
    Ok(())
}
