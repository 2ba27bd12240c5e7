//! Example: Load and inspect a PlayCanvas model JSON file.
//!
//! Run with: cargo run --example load_playcanvas -- assets/model.json

use std::env;

use pc_core::{load_playcanvas, ImportOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_playcanvas <path-to-json-file>");
        println!("\nExample:");
        println!("  cargo run --example load_playcanvas -- assets/model.json");
        return;
    }

    let path = &args[1];
    println!("Loading PlayCanvas file: {}", path);

    match load_playcanvas(path, &ImportOptions::default()) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", scene.name());
            println!("Nodes: {}", scene.node_count());
            println!("Geometry instances: {}", scene.geometry_count());
            println!("Materials: {}", scene.material_count());
            println!("Total triangles: {}", scene.total_triangle_count());

            println!("\n--- Nodes ---");
            for node in &scene.nodes {
                let pos = node.world_matrix.transform_point3(pc_math::Vec3::ZERO);
                println!(
                    "  [{}] {} at ({:.2}, {:.2}, {:.2})",
                    node.index, node.name, pos.x, pos.y, pos.z
                );
            }

            println!("\n--- Geometry ---");
            for instance in &scene.geometry {
                let geometry = &instance.geometry;
                println!(
                    "  {} (mesh {}) - {} vertices, {} triangles",
                    instance.name(),
                    instance.mesh_index,
                    geometry.vertex_count(),
                    geometry.triangle_count()
                );
                println!(
                    "       Buffers: {} floats, {} indices",
                    geometry.flat_vertices().len(),
                    geometry.flat_indices().len()
                );
                println!(
                    "       Normals: {}, UV0: {}, UV1: {}",
                    geometry.has_normals(),
                    geometry.has_uv0(),
                    geometry.has_uv1()
                );
                match &instance.material {
                    Some(material) => println!("       Material: {}", material.name),
                    None => println!("       Material: <none>"),
                }
            }

            let world_bounds = scene.world_bounds();
            if !world_bounds.is_empty() {
                println!("\n--- World Bounds ---");
                println!(
                    "  Min: ({:.2}, {:.2}, {:.2})",
                    world_bounds.x.min, world_bounds.y.min, world_bounds.z.min
                );
                println!(
                    "  Max: ({:.2}, {:.2}, {:.2})",
                    world_bounds.x.max, world_bounds.y.max, world_bounds.z.max
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading PlayCanvas file: {}", e);
        }
    }
}
