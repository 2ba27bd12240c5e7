//! PlayCanvas model JSON parser.
//!
//! Turns a generic `serde_json::Value` into a [`ParsedModel`]. Parsing is
//! best-effort: every field goes through a typed accessor on [`Fields`] that
//! returns `Option`, and each default is applied explicitly at the call site.
//! Nothing in here returns an error.
//!
//! # Recognized layout
//!
//! - `model.nodes[]`: `name`, `position`, `rotation` (degrees), `scale`
//! - `model.parents[]`: parent slot per node
//! - `model.vertices[]`: `position` / `normal` / `texCoord0` / `texCoord1`, each `{ data: [...] }`
//! - `model.meshes[]`: `name`, `vertices` (buffer index), `indices` or `triangles`
//! - `model.meshInstances[]`: `node`, `mesh`, `material`
//! - `model.materials[]`: `name`, `diffuseMap`, `diffuse.data`
//!
//! When `model` is missing or empty the top-level object is used instead.
//! `nodes`, `parents` and `materials` also fall back to the top level when
//! the `model` copy is missing or empty.

use pc_math::Vec3;
use serde_json::{Map, Value};

use super::types::*;

/// Optional-field accessor over a JSON object.
///
/// Wraps `None` when the underlying value is not an object, so lookups on
/// malformed sub-structures simply yield `None`.
#[derive(Clone, Copy, Debug)]
pub struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    /// View a value as an object; non-objects become an empty accessor.
    pub fn of(value: &'a Value) -> Self {
        Self(value.as_object())
    }

    /// An accessor with no fields.
    pub fn empty() -> Self {
        Self(None)
    }

    /// True when the wrapped value was an object with at least one key.
    pub fn is_populated(&self) -> bool {
        self.0.is_some_and(|m| !m.is_empty())
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|m| m.get(key))
    }

    /// Nested object accessor. Missing or non-object values give an empty accessor.
    pub fn object(&self, key: &str) -> Fields<'a> {
        self.get(key).map(Fields::of).unwrap_or_else(Fields::empty)
    }

    /// String value.
    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Non-empty array value. An empty array counts as absent.
    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key)
            .and_then(Value::as_array)
            .filter(|a| !a.is_empty())
            .map(Vec::as_slice)
    }

    /// Integer value, accepting integral floats.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(as_int)
    }

    /// Non-negative integer value usable as an array index.
    pub fn index(&self, key: &str) -> Option<usize> {
        self.int(key).and_then(|i| usize::try_from(i).ok())
    }

    /// Three-component vector from an array of at least three numbers.
    pub fn vec3(&self, key: &str) -> Option<Vec3> {
        let values = self.get(key)?.as_array()?;
        if values.len() < 3 {
            return None;
        }
        let x = values[0].as_f64()?;
        let y = values[1].as_f64()?;
        let z = values[2].as_f64()?;
        Some(Vec3::new(x as f32, y as f32, z as f32))
    }

    /// Array of numbers. Any non-numeric entry drops the whole array.
    pub fn floats(&self, key: &str) -> Option<Vec<f32>> {
        let values = self.get(key)?.as_array()?;
        let floats: Option<Vec<f32>> = values
            .iter()
            .map(|v| v.as_f64().map(|f| f as f32))
            .collect();
        if floats.is_none() {
            log::debug!("Dropping '{}' array with non-numeric entries", key);
        }
        floats
    }

    /// Array of integers. Any non-integral entry drops the whole array.
    pub fn ints(&self, key: &str) -> Option<Vec<i64>> {
        let values = self.get(key)?.as_array()?;
        let ints: Option<Vec<i64>> = values.iter().map(as_int).collect();
        if ints.is_none() {
            log::debug!("Dropping '{}' array with non-integer entries", key);
        }
        ints
    }

    /// `key.data` as numbers, the shape used by vertex attributes and colors.
    pub fn data(&self, key: &str) -> Option<Vec<f32>> {
        self.object(key).floats("data")
    }
}

fn as_int(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Parse a PlayCanvas model document. Never fails; see the module docs.
pub fn parse_model(root: &Value) -> ParsedModel {
    let top = Fields::of(root);
    let wrapped = top.object("model");
    let model = if wrapped.is_populated() { wrapped } else { top };

    let lookup = |key: &str| model.array(key).or_else(|| top.array(key)).unwrap_or(&[]);

    let nodes = parse_nodes(lookup("nodes"), lookup("parents"));
    let vertex_buffers = model
        .array("vertices")
        .unwrap_or(&[])
        .iter()
        .map(parse_vertex_buffer)
        .collect::<Vec<_>>();
    let meshes = model
        .array("meshes")
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .map(|(i, m)| parse_mesh(i, m, vertex_buffers.len()))
        .collect();
    let instances = model
        .array("meshInstances")
        .unwrap_or(&[])
        .iter()
        .filter_map(parse_instance)
        .collect();
    let materials = lookup("materials")
        .iter()
        .enumerate()
        .map(|(i, m)| parse_material(i, m))
        .collect();

    ParsedModel {
        nodes,
        vertex_buffers,
        meshes,
        instances,
        materials,
    }
}

fn parse_nodes(raw: &[Value], parents: &[Value]) -> Vec<Node> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            let fields = Fields::of(value);
            let parent = parents.get(i).and_then(as_int).unwrap_or(-1);
            Node {
                index: i,
                name: fields
                    .string("name")
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("Node_{}", i)),
                position: fields.vec3("position"),
                rotation_deg: fields.vec3("rotation"),
                scale: fields.vec3("scale"),
                parent,
            }
        })
        .collect()
}

fn parse_vertex_buffer(value: &Value) -> VertexBuffer {
    let fields = Fields::of(value);
    VertexBuffer {
        positions: fields.data("position"),
        normals: fields.data("normal"),
        uv0: fields.data("texCoord0"),
        uv1: fields.data("texCoord1"),
    }
}

fn parse_mesh(index: usize, value: &Value, buffer_count: usize) -> MeshDef {
    let fields = Fields::of(value);

    let vertex_buffer = fields.index("vertices").filter(|&vb| vb < buffer_count);
    if vertex_buffer.is_none() && fields.get("vertices").is_some() {
        log::debug!("Mesh {} has an unusable vertex buffer reference", index);
    }

    // `indices` wins over `triangles`; an empty array counts as absent
    let indices = ["indices", "triangles"]
        .iter()
        .find_map(|key| fields.array(key).and_then(|_| fields.ints(key)));

    MeshDef {
        name: fields
            .string("name")
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Mesh_{}", index)),
        vertex_buffer,
        indices,
    }
}

fn parse_instance(value: &Value) -> Option<MeshInstance> {
    if !value.is_object() {
        log::debug!("Skipping non-object mesh instance entry");
        return None;
    }
    let fields = Fields::of(value);
    Some(MeshInstance {
        node: fields.index("node"),
        mesh: fields.index("mesh"),
        material: fields.index("material"),
    })
}

fn parse_material(index: usize, value: &Value) -> MaterialDef {
    let fields = Fields::of(value);

    let diffuse_map = fields
        .string("diffuseMap")
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let diffuse_color = if diffuse_map.is_some() {
        None
    } else {
        fields.data("diffuse").and_then(|c| rgb_0_255(&c))
    };

    MaterialDef {
        index,
        name: fields
            .string("name")
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Material_{}", index)),
        diffuse_map,
        diffuse_color,
    }
}

fn rgb_0_255(channels: &[f32]) -> Option<[u8; 3]> {
    if channels.len() < 3 {
        return None;
    }
    let to_u8 = |c: f32| c.round().clamp(0.0, 255.0) as u8;
    Some([to_u8(channels[0]), to_u8(channels[1]), to_u8(channels[2])])
}
