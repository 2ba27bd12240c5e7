//! World transform resolution over the index-based node hierarchy.
//!
//! Nodes reference their parent by slot, not by pointer. The resolver walks
//! parent chains depth-first with an explicit stack, caching each world
//! matrix by node index so every node is composed exactly once. A set of
//! in-progress indices detects cycles; the edge that closes a cycle is
//! treated as if the parent were the identity.

use std::collections::{HashMap, HashSet};

use pc_math::Mat4;

use super::types::Node;

/// Node index -> world matrix, as produced by [`TransformResolver`].
#[derive(Clone, Debug, Default)]
pub struct WorldMatrices {
    matrices: HashMap<usize, Mat4>,
}

impl WorldMatrices {
    /// World matrix of a node, if the index was resolved.
    pub fn get(&self, index: usize) -> Option<Mat4> {
        self.matrices.get(&index).copied()
    }

    /// World matrix for an optional node reference, identity when unknown.
    pub fn get_or_identity(&self, index: Option<usize>) -> Mat4 {
        index.and_then(|i| self.get(i)).unwrap_or(Mat4::IDENTITY)
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Memoizing world-transform resolver.
pub struct TransformResolver<'a> {
    nodes: &'a [Node],
    cache: HashMap<usize, Mat4>,
    in_progress: HashSet<usize>,
}

impl<'a> TransformResolver<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            cache: HashMap::with_capacity(nodes.len()),
            in_progress: HashSet::new(),
        }
    }

    /// World matrix of `index`, or `None` if there is no such node.
    ///
    /// Repeated calls return the cached matrix.
    pub fn world_matrix(&mut self, index: usize) -> Option<Mat4> {
        if index >= self.nodes.len() {
            return None;
        }
        if let Some(m) = self.cache.get(&index) {
            return Some(*m);
        }

        let nodes = self.nodes;
        let mut stack = vec![index];
        while let Some(&current) = stack.last() {
            if self.cache.contains_key(&current) {
                stack.pop();
                continue;
            }

            let node = &nodes[current];
            let local = node.local_matrix();

            let Some(parent) = self.parent_slot(node) else {
                self.finish(current, local);
                stack.pop();
                continue;
            };

            if let Some(parent_world) = self.cache.get(&parent).copied() {
                self.finish(current, parent_world * local);
                stack.pop();
            } else if self.in_progress.contains(&parent) {
                log::warn!(
                    "Cycle in parent chain at node {} ('{}' -> {}), using identity parent",
                    current,
                    node.name,
                    parent
                );
                self.finish(current, local);
                stack.pop();
            } else {
                self.in_progress.insert(current);
                stack.push(parent);
            }
        }

        self.cache.get(&index).copied()
    }

    /// Resolve every node and hand back the finished table.
    pub fn resolve_all(mut self) -> WorldMatrices {
        for index in 0..self.nodes.len() {
            self.world_matrix(index);
        }
        WorldMatrices {
            matrices: self.cache,
        }
    }

    fn parent_slot(&self, node: &Node) -> Option<usize> {
        let parent = node.parent_index()?;
        if parent >= self.nodes.len() {
            log::warn!(
                "Node {} ('{}') references missing parent {}, treating as root",
                node.index,
                node.name,
                parent
            );
            return None;
        }
        Some(parent)
    }

    fn finish(&mut self, index: usize, world: Mat4) {
        self.in_progress.remove(&index);
        self.cache.insert(index, world);
    }
}

/// Compute world matrices for all nodes.
pub fn resolve_world_matrices(nodes: &[Node]) -> WorldMatrices {
    TransformResolver::new(nodes).resolve_all()
}
