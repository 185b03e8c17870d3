//! Triangle-mesh fixtures for tests and benchmarks.
//!
//! The engine treats the mesh supplier as a black box: it only ever sees the
//! face list and the vertex-pool size. This module provides the closed
//! geodesic spheres the engine targets, for everything in this repo that
//! needs a real mesh.

use glam::Vec3;
use std::collections::HashMap;

/// An indexed triangle mesh: a shared vertex pool plus one vertex-index
/// triple per face. Immutable once supplied to the engine.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of faces (= automaton cells)
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Size of the vertex pool
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Generate a unit icosphere by midpoint subdivision of an icosahedron.
    /// Order 0 is the icosahedron itself (20 faces); each order quadruples
    /// the face count.
    pub fn icosphere(order: u32) -> Self {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let mut vertices: Vec<Vec3> = [
            [-1.0, phi, 0.0],
            [1.0, phi, 0.0],
            [-1.0, -phi, 0.0],
            [1.0, -phi, 0.0],
            [0.0, -1.0, phi],
            [0.0, 1.0, phi],
            [0.0, -1.0, -phi],
            [0.0, 1.0, -phi],
            [phi, 0.0, -1.0],
            [phi, 0.0, 1.0],
            [-phi, 0.0, -1.0],
            [-phi, 0.0, 1.0],
        ]
        .into_iter()
        .map(|v| Vec3::from_array(v).normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..order {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut subdivided = Vec::with_capacity(faces.len() * 4);

            for face in &faces {
                let m01 = midpoint(face[0], face[1], &mut vertices, &mut midpoints);
                let m12 = midpoint(face[1], face[2], &mut vertices, &mut midpoints);
                let m20 = midpoint(face[2], face[0], &mut vertices, &mut midpoints);

                subdivided.push([face[0], m01, m20]);
                subdivided.push([face[1], m12, m01]);
                subdivided.push([face[2], m20, m12]);
                subdivided.push([m01, m12, m20]);
            }

            faces = subdivided;
        }

        Self { vertices, faces }
    }
}

/// Index of the normalized midpoint of an edge, created on first use and
/// cached so the two faces sharing the edge reference the same vertex.
fn midpoint(
    a: u32,
    b: u32,
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let mid = ((vertices[a as usize] + vertices[b as usize]) / 2.0).normalize();
    let index = vertices.len() as u32;
    vertices.push(mid);
    cache.insert(key, index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosphere_counts() {
        for order in 0..=4u32 {
            let mesh = TriangleMesh::icosphere(order);
            let expected_faces = 20 * 4usize.pow(order);
            assert_eq!(mesh.num_faces(), expected_faces);
            assert_eq!(mesh.num_vertices(), 10 * 4usize.pow(order) + 2);
        }
    }

    #[test]
    fn test_icosphere_vertices_on_unit_sphere() {
        let mesh = TriangleMesh::icosphere(2);
        for vertex in &mesh.vertices {
            assert!((vertex.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_icosphere_is_closed() {
        // Euler characteristic of a sphere: V - E + F = 2, with each edge
        // shared by exactly two faces (E = 3F / 2).
        let mesh = TriangleMesh::icosphere(3);
        let faces = mesh.num_faces();
        let edges = 3 * faces / 2;
        assert_eq!(mesh.num_vertices() + faces, edges + 2);
    }

    #[test]
    fn test_icosphere_indices_in_range() {
        let mesh = TriangleMesh::icosphere(2);
        let vertex_count = mesh.num_vertices() as u32;
        for face in &mesh.faces {
            for &vertex in face {
                assert!(vertex < vertex_count);
            }
        }
    }
}
