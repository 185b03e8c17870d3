//! Cell-adjacency graph derived from raw mesh topology.
//!
//! One automaton cell per triangular face. The graph is built once per mesh
//! from a vertex -> incident-faces map and is read-only afterwards.

use crate::error::LifeError;
use tracing::debug;

/// How two faces must touch to count as neighbors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AdjacencyPolicy {
    /// Faces sharing at least one vertex are neighbors. Produces up to ~12
    /// neighbors per cell on geodesic-sphere meshes, matching the 0..=12
    /// rule domain.
    #[default]
    SharedVertex,
    /// Faces sharing a full edge (two vertices) are neighbors. At most 3
    /// neighbors per cell on a closed manifold mesh; the safer choice for
    /// arbitrary meshes whose vertex valence would overflow the rule domain.
    SharedEdge,
}

/// Read-only mapping from cell index to its distinct neighbor cell indices.
///
/// Neighbor lists are stored sorted in one flat buffer with per-cell ranges,
/// so lookups are a slice view with no per-cell allocation. Invariants: a
/// cell is never its own neighbor, and membership is symmetric.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph {
    policy: AdjacencyPolicy,
    /// Flat buffer of neighbor cell indices
    neighbor_indices: Vec<u32>,
    /// Per-cell (start, end) ranges into `neighbor_indices`
    neighbor_ranges: Vec<(u32, u32)>,
}

impl AdjacencyGraph {
    /// Build the adjacency graph for a triangle list.
    ///
    /// `faces` holds one vertex-index triple per cell; `vertex_count` is the
    /// size of the vertex pool the triples index into. A face referencing a
    /// vertex index outside the pool fails fast with
    /// [`LifeError::InvalidMesh`]; no partial graph is returned.
    pub fn build(
        faces: &[[u32; 3]],
        vertex_count: usize,
        policy: AdjacencyPolicy,
    ) -> Result<Self, LifeError> {
        for (face, triple) in faces.iter().enumerate() {
            for &vertex in triple {
                if vertex as usize >= vertex_count {
                    return Err(LifeError::InvalidMesh {
                        face,
                        vertex: vertex as usize,
                        vertex_count,
                    });
                }
            }
        }

        // Incidence map: vertex index -> faces referencing that vertex.
        // Degenerate faces listing a vertex twice register it once.
        let mut incident_faces: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for (face, triple) in faces.iter().enumerate() {
            for (k, &vertex) in triple.iter().enumerate() {
                if !triple[..k].contains(&vertex) {
                    incident_faces[vertex as usize].push(face as u32);
                }
            }
        }

        // Each face's neighbors are the union of the incidence lists of its
        // vertices, minus the face itself. Sorting makes duplicate candidates
        // adjacent: a candidate appearing twice shares two vertices, i.e. an
        // edge.
        let mut neighbor_indices = Vec::new();
        let mut neighbor_ranges = Vec::with_capacity(faces.len());
        let mut candidates: Vec<u32> = Vec::new();

        for (face, triple) in faces.iter().enumerate() {
            candidates.clear();
            for (k, &vertex) in triple.iter().enumerate() {
                if triple[..k].contains(&vertex) {
                    continue;
                }
                for &other in &incident_faces[vertex as usize] {
                    if other != face as u32 {
                        candidates.push(other);
                    }
                }
            }
            candidates.sort_unstable();

            let start = neighbor_indices.len() as u32;
            match policy {
                AdjacencyPolicy::SharedVertex => {
                    candidates.dedup();
                    neighbor_indices.extend_from_slice(&candidates);
                }
                AdjacencyPolicy::SharedEdge => {
                    let mut i = 0;
                    while i < candidates.len() {
                        let mut run = 1;
                        while i + run < candidates.len() && candidates[i + run] == candidates[i] {
                            run += 1;
                        }
                        if run >= 2 {
                            neighbor_indices.push(candidates[i]);
                        }
                        i += run;
                    }
                }
            }
            neighbor_ranges.push((start, neighbor_indices.len() as u32));
        }

        let graph = Self {
            policy,
            neighbor_indices,
            neighbor_ranges,
        };

        let num_cells = graph.num_cells();
        let average_degree = if num_cells > 0 {
            graph.neighbor_indices.len() as f64 / num_cells as f64
        } else {
            0.0
        };
        debug!(
            cells = num_cells,
            ?policy,
            average_degree,
            max_degree = graph.max_degree(),
            "built adjacency graph"
        );

        Ok(graph)
    }

    /// Number of cells in the graph (one per face)
    pub fn num_cells(&self) -> usize {
        self.neighbor_ranges.len()
    }

    /// The policy the graph was built with
    pub fn policy(&self) -> AdjacencyPolicy {
        self.policy
    }

    /// The sorted, distinct neighbor cell indices of a cell
    #[inline]
    pub fn neighbors(&self, cell: usize) -> &[u32] {
        let (start, end) = self.neighbor_ranges[cell];
        &self.neighbor_indices[start as usize..end as usize]
    }

    /// Largest neighbor count across all cells
    pub fn max_degree(&self) -> usize {
        self.neighbor_ranges
            .iter()
            .map(|&(start, end)| (end - start) as usize)
            .max()
            .unwrap_or(0)
    }
}
