//! The automaton engine: owns the current generation and applies the rule
//! over the adjacency graph to produce the next one.

use super::{AdjacencyGraph, Cell, Generation, LifeRule};
use crate::error::LifeError;
use rand::Rng;
use rayon::prelude::*;

/// Engine runs the cellular automaton on one mesh.
///
/// The adjacency graph is immutable after construction; the rule is owned
/// here and mutated through [`Engine::rule_mut`] between frames (single
/// logical writer, per the frame-driven host model). Generations are
/// replaced wholesale on every step.
pub struct Engine {
    adjacency: AdjacencyGraph,
    rule: LifeRule,
    current: Generation,
    generation: u64,
}

impl Engine {
    /// Create a new engine with all cells initially dead
    pub fn new(adjacency: AdjacencyGraph, rule: LifeRule) -> Self {
        let num_cells = adjacency.num_cells();
        Self {
            adjacency,
            rule,
            current: Generation::dead(num_cells),
            generation: 0,
        }
    }

    /// Cell count, fixed at construction
    pub fn num_cells(&self) -> usize {
        self.adjacency.num_cells()
    }

    /// The adjacency graph the engine was built with
    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// Number of steps taken since the last randomize/clear
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current state (read-only view)
    pub fn current(&self) -> &Generation {
        &self.current
    }

    /// The active rule
    pub fn rule(&self) -> &LifeRule {
        &self.rule
    }

    /// Mutable access to the rule, for UI edits between frames
    pub fn rule_mut(&mut self) -> &mut LifeRule {
        &mut self.rule
    }

    /// Replace the active rule
    pub fn set_rule(&mut self, rule: LifeRule) {
        self.rule = rule;
    }

    /// Set a single cell (for painting / test setup)
    pub fn set_cell(&mut self, index: usize, cell: Cell) {
        self.current.set(index, cell);
    }

    /// Reset all cells to dead and the step counter to zero
    pub fn clear(&mut self) {
        self.current = Generation::dead(self.num_cells());
        self.generation = 0;
    }

    /// Replace the current generation with an independent uniform draw per
    /// cell. Probabilities outside [0, 1] are rejected, not clamped.
    pub fn randomize(&mut self, probability: f64) -> Result<&Generation, LifeError> {
        self.randomize_with(probability, &mut rand::rng())
    }

    /// Like [`Engine::randomize`], with a caller-supplied RNG for
    /// reproducible runs.
    pub fn randomize_with(
        &mut self,
        probability: f64,
        rng: &mut impl Rng,
    ) -> Result<&Generation, LifeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        self.current = Generation::random(self.num_cells(), probability, rng);
        self.generation = 0;
        Ok(&self.current)
    }

    /// Count of alive neighbors of a cell in the current generation.
    /// Counts past the rule domain all test false, so saturation is safe.
    #[inline]
    fn alive_neighbors(&self, cell: usize) -> u8 {
        let count = self
            .adjacency
            .neighbors(cell)
            .iter()
            .filter(|&&neighbor| self.current.is_alive(neighbor as usize))
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    #[inline]
    fn evolve_cell(&self, cell: usize) -> Cell {
        let current = Cell::from_alive(self.current.is_alive(cell));
        self.rule.evolve(current, self.alive_neighbors(cell))
    }

    /// Synchronous update: every cell's neighbor count is taken against the
    /// pre-update snapshot, then the whole generation is replaced at once.
    pub fn next_generation(&mut self) -> &Generation {
        let cells: Vec<Cell> = (0..self.num_cells())
            .map(|cell| self.evolve_cell(cell))
            .collect();

        self.current = Generation::from_cells(cells);
        self.generation += 1;
        &self.current
    }

    /// Parallel synchronous update using rayon. Identical semantics to
    /// [`Engine::next_generation`]; worth it for large meshes.
    pub fn next_generation_parallel(&mut self) -> &Generation {
        let cells: Vec<Cell> = (0..self.num_cells())
            .into_par_iter()
            .map(|cell| self.evolve_cell(cell))
            .collect();

        self.current = Generation::from_cells(cells);
        self.generation += 1;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AdjacencyPolicy;
    use crate::mesh::TriangleMesh;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine_from_faces(faces: &[[u32; 3]], vertex_count: usize, rule: LifeRule) -> Engine {
        let graph =
            AdjacencyGraph::build(faces, vertex_count, AdjacencyPolicy::SharedVertex).unwrap();
        Engine::new(graph, rule)
    }

    /// Four faces whose vertex-adjacency is exactly:
    /// 0 <-> {1, 2}, 1 <-> {0, 2, 3}, 2 <-> {0, 1}, 3 <-> {1}.
    const FOUR_CELLS: [[u32; 3]; 4] = [[0, 1, 2], [2, 3, 4], [1, 2, 5], [3, 6, 7]];

    #[test]
    fn test_four_cell_topology() {
        let engine = engine_from_faces(&FOUR_CELLS, 8, LifeRule::conway());
        let graph = engine.adjacency();
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0, 2, 3]);
        assert_eq!(graph.neighbors(2), &[0, 1]);
        assert_eq!(graph.neighbors(3), &[1]);
    }

    #[test]
    fn test_end_to_end_scenario_all_die() {
        // Rule B2/S12, initial state [alive, dead, dead, dead]:
        // cell 0 is alive with 0 alive neighbors -> dies,
        // cells 1 and 2 see one alive neighbor but 1 is not a birth count,
        // cell 3 sees none. Everything is dead after one step.
        let mut engine = engine_from_faces(&FOUR_CELLS, 8, LifeRule::new(&[2], &[1, 2]));
        engine.set_cell(0, Cell::Alive);

        let next = engine.next_generation();
        assert_eq!(next.alive_count(), 0);
    }

    #[test]
    fn test_update_reads_pre_update_snapshot() {
        // Two edge-adjacent faces, rule B1/S (nothing survives). Cell 0 is
        // alive and must die; cell 1 must still be born from cell 0's
        // pre-update liveness. In-place updating would leave both dead.
        let faces = [[0, 1, 2], [0, 2, 3]];
        let mut engine = engine_from_faces(&faces, 4, LifeRule::new(&[1], &[]));
        engine.set_cell(0, Cell::Alive);

        let next = engine.next_generation();
        assert!(!next.is_alive(0));
        assert!(next.is_alive(1));
    }

    #[test]
    fn test_isolated_live_cell_dies_under_conway() {
        // One lone triangle: zero neighbors, so the survive set {2, 3}
        // cannot hold it.
        let mut engine = engine_from_faces(&[[0, 1, 2]], 3, LifeRule::conway());
        engine.set_cell(0, Cell::Alive);

        assert_eq!(engine.next_generation().alive_count(), 0);
    }

    #[test]
    fn test_all_dead_stays_dead() {
        for rule in [LifeRule::conway(), LifeRule::high_life(), LifeRule::new(&[2], &[1, 2])] {
            let mut engine = engine_from_faces(&FOUR_CELLS, 8, rule);
            for _ in 0..10 {
                assert_eq!(engine.next_generation().alive_count(), 0);
            }
        }
    }

    #[test]
    fn test_randomize_rejects_bad_probability() {
        let mut engine = engine_from_faces(&FOUR_CELLS, 8, LifeRule::conway());

        assert!(matches!(
            engine.randomize(-0.1),
            Err(LifeError::InvalidProbability(_))
        ));
        assert!(matches!(
            engine.randomize(1.1),
            Err(LifeError::InvalidProbability(_))
        ));

        assert_eq!(engine.randomize(0.0).unwrap().alive_count(), 0);
        assert_eq!(engine.randomize(1.0).unwrap().alive_count(), 4);
    }

    #[test]
    fn test_generation_counter() {
        let mut engine = engine_from_faces(&FOUR_CELLS, 8, LifeRule::conway());
        assert_eq!(engine.generation(), 0);

        engine.next_generation();
        engine.next_generation();
        assert_eq!(engine.generation(), 2);

        let mut rng = StdRng::seed_from_u64(3);
        engine.randomize_with(0.5, &mut rng).unwrap();
        assert_eq!(engine.generation(), 0);

        engine.next_generation();
        engine.clear();
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.current().alive_count(), 0);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let mesh = TriangleMesh::icosphere(2);
        let graph = AdjacencyGraph::build(
            &mesh.faces,
            mesh.num_vertices(),
            AdjacencyPolicy::SharedVertex,
        )
        .unwrap();

        let mut serial = Engine::new(graph.clone(), LifeRule::conway());
        let mut parallel = Engine::new(graph, LifeRule::conway());

        let mut rng = StdRng::seed_from_u64(99);
        serial.randomize_with(0.4, &mut rng).unwrap();
        let start = serial.current().clone();
        parallel.current = start;

        for _ in 0..5 {
            let a = serial.next_generation().clone();
            let b = parallel.next_generation_parallel().clone();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_rule_swap_between_steps() {
        let mut engine = engine_from_faces(&FOUR_CELLS, 8, LifeRule::conway());
        engine.set_cell(0, Cell::Alive);

        // With B1 on the books, cells 1 and 2 are born from cell 0.
        engine.rule_mut().set_birth_counts([1]);
        let next = engine.next_generation();
        assert!(next.is_alive(1));
        assert!(next.is_alive(2));

        engine.set_rule(LifeRule::seeds());
        assert_eq!(engine.rule().to_string(), "B2/S");
    }
}
