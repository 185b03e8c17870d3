use super::Cell;
use rand::Rng;

/// Generation is a complete alive/dead snapshot of all cells at one
/// discrete time step. The length is fixed at construction (one cell per
/// mesh face) and generations are replaced wholesale on every step; the
/// engine never mutates a generation in place while it is being read for
/// neighbor counting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generation {
    cells: Vec<Cell>,
}

impl Generation {
    /// Create a new generation with all cells dead
    pub fn dead(num_cells: usize) -> Self {
        Self {
            cells: vec![Cell::Dead; num_cells],
        }
    }

    /// Create a generation from a pre-computed cell buffer
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Sample every cell alive independently with the given probability.
    /// The probability must already be validated to lie in [0, 1].
    pub fn random(num_cells: usize, probability: f64, rng: &mut impl Rng) -> Self {
        debug_assert!((0.0..=1.0).contains(&probability));
        Self {
            cells: (0..num_cells)
                .map(|_| Cell::from_alive(rng.random_bool(probability)))
                .collect(),
        }
    }

    /// Number of cells in the snapshot
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the snapshot holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get cell state at index (with bounds checking)
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Whether the cell at index is alive; out-of-range indexes read as dead
    #[inline]
    pub fn is_alive(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Cell::Alive))
    }

    /// Set cell at index (for painting / test setup)
    pub fn set(&mut self, index: usize, cell: Cell) {
        if index < self.cells.len() {
            self.cells[index] = cell;
        }
    }

    /// Count of alive cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// View the snapshot as a cell slice
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over all cells with their indexes
    pub fn iter(&self) -> impl Iterator<Item = (usize, Cell)> + '_ {
        self.cells.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dead_generation() {
        let generation = Generation::dead(10);
        assert_eq!(generation.len(), 10);
        assert_eq!(generation.alive_count(), 0);
        assert!(!generation.is_alive(0));
        assert!(!generation.is_alive(9));
    }

    #[test]
    fn test_get_set() {
        let mut generation = Generation::dead(5);

        generation.set(2, Cell::Alive);
        assert_eq!(generation.get(2), Some(Cell::Alive));
        assert!(generation.is_alive(2));
        assert!(!generation.is_alive(3));

        generation.set(2, Cell::Dead);
        assert!(!generation.is_alive(2));
    }

    #[test]
    fn test_out_of_range_reads_dead() {
        let generation = Generation::dead(3);
        assert_eq!(generation.get(3), None);
        assert!(!generation.is_alive(100));
    }

    #[test]
    fn test_random_extremes() {
        let mut rng = StdRng::seed_from_u64(7);

        let none = Generation::random(1_000, 0.0, &mut rng);
        assert_eq!(none.alive_count(), 0);

        let all = Generation::random(1_000, 1.0, &mut rng);
        assert_eq!(all.alive_count(), 1_000);
    }

    #[test]
    fn test_random_distribution_converges() {
        // 100k independent draws at p = 0.3 should land within +/-1%.
        let mut rng = StdRng::seed_from_u64(42);
        let generation = Generation::random(100_000, 0.3, &mut rng);

        let fraction = generation.alive_count() as f64 / generation.len() as f64;
        assert!(
            (fraction - 0.3).abs() < 0.01,
            "alive fraction {fraction} too far from 0.3"
        );
    }
}
