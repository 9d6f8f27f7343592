use std::collections::HashSet;

use rand::Rng;

use crate::config::Board;
use crate::grid::Cell;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food on a random cell outside `excluded`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board: Board, excluded: &HashSet<Cell>) -> Self {
        Self::new(free_cell(rng, board, excluded))
    }

    /// Moves the food to a random cell outside `excluded`.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: Board,
        excluded: &HashSet<Cell>,
    ) {
        self.position = free_cell(rng, board, excluded);
    }
}

/// Samples grid cells until one falls outside `excluded`.
///
/// `excluded` must leave at least one cell free, otherwise this never returns.
fn free_cell<R: Rng + ?Sized>(rng: &mut R, board: Board, excluded: &HashSet<Cell>) -> Cell {
    debug_assert!(
        excluded.len() < board.total_cells(),
        "free_cell: no free cells on the board ({}x{})",
        board.columns(),
        board.rows(),
    );

    loop {
        let candidate = board.random_cell(rng);
        if !excluded.contains(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::Board;
    use crate::grid::Cell;

    use super::Food;

    #[test]
    fn food_spawn_never_overlaps_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::new(80, 60, 10).expect("test board should be valid");
        let excluded: HashSet<Cell> = [Cell::new(0, 0), Cell::new(10, 0), Cell::new(20, 0)]
            .into_iter()
            .collect();

        for _ in 0..100 {
            let food = Food::spawn(&mut rng, board, &excluded);
            assert!(!excluded.contains(&food.position));
        }
    }

    #[test]
    fn randomize_finds_the_single_free_cell() {
        let mut rng = StdRng::seed_from_u64(8);
        let board = Board::new(40, 30, 10).expect("test board should be valid");
        let last_free = Cell::new(20, 10);
        let excluded: HashSet<Cell> = board.cells().filter(|cell| *cell != last_free).collect();
        let mut food = Food::new(Cell::new(0, 0));

        for _ in 0..20 {
            food.randomize_position(&mut rng, board, &excluded);
            assert_eq!(food.position, last_free);
        }
    }

    #[test]
    fn randomize_without_exclusions_reaches_many_cells() {
        let mut rng = StdRng::seed_from_u64(9);
        let board = Board::new(40, 40, 20).expect("test board should be valid");
        let mut food = Food::new(Cell::new(0, 0));
        let mut seen = HashSet::new();

        for _ in 0..100 {
            food.randomize_position(&mut rng, board, &HashSet::new());
            seen.insert(food.position);
        }

        assert_eq!(seen.len(), board.total_cells());
    }
}
