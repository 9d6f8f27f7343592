use rand::Rng;

use crate::config::Board;
use crate::input::Direction;

/// Grid cell addressed by its top-left pixel coordinate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`, wrapped
    /// toroidally on both axes.
    #[must_use]
    pub fn offset(self, direction: Direction, board: Board) -> Self {
        let (dx, dy) = direction.unit();
        let step = i32::from(board.cell_size());
        Self {
            x: wrap_axis(self.x + dx * step, i32::from(board.width())),
            y: wrap_axis(self.y + dy * step, i32::from(board.height())),
        }
    }

    /// Zero-based grid column.
    #[must_use]
    pub fn column(self, board: Board) -> i32 {
        self.x / i32::from(board.cell_size())
    }

    /// Zero-based grid row.
    #[must_use]
    pub fn row(self, board: Board) -> i32 {
        self.y / i32::from(board.cell_size())
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    value.rem_euclid(upper_bound)
}

impl Board {
    /// Cell at the pixel centre of the board, snapped down to the grid.
    #[must_use]
    pub fn center(self) -> Cell {
        let size = i32::from(self.cell_size());
        Cell {
            x: i32::from(self.width()) / 2 / size * size,
            y: i32::from(self.height()) / 2 / size * size,
        }
    }

    /// Samples a grid-aligned cell uniformly at random.
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        let size = i32::from(self.cell_size());
        Cell {
            x: rng.gen_range(0..i32::from(self.columns())) * size,
            y: rng.gen_range(0..i32::from(self.rows())) * size,
        }
    }

    /// Iterates every cell of the board, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = i32::from(self.cell_size());
        let columns = i32::from(self.columns());
        let rows = i32::from(self.rows());
        (0..rows).flat_map(move |row| {
            (0..columns).map(move |column| Cell::new(column * size, row * size))
        })
    }
}
