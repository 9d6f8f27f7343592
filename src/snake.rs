use std::collections::VecDeque;

use rand::Rng;
use tracing::trace;

use crate::config::Board;
use crate::grid::Cell;
use crate::input::{direction_change_is_valid, Direction};

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    Moved,
    /// The head ran into the body; the snake was reset to its start cell.
    Reset,
}

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    start: Cell,
    direction: Direction,
    pending_direction: Option<Direction>,
    length: usize,
    last_vacated: Option<Cell>,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self::from_segments(start, vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The target length is the segment count; `start` is where the snake
    /// respawns after a reset.
    #[must_use]
    pub fn from_segments(start: Cell, segments: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            length: segments.len(),
            body: VecDeque::from(segments),
            start,
            direction,
            pending_direction: None,
            last_vacated: None,
        }
    }

    /// Buffers a direction for the next tick. Last accepted input wins.
    ///
    /// Returns `false` when `direction` reverses the current direction.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            trace!(?direction, current = ?self.direction, "rejected reversal");
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Applies the pending direction and moves one cell, wrapping at edges.
    ///
    /// A head landing on an interior segment resets the snake instead of
    /// completing the move. The interior excludes the current head, the neck
    /// directly behind it, and the tail that is about to vacate, so snakes of
    /// three or fewer segments never collide.
    pub fn advance<R: Rng + ?Sized>(&mut self, board: Board, rng: &mut R) -> MoveOutcome {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let new_head = self.head().offset(self.direction, board);
        if self.hits_interior(new_head) {
            self.reset(rng);
            return MoveOutcome::Reset;
        }

        self.body.push_front(new_head);
        self.last_vacated = if self.body.len() > self.length {
            self.body.pop_back()
        } else {
            None
        };

        MoveOutcome::Moved
    }

    fn hits_interior(&self, cell: Cell) -> bool {
        let tail_index = self.body.len().saturating_sub(1);
        self.body
            .iter()
            .take(tail_index)
            .skip(2)
            .any(|segment| *segment == cell)
    }

    /// Raises the target length; the body catches up on the next advance.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Returns the snake to a single segment at its start cell, facing a
    /// random direction.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.length = 1;
        self.body.clear();
        self.body.push_front(self.start);
        self.direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        self.pending_direction = None;
        self.last_vacated = None;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over occupied cells from head to tail.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Target body size the snake grows or shrinks towards.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Tail cell dropped by the last move, still painted on screen.
    #[must_use]
    pub fn last_vacated(&self) -> Option<Cell> {
        self.last_vacated
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }
}
