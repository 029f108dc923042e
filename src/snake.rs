use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in pixel coordinates; always a multiple of the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside `[0, width) × [0, height)`.
    #[must_use]
    pub fn is_within_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && i64::from(self.x) < i64::from(width)
            && i64::from(self.y) < i64::from(height)
    }

    /// Returns the position one cell further along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }
}

/// Snake body and the direction the next move will use.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty segment list is not a snake; callers always pass at least
    /// the head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least a head");

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Lays out a fresh snake on the row `y = cell_size`, heading right, with
    /// the tail at `x = cell_size`.
    #[must_use]
    pub fn starting(config: &EngineConfig) -> Self {
        let cell = config.cell_size as i32;
        let parts = config.initial_body_length as i32;

        let segments = (0..parts)
            .map(|index| Position::new(cell * (parts - index), cell))
            .collect();

        Self::from_segments(segments, Direction::Right)
    }

    /// Requests a new direction for the next move; last accepted write wins.
    ///
    /// Rejects only the exact opposite of the current direction. Returns
    /// whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !direction_change_is_valid(self.direction, requested) {
            return false;
        }

        self.direction = requested;
        true
    }

    /// Prepends the next head along the pending direction and returns it.
    pub fn push_head(&mut self, cell_size: i32) -> Position {
        let next = self.head().stepped(self.direction, cell_size);
        self.body.push_front(next);
        next
    }

    /// Removes the tail segment, keeping at least the head.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
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

    /// Returns the direction the next move will use.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> {
        self.body.iter()
    }
}
