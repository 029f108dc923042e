use rand::Rng;

use crate::config::EngineConfig;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to enumerating free cells.
pub const REJECTION_SAMPLING_ATTEMPTS: usize = 256;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &EngineConfig,
        snake: &Snake,
    ) -> Option<Self> {
        place(rng, config, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell, aligned to the cell size.
///
/// Draws random cells and rejects the ones on the snake. After
/// [`REJECTION_SAMPLING_ATTEMPTS`] misses the free cells are enumerated and
/// one is chosen directly, so a crowded board still terminates.
#[must_use]
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    config: &EngineConfig,
    snake: &Snake,
) -> Option<Position> {
    let size = config.grid_size();
    if size.columns == 0 || size.rows == 0 {
        return None;
    }

    let cell = config.cell_size as i32;
    if snake.len() < size.total_cells() {
        for _ in 0..REJECTION_SAMPLING_ATTEMPTS {
            let candidate = Position::new(
                rng.gen_range(0..size.columns) as i32 * cell,
                rng.gen_range(0..size.rows) as i32 * cell,
            );
            if !snake.occupies(candidate) {
                return Some(candidate);
            }
        }
    }

    let free: Vec<Position> = (0..size.rows as i32)
        .flat_map(|row| {
            (0..size.columns as i32).map(move |column| Position::new(column * cell, row * cell))
        })
        .filter(|position| !snake.occupies(*position))
        .collect();

    if free.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..free.len());
    Some(free[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::EngineConfig;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Food, place};

    #[test]
    fn food_never_lands_on_the_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = EngineConfig::new(200, 150, 50, 3);
        let snake = Snake::starting(&config);

        for _ in 0..200 {
            let position = place(&mut rng, &config, &snake).expect("board has free cells");
            assert!(!snake.occupies(position));
            assert!(position.is_within_bounds(config.grid_width, config.grid_height));
            assert_eq!(position.x % 50, 0);
            assert_eq!(position.y % 50, 0);
        }
    }

    #[test]
    fn crowded_board_falls_back_to_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = EngineConfig::new(100, 100, 50, 1);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(50, 0),
                Position::new(50, 50),
            ],
            Direction::Left,
        );

        for _ in 0..20 {
            assert_eq!(
                place(&mut rng, &config, &snake),
                Some(Position::new(0, 50))
            );
        }
    }

    #[test]
    fn full_board_has_no_food() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = EngineConfig::new(100, 100, 50, 1);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(50, 0),
                Position::new(50, 50),
                Position::new(0, 50),
            ],
            Direction::Up,
        );

        assert_eq!(Food::spawn(&mut rng, &config, &snake), None);
    }

    #[test]
    fn same_seed_places_food_identically() {
        let config = EngineConfig::default();
        let snake = Snake::starting(&config);

        let first = place(&mut StdRng::seed_from_u64(99), &config, &snake);
        let second = place(&mut StdRng::seed_from_u64(99), &config, &snake);

        assert_eq!(first, second);
    }
}
