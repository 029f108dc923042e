use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grid_snake::config::EngineConfig;
use grid_snake::food::Food;
use grid_snake::game::{GameOverReason, GameState, GameStatus};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Plays random games and checks the per-tick invariants on every step.
#[test]
fn random_play_keeps_engine_invariants() {
    let configs = [
        EngineConfig::default(),
        EngineConfig::new(200, 150, 50, 2),
        EngineConfig::new(100, 100, 25, 3),
    ];

    for (index, config) in configs.into_iter().enumerate() {
        for game in 0..40_u64 {
            let seed = game + 1000 * index as u64;
            let mut state = GameState::initialize_with_seed(config, seed).expect("valid config");
            let mut inputs = StdRng::seed_from_u64(seed ^ 0xA5A5);

            assert!(!state.snake.occupies(state.food.position));

            for _ in 0..500 {
                if state.is_game_over() {
                    break;
                }

                if inputs.gen_bool(0.3) {
                    let requested = DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())];
                    state.set_direction(requested);
                }

                let before_len = state.snake.len();
                let before_score = state.score;
                let food_before = state.food.position;
                let expected_head = state
                    .snake
                    .head()
                    .stepped(state.snake.direction(), config.cell_size as i32);

                state.advance();

                assert_eq!(state.snake.head(), expected_head);

                if expected_head == food_before {
                    assert_eq!(state.snake.len(), before_len + 1);
                    assert_eq!(state.score, before_score + 1);
                    if state.game_over_reason != Some(GameOverReason::BoardFilled) {
                        assert!(!state.snake.occupies(state.food.position));
                    }
                } else {
                    assert_eq!(state.snake.len(), before_len);
                    assert_eq!(state.score, before_score);
                }

                if state.status == GameStatus::Running {
                    let head = state.snake.head();
                    assert!(head.is_within_bounds(config.grid_width, config.grid_height));
                    assert!(!state.snake.head_overlaps_body());
                    assert_eq!(head.x % config.cell_size as i32, 0);
                    assert_eq!(head.y % config.cell_size as i32, 0);
                }
            }
        }
    }
}

#[test]
fn reversal_never_changes_direction() {
    let mut state =
        GameState::initialize_with_seed(EngineConfig::default(), 3).expect("valid config");
    state.food = Food::new(Position::new(0, 650));
    let mut inputs = StdRng::seed_from_u64(17);

    for _ in 0..30 {
        if state.is_game_over() {
            break;
        }

        let current = state.snake.direction();
        assert!(!state.set_direction(current.opposite()));
        assert_eq!(state.snake.direction(), current);

        let turn = DIRECTIONS[inputs.gen_range(0..DIRECTIONS.len())];
        state.set_direction(turn);

        let current = state.snake.direction();
        assert!(!state.set_direction(current.opposite()));
        assert_eq!(state.snake.direction(), current);

        state.advance();
    }
}

#[test]
fn single_segment_snake_only_dies_at_walls() {
    let config = EngineConfig::new(300, 300, 50, 1);
    let mut state = GameState::initialize_with_seed(config, 8).expect("valid config");
    state.snake = Snake::new(Position::new(100, 100), Direction::Right);
    state.food = Food::new(Position::new(250, 250));

    // Circle a 2x2 block of cells.
    let turns = [
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];
    for lap in 0..25 {
        let turn = turns[lap % turns.len()];
        state.set_direction(turn);
        state.advance();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.len(), 1);
    }

    state.set_direction(Direction::Left);
    for _ in 0..10 {
        state.advance();
    }
    assert_eq!(state.game_over_reason, Some(GameOverReason::WallCollision));
}

#[test]
fn eating_at_a_wall_side_cell_still_scores() {
    let mut state =
        GameState::initialize_with_seed(EngineConfig::default(), 21).expect("valid config");
    state.snake = Snake::from_segments(
        vec![Position::new(600, 300), Position::new(550, 300)],
        Direction::Right,
    );
    state.food = Food::new(Position::new(650, 300));

    state.advance();
    assert_eq!(state.score, 1);
    assert_eq!(state.status, GameStatus::Running);

    state.food = Food::new(Position::new(0, 0));
    state.advance();
    assert_eq!(state.game_over_reason, Some(GameOverReason::WallCollision));
    assert_eq!(state.score, 1);
}
