use common::{
    Direction, GameCommand, GameEngine, GameEvent, GameOverCause, GameState, Position,
    SettingsUpdate, Snake, SnakeColor, Speed, find_overlap, in_bounds, is_occupied,
};
use std::collections::VecDeque;

fn snake_from(cells: &[(i16, i16)], direction: Direction) -> Snake {
    Snake {
        body: cells.iter().copied().map(Position::from).collect::<VecDeque<_>>(),
        direction,
    }
}

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.exec_command(&GameCommand::Start).unwrap();
    state
}

fn head(state: &GameState, snake_id: usize) -> Position {
    *state.snakes[snake_id].head().unwrap()
}

#[test]
fn test_snakes_close_in_on_food() {
    let mut state = started(1);
    state.snakes = [
        snake_from(&[(5, 5)], Direction::Right),
        snake_from(&[(34, 24)], Direction::Left),
    ];
    let food = Position::new(20, 15);
    state.food = food;

    let mut distances = [head(&state, 0).manhattan_distance(&food), head(&state, 1).manhattan_distance(&food)];
    assert_eq!(distances, [25, 23]);

    let mut ticks = 0;
    while distances.iter().all(|d| *d > 1) {
        state.exec_command(&GameCommand::Tick).unwrap();
        ticks += 1;
        assert!(state.is_running, "no obstacles, game should keep running");
        assert_eq!(state.food, food, "nobody has eaten yet");

        let next = [head(&state, 0).manhattan_distance(&food), head(&state, 1).manhattan_distance(&food)];
        for snake_id in 0..2 {
            assert!(
                next[snake_id] <= distances[snake_id],
                "snake {} moved away from food on tick {}",
                snake_id,
                ticks
            );
        }
        distances = next;
        assert!(ticks < 100);
    }
}

#[test]
fn test_eating_food() {
    let mut state = started(2);
    state.food = Position::new(6, 5);

    let events = state.exec_command(&GameCommand::Tick).unwrap();

    assert_eq!(state.snakes[0].length(), 2);
    assert_eq!(state.scores[0], 1);
    assert_eq!(state.scores[1], 0);
    assert!(!is_occupied(&state.food, &state.snakes));
    assert!(events.iter().any(|e| matches!(e, GameEvent::FoodSpawned { position } if *position == state.food)));
}

#[test]
fn test_running_off_the_left_edge() {
    let mut state = started(3);
    // Up and down are blocked, so the AI keeps heading left
    state.snakes = [
        snake_from(&[(0, 10)], Direction::Left),
        snake_from(&[(0, 11), (1, 11), (1, 10), (1, 9), (0, 9)], Direction::Left),
    ];
    state.food = Position::new(30, 20);

    state.exec_command(&GameCommand::Tick).unwrap();

    assert!(!state.is_running);
    assert_eq!(state.game_over, Some(GameOverCause::Wall { snake_id: 0 }));
    assert_eq!(head(&state, 0), Position::new(0, 10));
}

#[test]
fn test_restart_resets_scores_but_keeps_settings() {
    let mut engine = GameEngine::new(4);
    let orange: SnakeColor = "orange".parse().unwrap();
    engine
        .update_settings(SettingsUpdate {
            speed: Some(Speed::Fast),
            snake_colors: [Some(orange.clone()), None],
        })
        .unwrap();

    let mut finished = engine.state().clone();
    finished.scores = [3, 5];
    finished.is_running = false;
    finished.game_over = Some(GameOverCause::Wall { snake_id: 1 });
    let mut engine = GameEngine::new_from_state(finished);

    engine.start_game().unwrap();

    let state = engine.state();
    assert_eq!(state.scores, [0, 0]);
    assert!(state.is_running);
    assert_eq!(state.game_over, None);
    assert_eq!(state.speed, Speed::Fast);
    assert_eq!(state.snake_colors[0], orange);
    assert_eq!(state.snake_colors[1].palette_name(), Some("Blue"));
    assert_eq!(head(state, 0), Position::new(5, 5));
    assert_eq!(head(state, 1), Position::new(34, 24));
}

#[test]
fn test_invariants_hold_across_many_games() {
    for seed in 0..25u64 {
        let mut state = started(seed);

        for _ in 0..3000 {
            if !state.is_running {
                break;
            }
            let before = state.clone();
            let events = state.exec_command(&GameCommand::Tick).unwrap();

            for snake_id in 0..2 {
                let old = &before.snakes[snake_id];
                let new = &state.snakes[snake_id];

                assert!(new.body.iter().all(in_bounds), "seed {}: body left the arena", seed);
                assert!(
                    !old.direction.is_opposite(&new.direction),
                    "seed {}: snake {} reversed",
                    seed,
                    snake_id
                );

                let grew = new.length() as i64 - old.length() as i64;
                let scored = state.scores[snake_id] as i64 - before.scores[snake_id] as i64;
                assert!(grew == 0 || grew == 1, "seed {}: length jumped by {}", seed, grew);
                assert_eq!(grew, scored, "seed {}: growth and score disagree", seed);
            }

            for event in &events {
                if let GameEvent::FoodSpawned { position } = event {
                    assert!(!is_occupied(position, &state.snakes), "seed {}: food on a snake", seed);
                }
            }

            if find_overlap(&state.snakes).is_some() {
                assert!(!state.is_running, "seed {}: overlap left the game running", seed);
            }
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed: u64| {
        let mut engine = GameEngine::new(seed);
        engine.start_game().unwrap();
        while engine.is_running() && engine.current_tick() < 2000 {
            engine.tick().unwrap();
        }
        engine.snapshot()
    };

    assert_eq!(run(77), run(77));
}
