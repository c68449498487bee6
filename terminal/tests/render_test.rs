use common::{Direction, GameSnapshot, GameState, Position, Snake};
use std::collections::VecDeque;
use terminal::render::{
    arena::ArenaRenderer,
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig, Tint},
};

fn snapshot_with(snake_a: &[(i16, i16)], direction: Direction, food: (i16, i16)) -> GameSnapshot {
    let mut state = GameState::new(1);
    state.snakes[0] = Snake {
        body: snake_a.iter().copied().map(Position::from).collect::<VecDeque<_>>(),
        direction,
    };
    state.snakes[1] = Snake {
        body: VecDeque::from([Position::new(30, 20)]),
        direction: Direction::Left,
    };
    state.food = Position::from(food);
    GameSnapshot::from(&state)
}

#[test]
fn test_2x1_rendering() {
    let snapshot = snapshot_with(&[(5, 5), (4, 5)], Direction::Right, (7, 7));

    let char_dims = CharDimensions::new(2, 1);
    let arena_renderer = ArenaRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };

    let char_grid = arena_renderer.render(&snapshot, &config);
    assert_eq!(char_grid.physical_width(), 80);
    assert_eq!(char_grid.physical_height(), 30);

    // Tints survive into the grid for colouring
    let rows = char_grid.rows();
    assert_eq!(rows[5][10].tint, Tint::Snake(0));
    assert_eq!(rows[7][14].tint, Tint::Food);
    assert_eq!(rows[20][60].tint, Tint::Snake(1));
    assert_eq!(rows[0][0].tint, Tint::Background);

    let lines = char_grid.into_lines();

    // Head at (5,5) -> chars 10,11 on row 5, marker points right
    assert_eq!(lines[5][10], '▶');
    assert_eq!(lines[5][11], '█');

    // Body at (4,5) -> chars 8,9
    assert_eq!(lines[5][8], '▓');
    assert_eq!(lines[5][9], '▓');

    // Food at (7,7) -> chars 14,15 on row 7
    assert_eq!(lines[7][14], '●');
    assert_eq!(lines[7][15], '●');

    // Second snake's head faces left
    assert_eq!(lines[20][60], '◀');

    // Empty cells carry a faint dot in their first column
    assert_eq!(lines[0][0], '·');
    assert_eq!(lines[0][1], ' ');
}

#[test]
fn test_1x1_rendering() {
    let snapshot = snapshot_with(&[(2, 2), (2, 3), (2, 4)], Direction::Up, (3, 3));

    let char_dims = CharDimensions::new(1, 1);
    let arena_renderer = ArenaRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };

    let lines = arena_renderer.render(&snapshot, &config).into_lines();

    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0].len(), 40);

    assert_eq!(lines[2][2], '▲');
    assert_eq!(lines[3][2], '▓');
    assert_eq!(lines[4][2], '▓');
    assert_eq!(lines[3][3], '●');
    // Beta's head faces left
    assert_eq!(lines[20][30], '◀');
}

#[test]
fn test_custom_dimensions() {
    let snapshot = snapshot_with(&[(10, 10)], Direction::Down, (1, 1));

    let char_dims = CharDimensions::new(3, 2);
    let arena_renderer = ArenaRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };

    let lines = arena_renderer.render(&snapshot, &config).into_lines();

    assert_eq!(lines.len(), 60); // 30 * 2
    assert_eq!(lines[0].len(), 120); // 40 * 3

    // Food at (1,1) covers chars 3-5 on rows 2-3 in a checkerboard
    assert_eq!(lines[2][3], '●');
    assert_eq!(lines[2][4], ' ');
    assert_eq!(lines[2][5], '●');
    assert_eq!(lines[3][3], ' ');
    assert_eq!(lines[3][4], '●');
    assert_eq!(lines[3][5], ' ');

    // Head at (10,10): marker in the top-left char, solid elsewhere
    assert_eq!(lines[20][30], '▼');
    assert_eq!(lines[20][31], '█');
    assert_eq!(lines[21][30], '█');
}

#[test]
fn test_head_drawn_over_food() {
    // Food placed by hand under the head is hidden by it
    let snapshot = snapshot_with(&[(6, 6)], Direction::Left, (6, 6));

    let char_dims = CharDimensions::new(1, 1);
    let arena_renderer = ArenaRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };

    let lines = arena_renderer.render(&snapshot, &config).into_lines();
    assert_eq!(lines[6][6], '◀');
}
