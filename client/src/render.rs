use common::{GameSnapshot, Position, GRID_HEIGHT, GRID_WIDTH};
use std::f64::consts::PI;
use wasm_bindgen::prelude::*;

const BACKGROUND_TOP: &str = "#0a0a0f";
const BACKGROUND_BOTTOM: &str = "#0f0f1a";
const GRID_LINE: &str = "rgba(255, 255, 255, 0.03)";
const FOOD_COLOR: &str = "#f87171";
const FOOD_GLOW: &str = "#ef4444";

/// Renders a snapshot (as produced by `WasmGame::snapshot_json`) to a canvas.
/// `pulse_phase` animates the food glow; pass the page clock in seconds.
#[wasm_bindgen]
pub fn render_game(
    snapshot_json: &str,
    canvas: web_sys::HtmlCanvasElement,
    cell_size: f64,
    pulse_phase: f64,
) -> Result<(), JsValue> {
    let snapshot: GameSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse snapshot: {}", e)))?;

    let context = canvas
        .get_context("2d")
        .map_err(|_| JsValue::from_str("Failed to get 2d context"))?
        .ok_or_else(|| JsValue::from_str("2d context is null"))?;

    let ctx = context
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Failed to cast to 2d context"))?;

    let canvas_width = canvas.width() as f64;
    let canvas_height = canvas.height() as f64;

    let gradient = ctx.create_linear_gradient(0.0, 0.0, canvas_width, canvas_height);
    gradient.add_color_stop(0.0, BACKGROUND_TOP)?;
    gradient.add_color_stop(1.0, BACKGROUND_BOTTOM)?;
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    draw_grid(&ctx, cell_size);

    // Snakes glow in their own colour; the head is drawn slightly larger
    for snake in &snapshot.snakes {
        let color = JsValue::from_str(snake.color.as_str());
        ctx.set_shadow_color(snake.color.as_str());
        ctx.set_shadow_blur(15.0);
        ctx.set_fill_style(&color);
        for (index, segment) in snake.body.iter().enumerate() {
            let inset = if index == 0 { 1.0 } else { 2.0 };
            fill_cell(&ctx, segment, cell_size, inset);
        }
    }

    let pulse = (pulse_phase * 5.0).sin() * 0.2 + 0.8;
    ctx.set_shadow_color(FOOD_GLOW);
    ctx.set_shadow_blur(20.0 * pulse);
    ctx.set_fill_style(&JsValue::from_str(FOOD_COLOR));
    let food_size = (cell_size - 4.0) * pulse;
    let offset = (cell_size - food_size) / 2.0;
    ctx.fill_rect(
        snapshot.food.x as f64 * cell_size + offset,
        snapshot.food.y as f64 * cell_size + offset,
        food_size,
        food_size,
    );
    ctx.set_shadow_blur(0.0);

    if snapshot.game_over.is_some() {
        draw_head_markers(&ctx, &snapshot, cell_size)?;
    }

    Ok(())
}

fn draw_grid(ctx: &web_sys::CanvasRenderingContext2d, cell_size: f64) {
    let width = GRID_WIDTH as f64 * cell_size;
    let height = GRID_HEIGHT as f64 * cell_size;

    ctx.set_stroke_style(&JsValue::from_str(GRID_LINE));
    ctx.set_line_width(1.0);
    for x in 0..=GRID_WIDTH {
        let x = x as f64 * cell_size;
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        ctx.stroke();
    }
    for y in 0..=GRID_HEIGHT {
        let y = y as f64 * cell_size;
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        ctx.stroke();
    }
}

fn fill_cell(ctx: &web_sys::CanvasRenderingContext2d, cell: &Position, cell_size: f64, inset: f64) {
    let size = (cell_size - 2.0 * inset).max(1.0);
    ctx.fill_rect(
        cell.x as f64 * cell_size + inset,
        cell.y as f64 * cell_size + inset,
        size,
        size,
    );
}

// Dark dot in each head so a frozen board shows where the crash happened
fn draw_head_markers(
    ctx: &web_sys::CanvasRenderingContext2d,
    snapshot: &GameSnapshot,
    cell_size: f64,
) -> Result<(), JsValue> {
    ctx.set_fill_style(&JsValue::from_str("#333"));
    for head in snapshot.snakes.iter().filter_map(|snake| snake.body.first()) {
        let center_x = head.x as f64 * cell_size + cell_size / 2.0;
        let center_y = head.y as f64 * cell_size + cell_size / 2.0;
        ctx.begin_path();
        ctx.arc(center_x, center_y, cell_size * 0.25, 0.0, 2.0 * PI)?;
        ctx.fill();
    }
    Ok(())
}
