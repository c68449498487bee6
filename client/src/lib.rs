mod render;

pub use render::*;

use common::{GameEngine, GameEvent, Position, SettingsUpdate, SnakeColor, Speed, GRID_HEIGHT, GRID_WIDTH};
use std::time::Duration;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// Browser handle on a local duel. The page drives the clock with
/// `advance` from `requestAnimationFrame` and draws with `render_game`.
#[wasm_bindgen]
pub struct WasmGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WasmGame {
        WasmGame {
            engine: GameEngine::new(seed as u64),
        }
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.engine.is_running() {
            return Ok(());
        }
        self.engine.start_game().map_err(to_js)?;
        Ok(())
    }

    /// Advances the simulation by `elapsed_ms` of wall time.
    /// Returns true when the game ended during this call.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<bool, JsValue> {
        let events = self.engine.run_for(elapsed(elapsed_ms)).map_err(to_js)?;
        let mut ended = false;
        for event in events {
            if let GameEvent::GameOver { cause } = event {
                log::info!("Game over at tick {}: {}", self.engine.current_tick(), cause);
                ended = true;
            }
        }
        Ok(ended)
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.engine.tick_interval().as_millis() as u32
    }

    pub fn set_speed(&mut self, tick_ms: u32) -> Result<(), JsValue> {
        let speed = Speed::from_millis(tick_ms as u64).map_err(to_js)?;
        self.engine
            .update_settings(SettingsUpdate::speed(speed))
            .map_err(to_js)?;
        Ok(())
    }

    pub fn set_snake_color(&mut self, snake_id: usize, color: &str) -> Result<(), JsValue> {
        let color: SnakeColor = color.parse().map_err(to_js)?;
        let update = SettingsUpdate::snake_color(snake_id, color).map_err(to_js)?;
        self.engine.update_settings(update).map_err(to_js)?;
        Ok(())
    }

    /// Moves the food to the cell under a click, given in canvas pixels.
    /// Returns false when the click missed the board or no game is running.
    pub fn place_food_at(&mut self, pixel_x: f64, pixel_y: f64, cell_size: f64) -> Result<bool, JsValue> {
        if !self.engine.is_running() {
            return Ok(false);
        }
        let Some(position) = cell_from_pixel(pixel_x, pixel_y, cell_size) else {
            return Ok(false);
        };
        self.engine.set_food_position(position).map_err(to_js)?;
        Ok(true)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.engine.snapshot_json().map_err(to_js)
    }
}

fn elapsed(elapsed_ms: f64) -> Duration {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        Duration::from_micros((elapsed_ms * 1000.0) as u64)
    } else {
        Duration::ZERO
    }
}

/// Largest square cell that fits a `width` x `height` canvas.
pub fn fit_cell_size(width: f64, height: f64) -> f64 {
    (width / GRID_WIDTH as f64).min(height / GRID_HEIGHT as f64)
}

pub fn cell_from_pixel(pixel_x: f64, pixel_y: f64, cell_size: f64) -> Option<Position> {
    if cell_size <= 0.0 || pixel_x < 0.0 || pixel_y < 0.0 {
        return None;
    }
    let x = (pixel_x / cell_size).floor();
    let y = (pixel_y / cell_size).floor();
    if x >= GRID_WIDTH as f64 || y >= GRID_HEIGHT as f64 {
        return None;
    }
    Some(Position::new(x as i16, y as i16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_pixel() {
        assert_eq!(cell_from_pixel(0.0, 0.0, 20.0), Some(Position::new(0, 0)));
        assert_eq!(cell_from_pixel(19.9, 39.0, 20.0), Some(Position::new(0, 1)));
        assert_eq!(cell_from_pixel(799.0, 599.0, 20.0), Some(Position::new(39, 29)));
        assert_eq!(cell_from_pixel(800.0, 10.0, 20.0), None);
        assert_eq!(cell_from_pixel(-1.0, 10.0, 20.0), None);
        assert_eq!(cell_from_pixel(10.0, 10.0, 0.0), None);
    }

    #[test]
    fn test_fit_cell_size() {
        assert_eq!(fit_cell_size(800.0, 600.0), 20.0);
        assert_eq!(fit_cell_size(1200.0, 600.0), 20.0);
        assert_eq!(fit_cell_size(400.0, 900.0), 10.0);
    }

    #[test]
    fn test_elapsed_ignores_bad_input() {
        assert_eq!(elapsed(-5.0), Duration::ZERO);
        assert_eq!(elapsed(f64::NAN), Duration::ZERO);
        assert_eq!(elapsed(100.0), Duration::from_millis(100));
    }

    #[test]
    fn test_settings_and_food_through_wasm_api() {
        let mut game = WasmGame::new(11);
        assert!(game.set_speed(50).is_ok());
        assert_eq!(game.tick_interval_ms(), 50);
        assert!(game.set_snake_color(1, "#fb923c").is_ok());
        assert_eq!(game.engine.state().snake_colors[1].as_str(), "#fb923c");

        // Clicks before the start are ignored
        assert_eq!(game.place_food_at(250.0, 150.0, 20.0).ok(), Some(false));

        assert!(game.start().is_ok());
        assert_eq!(game.place_food_at(250.0, 150.0, 20.0).ok(), Some(true));
        assert_eq!(game.engine.state().food, Position::new(12, 7));
        assert_eq!(game.place_food_at(900.0, 150.0, 20.0).ok(), Some(false));
        assert!(game.snapshot_json().is_ok());
    }

    #[test]
    fn test_game_runs_without_js() {
        let mut game = WasmGame::new(7);
        game.engine.start_game().unwrap();
        assert!(game.is_running());
        for _ in 0..10 {
            game.engine.run_for(elapsed(100.0)).unwrap();
        }
        assert!(game.engine.current_tick() >= 1);
        assert_eq!(game.tick_interval_ms(), 100);
    }
}
