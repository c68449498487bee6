use anyhow::Result;
use common::{GameCommand, GameEngine, GameEvent, Position, SettingsUpdate};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use std::time::Duration;
use tracing::{debug, info};

use crate::views::{BoardViewState, OptionsPanelState, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    StartGame,
    OpenOptions,
    CloseOptions,
    UpdateSettings(SettingsUpdate),
    PlaceFood(Position),
}

pub enum AppState {
    Board,
    Options(Box<OptionsPanelState>),
}

pub struct App {
    pub state: AppState,
    pub board: BoardViewState,
    pub engine: GameEngine,
}

impl App {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            state: AppState::Board,
            board: BoardViewState::default(),
            engine,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.state {
            AppState::Board => self.board.handle_input(key),
            AppState::Options(options) => options.handle_input(key),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<AppCommand> {
        match &mut self.state {
            AppState::Board => self.board.handle_mouse(mouse),
            AppState::Options(_) => None,
        }
    }

    /// Advance the game clock; ticks and queued commands run inside the engine.
    pub fn update(&mut self, dt: Duration) -> Result<()> {
        for event in self.engine.run_for(dt)? {
            match event {
                GameEvent::GameOver { cause } => {
                    let snapshot = self.engine.snapshot();
                    info!(
                        tick = snapshot.tick,
                        scores = ?snapshot.scores(),
                        "Game over: {}",
                        cause
                    );
                }
                GameEvent::FoodEaten { snake_id, position } => {
                    debug!(snake_id, ?position, "Food eaten");
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let snapshot = self.engine.snapshot();
        self.board.render(frame, &snapshot);
        if let AppState::Options(options) = &self.state {
            options.render(frame, &snapshot);
        }
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::StartGame => {
                if self.engine.is_running() || self.engine.start_pending() {
                    debug!("Start ignored, a game is already running or starting");
                } else {
                    self.engine.submit(GameCommand::Start);
                }
            }
            AppCommand::OpenOptions => {
                let state = self.engine.state();
                let options = OptionsPanelState::new(state.speed, state.snake_colors.clone());
                self.state = AppState::Options(Box::new(options));
            }
            AppCommand::CloseOptions => {
                self.state = AppState::Board;
            }
            AppCommand::UpdateSettings(update) => {
                self.engine.submit(GameCommand::UpdateSettings { update });
            }
            AppCommand::PlaceFood(position) => {
                self.engine.submit(GameCommand::PlaceFood { position });
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}
