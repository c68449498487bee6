use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use crate::{
    EVENT_LOG_CAPACITY, GameCommand, GameEvent, GameSnapshot, GameState, MAX_CATCH_UP_TICKS,
    Position, SNAKE_COUNT, SettingsUpdate, SnakeColor, Speed,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameEventMessage {
    pub tick: u32,
    pub event: GameEvent,
}

/// An external command waiting for the next engine turn.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameCommandMessage {
    pub received_order: u32,
    pub command: GameCommand,
}

/// Owns the game state and drives it on a fixed-period clock.
///
/// External writers (UI input, settings) go through [`GameEngine::submit`]; the queue is
/// drained before each tick so a tick always computes its next state from a settled one.
pub struct GameEngine {
    state: GameState,
    event_log: VecDeque<GameEventMessage>,
    pending_commands: VecDeque<GameCommandMessage>,
    command_counter: u32,
    since_last_tick: Duration,
}

impl GameEngine {
    pub fn new(rng_seed: u64) -> Self {
        Self::new_from_state(GameState::new(rng_seed))
    }

    pub fn new_with_settings(
        rng_seed: u64,
        speed: Speed,
        snake_colors: [SnakeColor; SNAKE_COUNT],
    ) -> Self {
        Self::new_from_state(GameState::new_with_settings(rng_seed, speed, snake_colors))
    }

    pub fn new_from_state(state: GameState) -> Self {
        GameEngine {
            state,
            event_log: VecDeque::new(),
            pending_commands: VecDeque::new(),
            command_counter: 0,
            since_last_tick: Duration::ZERO,
        }
    }

    /// Queue a command; returns its position in the overall received order.
    pub fn submit(&mut self, command: GameCommand) -> u32 {
        let received_order = self.command_counter;
        self.command_counter += 1;
        self.pending_commands.push_back(GameCommandMessage {
            received_order,
            command,
        });
        received_order
    }

    pub fn pending_count(&self) -> usize {
        self.pending_commands.len()
    }

    /// True when a `Start` is queued but not yet executed.
    pub fn start_pending(&self) -> bool {
        self.pending_commands
            .iter()
            .any(|message| message.command == GameCommand::Start)
    }

    /// Execute queued commands in the order they arrived. Rejected commands are logged and
    /// dropped so one bad input cannot stall the loop.
    pub fn process_pending(&mut self) -> Vec<GameEvent> {
        let mut out = Vec::new();
        while let Some(message) = self.pending_commands.pop_front() {
            match self.exec_command(&message.command) {
                Ok(events) => out.extend(events),
                Err(e) => warn!(
                    "Rejected command #{} {:?}: {:#}",
                    message.received_order, message.command, e
                ),
            }
        }
        out
    }

    pub fn exec_command(&mut self, command: &GameCommand) -> Result<Vec<GameEvent>> {
        let events = self.state.exec_command(command)?;
        self.record(&events);
        Ok(events)
    }

    pub fn start_game(&mut self) -> Result<Vec<GameEvent>> {
        self.since_last_tick = Duration::ZERO;
        self.exec_command(&GameCommand::Start)
    }

    pub fn tick(&mut self) -> Result<Vec<GameEvent>> {
        self.exec_command(&GameCommand::Tick)
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<Vec<GameEvent>> {
        self.exec_command(&GameCommand::UpdateSettings { update })
    }

    pub fn set_food_position(&mut self, position: Position) -> Result<Vec<GameEvent>> {
        self.exec_command(&GameCommand::PlaceFood { position })
    }

    /// Advance the clock by `elapsed`, running every tick that became due.
    ///
    /// Pending commands run first. The interval is re-read per tick so a speed change applies
    /// from the next scheduled tick. After a long stall at most [`MAX_CATCH_UP_TICKS`] ticks
    /// run and the rest of the backlog is skipped.
    pub fn run_for(&mut self, elapsed: Duration) -> Result<Vec<GameEvent>> {
        let mut out = self.process_pending();

        if !self.state.is_running {
            self.since_last_tick = Duration::ZERO;
            return Ok(out);
        }

        self.since_last_tick += elapsed;
        let mut ticks_run = 0;
        while self.since_last_tick >= self.tick_interval() {
            if ticks_run == MAX_CATCH_UP_TICKS {
                debug!("Skipping {:?} of missed ticks", self.since_last_tick);
                self.since_last_tick = Duration::ZERO;
                break;
            }

            self.since_last_tick -= self.tick_interval();
            out.extend(self.tick()?);
            ticks_run += 1;

            if !self.state.is_running {
                self.since_last_tick = Duration::ZERO;
                break;
            }
        }

        Ok(out)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed.tick_ms())
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn current_tick(&self) -> u32 {
        self.state.current_tick()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&self.state)
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Most recent events, oldest first.
    pub fn event_log(&self) -> impl Iterator<Item = &GameEventMessage> {
        self.event_log.iter()
    }

    pub fn event_log_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.event_log)?)
    }

    fn record(&mut self, events: &[GameEvent]) {
        let tick = self.state.current_tick();
        for event in events {
            if self.event_log.len() == EVENT_LOG_CAPACITY {
                self.event_log.pop_front();
            }
            self.event_log.push_back(GameEventMessage {
                tick,
                event: event.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_engine() -> GameEngine {
        let mut engine = GameEngine::new(2024);
        engine.start_game().unwrap();
        engine
    }

    #[test]
    fn test_submitted_commands_run_in_order() {
        let mut engine = GameEngine::new(1);
        assert_eq!(engine.submit(GameCommand::Start), 0);
        assert_eq!(
            engine.submit(GameCommand::PlaceFood { position: Position::new(20, 20) }),
            1
        );
        assert_eq!(engine.pending_count(), 2);

        let events = engine.process_pending();
        assert_eq!(engine.pending_count(), 0);
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert_eq!(
            events.last(),
            Some(&GameEvent::FoodPlaced { position: Position::new(20, 20) })
        );
        assert_eq!(engine.state().food, Position::new(20, 20));
    }

    #[test]
    fn test_start_pending_tracks_queue() {
        let mut engine = GameEngine::new(1);
        assert!(!engine.start_pending());
        engine.submit(GameCommand::Tick);
        assert!(!engine.start_pending());
        engine.submit(GameCommand::Start);
        assert!(engine.start_pending());
        engine.process_pending();
        assert!(!engine.start_pending());
    }

    #[test]
    fn test_rejected_command_does_not_block_queue() {
        let mut engine = running_engine();
        engine.submit(GameCommand::PlaceFood { position: Position::new(-3, 0) });
        engine.submit(GameCommand::UpdateSettings { update: SettingsUpdate::speed(Speed::Fast) });

        let events = engine.process_pending();
        assert_eq!(engine.pending_count(), 0);
        assert_eq!(engine.state().speed, Speed::Fast);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::FoodPlaced { .. })));
    }

    #[test]
    fn test_run_for_ticks_on_interval() {
        let mut engine = running_engine();
        assert_eq!(engine.tick_interval(), Duration::from_millis(100));

        engine.run_for(Duration::from_millis(250)).unwrap();
        assert_eq!(engine.current_tick(), 2);

        engine.run_for(Duration::from_millis(49)).unwrap();
        assert_eq!(engine.current_tick(), 2);

        engine.run_for(Duration::from_millis(1)).unwrap();
        assert_eq!(engine.current_tick(), 3);
    }

    #[test]
    fn test_speed_change_applies_to_next_interval() {
        let mut engine = running_engine();
        engine.update_settings(SettingsUpdate::speed(Speed::Fast)).unwrap();
        engine.run_for(Duration::from_millis(100)).unwrap();
        assert_eq!(engine.current_tick(), 2);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut engine = running_engine();
        engine.run_for(Duration::from_secs(10)).unwrap();
        assert!(engine.current_tick() <= MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_stopped_engine_does_not_tick() {
        let mut engine = GameEngine::new(9);
        let events = engine.run_for(Duration::from_secs(1)).unwrap();
        assert!(events.is_empty());
        assert_eq!(engine.current_tick(), 0);
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut engine = GameEngine::new(9);
        for i in 0..(EVENT_LOG_CAPACITY * 2) {
            let speed = if i % 2 == 0 { Speed::Fast } else { Speed::Slow };
            engine.update_settings(SettingsUpdate::speed(speed)).unwrap();
        }
        assert_eq!(engine.event_log().count(), EVENT_LOG_CAPACITY);
    }

    #[test]
    fn test_snapshot_json() {
        let engine = running_engine();
        let json = engine.snapshot_json().unwrap();
        let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert!(snapshot.is_running);
        assert_eq!(snapshot, engine.snapshot());
        assert!(engine.event_log_json().unwrap().contains("Started"));
    }
}
