use chrono::{DateTime, Utc};
use common::{GameEngine, GameOverCause, SNAKE_COUNT, SNAKE_NAMES};
use serde::Serialize;
use std::fmt;

/// Outcome of one duel, printed as a JSON line with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct DuelReport {
    pub game: usize,
    pub seed: u64,
    pub ticks: u32,
    pub scores: Vec<u32>,
    pub lengths: Vec<usize>,
    /// Name of the snake with the strictly highest score
    pub leader: Option<String>,
    pub cause: Option<GameOverCause>,
    /// True when the tick limit stopped a game that was still going
    pub truncated: bool,
    pub finished_at: DateTime<Utc>,
}

impl DuelReport {
    pub fn from_engine(game: usize, seed: u64, engine: &GameEngine) -> Self {
        let snapshot = engine.snapshot();
        let leader = snapshot
            .leader()
            .and_then(|id| SNAKE_NAMES.get(id))
            .map(|name| name.to_string());

        DuelReport {
            game,
            seed,
            ticks: snapshot.tick,
            scores: snapshot.scores(),
            lengths: snapshot.snakes.iter().map(|snake| snake.body.len()).collect(),
            leader,
            cause: snapshot.game_over,
            truncated: snapshot.is_running,
            finished_at: Utc::now(),
        }
    }
}

impl fmt::Display for DuelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game {:>3} seed {:<20} ticks {:>5}  ", self.game, self.seed, self.ticks)?;
        for (name, score) in SNAKE_NAMES.iter().zip(&self.scores) {
            write!(f, "{} {:>3}  ", name, score)?;
        }
        match (&self.cause, self.truncated) {
            (Some(cause), _) => write!(f, "{}", cause),
            (None, true) => write!(f, "tick limit reached"),
            (None, false) => write!(f, "not started"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub wins: [usize; SNAKE_COUNT],
    pub ties: usize,
    pub truncated: usize,
    pub total_ticks: u64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[DuelReport]) -> Self {
        let mut summary = BatchSummary::default();
        for report in reports {
            summary.games += 1;
            summary.total_ticks += report.ticks as u64;
            if report.truncated {
                summary.truncated += 1;
            }
            match report
                .leader
                .as_deref()
                .and_then(|name| SNAKE_NAMES.iter().position(|n| *n == name))
            {
                Some(id) => summary.wins[id] += 1,
                None => summary.ties += 1,
            }
        }
        summary
    }

    pub fn average_ticks(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_ticks as f64 / self.games as f64
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} game(s): ", self.games)?;
        for (name, wins) in SNAKE_NAMES.iter().zip(&self.wins) {
            write!(f, "{} {} win(s), ", name, wins)?;
        }
        write!(
            f,
            "{} tie(s), {} hit the tick limit, {:.1} ticks on average",
            self.ties,
            self.truncated,
            self.average_ticks()
        )
    }
}
