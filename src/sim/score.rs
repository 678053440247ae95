//! Time-based score clock
//!
//! One point per elapsed interval while playing; the game ends when the
//! score reaches the cap.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_CAP, SCORE_INTERVAL_MS};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stars spawn and fall, score accrues
    #[default]
    Playing,
    /// Terminal: spawning and falling are frozen
    GameOver,
}

/// Transition reported by [`ScoreClock::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A point was awarded; carries the new score
    ScoreTick(u8),
    /// The final point was awarded and the game ended
    GameOver { score: u8 },
}

/// Score and phase driven by an external millisecond clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreClock {
    score: u8,
    phase: GamePhase,
    /// Timestamp the current interval started at (ms)
    last_score_ms: f64,
    interval_ms: f64,
    cap: u8,
}

impl ScoreClock {
    /// Start the clock at `start_ms` with the standard interval and cap
    pub fn new(start_ms: f64) -> Self {
        Self::with_rules(start_ms, SCORE_INTERVAL_MS, SCORE_CAP)
    }

    pub fn with_rules(start_ms: f64, interval_ms: f64, cap: u8) -> Self {
        Self {
            score: 0,
            phase: if cap == 0 {
                GamePhase::GameOver
            } else {
                GamePhase::Playing
            },
            last_score_ms: start_ms,
            interval_ms,
            cap,
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn last_score_ms(&self) -> f64 {
        self.last_score_ms
    }

    /// Advance the clock to `now_ms`.
    ///
    /// Awards at most one point per call and restarts the interval at
    /// `now_ms`. A clock running backwards never scores.
    pub fn update(&mut self, now_ms: f64) -> Option<GameEvent> {
        if self.phase == GamePhase::GameOver {
            return None;
        }

        let elapsed = (now_ms - self.last_score_ms).max(0.0);
        if elapsed < self.interval_ms {
            return None;
        }

        self.score = (self.score + 1).min(self.cap);
        self.last_score_ms = now_ms;

        if self.score >= self.cap {
            self.phase = GamePhase::GameOver;
            Some(GameEvent::GameOver { score: self.score })
        } else {
            Some(GameEvent::ScoreTick(self.score))
        }
    }
}
