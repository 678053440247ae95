//! Score and end-of-game text overlay
//!
//! The text itself is drawn by the page (DOM elements over the canvas); this
//! module decides what the overlay should say.

use crate::sim::GameState;

/// Label shown before the score
pub const SCORE_LABEL: &str = "分數";
/// Centered message once the game ends
pub const GAME_OVER_MESSAGE: &str = "教育科技讚!";

/// Score text style (top-right, yellow)
pub const SCORE_FONT_PX: u32 = 32;
pub const SCORE_COLOR: &str = "rgb(255, 255, 0)";
/// Margin from the top-right corner in pixels
pub const SCORE_MARGIN_PX: u32 = 20;

/// End message style (centered, white)
pub const GAME_OVER_FONT_PX: u32 = 64;
pub const GAME_OVER_COLOR: &str = "rgb(255, 255, 255)";

/// What the overlay shows this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    /// Present only after the game has ended
    pub game_over: Option<&'static str>,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("{}: {}", SCORE_LABEL, state.score.score()),
            game_over: state.is_game_over().then_some(GAME_OVER_MESSAGE),
        }
    }

    /// Stars are hidden behind the end message
    pub fn shows_stars(&self) -> bool {
        self.game_over.is_none()
    }
}
