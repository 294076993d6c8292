use crate::state::network::LoadingState;
use crossterm::event::{KeyEvent, MouseEvent};
use nfl_api::{GameReplay, GameSummary};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSummary { game_id: String, seq: u64 },
    LoadReplay { game_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SummaryLoaded { seq: u64, summary: GameSummary },
    SummaryFailed { seq: u64, message: String },
    ReplayLoaded { replay: GameReplay },
    ReplayFailed { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    AppStarted,
    AnimationTick,
    /// Drives poll and auto-advance deadlines.
    ClockTick,
}
