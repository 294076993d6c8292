use crate::state::live::LiveState;
use crate::state::replay::ReplayState;

// ---------------------------------------------------------------------------
// Mascot animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index, wraps at the frame count passed to `advance`.
    pub frame: usize,
    /// Monotonic tick counter.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count.max(1);
    }
}

// ---------------------------------------------------------------------------
// Active screen
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Screen {
    Live(LiveState),
    Replay(ReplayState),
}

impl Screen {
    pub fn game_id(&self) -> &str {
        match self {
            Screen::Live(live) => &live.game_id,
            Screen::Replay(replay) => &replay.game_id,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Screen::Live(live) => live.error.as_deref(),
            Screen::Replay(replay) => replay.error.as_deref(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub animation: AnimationState,
    pub show_logs: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            animation: AnimationState::default(),
            show_logs: false,
            should_quit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_wraps_frames() {
        let mut animation = AnimationState::default();
        for _ in 0..5 {
            animation.advance(4);
        }
        assert_eq!(animation.frame, 1);
        assert_eq!(animation.tick, 5);
    }
}
