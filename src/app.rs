use crate::components::mascot::FRAME_COUNT;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Screen};
use crate::state::live::{LiveEffect, LiveEvent, LiveInput, LiveState};
use crate::state::messages::NetworkRequest;
use crate::state::replay::{ReplayEffect, ReplayEvent, ReplayInput, ReplayState};
use nfl_api::{GameReplay, GameSummary};
use std::time::Instant;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, screen: Screen) -> Self {
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);
        Self { state: AppState::new(screen), settings }
    }

    pub fn live(settings: AppSettings, game_id: &str) -> Self {
        let screen = Screen::Live(LiveState::new(game_id, settings.mascot));
        Self::new(settings, screen)
    }

    pub fn replay(settings: AppSettings, game_id: &str) -> Self {
        Self::new(settings, Screen::Replay(ReplayState::new(game_id)))
    }

    /// Initial requests for the active screen.
    pub fn start(&mut self, now: Instant) -> Vec<NetworkRequest> {
        match &mut self.state.screen {
            Screen::Live(live) => {
                let effects = live.init(now);
                self.apply_live(effects)
            }
            Screen::Replay(replay) => {
                let effects = replay.init(now);
                self.apply_replay(effects)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Events routed to the active view state
    // -----------------------------------------------------------------------

    pub fn on_clock_tick(&mut self, now: Instant) -> Vec<NetworkRequest> {
        if matches!(self.state.screen, Screen::Live(_)) {
            self.on_live_event(LiveEvent::Tick, now)
        } else {
            self.on_replay_event(ReplayEvent::Tick, now)
        }
    }

    pub fn on_live_input(&mut self, input: LiveInput, now: Instant) -> Vec<NetworkRequest> {
        self.on_live_event(LiveEvent::Input(input), now)
    }

    pub fn on_replay_input(&mut self, input: ReplayInput, now: Instant) -> Vec<NetworkRequest> {
        self.on_replay_event(ReplayEvent::Input(input), now)
    }

    pub fn on_summary_loaded(&mut self, seq: u64, summary: GameSummary, now: Instant) {
        self.on_live_event(LiveEvent::SummaryLoaded { seq, summary }, now);
    }

    pub fn on_summary_failed(&mut self, seq: u64, message: String, now: Instant) {
        self.on_live_event(LiveEvent::SummaryFailed { seq, message }, now);
    }

    pub fn on_replay_loaded(&mut self, replay: GameReplay, now: Instant) {
        self.on_replay_event(ReplayEvent::Loaded(replay), now);
    }

    pub fn on_replay_failed(&mut self, message: String, now: Instant) {
        self.on_replay_event(ReplayEvent::Failed(message), now);
    }

    fn on_live_event(&mut self, event: LiveEvent, now: Instant) -> Vec<NetworkRequest> {
        let Screen::Live(live) = &mut self.state.screen else {
            return Vec::new();
        };
        let effects = live.update(event, now);
        self.apply_live(effects)
    }

    fn on_replay_event(&mut self, event: ReplayEvent, now: Instant) -> Vec<NetworkRequest> {
        let Screen::Replay(replay) = &mut self.state.screen else {
            return Vec::new();
        };
        let effects = replay.update(event, now);
        self.apply_replay(effects)
    }

    fn apply_live(&mut self, effects: Vec<LiveEffect>) -> Vec<NetworkRequest> {
        let mut requests = Vec::new();
        for effect in effects {
            match effect {
                LiveEffect::FetchSummary { game_id, seq } => {
                    requests.push(NetworkRequest::LoadSummary { game_id, seq })
                }
                LiveEffect::Quit => self.quit(),
            }
        }
        requests
    }

    fn apply_replay(&mut self, effects: Vec<ReplayEffect>) -> Vec<NetworkRequest> {
        let mut requests = Vec::new();
        for effect in effects {
            match effect {
                ReplayEffect::FetchReplay { game_id } => {
                    requests.push(NetworkRequest::LoadReplay { game_id })
                }
                ReplayEffect::Quit => self.quit(),
            }
        }
        requests
    }

    // -----------------------------------------------------------------------
    // Global toggles
    // -----------------------------------------------------------------------

    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn advance_animation(&mut self) {
        self.state.animation.advance(FRAME_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_start_requests_first_summary() {
        let mut app = App::live(AppSettings::default(), "401");
        let requests = app.start(Instant::now());
        assert!(matches!(
            requests.as_slice(),
            [NetworkRequest::LoadSummary { game_id, seq: 1 }] if game_id == "401"
        ));
    }

    #[test]
    fn replay_start_requests_replay() {
        let mut app = App::replay(AppSettings::default(), "402");
        let requests = app.start(Instant::now());
        assert!(matches!(
            requests.as_slice(),
            [NetworkRequest::LoadReplay { game_id }] if game_id == "402"
        ));
    }

    #[test]
    fn quit_effect_sets_flag() {
        let mut app = App::replay(AppSettings::default(), "402");
        assert!(!app.should_quit());
        app.on_replay_input(ReplayInput::Quit, Instant::now());
        assert!(app.should_quit());
    }

    #[test]
    fn events_for_other_screen_are_ignored() {
        let mut app = App::replay(AppSettings::default(), "402");
        app.on_summary_failed(1, "nope".into(), Instant::now());
        assert_eq!(app.state.screen.error(), None);
        assert!(app.on_live_input(LiveInput::Quit, Instant::now()).is_empty());
        assert!(!app.should_quit());
    }

    #[test]
    fn clock_tick_polls_live_game_when_due() {
        let t0 = Instant::now();
        let mut app = App::live(AppSettings::default(), "401");
        app.start(t0);
        assert!(app.on_clock_tick(t0).is_empty());
        let requests = app.on_clock_tick(t0 + crate::state::live::POLL_INTERVAL);
        assert!(matches!(requests.as_slice(), [NetworkRequest::LoadSummary { seq: 2, .. }]));
    }
}
