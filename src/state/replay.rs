use log::{debug, error};
use nfl_api::{Drive, GameReplay, Play};
use std::time::{Duration, Instant};

pub const MIN_SPEED: u64 = 1;
pub const MAX_SPEED: u64 = 5;
pub const DEFAULT_SPEED: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayInput {
    Next,
    Prev,
    First,
    Last,
    ToggleAuto,
    /// Shorter delay between plays.
    Faster,
    Slower,
    Quit,
}

#[derive(Debug)]
pub enum ReplayEvent {
    Tick,
    Input(ReplayInput),
    Loaded(GameReplay),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEffect {
    FetchReplay { game_id: String },
    Quit,
}

#[derive(Debug)]
pub struct ReplayState {
    pub game_id: String,
    pub replay: Option<GameReplay>,
    pub error: Option<String>,
    pub play_index: usize,
    /// Seconds between auto-advanced plays.
    pub speed: u64,
    next_advance_at: Option<Instant>,
}

impl ReplayState {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            replay: None,
            error: None,
            play_index: 0,
            speed: DEFAULT_SPEED,
            next_advance_at: None,
        }
    }

    pub fn init(&mut self, _now: Instant) -> Vec<ReplayEffect> {
        vec![ReplayEffect::FetchReplay { game_id: self.game_id.clone() }]
    }

    pub fn update(&mut self, event: ReplayEvent, now: Instant) -> Vec<ReplayEffect> {
        match event {
            ReplayEvent::Tick => self.on_tick(now),
            ReplayEvent::Input(ReplayInput::Quit) => return vec![ReplayEffect::Quit],
            ReplayEvent::Input(input) => self.on_input(input, now),
            ReplayEvent::Loaded(replay) => {
                debug!("replay for {} loaded: {} plays", self.game_id, replay.plays.len());
                self.replay = Some(replay);
                self.play_index = 0;
                self.error = None;
            }
            ReplayEvent::Failed(message) => {
                error!("replay for {} failed: {message}", self.game_id);
                self.error = Some(message);
            }
        }
        Vec::new()
    }

    pub fn auto_advance(&self) -> bool {
        self.next_advance_at.is_some()
    }

    pub fn next_advance_at(&self) -> Option<Instant> {
        self.next_advance_at
    }

    pub fn play_count(&self) -> usize {
        self.replay.as_ref().map_or(0, |r| r.plays.len())
    }

    pub fn current_play(&self) -> Option<&Play> {
        self.replay.as_ref()?.plays.get(self.play_index)
    }

    pub fn current_drive(&self) -> Option<&Drive> {
        self.replay.as_ref()?.drive_at(self.play_index)
    }

    /// `(position, total)` with a 1-based position.
    pub fn progress(&self) -> (usize, usize) {
        let len = self.play_count();
        if len == 0 { (0, 0) } else { (self.play_index + 1, len) }
    }

    fn last_index(&self) -> usize {
        self.play_count().saturating_sub(1)
    }

    fn delay(&self) -> Duration {
        Duration::from_secs(self.speed)
    }

    fn on_input(&mut self, input: ReplayInput, now: Instant) {
        let last = self.last_index();
        match input {
            ReplayInput::Next => self.play_index = (self.play_index + 1).min(last),
            ReplayInput::Prev => self.play_index = self.play_index.saturating_sub(1),
            ReplayInput::First => self.play_index = 0,
            ReplayInput::Last => self.play_index = last,
            ReplayInput::ToggleAuto => {
                self.next_advance_at = match self.next_advance_at {
                    Some(_) => None,
                    None => Some(now + self.delay()),
                };
            }
            ReplayInput::Faster => self.speed = self.speed.saturating_sub(1).max(MIN_SPEED),
            ReplayInput::Slower => self.speed = (self.speed + 1).min(MAX_SPEED),
            ReplayInput::Quit => {}
        }
    }

    fn on_tick(&mut self, now: Instant) {
        let Some(due) = self.next_advance_at else {
            return;
        };
        if now < due {
            return;
        }
        let last = self.last_index();
        self.play_index = (self.play_index + 1).min(last);
        self.next_advance_at = if self.play_index >= last { None } else { Some(due + self.delay()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(len: usize) -> ReplayState {
        let mut state = ReplayState::new("401");
        let replay = GameReplay {
            plays: (0..len).map(|i| Play { id: i.to_string(), ..Default::default() }).collect(),
            drives: vec![
                Drive { id: "a".into(), plays: 0..3, ..Default::default() },
                Drive { id: "b".into(), plays: 3..len, ..Default::default() },
            ],
            ..Default::default()
        };
        state.update(ReplayEvent::Loaded(replay), Instant::now());
        state
    }

    fn press(state: &mut ReplayState, input: ReplayInput, now: Instant) {
        state.update(ReplayEvent::Input(input), now);
    }

    #[test]
    fn init_requests_replay_once() {
        let mut state = ReplayState::new("401");
        assert_eq!(
            state.init(Instant::now()),
            vec![ReplayEffect::FetchReplay { game_id: "401".into() }]
        );
        assert!(state.replay.is_none());
        assert!(state.update(ReplayEvent::Tick, Instant::now()).is_empty());
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let now = Instant::now();
        let mut state = loaded(10);
        press(&mut state, ReplayInput::Prev, now);
        assert_eq!(state.play_index, 0);

        press(&mut state, ReplayInput::Last, now);
        assert_eq!(state.play_index, 9);
        press(&mut state, ReplayInput::Next, now);
        assert_eq!(state.play_index, 9);

        press(&mut state, ReplayInput::First, now);
        assert_eq!(state.play_index, 0);
        press(&mut state, ReplayInput::Next, now);
        assert_eq!(state.play_index, 1);
        assert_eq!(state.progress(), (2, 10));
    }

    #[test]
    fn navigation_before_load_stays_at_zero() {
        let now = Instant::now();
        let mut state = ReplayState::new("401");
        press(&mut state, ReplayInput::Next, now);
        press(&mut state, ReplayInput::Last, now);
        assert_eq!(state.play_index, 0);
        assert_eq!(state.progress(), (0, 0));
        assert!(state.current_play().is_none());
    }

    #[test]
    fn speed_stays_in_range() {
        let now = Instant::now();
        let mut state = loaded(4);
        assert_eq!(state.speed, DEFAULT_SPEED);
        for _ in 0..10 {
            press(&mut state, ReplayInput::Faster, now);
        }
        assert_eq!(state.speed, MIN_SPEED);
        for _ in 0..10 {
            press(&mut state, ReplayInput::Slower, now);
        }
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn auto_advance_steps_on_schedule_and_stops_at_end() {
        let t0 = Instant::now();
        let mut state = loaded(4);
        press(&mut state, ReplayInput::ToggleAuto, t0);
        assert_eq!(state.next_advance_at(), Some(t0 + Duration::from_secs(2)));

        state.update(ReplayEvent::Tick, t0 + Duration::from_secs(1));
        assert_eq!(state.play_index, 0);

        state.update(ReplayEvent::Tick, t0 + Duration::from_millis(2_100));
        assert_eq!(state.play_index, 1);
        assert_eq!(state.next_advance_at(), Some(t0 + Duration::from_secs(4)));

        // Speed change applies from the next reschedule on.
        press(&mut state, ReplayInput::Faster, t0);
        assert_eq!(state.next_advance_at(), Some(t0 + Duration::from_secs(4)));
        state.update(ReplayEvent::Tick, t0 + Duration::from_secs(4));
        assert_eq!(state.play_index, 2);
        assert_eq!(state.next_advance_at(), Some(t0 + Duration::from_secs(5)));

        state.update(ReplayEvent::Tick, t0 + Duration::from_secs(5));
        assert_eq!(state.play_index, 3);
        assert!(!state.auto_advance());
    }

    #[test]
    fn auto_advance_at_last_play_turns_off_on_next_tick() {
        let t0 = Instant::now();
        let mut state = loaded(4);
        press(&mut state, ReplayInput::Last, t0);
        press(&mut state, ReplayInput::ToggleAuto, t0);
        assert!(state.auto_advance());
        state.update(ReplayEvent::Tick, t0 + Duration::from_secs(2));
        assert_eq!(state.play_index, 3);
        assert!(!state.auto_advance());
    }

    #[test]
    fn toggling_auto_off_cancels_deadline() {
        let t0 = Instant::now();
        let mut state = loaded(4);
        press(&mut state, ReplayInput::ToggleAuto, t0);
        press(&mut state, ReplayInput::ToggleAuto, t0);
        assert!(!state.auto_advance());
        state.update(ReplayEvent::Tick, t0 + Duration::from_secs(10));
        assert_eq!(state.play_index, 0);
    }

    #[test]
    fn current_drive_follows_cursor() {
        let now = Instant::now();
        let mut state = loaded(5);
        assert_eq!(state.current_drive().map(|d| d.id.as_str()), Some("a"));
        press(&mut state, ReplayInput::Last, now);
        assert_eq!(state.current_drive().map(|d| d.id.as_str()), Some("b"));
    }

    #[test]
    fn failure_is_sticky_and_quit_is_effect() {
        let now = Instant::now();
        let mut state = ReplayState::new("401");
        state.update(ReplayEvent::Failed("boom".into()), now);
        state.update(ReplayEvent::Tick, now);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(
            state.update(ReplayEvent::Input(ReplayInput::Quit), now),
            vec![ReplayEffect::Quit]
        );
    }
}
