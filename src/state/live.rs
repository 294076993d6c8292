use log::{debug, error, warn};
use nfl_api::{GameSummary, Play};
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const CELEBRATE_FOR: Duration = Duration::from_secs(5);
pub const TURNOVER_FOR: Duration = Duration::from_secs(3);
pub const NEW_PLAY_FOR: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveInput {
    Up,
    Down,
    Toggle,
    Quit,
    /// Select and toggle the recent play at this index.
    Click(usize),
}

#[derive(Debug)]
pub enum LiveEvent {
    Tick,
    Input(LiveInput),
    SummaryLoaded { seq: u64, summary: GameSummary },
    SummaryFailed { seq: u64, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEffect {
    FetchSummary { game_id: String, seq: u64 },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Celebrate,
    Turnover,
    NewPlay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Normal,
    Celebrating,
    Sad,
}

/// View state for watching one game. Pure: all time comes in through `now`.
#[derive(Debug)]
pub struct LiveState {
    pub game_id: String,
    pub summary: Option<GameSummary>,
    pub error: Option<String>,
    pub selected: Option<usize>,
    pub expanded: Option<usize>,
    pub mascot: bool,
    next_seq: u64,
    latest_seen: u64,
    next_poll_at: Option<Instant>,
    last_play_id: Option<String>,
    last_possession: Option<String>,
    celebrate_until: Option<Instant>,
    turnover_until: Option<Instant>,
    new_play_until: Option<Instant>,
}

impl LiveState {
    pub fn new(game_id: impl Into<String>, mascot: bool) -> Self {
        Self {
            game_id: game_id.into(),
            summary: None,
            error: None,
            selected: None,
            expanded: None,
            mascot,
            next_seq: 0,
            latest_seen: 0,
            next_poll_at: None,
            last_play_id: None,
            last_possession: None,
            celebrate_until: None,
            turnover_until: None,
            new_play_until: None,
        }
    }

    /// First fetch plus the poll timer.
    pub fn init(&mut self, now: Instant) -> Vec<LiveEffect> {
        self.next_poll_at = Some(now + POLL_INTERVAL);
        vec![self.fetch()]
    }

    pub fn update(&mut self, event: LiveEvent, now: Instant) -> Vec<LiveEffect> {
        match event {
            LiveEvent::Tick => self.on_tick(now),
            LiveEvent::Input(input) => self.on_input(input),
            LiveEvent::SummaryLoaded { seq, summary } => {
                if self.accept(seq) {
                    self.on_summary(summary, now);
                }
                Vec::new()
            }
            LiveEvent::SummaryFailed { seq, message } => {
                if self.accept(seq) {
                    error!("game {} refresh failed: {message}", self.game_id);
                    self.error = Some(message);
                }
                Vec::new()
            }
        }
    }

    pub fn next_poll_at(&self) -> Option<Instant> {
        self.next_poll_at
    }

    pub fn celebrating(&self) -> bool {
        self.celebrate_until.is_some()
    }

    pub fn turnover(&self) -> bool {
        self.turnover_until.is_some()
    }

    pub fn new_play(&self) -> bool {
        self.new_play_until.is_some()
    }

    pub fn mood(&self) -> Mood {
        if self.celebrating() {
            Mood::Celebrating
        } else if self.turnover() {
            Mood::Sad
        } else {
            Mood::Normal
        }
    }

    pub fn show_victory(&self) -> bool {
        self.mascot && self.summary.as_ref().is_some_and(|s| s.game.is_final())
    }

    pub fn recent_plays(&self) -> &[Play] {
        self.summary.as_ref().map(|s| s.recent_plays.as_slice()).unwrap_or_default()
    }

    fn fetch(&mut self) -> LiveEffect {
        self.next_seq += 1;
        LiveEffect::FetchSummary { game_id: self.game_id.clone(), seq: self.next_seq }
    }

    fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.latest_seen {
            warn!("dropping stale summary response #{seq} (latest #{})", self.latest_seen);
            return false;
        }
        self.latest_seen = seq;
        true
    }

    fn on_tick(&mut self, now: Instant) -> Vec<LiveEffect> {
        for deadline in [
            &mut self.celebrate_until,
            &mut self.turnover_until,
            &mut self.new_play_until,
        ] {
            if deadline.is_some_and(|at| now >= at) {
                *deadline = None;
            }
        }

        let Some(mut due) = self.next_poll_at else {
            return Vec::new();
        };
        if now < due {
            return Vec::new();
        }
        while due <= now {
            due += POLL_INTERVAL;
        }
        self.next_poll_at = Some(due);
        vec![self.fetch()]
    }

    fn on_summary(&mut self, summary: GameSummary, now: Instant) {
        debug!(
            "game {} summary: {} {} - {} {}",
            self.game_id,
            summary.game.away_team.abbreviation,
            summary.game.away_team.score,
            summary.game.home_team.abbreviation,
            summary.game.home_team.score,
        );

        let signal = self.summary.as_ref().and_then(|prev| {
            detect_signal(
                prev,
                &summary,
                self.last_possession.as_deref(),
                self.last_play_id.as_deref(),
            )
        });
        match signal {
            Some(Signal::Celebrate) => self.celebrate_until = Some(now + CELEBRATE_FOR),
            Some(Signal::Turnover) => self.turnover_until = Some(now + TURNOVER_FOR),
            Some(Signal::NewPlay) => self.new_play_until = Some(now + NEW_PLAY_FOR),
            None => {}
        }

        if let Some(play) = &summary.current_play {
            self.last_play_id = Some(play.id.clone());
            self.last_possession = Some(play.possession.clone());
        }

        let len = summary.recent_plays.len();
        self.selected = self.selected.filter(|&i| i < len);
        self.expanded = self.expanded.filter(|&i| i < len);
        self.summary = Some(summary);
        self.error = None;
    }

    fn on_input(&mut self, input: LiveInput) -> Vec<LiveEffect> {
        let len = self.recent_plays().len();
        match input {
            LiveInput::Quit => {
                if self.expanded.take().is_none() {
                    return vec![LiveEffect::Quit];
                }
            }
            LiveInput::Up if len > 0 => {
                self.selected = Some(match self.selected {
                    Some(i) if i > 0 => i - 1,
                    _ => len - 1,
                });
            }
            LiveInput::Down if len > 0 => {
                self.selected = Some(match self.selected {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                });
            }
            LiveInput::Toggle => {
                if let Some(i) = self.selected.filter(|&i| i < len) {
                    self.toggle(i);
                }
            }
            LiveInput::Click(i) if i < len => {
                self.selected = Some(i);
                self.toggle(i);
            }
            _ => {}
        }
        Vec::new()
    }

    fn toggle(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
    }
}

/// Compare consecutive summaries. Score beats possession beats new play.
pub fn detect_signal(
    prev: &GameSummary,
    current: &GameSummary,
    last_possession: Option<&str>,
    last_play_id: Option<&str>,
) -> Option<Signal> {
    if prev.game.home_team.score != current.game.home_team.score
        || prev.game.away_team.score != current.game.away_team.score
    {
        return Some(Signal::Celebrate);
    }

    let play = current.current_play.as_ref()?;
    // An empty abbreviation means ESPN did not name the drive's team.
    if last_possession.filter(|last| !last.is_empty()).is_some_and(|last| last != play.possession) {
        return Some(Signal::Turnover);
    }
    if last_play_id != Some(play.id.as_str()) {
        return Some(Signal::NewPlay);
    }
    None
}
