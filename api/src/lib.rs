pub mod client;
pub mod espn;
pub mod mapper;
pub mod service;

pub use client::{ApiError, ApiResult, NflApi};
pub use service::ScoreService;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub status: GameStatus,
    pub status_text: String, // "Q3 4:12", "Final/OT", "Sun 1:00 PM"
    pub start_time: Option<DateTime<Utc>>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// The API's short status text, or the status name when ESPN sent none.
    pub fn status_label(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            self.status_text.clone()
        }
    }

    /// Team currently ahead, away team on a tie.
    pub fn leader(&self) -> &Team {
        if self.home_team.score > self.away_team.score {
            &self.home_team
        } else {
            &self.away_team
        }
    }

    pub fn trailer(&self) -> &Team {
        if self.home_team.score > self.away_team.score {
            &self.away_team
        } else {
            &self.home_team
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub name: String,         // "Buffalo Bills"
    pub abbreviation: String, // "BUF"
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::InProgress => "In Progress",
            GameStatus::Final => "Final",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Play {
    pub id: String,
    pub text: String,
    pub play_type: String,
    pub clock: String,
    pub period: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub scoring_play: bool,
    pub down: String,       // "3rd & 7 at NE 42"
    pub possession: String, // team abbreviation
    /// 0..=100, where 0 means ESPN did not report a spot.
    pub yards_to_endzone: u8,
}

impl Play {
    pub fn field_position(&self) -> u8 {
        field_position(self.yards_to_endzone)
    }
}

/// Yards-to-endzone for display; an unset spot (0) is drawn at midfield.
pub fn field_position(yards_to_endzone: u8) -> u8 {
    if yards_to_endzone == 0 { 50 } else { yards_to_endzone.min(100) }
}

/// Live snapshot of a game: the latest play of the current drive plus context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSummary {
    pub game: Game,
    pub current_play: Option<Play>,
    /// Newest first, at most [`RECENT_PLAYS_LIMIT`] entries.
    pub recent_plays: Vec<Play>,
    pub situation: String,
    pub yards_to_endzone: u8,
}

pub const RECENT_PLAYS_LIMIT: usize = 5;

impl GameSummary {
    pub fn possession(&self) -> Option<&str> {
        self.current_play.as_ref().map(|p| p.possession.as_str())
    }
}

/// Every completed drive of a game, flattened for scrubbing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameReplay {
    pub game: Game,
    /// Chronological, oldest first.
    pub plays: Vec<Play>,
    pub drives: Vec<Drive>,
}

impl GameReplay {
    pub fn drive_at(&self, play_index: usize) -> Option<&Drive> {
        self.drives.iter().find(|d| d.plays.contains(&play_index))
    }

    pub fn last_index(&self) -> Option<usize> {
        self.plays.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drive {
    pub id: String,
    pub description: String, // "8 plays, 75 yards, 4:21"
    pub team: String,
    /// Half-open range into `GameReplay::plays`. Empty drives have `start == end`.
    pub plays: Range<usize>,
}

impl Drive {
    pub fn start_index(&self) -> usize {
        self.plays.start
    }

    /// Inclusive index of the drive's last play, `None` for an empty drive.
    pub fn end_index(&self) -> Option<usize> {
        if self.plays.is_empty() { None } else { Some(self.plays.end - 1) }
    }
}

/// Box score for both teams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    pub game: Game,
    pub home: TeamStats,
    pub away: TeamStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub team_name: String,
    pub team_abbr: String,
    /// Stat name → display value, e.g. "totalYards" → "350".
    pub totals: HashMap<String, String>,
    pub player_stats: Vec<PlayerStatCategory>,
}

impl TeamStats {
    pub fn total(&self, key: &str) -> &str {
        self.totals.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn category(&self, name: &str) -> Option<&PlayerStatCategory> {
        self.player_stats.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatCategory {
    pub name: String, // "passing", "rushing", "receiving", ...
    pub labels: Vec<String>,
    pub players: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStatLine {
    pub name: String,
    pub position: String,
    /// Aligned with the category's `labels`.
    pub stats: Vec<String>,
}
