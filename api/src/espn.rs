/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the functions in mapper.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // RFC 3339
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>,
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub date: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub header: Option<SummaryHeader>,
    pub drives: Option<EspnDrives>,
    pub boxscore: Option<EspnBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryHeader {
    pub id: Option<String>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnDrives {
    pub current: Option<EspnDrive>,
    pub previous: Option<Vec<EspnDrive>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnDrive {
    pub id: Option<String>,
    pub description: Option<String>,
    pub team: Option<EspnTeam>,
    pub plays: Option<Vec<EspnPlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlay {
    pub id: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub play_type: Option<EspnPlayType>,
    pub clock: Option<EspnClock>,
    pub period: Option<EspnPeriod>,
    #[serde(rename = "homeScore")]
    pub home_score: Option<u32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<u32>,
    #[serde(rename = "scoringPlay")]
    pub scoring_play: Option<bool>,
    pub start: Option<EspnPlaySpot>,
    pub end: Option<EspnPlaySpot>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlayType {
    pub id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnClock {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPeriod {
    pub number: Option<u32>,
}

/// Ball spot and down state before (`start`) or after (`end`) a play.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlaySpot {
    pub down: Option<i32>,
    pub distance: Option<i32>,
    #[serde(rename = "yardLine")]
    pub yard_line: Option<i32>,
    #[serde(rename = "yardsToEndzone")]
    pub yards_to_endzone: Option<i32>,
    #[serde(rename = "downDistanceText")]
    pub down_distance_text: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    pub teams: Option<Vec<EspnBoxscoreTeam>>,
    pub players: Option<Vec<EspnBoxscorePlayers>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscoreTeam {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnTeamStat>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamStat {
    pub name: Option<String>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscorePlayers {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatCategory>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatCategory {
    pub name: Option<String>,
    pub labels: Option<Vec<String>>,
    pub athletes: Option<Vec<EspnAthleteStats>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthleteStats {
    pub athlete: Option<EspnAthlete>,
    pub stats: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub position: Option<EspnPosition>,
}

/// Some endpoints send `"QB"`, others `{ "abbreviation": "QB", ... }`.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnPosition {
    Abbreviation(String),
    Detail { abbreviation: Option<String> },
}

impl EspnPosition {
    pub fn abbreviation(&self) -> &str {
        match self {
            EspnPosition::Abbreviation(s) => s,
            EspnPosition::Detail { abbreviation } => abbreviation.as_deref().unwrap_or_default(),
        }
    }
}
