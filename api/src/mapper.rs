// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

use crate::espn::{
    EspnCompetition, EspnCompetitor, EspnDrive, EspnPlay, EspnStatCategory, EspnStatus,
    ScoreboardResponse, SummaryResponse,
};
use crate::{
    Drive, Game, GameReplay, GameStats, GameStatus, GameSummary, Play, PlayerStatCategory,
    PlayerStatLine, RECENT_PLAYS_LIMIT, Team, TeamStats,
};
use chrono::{DateTime, NaiveDateTime, Utc};

/// One `Game` per event that has at least one competition, in event order.
pub fn map_scoreboard(raw: &ScoreboardResponse) -> Vec<Game> {
    raw.events
        .iter()
        .flatten()
        .filter_map(|event| {
            let competition = event.competitions.as_deref()?.first()?;
            let (home_team, away_team) = split_competitors(competition);
            Some(Game {
                id: event.id.clone().unwrap_or_default(),
                home_team,
                away_team,
                status: status_of(event.status.as_ref()),
                status_text: status_text_of(event.status.as_ref()),
                start_time: parse_start_time(event.date.as_deref()),
            })
        })
        .collect()
}

/// Live snapshot built from the current drive. `None` when the header has no competition.
pub fn map_summary(raw: &SummaryResponse) -> Option<GameSummary> {
    let game = header_game(raw)?;
    let mut summary = GameSummary { game, ..Default::default() };

    let Some(drive) = raw.drives.as_ref().and_then(|d| d.current.as_ref()) else {
        return Some(summary);
    };
    let possession = drive_team(drive);
    let plays = drive.plays.as_deref().unwrap_or_default();

    if let Some(last) = plays.last() {
        let current = map_play(last, &possession);
        summary.situation = current.down.clone();
        summary.yards_to_endzone = current.yards_to_endzone;
        summary.current_play = Some(current);
    }

    summary.recent_plays = plays
        .iter()
        .rev()
        .take(RECENT_PLAYS_LIMIT)
        .map(|p| map_play(p, &possession))
        .collect();

    Some(summary)
}

/// Every completed drive flattened into one chronological play list.
pub fn map_replay(raw: &SummaryResponse) -> Option<GameReplay> {
    let game = header_game(raw)?;
    let mut plays = Vec::new();
    let mut drives = Vec::new();

    for drive in raw.drives.iter().flat_map(|d| d.previous.iter().flatten()) {
        let team = drive_team(drive);
        let start = plays.len();
        plays.extend(
            drive
                .plays
                .iter()
                .flatten()
                .map(|p| map_play(p, &team)),
        );
        drives.push(Drive {
            id: drive.id.clone().unwrap_or_default(),
            description: drive.description.clone().unwrap_or_default(),
            team,
            plays: start..plays.len(),
        });
    }

    Some(GameReplay { game, plays, drives })
}

/// Box score split into home and away by team abbreviation.
///
/// An entry whose abbreviation is not the home team's lands on the away side,
/// including entries that match neither team.
pub fn map_stats(raw: &SummaryResponse) -> Option<GameStats> {
    let game = header_game(raw)?;
    let mut home = TeamStats {
        team_name: game.home_team.name.clone(),
        team_abbr: game.home_team.abbreviation.clone(),
        ..Default::default()
    };
    let mut away = TeamStats {
        team_name: game.away_team.name.clone(),
        team_abbr: game.away_team.abbreviation.clone(),
        ..Default::default()
    };

    let Some(boxscore) = raw.boxscore.as_ref() else {
        return Some(GameStats { game, home, away });
    };

    let home_abbr = game.home_team.abbreviation.as_str();
    let side = |abbr: Option<&str>| abbr.is_some_and(|a| a == home_abbr);

    for team_box in boxscore.teams.iter().flatten() {
        let abbr = team_box.team.as_ref().and_then(|t| t.abbreviation.as_deref());
        let target = if side(abbr) { &mut home } else { &mut away };
        for stat in team_box.statistics.iter().flatten() {
            target.totals.insert(
                stat.name.clone().unwrap_or_default(),
                stat.display_value.clone().unwrap_or_default(),
            );
        }
    }

    for player_box in boxscore.players.iter().flatten() {
        let abbr = player_box.team.as_ref().and_then(|t| t.abbreviation.as_deref());
        let target = if side(abbr) { &mut home } else { &mut away };
        target
            .player_stats
            .extend(player_box.statistics.iter().flatten().map(map_stat_category));
    }

    Some(GameStats { game, home, away })
}

/// ESPN `status.type.state` → status. Anything unknown is treated as not started.
pub fn parse_state(state: &str) -> GameStatus {
    match state {
        "in" => GameStatus::InProgress,
        "post" => GameStatus::Final,
        _ => GameStatus::Scheduled,
    }
}

fn header_game(raw: &SummaryResponse) -> Option<Game> {
    let header = raw.header.as_ref()?;
    let competition = header.competitions.as_deref()?.first()?;
    let (home_team, away_team) = split_competitors(competition);
    Some(Game {
        id: header.id.clone().unwrap_or_default(),
        home_team,
        away_team,
        status: status_of(competition.status.as_ref()),
        status_text: status_text_of(competition.status.as_ref()),
        start_time: parse_start_time(competition.date.as_deref()),
    })
}

fn split_competitors(competition: &EspnCompetition) -> (Team, Team) {
    let mut home = Team::default();
    let mut away = Team::default();
    for competitor in competition.competitors.iter().flatten() {
        let team = map_competitor(competitor);
        if competitor.home_away.as_deref() == Some("home") {
            home = team;
        } else {
            away = team;
        }
    }
    (home, away)
}

fn map_competitor(c: &EspnCompetitor) -> Team {
    let team = c.team.as_ref();
    Team {
        name: team.and_then(|t| t.display_name.clone()).unwrap_or_default(),
        abbreviation: team.and_then(|t| t.abbreviation.clone()).unwrap_or_default(),
        score: parse_score(c.score.as_deref()),
    }
}

fn parse_score(score: Option<&str>) -> u32 {
    score.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

fn status_of(status: Option<&EspnStatus>) -> GameStatus {
    status
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.state.as_deref())
        .map(parse_state)
        .unwrap_or_default()
}

fn status_text_of(status: Option<&EspnStatus>) -> String {
    status
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.short_detail.clone())
        .unwrap_or_default()
}

/// RFC 3339, plus the minute-precision form ESPN actually sends ("2024-12-01T18:00Z").
fn parse_start_time(date: Option<&str>) -> Option<DateTime<Utc>> {
    let date = date?;
    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%MZ").map(|n| n.and_utc()))
        .ok()
}

fn drive_team(drive: &EspnDrive) -> String {
    drive
        .team
        .as_ref()
        .and_then(|t| t.abbreviation.clone())
        .unwrap_or_default()
}

fn map_play(p: &EspnPlay, possession: &str) -> Play {
    let end = p.end.as_ref();
    Play {
        id: p.id.clone().unwrap_or_default(),
        text: p.text.clone().unwrap_or_default(),
        play_type: p
            .play_type
            .as_ref()
            .and_then(|t| t.text.clone())
            .unwrap_or_default(),
        clock: p
            .clock
            .as_ref()
            .and_then(|c| c.display_value.clone())
            .unwrap_or_default(),
        period: p.period.as_ref().and_then(|x| x.number).unwrap_or_default(),
        home_score: p.home_score.unwrap_or_default(),
        away_score: p.away_score.unwrap_or_default(),
        scoring_play: p.scoring_play.unwrap_or_default(),
        down: end
            .and_then(|e| e.down_distance_text.clone())
            .unwrap_or_default(),
        possession: possession.to_owned(),
        yards_to_endzone: end
            .and_then(|e| e.yards_to_endzone)
            .map(|y| y.clamp(0, 100) as u8)
            .unwrap_or(0),
    }
}

fn map_stat_category(group: &EspnStatCategory) -> PlayerStatCategory {
    PlayerStatCategory {
        name: group.name.clone().unwrap_or_default(),
        labels: group.labels.clone().unwrap_or_default(),
        players: group
            .athletes
            .iter()
            .flatten()
            .map(|a| {
                let athlete = a.athlete.as_ref();
                PlayerStatLine {
                    name: athlete.and_then(|x| x.display_name.clone()).unwrap_or_default(),
                    position: athlete
                        .and_then(|x| x.position.as_ref())
                        .map(|p| p.abbreviation().to_owned())
                        .unwrap_or_default(),
                    stats: a.stats.clone().unwrap_or_default(),
                }
            })
            .collect(),
    }
}
