use crate::espn::{ScoreboardResponse, SummaryResponse};
use crate::mapper::{map_replay, map_scoreboard, map_stats, map_summary};
use crate::{Game, GameReplay, GameStats, GameSummary};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_BASE_URL: &str = "https://site.api.espn.com";
const SCOREBOARD_PATH: &str = "/apis/site/v2/sports/football/nfl/scoreboard";
const SUMMARY_PATH: &str = "/apis/site/v2/sports/football/nfl/summary";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: StatusCode },
    #[error("failed to parse response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network { source, .. } if source.is_timeout())
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, ApiError::Network { source, .. } if source.is_connect())
    }
}

/// NFL client backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct NflApi {
    client: Client,
    base_url: String,
    timeout: Duration,
    max_body_bytes: usize,
}

impl Default for NflApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nfl-scores/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: MAX_RESPONSE_BYTES,
        }
    }
}

impl NflApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw scoreboard, optionally for `YYYYMMDD` or `YYYYMMDD-YYYYMMDD`.
    pub async fn fetch_scoreboard(&self, dates: Option<&str>) -> ApiResult<ScoreboardResponse> {
        let mut url = format!("{}{SCOREBOARD_PATH}", self.base_url);
        if let Some(dates) = dates.filter(|d| !d.is_empty()) {
            if !is_valid_dates(dates) {
                return Err(ApiError::InvalidInput(format!(
                    "invalid date format {dates:?}: expected YYYYMMDD or YYYYMMDD-YYYYMMDD"
                )));
            }
            url.push_str("?dates=");
            url.push_str(dates);
        }
        self.get(&url).await
    }

    /// Fetch the raw game summary (header, drives, box score) for a numeric ESPN event id.
    pub async fn fetch_summary(&self, game_id: &str) -> ApiResult<SummaryResponse> {
        if !is_valid_game_id(game_id) {
            return Err(ApiError::InvalidInput(format!(
                "invalid game id {game_id:?}: expected a numeric value"
            )));
        }
        let url = format!("{}{SUMMARY_PATH}?event={game_id}", self.base_url);
        self.get(&url).await
    }

    pub async fn fetch_games(&self, dates: Option<&str>) -> ApiResult<Vec<Game>> {
        let raw = self.fetch_scoreboard(dates).await?;
        Ok(map_scoreboard(&raw))
    }

    pub async fn fetch_game_summary(&self, game_id: &str) -> ApiResult<GameSummary> {
        let raw = self.fetch_summary(game_id).await?;
        map_summary(&raw).ok_or_else(|| self.missing_header(game_id))
    }

    /// Full play list of every completed drive. One request, same payload as the summary.
    pub async fn fetch_game_replay(&self, game_id: &str) -> ApiResult<GameReplay> {
        let raw = self.fetch_summary(game_id).await?;
        map_replay(&raw).ok_or_else(|| self.missing_header(game_id))
    }

    pub async fn fetch_game_stats(&self, game_id: &str) -> ApiResult<GameStats> {
        let raw = self.fetch_summary(game_id).await?;
        map_stats(&raw).ok_or_else(|| self.missing_header(game_id))
    }

    fn missing_header(&self, game_id: &str) -> ApiError {
        ApiError::Decode {
            url: format!("{}{SUMMARY_PATH}?event={game_id}", self.base_url),
            reason: "summary has no header competition".into(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let mut response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network { url: url.to_owned(), source: e })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus { url: url.to_owned(), status });
        }

        let limit = self.max_body_bytes;
        let too_large = |size: u64| ApiError::Decode {
            url: url.to_owned(),
            reason: format!("response body of {size} bytes exceeds the {limit} byte limit"),
        };

        if let Some(len) = response.content_length()
            && len > limit as u64
        {
            return Err(too_large(len));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ApiError::Network { url: url.to_owned(), source: e })?
        {
            if body.len() + chunk.len() > limit {
                return Err(too_large((body.len() + chunk.len()) as u64));
            }
            body.extend_from_slice(&chunk);
        }
        debug!("{url} returned {} bytes", body.len());

        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode { url: url.to_owned(), reason: e.to_string() })
    }
}

/// `YYYYMMDD` or `YYYYMMDD-YYYYMMDD`, digits only.
pub fn is_valid_dates(dates: &str) -> bool {
    let is_day = |s: &str| s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit());
    match dates.split_once('-') {
        Some((from, to)) => is_day(from) && is_day(to),
        None => is_day(dates),
    }
}

pub fn is_valid_game_id(game_id: &str) -> bool {
    !game_id.is_empty() && game_id.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn summary_body() -> String {
        json!({
            "header": {
                "id": "401671789",
                "competitions": [{
                    "date": "2024-12-01T18:00Z",
                    "status": { "type": { "state": "post", "shortDetail": "Final" } },
                    "competitors": [
                        { "homeAway": "home", "score": "21", "team": { "displayName": "New England Patriots", "abbreviation": "NE" } },
                        { "homeAway": "away", "score": "24", "team": { "displayName": "Buffalo Bills", "abbreviation": "BUF" } }
                    ]
                }]
            },
            "drives": {
                "previous": [{
                    "id": "1",
                    "team": { "abbreviation": "BUF" },
                    "plays": [{ "id": "10", "text": "Kickoff", "period": { "number": 1 } }]
                }]
            },
            "boxscore": {
                "teams": [{ "team": { "abbreviation": "NE" }, "statistics": [{ "name": "firstDowns", "displayValue": "19" }] }]
            }
        })
        .to_string()
    }

    #[test]
    fn date_validation() {
        assert!(is_valid_dates("20241201"));
        assert!(is_valid_dates("20241201-20241208"));
        assert!(!is_valid_dates("2024-12-01"));
        assert!(!is_valid_dates("202412011"));
        assert!(!is_valid_dates("2024120"));
        assert!(!is_valid_dates("20241201-"));
        assert!(!is_valid_dates("20241201-2024120a"));
        assert!(!is_valid_dates(""));
    }

    #[test]
    fn game_id_validation() {
        assert!(is_valid_game_id("401671789"));
        assert!(is_valid_game_id("7"));
        assert!(!is_valid_game_id(""));
        assert!(!is_valid_game_id("abc"));
        assert!(!is_valid_game_id("12a"));
        assert!(!is_valid_game_id("-12"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = NflApi::new().with_base_url("http://localhost:1234/");
        assert_eq!(api.base_url(), "http://localhost:1234");
    }

    #[tokio::test]
    async fn scoreboard_passes_dates_and_maps_games() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SCOREBOARD_PATH)
            .match_query(Matcher::UrlEncoded("dates".into(), "20241201-20241208".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "events": [{
                        "id": "1",
                        "status": { "type": { "state": "in", "shortDetail": "Q2 1:02" } },
                        "competitions": [{ "competitors": [
                            { "homeAway": "home", "score": "3", "team": { "abbreviation": "KC" } },
                            { "homeAway": "away", "score": "0", "team": { "abbreviation": "LV" } }
                        ]}]
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let games = api.fetch_games(Some("20241201-20241208")).await.expect("games");
        mock.assert_async().await;

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].status, GameStatus::InProgress);
        assert_eq!(games[0].home_team.score, 3);
    }

    #[tokio::test]
    async fn scoreboard_without_dates_sends_no_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SCOREBOARD_PATH)
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"events":[]}"#)
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let games = api.fetch_games(None).await.expect("games");
        mock.assert_async().await;
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn invalid_dates_fail_before_any_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let err = api.fetch_scoreboard(Some("2024-12-01")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)), "got {err:?}");

        let err = api.fetch_summary("12a").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)), "got {err:?}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_status_is_unexpected_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let err = api.fetch_summary("401671789").await.unwrap_err();
        match err {
            ApiError::UnexpectedStatus { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", SCOREBOARD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{\"events\": [")
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let err = api.fetch_scoreboard(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn oversized_body_fails_decode_instead_of_truncating() {
        let body = json!({ "events": [], "padding": "x".repeat(512) }).to_string();
        let mut server = Server::new_async().await;
        server
            .mock("GET", SCOREBOARD_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.clone())
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let err = api
            .clone()
            .with_max_body_bytes(64)
            .fetch_scoreboard(None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
        assert!(err.to_string().contains("limit"));

        // Same body fits under a roomier cap.
        let ok = api.with_max_body_bytes(body.len()).fetch_scoreboard(None).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let api = NflApi::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));
        let err = api.fetch_summary("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn replay_and_stats_come_from_a_single_summary_request_each() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::UrlEncoded("event".into(), "401671789".into()))
            .with_status(200)
            .with_body(summary_body())
            .expect(2)
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let replay = api.fetch_game_replay("401671789").await.expect("replay");
        let stats = api.fetch_game_stats("401671789").await.expect("stats");
        mock.assert_async().await;

        assert_eq!(replay.plays.len(), 1);
        assert_eq!(replay.plays[0].possession, "BUF");
        assert_eq!(replay.game.status, GameStatus::Final);
        assert_eq!(stats.home.total("firstDowns"), "19");
        assert_eq!(stats.away.team_abbr, "BUF");
    }

    #[tokio::test]
    async fn summary_without_header_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", SUMMARY_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = NflApi::new().with_base_url(server.url());
        let err = api.fetch_game_summary("5").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }), "got {err:?}");
    }
}
