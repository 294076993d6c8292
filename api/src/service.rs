use crate::client::{ApiResult, NflApi};
use crate::{Game, GameReplay, GameStats, GameSummary};

/// Thin facade over [`NflApi`] for the screens: mapped domain data only.
#[derive(Debug, Clone, Default)]
pub struct ScoreService {
    api: NflApi,
}

impl ScoreService {
    pub fn new(api: NflApi) -> Self {
        Self { api }
    }

    pub async fn get_scores(&self, dates: Option<&str>) -> ApiResult<Vec<Game>> {
        self.api.fetch_games(dates).await
    }

    pub async fn get_live_games(&self, dates: Option<&str>) -> ApiResult<Vec<Game>> {
        Ok(live_only(self.get_scores(dates).await?))
    }

    pub async fn get_completed_games(&self, dates: Option<&str>) -> ApiResult<Vec<Game>> {
        Ok(final_only(self.get_scores(dates).await?))
    }

    pub async fn get_game_summary(&self, game_id: &str) -> ApiResult<GameSummary> {
        self.api.fetch_game_summary(game_id).await
    }

    pub async fn get_game_replay(&self, game_id: &str) -> ApiResult<GameReplay> {
        self.api.fetch_game_replay(game_id).await
    }

    pub async fn get_game_stats(&self, game_id: &str) -> ApiResult<GameStats> {
        self.api.fetch_game_stats(game_id).await
    }
}

pub fn live_only(games: Vec<Game>) -> Vec<Game> {
    games.into_iter().filter(Game::is_live).collect()
}

pub fn final_only(games: Vec<Game>) -> Vec<Game> {
    games.into_iter().filter(Game::is_final).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn game(id: &str, status: GameStatus) -> Game {
        Game { id: id.into(), status, ..Default::default() }
    }

    #[test]
    fn filters_keep_order() {
        let games = vec![
            game("1", GameStatus::Final),
            game("2", GameStatus::InProgress),
            game("3", GameStatus::Scheduled),
            game("4", GameStatus::InProgress),
        ];
        let live: Vec<_> = live_only(games.clone()).into_iter().map(|g| g.id).collect();
        assert_eq!(live, ["2", "4"]);
        let done: Vec<_> = final_only(games).into_iter().map(|g| g.id).collect();
        assert_eq!(done, ["1"]);
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        assert!(live_only(vec![game("1", GameStatus::Scheduled)]).is_empty());
        assert!(final_only(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn live_games_filters_scoreboard() {
        let event = |id: &str, state: &str| {
            json!({
                "id": id,
                "status": { "type": { "state": state } },
                "competitions": [{ "competitors": [
                    { "homeAway": "home", "team": { "abbreviation": "DAL" } },
                    { "homeAway": "away", "team": { "abbreviation": "NYG" } }
                ]}]
            })
        };
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/apis/site/v2/sports/football/nfl/scoreboard")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({ "events": [event("1", "post"), event("2", "in"), event("3", "pre")] })
                    .to_string(),
            )
            .expect(2)
            .create_async()
            .await;

        let service = ScoreService::new(NflApi::new().with_base_url(server.url()));
        let live = service.get_live_games(None).await.expect("live");
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, "2");

        let done = service.get_completed_games(None).await.expect("completed");
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "1");
    }
}
