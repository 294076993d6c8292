use clap::Parser;
use log::LevelFilter;
use nfl_api::client::ESPN_BASE_URL;

/// NFL scores, live play-by-play and game replays in your terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "nfl-scores", version, about)]
pub struct Cli {
    /// Disable colors and decorations
    #[arg(long)]
    pub plain: bool,

    /// Watch a live game with play-by-play updates
    #[arg(long, conflicts_with_all = ["replay", "stats"])]
    pub watch: bool,

    /// Step through a completed game play by play
    #[arg(long, conflicts_with = "stats")]
    pub replay: bool,

    /// Print the box score of a game
    #[arg(long)]
    pub stats: bool,

    /// ESPN event id; skips the interactive game selection
    #[arg(long, value_name = "ID")]
    pub game: Option<String>,

    /// Date filter: YYYYMMDD or YYYYMMDD-YYYYMMDD
    #[arg(long, value_name = "RANGE")]
    pub dates: Option<String>,

    /// Show the mascot in the live view
    #[arg(long)]
    pub mascot: bool,

    /// ESPN site API base URL
    #[arg(long, env = "NFL_SCORES_API_URL", default_value = ESPN_BASE_URL)]
    pub api_url: String,

    /// Log level for the in-app log pane (off, error, warn, info, debug, trace)
    #[arg(long, env = "NFL_SCORES_LOG", default_value = "error", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Scoreboard,
    Watch,
    Replay,
    Stats,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.watch {
            Mode::Watch
        } else if self.replay {
            Mode::Replay
        } else if self.stats {
            Mode::Stats
        } else {
            Mode::Scoreboard
        }
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level {s:?}: expected off, error, warn, info, debug or trace"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_scoreboard() {
        let cli = Cli::try_parse_from(["nfl-scores"]).unwrap();
        assert_eq!(cli.mode(), Mode::Scoreboard);
        assert!(!cli.plain);
        assert!(cli.game.is_none());
    }

    #[test]
    fn watch_with_game_and_mascot() {
        let cli = Cli::try_parse_from(["nfl-scores", "--watch", "--game", "401671789", "--mascot"])
            .unwrap();
        assert_eq!(cli.mode(), Mode::Watch);
        assert_eq!(cli.game.as_deref(), Some("401671789"));
        assert!(cli.mascot);
    }

    #[test]
    fn modes_are_exclusive() {
        assert!(Cli::try_parse_from(["nfl-scores", "--watch", "--replay"]).is_err());
        assert!(Cli::try_parse_from(["nfl-scores", "--replay", "--stats"]).is_err());
    }

    #[test]
    fn log_level_is_parsed() {
        let cli = Cli::try_parse_from(["nfl-scores", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert!(Cli::try_parse_from(["nfl-scores", "--log-level", "loud"]).is_err());
    }
}
