use crate::components::theme::{Palette, Theme, resolve};
use chrono::Local;
use crossterm::style::{Attribute, Color as AnsiColor, ContentStyle, Stylize};
use nfl_api::{ApiError, Game, GameStats, GameStatus, TeamStats};
use tui::style::{Color, Modifier, Style};

const TEAM_WIDTH: usize = 18;
const STATUS_WIDTH: usize = 12;
const PLAYER_WIDTH: usize = 18;
const STAT_WIDTH: usize = 7;

const TEAM_TOTALS: [(&str, &str); 7] = [
    ("totalYards", "Total Yards"),
    ("netPassingYards", "Passing Yards"),
    ("rushingYards", "Rushing Yards"),
    ("firstDowns", "First Downs"),
    ("thirdDownEff", "3rd Down Eff"),
    ("turnovers", "Turnovers"),
    ("possession", "Time of Poss"),
];

const PLAYER_CATEGORIES: [&str; 3] = ["passing", "rushing", "receiving"];

/// Renders print-mode output (scoreboard, box score, selection lists).
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    width: usize,
    theme: Theme,
}

impl Formatter {
    pub fn new(width: usize, theme: Theme) -> Self {
        let width = if width == 0 { 80 } else { width };
        Self { width, theme }
    }

    pub fn scoreboard(&self, games: &[Game]) -> String {
        if games.is_empty() {
            return self.paint("No NFL games are currently scheduled.", Palette::Muted);
        }

        let mut out = String::new();
        out.push_str(&self.banner("NFL SCORES"));
        out.push('\n');
        for game in games {
            out.push_str(&format!(
                "  {} {}  {}  {} {}  {}\n",
                self.paint(&pad_right(&truncate(&game.away_team.name, TEAM_WIDTH), TEAM_WIDTH), Palette::Team),
                self.paint(&format!("{:>3}", game.away_team.score), Palette::Score),
                self.paint("@", Palette::Muted),
                self.paint(&pad_right(&truncate(&game.home_team.name, TEAM_WIDTH), TEAM_WIDTH), Palette::Team),
                self.paint(&format!("{:>3}", game.home_team.score), Palette::Score),
                self.status(game),
            ));
        }
        out.push('\n');
        out.push_str(&self.rule());
        out.push('\n');
        out
    }

    /// Numbered list for the interactive game prompt, 1-based.
    pub fn game_list(&self, title: &str, games: &[Game]) -> String {
        let mut out = format!("{}\n\n", self.paint(title, Palette::Title));
        for (i, game) in games.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {} {} @ {} {}  {}\n",
                i + 1,
                game.away_team.abbreviation,
                game.away_team.score,
                game.home_team.abbreviation,
                game.home_team.score,
                self.status(game),
            ));
        }
        out
    }

    pub fn stats(&self, stats: &GameStats) -> String {
        let game = &stats.game;
        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.rule());
        out.push_str(&format!(
            "\n  {} {}  @  {} {}  -  {}\n",
            self.paint(&game.away_team.abbreviation, Palette::Score),
            self.paint(&game.away_team.score.to_string(), Palette::Score),
            self.paint(&game.home_team.abbreviation, Palette::Score),
            self.paint(&game.home_team.score.to_string(), Palette::Score),
            self.paint(&game.status_label(), Palette::Muted),
        ));
        out.push_str(&self.rule());
        out.push_str("\n\n");

        out.push_str(&self.section("TEAM STATS"));
        out.push_str(&format!(
            "  {} {} {}\n",
            " ".repeat(20),
            self.paint(&format!("{:>12}", stats.away.team_abbr), Palette::Score),
            self.paint(&format!("{:>12}", stats.home.team_abbr), Palette::Score),
        ));
        for (key, label) in TEAM_TOTALS {
            let away = stats.away.total(key);
            let home = stats.home.total(key);
            if away.is_empty() && home.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "  {} {} {}\n",
                self.paint(&pad_right(label, 20), Palette::Muted),
                self.paint(&format!("{away:>12}"), Palette::Team),
                self.paint(&format!("{home:>12}"), Palette::Team),
            ));
        }

        for category in PLAYER_CATEGORIES {
            out.push('\n');
            out.push_str(&self.section(&category.to_uppercase()));
            for team in [&stats.away, &stats.home] {
                out.push_str(&self.player_category(team, category));
            }
        }

        out.push('\n');
        out.push_str(&self.rule());
        out.push('\n');
        out
    }

    pub fn error(&self, err: &ApiError) -> String {
        let message = classify_error(err);
        match self.theme {
            Theme::Plain => format!("Error: {message}"),
            Theme::Styled => self.paint(&format!("✗ {message}"), Palette::Alert),
        }
    }

    fn player_category(&self, team: &TeamStats, name: &str) -> String {
        let Some(category) = team.category(name).filter(|c| !c.players.is_empty()) else {
            return String::new();
        };
        // Passing keeps QBR and rating.
        let columns = if name == "passing" { 8 } else { 5 };

        let mut out = format!(
            "  {}",
            self.paint(&pad_right(&team.team_abbr, PLAYER_WIDTH + 2), Palette::Score)
        );
        for label in category.labels.iter().take(columns) {
            out.push(' ');
            out.push_str(&self.paint(&format!("{label:>STAT_WIDTH$}"), Palette::Muted));
        }
        out.push('\n');

        for player in &category.players {
            out.push_str(&format!(
                "    {}",
                self.paint(&pad_right(&truncate(&player.name, PLAYER_WIDTH), PLAYER_WIDTH), Palette::Team)
            ));
            for stat in player.stats.iter().take(columns) {
                out.push(' ');
                out.push_str(&format!("{stat:>STAT_WIDTH$}"));
            }
            out.push('\n');
        }
        out
    }

    fn status(&self, game: &Game) -> String {
        let label = match game.start_time {
            Some(kickoff) if game.status == GameStatus::Scheduled && game.status_text.is_empty() => {
                kickoff.with_timezone(&Local).format("%a %-I:%M %p").to_string()
            }
            _ => game.status_label(),
        };
        let text = truncate(&label, STATUS_WIDTH);
        match (self.theme, game.status) {
            (Theme::Plain, _) => format!("[{}]", pad_right(&text, STATUS_WIDTH)),
            (Theme::Styled, GameStatus::InProgress) => self.paint(&format!("● {text}"), Palette::Live),
            (Theme::Styled, GameStatus::Final) => self.paint(&format!("✓ {text}"), Palette::Final),
            (Theme::Styled, GameStatus::Scheduled) => self.paint(&format!("◷ {text}"), Palette::Muted),
        }
    }

    fn rule_width(&self) -> usize {
        self.width.clamp(40, 76)
    }

    fn rule(&self) -> String {
        match self.theme {
            Theme::Plain => "=".repeat(self.rule_width()),
            Theme::Styled => self.paint(&"━".repeat(self.rule_width()), Palette::Border),
        }
    }

    fn banner(&self, title: &str) -> String {
        let width = self.rule_width();
        format!(
            "\n{}\n{}\n{}\n",
            self.rule(),
            self.paint(&center(title, width), Palette::Title),
            self.rule()
        )
    }

    fn section(&self, title: &str) -> String {
        let underline = match self.theme {
            Theme::Plain => "-".repeat(self.rule_width() - 4),
            Theme::Styled => self.paint(&"─".repeat(self.rule_width() - 4), Palette::Border),
        };
        format!("  {}\n  {underline}\n", self.paint(title, Palette::Title))
    }

    fn paint(&self, text: &str, palette: Palette) -> String {
        if self.theme == Theme::Plain {
            return text.to_owned();
        }
        to_ansi(resolve(palette, self.theme)).apply(text).to_string()
    }
}

/// User-facing message for an API failure.
pub fn classify_error(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput(reason) => format!("Invalid request: {reason}."),
        ApiError::Network { .. } if err.is_connect() => {
            "NFL data service is unavailable. Please try again later.".into()
        }
        ApiError::Network { .. } if err.is_timeout() => {
            "Unable to connect to NFL data service. Please check your internet connection.".into()
        }
        ApiError::Network { .. } => {
            "Unable to reach NFL data service. Please check your internet connection.".into()
        }
        ApiError::UnexpectedStatus { status, .. } => {
            format!("NFL data service returned an error ({status}). Please try again later.")
        }
        ApiError::Decode { .. } => "Received invalid data from NFL service. Please try again.".into(),
    }
}

/// Parse a 1-based menu choice into an index below `len`.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

fn to_ansi(style: Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    if let Some(fg) = style.fg.and_then(ansi_color) {
        out = out.with(fg);
    }
    if let Some(bg) = style.bg.and_then(ansi_color) {
        out = out.on(bg);
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        out = out.attribute(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::REVERSED) {
        out = out.attribute(Attribute::Reverse);
    }
    out
}

fn ansi_color(color: Color) -> Option<AnsiColor> {
    let color = match color {
        Color::Indexed(n) => AnsiColor::AnsiValue(n),
        Color::Black => AnsiColor::Black,
        Color::White => AnsiColor::White,
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Gray => AnsiColor::Grey,
        Color::DarkGray => AnsiColor::DarkGrey,
        Color::Rgb(r, g, b) => AnsiColor::Rgb { r, g, b },
        _ => return None,
    };
    Some(color)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad_right(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}
