use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::field::FieldView;
use crate::components::mascot::MascotView;
use crate::components::theme::{Palette, Theme, resolve};
use crate::state::app_state::Screen;
use crate::state::live::{LiveState, Mood};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::replay::ReplayState;
use crate::ui::layout::LayoutAreas;
use nfl_api::{Game, GameStatus, Play};

const LIVE_HELP: &str = " q quit  ↑/↓ select  enter expand  \" logs  f hide help ";
const REPLAY_HELP: &str =
    " q quit  ←/→ step  space auto  +/- speed  0/$ first/last  \" logs  f hide help ";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let result = terminal.draw(|f| {
        let area = f.area();
        let theme = app.settings.theme;
        let mascot = matches!(app.state.screen, Screen::Live(_)) && app.settings.mascot;
        let layout =
            LayoutAreas::new(area, app.settings.full_screen, app.state.show_logs, mascot);

        match &app.state.screen {
            Screen::Live(live) if live.show_victory() => draw_victory(f, area, live, app),
            Screen::Live(live) => draw_live(f, &layout, live, app),
            Screen::Replay(replay) => draw_replay(f, &layout, replay, theme),
        }

        if !app.settings.full_screen {
            let help = match app.state.screen {
                Screen::Live(_) => LIVE_HELP,
                Screen::Replay(_) => REPLAY_HELP,
            };
            f.render_widget(
                Paragraph::new(help).style(resolve(Palette::Muted, theme)),
                layout.footer,
            );
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs, theme);
        }

        draw_loading_spinner(f, area, loading, theme);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(palette: Palette, theme: Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(resolve(palette, theme))
}

// ---------------------------------------------------------------------------
// Live view
// ---------------------------------------------------------------------------

fn draw_live(f: &mut Frame, layout: &LayoutAreas, live: &LiveState, app: &App) {
    let theme = app.settings.theme;
    let Some(summary) = live.summary.as_ref() else {
        let body = match live.error.as_deref() {
            Some(err) => format!("Error: {err}\n\nPress q to quit."),
            None => format!("Loading game {}...", live.game_id),
        };
        let area = f.area();
        draw_placeholder(f, area, &body, theme);
        return;
    };

    draw_header(f, layout.header, &summary.game, live.celebrating(), theme);

    let possession = summary.possession().unwrap_or("--");
    f.render_widget(
        FieldView { yards_to_endzone: summary.yards_to_endzone, possession, theme },
        layout.field,
    );
    if layout.mascot.width > 0 {
        f.render_widget(
            MascotView {
                team: possession,
                mood: live.mood(),
                frame: app.state.animation.frame,
                theme,
            },
            layout.mascot,
        );
    }

    draw_situation(f, layout.situation, live, summary.current_play.as_ref(), &summary.situation, theme);
    draw_recent_plays(f, layout.plays, live, theme);
}

fn draw_header(f: &mut Frame, area: Rect, game: &Game, flash: bool, theme: Theme) {
    let block = default_border(Palette::Border, theme).title(" NFL ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let score_style = if flash {
        resolve(Palette::Highlight, theme)
    } else {
        resolve(Palette::Score, theme)
    };
    let status_style = match game.status {
        GameStatus::InProgress => resolve(Palette::Live, theme),
        GameStatus::Final => resolve(Palette::Final, theme),
        GameStatus::Scheduled => resolve(Palette::Muted, theme),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", game.away_team.name), resolve(Palette::Team, theme)),
            Span::styled(format!(" {} ", game.away_team.score), score_style),
            Span::styled("  @  ", resolve(Palette::Muted, theme)),
            Span::styled(format!("{} ", game.home_team.name), resolve(Palette::Team, theme)),
            Span::styled(format!(" {} ", game.home_team.score), score_style),
        ]),
        Line::from(Span::styled(game.status_label(), status_style)),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_situation(
    f: &mut Frame,
    area: Rect,
    live: &LiveState,
    current: Option<&Play>,
    situation: &str,
    theme: Theme,
) {
    let title = if live.turnover() { " TURNOVER " } else { " Situation " };
    let border = if live.turnover() { Palette::Alert } else { Palette::Border };
    let block = default_border(border, theme).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = Vec::new();
    if !situation.is_empty() {
        spans.push(Span::styled(format!("{situation}  "), resolve(Palette::Title, theme)));
    }
    match current {
        Some(play) => {
            let style = if live.new_play() {
                resolve(Palette::Highlight, theme)
            } else {
                resolve(Palette::Team, theme)
            };
            spans.push(Span::styled(play.text.clone(), style));
        }
        None => spans.push(Span::styled("No play in progress", resolve(Palette::Muted, theme))),
    }
    if let Some(err) = live.error.as_deref() {
        spans.push(Span::styled(format!("  ! {err}"), resolve(Palette::Alert, theme)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_recent_plays(f: &mut Frame, area: Rect, live: &LiveState, theme: Theme) {
    let block = default_border(Palette::Border, theme).title(" Recent Plays ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let plays = live.recent_plays();
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<4}{:<8}{}", "Q", "Clock", "Play"),
        resolve(Palette::Muted, theme),
    ))];
    if plays.is_empty() {
        lines.push(Line::from(Span::styled("No plays yet", resolve(Palette::Muted, theme))));
    }

    let width = inner.width as usize;
    for (i, play) in plays.iter().enumerate() {
        let selected = live.selected == Some(i);
        let style = if selected {
            resolve(Palette::Highlight, theme)
        } else if play.scoring_play {
            resolve(Palette::Score, theme)
        } else {
            resolve(Palette::Team, theme)
        };
        let row = format!("Q{:<3}{:<8}{}", play.period, play.clock, play.text);
        lines.push(Line::from(Span::styled(clip(&row, width), style)));
    }

    // Expanded detail goes after the list so click rows stay aligned.
    if let Some(play) = live.expanded.and_then(|i| plays.get(i)) {
        lines.push(Line::from(""));
        lines.extend(play_detail(play, theme));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn play_detail(play: &Play, theme: Theme) -> Vec<Line<'static>> {
    let label = resolve(Palette::Muted, theme);
    let value = resolve(Palette::Team, theme);
    let mut lines = vec![Line::from(Span::styled(play.text.clone(), value.add_modifier(Modifier::BOLD)))];
    let mut field = |name: &str, text: String| {
        if !text.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(format!("{name:<12}"), label),
                Span::styled(text, value),
            ]));
        }
    };
    field("Type", play.play_type.clone());
    field("Down", play.down.clone());
    field("Possession", play.possession.clone());
    field("Score", format!("{} - {}", play.away_score, play.home_score));
    field("To go", format!("{} yds to end zone", play.field_position()));
    if play.scoring_play {
        field("Scoring", "yes".into());
    }
    lines
}

fn draw_victory(f: &mut Frame, area: Rect, live: &LiveState, app: &App) {
    let theme = app.settings.theme;
    let Some(summary) = live.summary.as_ref() else {
        return;
    };
    let game = &summary.game;
    let winner = game.leader();
    let loser = game.trailer();

    let block = default_border(Palette::Final, theme).title(" FINAL ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top, mascot_area, text_area, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        MascotView {
            team: &winner.abbreviation,
            mood: Mood::Celebrating,
            frame: app.state.animation.frame,
            theme,
        },
        mascot_area,
    );
    let lines = vec![
        Line::from(Span::styled(
            format!("{} WIN!", winner.name.to_uppercase()),
            resolve(Palette::Title, theme),
        )),
        Line::from(Span::styled(
            format!("{} {} - {} {}", winner.abbreviation, winner.score, loser.score, loser.abbreviation),
            resolve(Palette::Score, theme),
        )),
        Line::from(""),
        Line::from(Span::styled("Press q to quit", resolve(Palette::Muted, theme))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
}

// ---------------------------------------------------------------------------
// Replay view
// ---------------------------------------------------------------------------

fn draw_replay(f: &mut Frame, layout: &LayoutAreas, replay: &ReplayState, theme: Theme) {
    let Some(data) = replay.replay.as_ref() else {
        let body = match replay.error.as_deref() {
            Some(err) => format!("Error: {err}\n\nPress q to quit."),
            None => format!("Loading replay for game {}...", replay.game_id),
        };
        let area = f.area();
        draw_placeholder(f, area, &body, theme);
        return;
    };

    if data.plays.is_empty() {
        let area = f.area();
        draw_placeholder(f, area, "No plays recorded for this game.\n\nPress q to quit.", theme);
        return;
    }

    let Some(play) = replay.current_play() else {
        return;
    };

    // Scoreboard as of the current play.
    let mut game = data.game.clone();
    game.home_team.score = play.home_score;
    game.away_team.score = play.away_score;
    game.status_text = format!("Q{} {}", play.period, play.clock);
    draw_header(f, layout.header, &game, false, theme);

    f.render_widget(
        FieldView { yards_to_endzone: play.yards_to_endzone, possession: &play.possession, theme },
        layout.field,
    );

    let (position, total) = replay.progress();
    let drive = replay
        .current_drive()
        .map(|d| format!("{} drive: {}", d.team, d.description))
        .unwrap_or_default();
    let auto = if replay.auto_advance() {
        format!("AUTO every {}s", replay.speed)
    } else {
        format!("paused ({}s)", replay.speed)
    };
    let block = default_border(Palette::Border, theme).title(format!(" Play {position}/{total} "));
    let inner = block.inner(layout.situation);
    f.render_widget(block, layout.situation);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{auto}  "), resolve(Palette::Live, theme)),
            Span::styled(drive, resolve(Palette::Muted, theme)),
        ])),
        inner,
    );

    let block = default_border(Palette::Border, theme).title(" Play ");
    let inner = block.inner(layout.plays);
    f.render_widget(block, layout.plays);
    f.render_widget(Paragraph::new(play_detail(play, theme)).wrap(Wrap { trim: false }), inner);
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

fn draw_logs(f: &mut Frame, area: Rect, theme: Theme) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Palette::Muted, theme).title(" Logs "))
        .style_error(resolve(Palette::Alert, theme))
        .style_warn(resolve(Palette::Score, theme))
        .style_info(resolve(Palette::Team, theme));
    f.render_widget(logger, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str, theme: Theme) {
    let block = default_border(Palette::Muted, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(msg.lines().count() as u16),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(msg.to_owned())
            .style(resolve(Palette::Team, theme))
            .alignment(Alignment::Center),
        middle,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, loading: LoadingState, theme: Theme) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => resolve(Palette::Alert, theme),
        _ => Style::default(),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    f.render_widget(spinner, Rect::new(area.width.saturating_sub(3), 1, 1, 1));
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use nfl_api::{GameSummary, Team};
    use std::time::Instant;
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn summary(status: GameStatus) -> GameSummary {
        let play = Play {
            id: "1".into(),
            text: "J.Allen pass short right to K.Shakir for 12 yards".into(),
            period: 3,
            clock: "4:12".into(),
            possession: "BUF".into(),
            yards_to_endzone: 40,
            ..Default::default()
        };
        GameSummary {
            game: Game {
                id: "401".into(),
                home_team: Team { name: "New England Patriots".into(), abbreviation: "NE".into(), score: 21 },
                away_team: Team { name: "Buffalo Bills".into(), abbreviation: "BUF".into(), score: 24 },
                status,
                status_text: "Q3 4:12".into(),
                start_time: None,
            },
            current_play: Some(play.clone()),
            recent_plays: vec![play],
            situation: "2nd & 5 at NE 40".into(),
            yards_to_endzone: 40,
        }
    }

    fn live_app(mascot: bool, status: GameStatus) -> App {
        let settings = AppSettings { theme: Theme::Plain, mascot, ..Default::default() };
        let mut app = App::live(settings, "401");
        app.start(Instant::now());
        app.on_summary_loaded(1, summary(status), Instant::now());
        app
    }

    #[test]
    fn live_view_shows_score_and_plays() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = live_app(false, GameStatus::InProgress);
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen_text(&terminal);
        assert!(text.contains("Buffalo Bills"));
        assert!(text.contains("Q3 4:12"));
        assert!(text.contains("2nd & 5 at NE 40"));
        assert!(text.contains("Recent Plays"));

        let play_row = text.lines().nth(crate::ui::layout::PLAYS_FIRST_ROW as usize).unwrap();
        assert!(play_row.contains("J.Allen pass"), "{play_row}");
    }

    #[test]
    fn victory_screen_for_final_game_with_mascot() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = live_app(true, GameStatus::Final);
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen_text(&terminal);
        assert!(text.contains("BUFFALO BILLS WIN!"));
        assert!(text.contains("BUF 24 - 21 NE"));
    }

    #[test]
    fn replay_view_tracks_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let settings = AppSettings { theme: Theme::Plain, ..Default::default() };
        let mut app = App::replay(settings, "401");
        let replay = nfl_api::GameReplay {
            game: summary(GameStatus::Final).game,
            plays: vec![
                Play { id: "1".into(), text: "Kickoff".into(), period: 1, ..Default::default() },
                Play { id: "2".into(), text: "Run up the middle".into(), period: 1, ..Default::default() },
            ],
            drives: Vec::new(),
        };
        app.on_replay_loaded(replay, Instant::now());
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen_text(&terminal);
        assert!(text.contains("Play 1/2"));
        assert!(text.contains("Kickoff"));
    }

    #[test]
    fn loading_placeholder_before_first_summary() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::live(AppSettings { theme: Theme::Plain, ..Default::default() }, "401");
        app.start(Instant::now());
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("Loading game 401"));

        app.on_summary_failed(1, "offline".into(), Instant::now());
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("Error: offline"));
    }
}
