mod app;
mod cli;
mod components;
mod draw;
mod formatter;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::cli::{Cli, Mode};
use crate::formatter::{Formatter, parse_selection};
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::ticker::Ticker;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseEventKind,
};
use crossterm::{cursor, execute, terminal};
use futures_util::StreamExt;
use log::{error, info};
use nfl_api::{ApiError, NflApi, ScoreService};
use std::io::{BufRead, Stdout, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    better_panic::install();
    tui_logger::init_logger(cli.log_level)?;
    tui_logger::set_default_level(cli.log_level);

    let settings = AppSettings::from_cli(&cli);
    let service = ScoreService::new(NflApi::new().with_base_url(&cli.api_url));
    let formatter = Formatter::new(terminal_width(), settings.theme);

    match cli.mode() {
        Mode::Scoreboard => match service.get_scores(cli.dates.as_deref()).await {
            Ok(games) => {
                print!("{}", formatter.scoreboard(&games));
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => Ok(report(&formatter, &err)),
        },
        Mode::Stats => {
            let game_id = match select_game(&cli, &service, &formatter).await {
                Ok(id) => id,
                Err(code) => return Ok(code),
            };
            match service.get_game_stats(&game_id).await {
                Ok(stats) => {
                    print!("{}", formatter.stats(&stats));
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => Ok(report(&formatter, &err)),
            }
        }
        Mode::Watch | Mode::Replay => {
            let game_id = match select_game(&cli, &service, &formatter).await {
                Ok(id) => id,
                Err(code) => return Ok(code),
            };
            let app = match cli.mode() {
                Mode::Watch => App::live(settings, &game_id),
                _ => App::replay(settings, &game_id),
            };
            info!("opening game {game_id}");
            run_tui(app, service).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn terminal_width() -> usize {
    terminal::size().map(|(width, _)| usize::from(width)).unwrap_or(80)
}

fn report(formatter: &Formatter, err: &ApiError) -> ExitCode {
    error!("{err}");
    eprintln!("{}", formatter.error(err));
    ExitCode::FAILURE
}

/// Resolves the game to open: `--game` wins, otherwise a numbered prompt on
/// stdin. `Err` carries the exit code when there is nothing to open.
async fn select_game(
    cli: &Cli,
    service: &ScoreService,
    formatter: &Formatter,
) -> Result<String, ExitCode> {
    if let Some(id) = &cli.game {
        return Ok(id.clone());
    }

    let dates = cli.dates.as_deref();
    let (title, empty, fetched) = match cli.mode() {
        Mode::Watch => {
            ("Live games", "No live games right now.", service.get_live_games(dates).await)
        }
        Mode::Replay => (
            "Completed games",
            "No completed games found.",
            service.get_completed_games(dates).await,
        ),
        _ => ("Games", "No games found.", service.get_scores(dates).await),
    };
    let games = fetched.map_err(|err| report(formatter, &err))?;
    if games.is_empty() {
        println!("{empty}");
        return Err(ExitCode::SUCCESS);
    }

    print!("{}", formatter.game_list(title, &games));
    print!("\nSelect a game (1-{}): ", games.len());
    let _ = io::stdout().flush();

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line);
    match read.ok().and_then(|_| parse_selection(&line, games.len())) {
        Some(index) => Ok(games[index].id.clone()),
        None => {
            eprintln!("Invalid selection.");
            Err(ExitCode::FAILURE)
        }
    }
}

async fn run_tui(app: App, service: ScoreService) -> anyhow::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let app = Arc::new(Mutex::new(app));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    let network_worker = NetworkWorker::new(service, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    let clock_task = tokio::spawn(Ticker::clock(ui_event_tx.clone()).run());
    let animation_task = tokio::spawn(Ticker::animation(ui_event_tx.clone()).run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    clock_task.abort();
    animation_task.abort();

    cleanup_terminal()
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        let should_redraw = tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &network_requests).await && !loading.is_loading
            }
            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await
            }
            else => break,
        };

        let mut app_guard = app.lock().await;
        if app_guard.should_quit() {
            break;
        }
        if should_redraw {
            draw::draw(&mut terminal, &mut app_guard, loading);
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    let requests = match ui_event {
        UiEvent::AppStarted => app.lock().await.start(Instant::now()),
        UiEvent::ClockTick => app.lock().await.on_clock_tick(Instant::now()),
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            Vec::new()
        }
        UiEvent::Mouse(mouse_event) => {
            keys::handle_mouse(mouse_event, app).await;
            Vec::new()
        }
        UiEvent::AnimationTick => {
            app.lock().await.advance_animation();
            Vec::new()
        }
        UiEvent::Resize => Vec::new(),
    };

    for request in requests {
        if network_requests.send(request).await.is_err() {
            error!("network worker is gone");
        }
    }
    true
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    let now = Instant::now();
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::SummaryLoaded { seq, summary } => {
            app.lock().await.on_summary_loaded(seq, summary, now);
        }
        NetworkResponse::SummaryFailed { seq, message } => {
            app.lock().await.on_summary_failed(seq, message, now);
        }
        NetworkResponse::ReplayLoaded { replay } => {
            app.lock().await.on_replay_loaded(replay, now);
        }
        NetworkResponse::ReplayFailed { message } => {
            app.lock().await.on_replay_failed(message, now);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let ui_event = match event {
            Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                Some(UiEvent::KeyPressed(key_event))
            }
            Ok(Event::Mouse(mouse_event)) if matches!(mouse_event.kind, MouseEventKind::Down(_)) => {
                Some(UiEvent::Mouse(mouse_event))
            }
            Ok(Event::Resize(_, _)) => Some(UiEvent::Resize),
            Ok(_) => None,
            Err(e) => {
                error!("terminal input error: {e}");
                None
            }
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, EnableMouseCapture)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()?;
    Ok(())
}

pub fn cleanup_terminal() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, DisableMouseCapture)?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
