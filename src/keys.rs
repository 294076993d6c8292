use crate::app::App;
use crate::state::app_state::Screen;
use crate::state::live::LiveInput;
use crate::state::messages::NetworkRequest;
use crate::state::replay::ReplayInput;
use crate::ui::layout::PLAYS_FIRST_ROW;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let now = Instant::now();

    let is_live = matches!(guard.state.screen, Screen::Live(_));

    let requests = match key_event.code {
        // Global
        Char('"') => {
            guard.toggle_show_logs();
            Vec::new()
        }
        Char('f') => {
            guard.toggle_full_screen();
            Vec::new()
        }

        _ if is_live => match live_input(key_event) {
            Some(input) => guard.on_live_input(input, now),
            None => Vec::new(),
        },
        _ => match replay_input(key_event) {
            Some(input) => guard.on_replay_input(input, now),
            None => Vec::new(),
        },
    };
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

pub async fn handle_mouse(mouse_event: MouseEvent, app: &Arc<Mutex<App>>) {
    let Some(index) = click_index(mouse_event) else {
        return;
    };
    let mut guard = app.lock().await;
    guard.on_live_input(LiveInput::Click(index), Instant::now());
}

pub fn live_input(key: KeyEvent) -> Option<LiveInput> {
    let input = match (key.code, key.modifiers) {
        (Char('q'), _) | (KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => LiveInput::Quit,
        (KeyCode::Up | Char('k'), _) => LiveInput::Up,
        (KeyCode::Down | Char('j'), _) => LiveInput::Down,
        (KeyCode::Enter | Char(' '), _) => LiveInput::Toggle,
        _ => return None,
    };
    Some(input)
}

pub fn replay_input(key: KeyEvent) -> Option<ReplayInput> {
    let input = match (key.code, key.modifiers) {
        (Char('q'), _) | (KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => {
            ReplayInput::Quit
        }
        (KeyCode::Right | Char('l') | Char('n'), _) => ReplayInput::Next,
        (KeyCode::Left | Char('h') | Char('p'), _) => ReplayInput::Prev,
        (Char(' '), _) => ReplayInput::ToggleAuto,
        (Char('+') | Char('='), _) => ReplayInput::Faster,
        (Char('-') | Char('_'), _) => ReplayInput::Slower,
        (KeyCode::Home | Char('0'), _) => ReplayInput::First,
        (KeyCode::End | Char('$'), _) => ReplayInput::Last,
        _ => return None,
    };
    Some(input)
}

/// Recent-play index under a left click. Rows are a fixed offset from the
/// top of the screen; the live layout keeps the plays list there.
pub fn click_index(mouse: MouseEvent) -> Option<usize> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            mouse.row.checked_sub(PLAYS_FIRST_ROW).map(usize::from)
        }
        _ => None,
    }
}
