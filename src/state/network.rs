use crate::formatter::classify_error;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nfl_api::ScoreService;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves requests one at a time; each produces exactly one response.
pub struct NetworkWorker {
    service: ScoreService,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        service: ScoreService,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            service,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadSummary { game_id, seq } => {
                    self.handle_load_summary(game_id, seq).await
                }
                NetworkRequest::LoadReplay { game_id } => self.handle_load_replay(game_id).await,
            };

            let is_ok = !matches!(
                response,
                NetworkResponse::SummaryFailed { .. } | NetworkResponse::ReplayFailed { .. }
            );
            debug!("network request complete");
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_summary(&self, game_id: String, seq: u64) -> NetworkResponse {
        debug!("loading summary #{seq} for game {game_id}");
        match self.service.get_game_summary(&game_id).await {
            Ok(summary) => NetworkResponse::SummaryLoaded { seq, summary },
            Err(err) => {
                error!("summary #{seq} for game {game_id} failed: {err}");
                NetworkResponse::SummaryFailed { seq, message: classify_error(&err) }
            }
        }
    }

    async fn handle_load_replay(&self, game_id: String) -> NetworkResponse {
        debug!("loading replay for game {game_id}");
        match self.service.get_game_replay(&game_id).await {
            Ok(replay) => NetworkResponse::ReplayLoaded { replay },
            Err(err) => {
                error!("replay for game {game_id} failed: {err}");
                NetworkResponse::ReplayFailed { message: classify_error(&err) }
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
