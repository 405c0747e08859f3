use crate::state::messages::{NetworkRequest, NetworkResponse};
use espn_api::client::{ApiError, EspnApi};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
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

/// Runs every fetch in its own task so a slow league never blocks a detail
/// request. Results come back tagged with the generation they were issued
/// under; the navigator decides whether they still matter.
pub struct NetworkWorker {
    client: EspnApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        client: EspnApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
                self.start_loading_animation().await;
            }

            let client = self.client.clone();
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();

            tokio::spawn(async move {
                let (response, is_ok) = handle_request(&client, request).await;

                // last one out stops the spinner
                if in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                    stop_loading_animation(&responses, is_ok).await;
                }

                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
        debug!("network request channel closed");
    }

    async fn start_loading_animation(&self) {
        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            loop {
                interval.tick().await;
                if in_flight.load(Ordering::SeqCst) == 0 {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
    }
}

async fn handle_request(client: &EspnApi, request: NetworkRequest) -> (NetworkResponse, bool) {
    match request {
        NetworkRequest::LoadGames { generation, sport, league, mode } => {
            debug!("loading {sport}/{league} games ({}), generation {generation}", mode.label());
            let result = client.fetch_games(sport, league, mode).await.map_err(describe);
            let is_ok = result.is_ok();
            (NetworkResponse::GamesLoaded { generation, result }, is_ok)
        }
        NetworkRequest::LoadGameDetail { generation, sport, league, event_id } => {
            debug!("loading {sport}/{league} event {event_id}, generation {generation}");
            let result = client
                .fetch_game_detail(sport, league, &event_id)
                .await
                .map_err(describe);
            let is_ok = result.is_ok();
            (NetworkResponse::GameDetailLoaded { generation, result }, is_ok)
        }
    }
}

/// Log the full error and hand the UI a short message.
fn describe(err: ApiError) -> String {
    warn!("{err}");
    match err {
        ApiError::Network(..) => "Network error".to_owned(),
        ApiError::TimedOut(_) => "Request timed out".to_owned(),
        ApiError::Status(status, _) => format!("Server returned {status}"),
        ApiError::Parsing(..) => "Unexpected response from server".to_owned(),
    }
}

async fn stop_loading_animation(responses: &mpsc::Sender<NetworkResponse>, is_ok: bool) {
    // let the spinner task observe the zero count before the final state lands
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}
