use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use espn_api::{Game, GameDetail, ListMode};

/// Fetch work handed to the network worker. `generation` is echoed back on the
/// matching response so stale results can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkRequest {
    LoadGames {
        generation: u64,
        sport: &'static str,
        league: &'static str,
        mode: ListMode,
    },
    LoadGameDetail {
        generation: u64,
        sport: &'static str,
        league: &'static str,
        event_id: String,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    GamesLoaded { generation: u64, result: Result<Vec<Game>, String> },
    GameDetailLoaded { generation: u64, result: Result<GameDetail, String> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize { width: u16, height: u16 },
    LivenessTick,
}
