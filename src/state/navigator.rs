use crate::state::messages::NetworkRequest;
use crate::state::viewport::{self, GAME_CARD_HEIGHT, LIST_CHROME};
use chrono::{DateTime, Local};
use espn_api::{Game, GameDetail, League, ListMode, SPORTS, Sport};
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    SportSelect,
    LeagueSelect,
    GameList,
    GameDetail,
}

/// Everything that can change navigation state: user intent, window size,
/// fetch completions and the liveness timer.
#[derive(Debug)]
pub enum Message {
    Up,
    Down,
    Confirm,
    Back,
    Refresh,
    ToggleUpcoming,
    Quit,
    Resize { height: u16 },
    GamesLoaded { generation: u64, result: Result<Vec<Game>, String> },
    GameDetailLoaded { generation: u64, result: Result<GameDetail, String> },
    LivenessTick,
}

/// Side effects requested by the navigator; the runtime carries them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(NetworkRequest),
    ScheduleTick,
    Quit,
}

/// The view state machine: `SportSelect → LeagueSelect → GameList → GameDetail`.
///
/// Only [`Navigator::update`] mutates navigation state, one message at a time.
/// Game list and game detail are slots replaced wholesale by fetch results.
/// Each slot has a generation counter; a result whose generation is not the
/// latest for its slot is dropped, so out-of-order completions and results
/// for views the user already left cannot overwrite newer state.
#[derive(Debug)]
pub struct Navigator {
    catalog: &'static [Sport],
    pub view: View,
    pub sport_cursor: usize,
    pub league_cursor: usize,
    pub game_cursor: usize,
    pub game_scroll: usize,
    /// Floors at zero here; the renderer clamps the upper bound once the
    /// wrapped content length is known and writes it back.
    pub detail_scroll: usize,
    pub sport: Option<&'static Sport>,
    pub league: Option<&'static League>,
    pub games: Vec<Game>,
    pub detail: Option<GameDetail>,
    pub mode: ListMode,
    pub loading: bool,
    pub loading_detail: bool,
    pub list_error: Option<String>,
    pub detail_error: Option<String>,
    pub last_update: Option<DateTime<Local>>,
    list_generation: u64,
    detail_generation: u64,
    height: u16,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(SPORTS)
    }
}

impl Navigator {
    pub fn new(catalog: &'static [Sport]) -> Self {
        Self {
            catalog,
            view: View::default(),
            sport_cursor: 0,
            league_cursor: 0,
            game_cursor: 0,
            game_scroll: 0,
            detail_scroll: 0,
            sport: None,
            league: None,
            games: Vec::new(),
            detail: None,
            mode: ListMode::default(),
            loading: false,
            loading_detail: false,
            list_error: None,
            detail_error: None,
            last_update: None,
            list_generation: 0,
            detail_generation: 0,
            height: 0,
        }
    }

    /// Commands to run once at startup.
    pub fn init(&self) -> Vec<Command> {
        vec![Command::ScheduleTick]
    }

    pub fn catalog(&self) -> &'static [Sport] {
        self.catalog
    }

    pub fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::Quit => vec![Command::Quit],
            Message::Up => {
                self.move_cursor(false);
                Vec::new()
            }
            Message::Down => {
                self.move_cursor(true);
                Vec::new()
            }
            Message::Confirm => self.confirm(),
            Message::Back => {
                self.back();
                Vec::new()
            }
            Message::Refresh => self.refresh(),
            Message::ToggleUpcoming => self.toggle_upcoming(),
            Message::Resize { height } => {
                self.height = height;
                self.refit_games();
                Vec::new()
            }
            Message::GamesLoaded { generation, result } => {
                self.on_games_loaded(generation, result);
                Vec::new()
            }
            Message::GameDetailLoaded { generation, result } => {
                self.on_game_detail_loaded(generation, result);
                Vec::new()
            }
            Message::LivenessTick => self.on_liveness_tick(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries used by the renderer
    // -----------------------------------------------------------------------

    /// Game cards that fit the current terminal height.
    pub fn visible_games(&self) -> usize {
        viewport::visible_count(self.height, LIST_CHROME, GAME_CARD_HEIGHT)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn move_cursor(&mut self, down: bool) {
        match self.view {
            View::SportSelect => {
                self.sport_cursor = step(self.sport_cursor, self.catalog.len(), down);
            }
            View::LeagueSelect => {
                let len = self.sport.map_or(0, |s| s.leagues.len());
                self.league_cursor = step(self.league_cursor, len, down);
            }
            View::GameList => {
                self.game_cursor = step(self.game_cursor, self.games.len(), down);
                self.game_scroll = viewport::follow_cursor(
                    self.game_scroll,
                    self.game_cursor,
                    self.visible_games(),
                    self.games.len(),
                );
            }
            View::GameDetail => {
                self.detail_scroll = if down {
                    self.detail_scroll.saturating_add(1)
                } else {
                    self.detail_scroll.saturating_sub(1)
                };
            }
        }
    }

    fn confirm(&mut self) -> Vec<Command> {
        match self.view {
            View::SportSelect => {
                if let Some(sport) = self.catalog.get(self.sport_cursor) {
                    self.sport = Some(sport);
                    self.view = View::LeagueSelect;
                    self.league_cursor = 0;
                }
                Vec::new()
            }
            View::LeagueSelect => {
                let Some(league) = self.sport.and_then(|s| s.leagues.get(self.league_cursor)) else {
                    return Vec::new();
                };
                self.league = Some(league);
                self.view = View::GameList;
                self.game_cursor = 0;
                self.game_scroll = 0;
                self.mode = ListMode::Current;
                self.list_error = None;
                self.loading = true;
                self.request_games().into_iter().collect()
            }
            View::GameList => {
                let (Some(sport), Some(league)) = (self.sport, self.league) else {
                    return Vec::new();
                };
                let Some(game) = self.games.get(self.game_cursor) else {
                    return Vec::new();
                };
                let event_id = game.id.clone();
                self.view = View::GameDetail;
                self.detail = None;
                self.detail_error = None;
                self.detail_scroll = 0;
                self.loading_detail = true;
                self.detail_generation += 1;
                debug!("loading detail for event {event_id}");
                vec![Command::Fetch(NetworkRequest::LoadGameDetail {
                    generation: self.detail_generation,
                    sport: sport.id,
                    league: league.id,
                    event_id,
                })]
            }
            View::GameDetail => Vec::new(),
        }
    }

    fn back(&mut self) {
        match self.view {
            View::SportSelect => {}
            View::LeagueSelect => {
                self.view = View::SportSelect;
                self.league_cursor = 0;
            }
            View::GameList => {
                self.view = View::LeagueSelect;
                self.games.clear();
                self.game_cursor = 0;
                self.game_scroll = 0;
                self.loading = false;
                self.list_error = None;
                // orphan any list fetch still in flight
                self.list_generation += 1;
            }
            View::GameDetail => {
                self.view = View::GameList;
                self.detail = None;
                self.detail_error = None;
                self.detail_scroll = 0;
                self.loading_detail = false;
                self.detail_generation += 1;
            }
        }
    }

    fn refresh(&mut self) -> Vec<Command> {
        if self.view != View::GameList || self.league.is_none() {
            return Vec::new();
        }
        self.loading = true;
        self.request_games().into_iter().collect()
    }

    fn toggle_upcoming(&mut self) -> Vec<Command> {
        if self.view != View::GameList || self.league.is_none() {
            return Vec::new();
        }
        self.mode = self.mode.toggle();
        self.game_cursor = 0;
        self.game_scroll = 0;
        self.loading = true;
        self.request_games().into_iter().collect()
    }

    fn on_liveness_tick(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.view == View::GameList && self.games.iter().any(|g| g.is_live) {
            debug!("live games on screen, refreshing silently");
            commands.extend(self.request_games());
        }
        commands.push(Command::ScheduleTick);
        commands
    }

    fn on_games_loaded(&mut self, generation: u64, result: Result<Vec<Game>, String>) {
        if generation != self.list_generation {
            debug!("dropping stale game list (generation {generation}, current {})", self.list_generation);
            return;
        }
        self.loading = false;
        self.last_update = Some(Local::now());
        match result {
            Ok(games) => {
                self.games = games;
                self.list_error = None;
                self.refit_games();
            }
            Err(message) => self.list_error = Some(message),
        }
    }

    fn on_game_detail_loaded(&mut self, generation: u64, result: Result<GameDetail, String>) {
        if generation != self.detail_generation {
            debug!("dropping stale game detail (generation {generation}, current {})", self.detail_generation);
            return;
        }
        self.loading_detail = false;
        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.detail_error = None;
            }
            Err(message) => self.detail_error = Some(message),
        }
    }

    /// New list request for the selected league, bumping the list generation.
    fn request_games(&mut self) -> Option<Command> {
        let (sport, league) = (self.sport?, self.league?);
        self.list_generation += 1;
        Some(Command::Fetch(NetworkRequest::LoadGames {
            generation: self.list_generation,
            sport: sport.id,
            league: league.id,
            mode: self.mode,
        }))
    }

    /// Re-establish cursor and scroll bounds after the list or window changed.
    fn refit_games(&mut self) {
        let len = self.games.len();
        self.game_cursor = if len == 0 { 0 } else { self.game_cursor.min(len - 1) };
        self.game_scroll = viewport::follow_cursor(self.game_scroll, self.game_cursor, self.visible_games(), len);
    }
}

/// Move a cursor one step, staying inside `[0, len)`; 0 for an empty list.
fn step(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let next = if down { cursor + 1 } else { cursor.saturating_sub(1) };
    next.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use espn_api::Team;

    fn game(id: &str, live: bool) -> Game {
        Game {
            id: id.to_string(),
            name: format!("Game {id}"),
            status: if live { "In Progress".into() } else { "Scheduled".into() },
            is_live: live,
            home: Team { name: "Home".into(), ..Default::default() },
            away: Team { name: "Away".into(), ..Default::default() },
            ..Default::default()
        }
    }

    fn fetches(commands: &[Command]) -> Vec<&NetworkRequest> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Fetch(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn list_generation(commands: &[Command]) -> u64 {
        match fetches(commands).as_slice() {
            [NetworkRequest::LoadGames { generation, .. }] => *generation,
            other => panic!("expected one list fetch, got {other:?}"),
        }
    }

    /// Navigator sitting on the NBA game list with `games` loaded.
    fn nba_with(games: Vec<Game>) -> Navigator {
        let mut nav = Navigator::default();
        nav.update(Message::Resize { height: 40 });
        nav.update(Message::Down); // Basketball
        nav.update(Message::Confirm);
        let commands = nav.update(Message::Confirm); // NBA
        let generation = list_generation(&commands);
        nav.update(Message::GamesLoaded { generation, result: Ok(games) });
        nav
    }

    #[test]
    fn starts_on_sport_select_and_arms_tick() {
        let nav = Navigator::default();
        assert_eq!(nav.view, View::SportSelect);
        assert_eq!(nav.init(), vec![Command::ScheduleTick]);
    }

    #[test]
    fn sport_cursor_is_clamped() {
        let mut nav = Navigator::default();
        nav.update(Message::Up);
        assert_eq!(nav.sport_cursor, 0);
        for _ in 0..50 {
            nav.update(Message::Down);
        }
        assert_eq!(nav.sport_cursor, SPORTS.len() - 1);
    }

    #[test]
    fn confirming_sport_opens_leagues() {
        let mut nav = Navigator::default();
        nav.update(Message::Down);
        let commands = nav.update(Message::Confirm);
        assert!(commands.is_empty());
        assert_eq!(nav.view, View::LeagueSelect);
        assert_eq!(nav.sport.map(|s| s.id), Some("basketball"));
        assert_eq!(nav.league_cursor, 0);

        for _ in 0..10 {
            nav.update(Message::Down);
        }
        assert_eq!(nav.league_cursor, nav.sport.unwrap().leagues.len() - 1);

        nav.update(Message::Back);
        assert_eq!(nav.view, View::SportSelect);
        assert_eq!(nav.league_cursor, 0);
    }

    #[test]
    fn confirming_league_requests_current_games() {
        let mut nav = Navigator::default();
        nav.update(Message::Down);
        nav.update(Message::Confirm);
        let commands = nav.update(Message::Confirm);
        assert_eq!(nav.view, View::GameList);
        assert!(nav.loading);
        assert_eq!(
            commands,
            vec![Command::Fetch(NetworkRequest::LoadGames {
                generation: 1,
                sport: "basketball",
                league: "nba",
                mode: ListMode::Current,
            })]
        );
    }

    #[test]
    fn live_game_drills_into_detail() {
        let mut nav = nba_with(vec![game("401", false), game("402", true)]);
        assert!(!nav.loading);
        assert!(nav.games[1].is_live);
        assert_eq!(nav.games[1].status, "In Progress");
        assert!(nav.last_update.is_some());

        nav.update(Message::Down);
        let commands = nav.update(Message::Confirm);
        assert_eq!(nav.view, View::GameDetail);
        assert!(nav.loading_detail);
        let generation = match fetches(&commands).as_slice() {
            [NetworkRequest::LoadGameDetail { generation, sport, league, event_id }] => {
                assert_eq!((*sport, *league, event_id.as_str()), ("basketball", "nba", "402"));
                *generation
            }
            other => panic!("expected detail fetch, got {other:?}"),
        };

        let detail = GameDetail { id: "402".into(), ..Default::default() };
        nav.update(Message::GameDetailLoaded { generation, result: Ok(detail) });
        assert!(!nav.loading_detail);
        assert_eq!(nav.detail.as_ref().map(|d| d.id.as_str()), Some("402"));
    }

    #[test]
    fn confirm_on_empty_list_does_nothing() {
        let mut nav = nba_with(Vec::new());
        assert!(nav.update(Message::Confirm).is_empty());
        assert_eq!(nav.view, View::GameList);
    }

    #[test]
    fn game_cursor_stays_visible_while_moving() {
        let games: Vec<Game> = (0..20).map(|i| game(&i.to_string(), false)).collect();
        let mut nav = nba_with(games);
        let visible = nav.visible_games();
        for _ in 0..30 {
            nav.update(Message::Down);
            assert!(nav.game_cursor < 20);
            assert!(nav.game_scroll <= nav.game_cursor && nav.game_cursor < nav.game_scroll + visible);
        }
        assert_eq!(nav.game_cursor, 19);
        assert_eq!(nav.game_scroll, 20 - visible);
        for _ in 0..30 {
            nav.update(Message::Up);
            assert!(nav.game_scroll <= nav.game_cursor && nav.game_cursor < nav.game_scroll + visible);
        }
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
    }

    #[test]
    fn cursor_on_empty_list_stays_zero() {
        let mut nav = nba_with(Vec::new());
        nav.update(Message::Down);
        nav.update(Message::Up);
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
    }

    #[test]
    fn shrinking_list_pulls_cursor_back() {
        let games: Vec<Game> = (0..10).map(|i| game(&i.to_string(), false)).collect();
        let mut nav = nba_with(games);
        for _ in 0..9 {
            nav.update(Message::Down);
        }
        let generation = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::GamesLoaded { generation, result: Ok(vec![game("a", false), game("b", false)]) });
        assert_eq!(nav.game_cursor, 1);
        assert_eq!(nav.game_scroll, 0);

        let generation = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::GamesLoaded { generation, result: Ok(Vec::new()) });
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
    }

    #[test]
    fn back_from_game_list_clears_slot() {
        let games: Vec<Game> = (0..10).map(|i| game(&i.to_string(), false)).collect();
        let mut nav = nba_with(games);
        for _ in 0..8 {
            nav.update(Message::Down);
        }
        nav.update(Message::Back);
        assert_eq!(nav.view, View::LeagueSelect);
        assert!(nav.games.is_empty());
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
    }

    #[test]
    fn late_list_result_after_back_is_ignored() {
        let mut nav = nba_with(Vec::new());
        let generation = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::Back);
        nav.update(Message::GamesLoaded { generation, result: Ok(vec![game("1", true)]) });
        assert!(nav.games.is_empty());
        assert_eq!(nav.view, View::LeagueSelect);
    }

    #[test]
    fn back_from_detail_clears_slot() {
        let mut nav = nba_with(vec![game("1", false)]);
        nav.update(Message::Confirm);
        nav.update(Message::Down);
        nav.update(Message::Down);
        assert_eq!(nav.detail_scroll, 2);
        nav.update(Message::Back);
        assert_eq!(nav.view, View::GameList);
        assert!(nav.detail.is_none());
        assert_eq!(nav.detail_scroll, 0);
        assert!(!nav.loading_detail);
    }

    #[test]
    fn late_detail_result_after_back_is_ignored() {
        let mut nav = nba_with(vec![game("1", false)]);
        let commands = nav.update(Message::Confirm);
        let generation = match fetches(&commands).as_slice() {
            [NetworkRequest::LoadGameDetail { generation, .. }] => *generation,
            other => panic!("unexpected {other:?}"),
        };
        nav.update(Message::Back);
        nav.update(Message::GameDetailLoaded { generation, result: Ok(GameDetail::default()) });
        assert!(nav.detail.is_none());
    }

    #[test]
    fn detail_scroll_floors_at_zero() {
        let mut nav = nba_with(vec![game("1", false)]);
        nav.update(Message::Confirm);
        nav.update(Message::Up);
        assert_eq!(nav.detail_scroll, 0);
        for _ in 0..100 {
            nav.update(Message::Down);
        }
        assert_eq!(nav.detail_scroll, 100);
        for _ in 0..150 {
            nav.update(Message::Up);
        }
        assert_eq!(nav.detail_scroll, 0);
    }

    #[test]
    fn tick_without_live_games_only_reschedules() {
        let mut nav = nba_with(vec![game("1", false), game("2", false)]);
        assert_eq!(nav.update(Message::LivenessTick), vec![Command::ScheduleTick]);
    }

    #[test]
    fn tick_with_live_game_refreshes_silently() {
        let mut nav = nba_with(vec![game("1", false), game("2", true)]);
        let commands = nav.update(Message::LivenessTick);
        assert_eq!(fetches(&commands).len(), 1);
        assert_eq!(commands.iter().filter(|c| **c == Command::ScheduleTick).count(), 1);
        assert!(!nav.loading, "silent refresh must not show the loading state");
    }

    #[test]
    fn tick_outside_game_list_only_reschedules() {
        let mut nav = nba_with(vec![game("1", true)]);
        nav.update(Message::Confirm);
        assert_eq!(nav.view, View::GameDetail);
        assert_eq!(nav.update(Message::LivenessTick), vec![Command::ScheduleTick]);

        let mut fresh = Navigator::default();
        assert_eq!(fresh.update(Message::LivenessTick), vec![Command::ScheduleTick]);
    }

    #[test]
    fn toggle_upcoming_resets_position_and_refetches() {
        let games: Vec<Game> = (0..10).map(|i| game(&i.to_string(), false)).collect();
        let mut nav = nba_with(games);
        for _ in 0..7 {
            nav.update(Message::Down);
        }
        let commands = nav.update(Message::ToggleUpcoming);
        assert_eq!(nav.mode, ListMode::Upcoming);
        assert!(nav.loading);
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
        match fetches(&commands).as_slice() {
            [NetworkRequest::LoadGames { mode, .. }] => assert_eq!(*mode, ListMode::Upcoming),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn toggle_upcoming_with_no_games_refetches() {
        let mut nav = nba_with(Vec::new());
        let commands = nav.update(Message::ToggleUpcoming);
        assert_eq!(fetches(&commands).len(), 1);
        assert_eq!((nav.game_cursor, nav.game_scroll), (0, 0));
    }

    #[test]
    fn refresh_and_toggle_are_ignored_outside_game_list() {
        let mut nav = Navigator::default();
        assert!(nav.update(Message::Refresh).is_empty());
        assert!(nav.update(Message::ToggleUpcoming).is_empty());
        assert_eq!(nav.mode, ListMode::Current);
        assert!(!nav.loading);
    }

    #[test]
    fn reentering_league_resets_to_current_mode() {
        let mut nav = nba_with(Vec::new());
        nav.update(Message::ToggleUpcoming);
        nav.update(Message::Back);
        let commands = nav.update(Message::Confirm);
        assert_eq!(nav.mode, ListMode::Current);
        match fetches(&commands).as_slice() {
            [NetworkRequest::LoadGames { mode, .. }] => assert_eq!(*mode, ListMode::Current),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stale_list_result_is_discarded() {
        let mut nav = nba_with(vec![game("old", false)]);
        let first = list_generation(&nav.update(Message::Refresh));
        let second = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::GamesLoaded { generation: second, result: Ok(vec![game("new", false)]) });
        nav.update(Message::GamesLoaded { generation: first, result: Ok(vec![game("slow", false)]) });
        assert_eq!(nav.games[0].id, "new");
    }

    #[test]
    fn failed_fetch_keeps_previous_games() {
        let mut nav = nba_with(vec![game("1", false)]);
        let generation = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::GamesLoaded { generation, result: Err("Network error".into()) });
        assert!(!nav.loading);
        assert_eq!(nav.games.len(), 1);
        assert_eq!(nav.list_error.as_deref(), Some("Network error"));

        let generation = list_generation(&nav.update(Message::Refresh));
        nav.update(Message::GamesLoaded { generation, result: Ok(Vec::new()) });
        assert!(nav.list_error.is_none());
    }

    #[test]
    fn failed_detail_records_error() {
        let mut nav = nba_with(vec![game("1", false)]);
        let commands = nav.update(Message::Confirm);
        let generation = match fetches(&commands).as_slice() {
            [NetworkRequest::LoadGameDetail { generation, .. }] => *generation,
            other => panic!("unexpected {other:?}"),
        };
        nav.update(Message::GameDetailLoaded { generation, result: Err("Request timed out".into()) });
        assert!(!nav.loading_detail);
        assert!(nav.detail.is_none());
        assert_eq!(nav.detail_error.as_deref(), Some("Request timed out"));
    }

    #[test]
    fn quit_is_accepted_everywhere() {
        let mut nav = nba_with(Vec::new());
        assert_eq!(nav.update(Message::Quit), vec![Command::Quit]);
    }

    #[test]
    fn step_clamps() {
        assert_eq!(step(0, 0, true), 0);
        assert_eq!(step(3, 4, true), 3);
        assert_eq!(step(0, 4, false), 0);
        assert_eq!(step(9, 4, false), 3);
    }
}
