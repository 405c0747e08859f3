use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse};
use crate::summary::decode_summary;
use crate::{Game, GameDetail, ListMode, Team, split_home_away};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Upcoming mode covers tomorrow through this many days out.
const UPCOMING_DAYS: u64 = 7;

/// Client for ESPN's public site API.
#[derive(Debug, Clone)]
pub struct EspnApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for EspnApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("sportsterm/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    TimedOut(String),
    Status(StatusCode, String),
    Parsing(String, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::TimedOut(url) => write!(f, "Request timed out: {url}"),
            ApiError::Status(status, url) => write!(f, "API returned {status} for {url}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl EspnApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the scoreboard for one league. Upcoming mode asks for the next
    /// week of fixtures, starting tomorrow.
    pub async fn fetch_games(&self, sport: &str, league: &str, mode: ListMode) -> ApiResult<Vec<Game>> {
        let mut url = format!("{}/{sport}/{league}/scoreboard", self.base_url);
        if mode == ListMode::Upcoming {
            url.push_str("?dates=");
            url.push_str(&upcoming_range(Local::now().date_naive()));
        }

        let raw: ScoreboardResponse = self.get(&url).await?;
        let games: Vec<Game> = raw.events.iter().filter_map(map_event_to_game).collect();
        debug!("{sport}/{league}: {} games ({})", games.len(), mode.label());
        Ok(games)
    }

    /// Fetch extended data for one game (header, box score, plays, leaders).
    pub async fn fetch_game_detail(&self, sport: &str, league: &str, event_id: &str) -> ApiResult<GameDetail> {
        let url = format!("{}/{sport}/{league}/summary?event={event_id}", self.base_url);
        let raw: serde_json::Value = self.get(&url).await?;
        Ok(decode_summary(event_id, &raw))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url.to_owned()));
        }

        let body = response.bytes().await.map_err(|e| transport_error(e, url))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Parsing(e.to_string(), url.to_owned()))
    }
}

fn transport_error(e: reqwest::Error, url: &str) -> ApiError {
    if e.is_timeout() {
        ApiError::TimedOut(url.to_owned())
    } else {
        ApiError::Network(e, url.to_owned())
    }
}

/// `YYYYMMDD-YYYYMMDD` spanning tomorrow through [`UPCOMING_DAYS`] out.
fn upcoming_range(today: NaiveDate) -> String {
    let start = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let end = today.checked_add_days(Days::new(UPCOMING_DAYS)).unwrap_or(start);
    format!("{}-{}", start.format("%Y%m%d"), end.format("%Y%m%d"))
}

/// ESPN mostly sends minute precision ("2025-01-14T00:30Z"), which is not
/// valid RFC 3339.
fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|dt| dt.and_utc())
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// Events without a competition carry nothing worth listing and are skipped.
fn map_event_to_game(event: &EspnEvent) -> Option<Game> {
    let competition = event.competitions.first()?;

    let status_type = competition.status.as_ref().and_then(|s| s.status_type.as_ref());
    let status = status_type
        .and_then(|t| t.description.clone())
        .unwrap_or_default();
    let is_live = status_type.and_then(|t| t.state.as_deref()) == Some("in");

    let (home, away) = split_home_away(&competition.competitors, |c| {
        c.home_away.as_deref() == Some("home")
    });

    Some(Game {
        id: event.id.clone().unwrap_or_default(),
        name: event.name.clone().unwrap_or_default(),
        short_name: event.short_name.clone().unwrap_or_default(),
        kickoff: event.date.as_deref().and_then(parse_kickoff),
        status,
        is_live,
        venue: competition
            .venue
            .as_ref()
            .and_then(|v| v.full_name.clone())
            .unwrap_or_default(),
        home: home.map(map_competitor).unwrap_or_default(),
        away: away.map(map_competitor).unwrap_or_default(),
    })
}

fn map_competitor(c: &EspnCompetitor) -> Team {
    let team = c.team.as_ref();
    Team {
        name: team.and_then(|t| t.display_name.clone()).unwrap_or_default(),
        short_name: team
            .and_then(|t| t.short_display_name.clone().or_else(|| t.display_name.clone()))
            .unwrap_or_default(),
        score: c.score.clone().unwrap_or_default(),
        logo: team.and_then(|t| t.logo.clone()).unwrap_or_default(),
    }
}
