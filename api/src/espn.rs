//! Serde shapes for the ESPN scoreboard endpoint.
//! Every field is optional; mapping to the domain model lives in client.rs.
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub date: Option<String>, // ISO 8601, often minute precision ("2025-01-14T00:30Z")
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub venue: Option<EspnVenue>,
    pub status: Option<EspnStatus>,
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnVenue {
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub state: Option<String>, // "pre" | "in" | "post"
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnCompetitor {
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    /// ESPN sends scores as strings, but not on every sport.
    #[serde(default, deserialize_with = "lenient_string")]
    pub score: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EspnTeam {
    pub display_name: Option<String>,
    pub short_display_name: Option<String>,
    pub logo: Option<String>,
}

/// Accept a string, a number or null where a string is expected.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
