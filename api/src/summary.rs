//! Decoder for ESPN's `summary` document into [`GameDetail`].
//!
//! Each top-level section (`header`, `gameInfo`, `boxscore`, `plays`,
//! `leaders`) is optional. A missing or malformed section leaves the matching
//! fields at their zero value; decoding itself never fails.

use crate::document::{first, get, get_array, get_bool, get_number, get_string, get_text, section};
use crate::{GameDetail, Leader, MAX_PLAYS, Play, Statistic, TeamDetail, split_home_away};
use serde_json::Value;

pub fn decode_summary(event_id: &str, doc: &Value) -> GameDetail {
    let mut detail = GameDetail {
        id: event_id.to_owned(),
        ..Default::default()
    };

    if let Some(header) = section(doc, "header") {
        apply_header(&mut detail, header);
    }

    if let Some(info) = section(doc, "gameInfo") {
        detail.venue = get_string(info, &["venue", "fullName"]);
        detail.attendance = attendance_text(info);
    }

    if let Some(boxscore) = section(doc, "boxscore") {
        apply_team_statistics(&mut detail, boxscore);
    }

    if let Some(plays) = section(doc, "plays").and_then(Value::as_array) {
        detail.plays = select_plays(plays, &detail);
    }

    if let Some(leaders) = section(doc, "leaders").and_then(Value::as_array) {
        detail.leaders = extract_leaders(leaders);
    }

    detail
}

fn apply_header(detail: &mut GameDetail, header: &Value) {
    let Some(competition) = first(header, &["competitions"]) else {
        return;
    };

    detail.status = get_string(competition, &["status", "type", "description"]);
    detail.status_detail = get_string(competition, &["status", "type", "detail"]);
    detail.is_live = get_string(competition, &["status", "type", "state"]) == "in";
    detail.period = get_text(competition, &["status", "period"]);
    detail.clock = get_string(competition, &["status", "displayClock"]);

    let (home, away) = split_home_away(get_array(competition, &["competitors"]), |c| {
        get_string(c, &["homeAway"]) == "home"
    });
    if let Some(home) = home {
        detail.home = decode_competitor(home);
    }
    if let Some(away) = away {
        detail.away = decode_competitor(away);
    }
}

fn decode_competitor(c: &Value) -> TeamDetail {
    let mut id = get_string(c, &["team", "id"]);
    if id.is_empty() {
        id = get_string(c, &["id"]);
    }

    let mut logo = first(c, &["team", "logos"])
        .map(|l| get_string(l, &["href"]))
        .unwrap_or_default();
    if logo.is_empty() {
        logo = get_string(c, &["team", "logo"]);
    }

    let record = first(c, &["record"])
        .or_else(|| first(c, &["records"]))
        .map(|r| get_string(r, &["summary"]))
        .unwrap_or_default();

    TeamDetail {
        id,
        name: get_string(c, &["team", "displayName"]),
        short_name: get_string(c, &["team", "shortDisplayName"]),
        abbreviation: get_string(c, &["team", "abbreviation"]),
        score: get_text(c, &["score"]),
        record,
        logo,
        statistics: Vec::new(),
    }
}

fn attendance_text(info: &Value) -> String {
    match get_number(info, &["attendance"]) {
        Some(n) if n > 0.0 => get_text(info, &["attendance"]),
        _ => String::new(),
    }
}

/// Match each boxscore team block to home/away by team id. Blocks whose id is
/// unknown fall back to their own `homeAway` tag.
fn apply_team_statistics(detail: &mut GameDetail, boxscore: &Value) {
    for entry in get_array(boxscore, &["teams"]) {
        let team_id = get_string(entry, &["team", "id"]);
        let statistics = decode_statistics(entry);

        let slot = if !team_id.is_empty() && team_id == detail.home.id {
            Some(&mut detail.home)
        } else if !team_id.is_empty() && team_id == detail.away.id {
            Some(&mut detail.away)
        } else {
            match get_string(entry, &["homeAway"]).as_str() {
                "home" => Some(&mut detail.home),
                "away" => Some(&mut detail.away),
                _ => None,
            }
        };

        match slot {
            Some(team) => team.statistics = statistics,
            None => log::debug!("boxscore block for unknown team {team_id:?} skipped"),
        }
    }
}

fn decode_statistics(entry: &Value) -> Vec<Statistic> {
    get_array(entry, &["statistics"])
        .iter()
        .filter_map(|stat| {
            let label = ["label", "displayName", "name"]
                .iter()
                .map(|key| get_string(stat, &[*key]))
                .find(|s| !s.is_empty())?;
            Some(Statistic {
                label,
                value: get_text(stat, &["displayValue"]),
            })
        })
        .collect()
}

/// Keep the most recent [`MAX_PLAYS`] significant plays in chronological order.
///
/// A play is significant when it scores or has descriptive text. Plays are
/// ordered by `sequenceNumber` when every play carries one, otherwise the feed
/// order is trusted.
fn select_plays(source: &[Value], detail: &GameDetail) -> Vec<Play> {
    let mut ordered: Vec<&Value> = source.iter().collect();
    let sequence: Option<Vec<f64>> = ordered
        .iter()
        .map(|p| get_number(p, &["sequenceNumber"]))
        .collect();
    if let Some(sequence) = sequence {
        let mut keyed: Vec<(f64, &Value)> = sequence.into_iter().zip(ordered).collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        ordered = keyed.into_iter().map(|(_, p)| p).collect();
    }

    let mut plays: Vec<Play> = ordered
        .into_iter()
        .rev()
        .filter(|p| is_significant(p))
        .take(MAX_PLAYS)
        .map(|p| decode_play(p, detail))
        .collect();
    plays.reverse();
    plays
}

fn is_significant(play: &Value) -> bool {
    get_bool(play, &["scoringPlay"]) || !get_string(play, &["text"]).is_empty()
}

fn decode_play(play: &Value, detail: &GameDetail) -> Play {
    let team_id = get_string(play, &["team", "id"]);
    let team = if team_id.is_empty() {
        String::new()
    } else if team_id == detail.home.id {
        detail.home.label().to_owned()
    } else if team_id == detail.away.id {
        detail.away.label().to_owned()
    } else {
        String::new()
    };

    Play {
        period: get_text(play, &["period", "number"]),
        clock: get_string(play, &["clock", "displayValue"]),
        text: get_string(play, &["text"]),
        scoring: get_bool(play, &["scoringPlay"]),
        team,
    }
}

/// Accepts both leader layouts ESPN ships: per-team blocks holding categories,
/// and a flat list of categories whose entries name their own team.
fn extract_leaders(blocks: &[Value]) -> Vec<Leader> {
    let mut leaders = Vec::new();
    for block in blocks {
        if get(block, &["team"]).is_some_and(Value::is_object) {
            let team = team_label(block);
            for category in get_array(block, &["leaders"]) {
                if let Some(leader) = top_leader(category, &team) {
                    leaders.push(leader);
                }
            }
        } else if let Some(leader) = top_leader(block, "") {
            leaders.push(leader);
        }
    }
    leaders
}

fn top_leader(category: &Value, team: &str) -> Option<Leader> {
    let top = first(category, &["leaders"])?;
    let mut label = get_string(category, &["displayName"]);
    if label.is_empty() {
        label = get_string(category, &["name"]);
    }
    let team = if team.is_empty() {
        team_label(top)
    } else {
        team.to_owned()
    };
    Some(Leader {
        category: label,
        team,
        athlete: get_string(top, &["athlete", "displayName"]),
        value: get_text(top, &["displayValue"]),
    })
}

fn team_label(node: &Value) -> String {
    ["abbreviation", "shortDisplayName", "displayName"]
        .iter()
        .map(|key| get_string(node, &["team", *key]))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}
