pub mod catalog;
pub mod client;
pub mod document;
pub mod espn;
pub mod summary;

use chrono::{DateTime, Utc};

pub use catalog::{League, SPORTS, Sport};

/// Most significant plays kept on a [`GameDetail`].
pub const MAX_PLAYS: usize = 20;

// ---------------------------------------------------------------------------
// Domain types, independent of the ESPN wire format
// ---------------------------------------------------------------------------

/// Which slice of a league's schedule a game list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListMode {
    #[default]
    Current,
    Upcoming,
}

impl ListMode {
    pub fn toggle(self) -> Self {
        match self {
            ListMode::Current => ListMode::Upcoming,
            ListMode::Upcoming => ListMode::Current,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListMode::Current => "Current",
            ListMode::Upcoming => "Upcoming",
        }
    }
}

/// One scoreboard entry. Replaced wholesale on every list refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub name: String,       // "Boston Celtics at Los Angeles Lakers"
    pub short_name: String, // "BOS @ LAL"
    pub kickoff: Option<DateTime<Utc>>,
    pub status: String, // human text, e.g. "3rd Quarter", "Final"
    pub is_live: bool,
    pub venue: String,
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub short_name: String,
    /// Empty until the game starts.
    pub score: String,
    pub logo: String,
}

/// Extended data for a single game, fetched on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameDetail {
    pub id: String,
    pub status: String,
    pub status_detail: String,
    pub period: String,
    pub clock: String,
    pub is_live: bool,
    pub venue: String,
    pub attendance: String,
    pub home: TeamDetail,
    pub away: TeamDetail,
    /// Chronological, at most [`MAX_PLAYS`].
    pub plays: Vec<Play>,
    pub leaders: Vec<Leader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDetail {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub abbreviation: String,
    pub score: String,
    pub record: String,
    pub logo: String,
    pub statistics: Vec<Statistic>,
}

impl TeamDetail {
    /// Short name when the feed has one, full name otherwise.
    pub fn label(&self) -> &str {
        if self.short_name.is_empty() {
            &self.name
        } else {
            &self.short_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistic {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Play {
    pub period: String,
    pub clock: String,
    pub text: String,
    pub scoring: bool,
    /// Short name of the team credited with the play, if known.
    pub team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leader {
    pub category: String,
    pub team: String,
    pub athlete: String,
    pub value: String,
}

/// Split competitor entries into (home, away).
///
/// The first entry tagged home wins the home slot. Every other entry goes to
/// away, later ones overwriting earlier ones. Feeds with zero, one or more
/// than two competitors never fail; missing slots come back as `None`.
pub fn split_home_away<T>(
    entries: impl IntoIterator<Item = T>,
    is_home: impl Fn(&T) -> bool,
) -> (Option<T>, Option<T>) {
    let mut home = None;
    let mut away = None;
    for entry in entries {
        if home.is_none() && is_home(&entry) {
            home = Some(entry);
        } else {
            away = Some(entry);
        }
    }
    (home, away)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_away_split_uses_tag() {
        let (home, away) = split_home_away(["away", "home"], |t| *t == "home");
        assert_eq!(home, Some("home"));
        assert_eq!(away, Some("away"));
    }

    #[test]
    fn home_away_split_tolerates_empty_feed() {
        let (home, away) = split_home_away(Vec::<&str>::new(), |t| *t == "home");
        assert!(home.is_none());
        assert!(away.is_none());
    }

    #[test]
    fn second_home_tag_lands_in_away() {
        let entries = [("a", "home"), ("b", "home"), ("c", "away")];
        let (home, away) = split_home_away(entries, |(_, tag)| *tag == "home");
        assert_eq!(home.map(|e| e.0), Some("a"));
        // last non-home entry wins the away slot
        assert_eq!(away.map(|e| e.0), Some("c"));
    }

    #[test]
    fn untagged_entries_are_away() {
        let (home, away) = split_home_away(["x", "y"], |t| *t == "home");
        assert!(home.is_none());
        assert_eq!(away, Some("y"));
    }

    #[test]
    fn list_mode_toggles() {
        assert_eq!(ListMode::Current.toggle(), ListMode::Upcoming);
        assert_eq!(ListMode::Upcoming.toggle(), ListMode::Current);
        assert_eq!(ListMode::default(), ListMode::Current);
    }

    #[test]
    fn team_label_falls_back_to_name() {
        let team = TeamDetail { name: "Boston Celtics".into(), ..Default::default() };
        assert_eq!(team.label(), "Boston Celtics");
    }
}
