//! Static sport/league catalog. The ids are the path segments ESPN uses in
//! `/sports/{sport}/{league}/...`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sport {
    pub name: &'static str,
    pub id: &'static str,
    pub icon: &'static str,
    pub leagues: &'static [League],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub name: &'static str,
    pub id: &'static str,
}

const fn league(name: &'static str, id: &'static str) -> League {
    League { name, id }
}

pub static SPORTS: &[Sport] = &[
    Sport {
        name: "Football",
        id: "football",
        icon: "🏈",
        leagues: &[league("NFL", "nfl"), league("College Football", "college-football")],
    },
    Sport {
        name: "Basketball",
        id: "basketball",
        icon: "🏀",
        leagues: &[
            league("NBA", "nba"),
            league("WNBA", "wnba"),
            league("College Basketball (Men)", "mens-college-basketball"),
            league("College Basketball (Women)", "womens-college-basketball"),
        ],
    },
    Sport {
        name: "Baseball",
        id: "baseball",
        icon: "⚾",
        leagues: &[league("MLB", "mlb"), league("College Baseball", "college-baseball")],
    },
    Sport {
        name: "Hockey",
        id: "hockey",
        icon: "🏒",
        leagues: &[league("NHL", "nhl")],
    },
    Sport {
        name: "Soccer",
        id: "soccer",
        icon: "⚽",
        leagues: &[
            league("Premier League", "eng.1"),
            league("La Liga", "esp.1"),
            league("Serie A", "ita.1"),
            league("Bundesliga", "ger.1"),
            league("MLS", "usa.1"),
            league("Champions League", "uefa.champions"),
        ],
    },
];
