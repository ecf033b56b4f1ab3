use std::path::PathBuf;

/// Used when neither a flag nor the environment names a workbook.
pub const DEFAULT_WORKBOOK: &str = "CALCIATORI_RDG.xlsx";

const ENV_WORKBOOK: &str = "FOOTBALL_STATS_WORKBOOK";
const ENV_BOARDS: &str = "FOOTBALL_STATS_BOARDS";
const ENV_MIN_MATCHES: &str = "FOOTBALL_STATS_MIN_MATCHES";
const ENV_PLAYERS_SHEET: &str = "FOOTBALL_STATS_PLAYERS_SHEET";
const ENV_MATCHES_SHEET: &str = "FOOTBALL_STATS_MATCHES_SHEET";
const ENV_LINEUPS_SHEET: &str = "FOOTBALL_STATS_LINEUPS_SHEET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub players: String,
    pub matches: String,
    pub lineups: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            players: "Players".to_string(),
            matches: "Matches".to_string(),
            lineups: "Team Lineups".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub workbook: Option<PathBuf>,
    pub boards: Option<PathBuf>,
    pub min_matches: Option<u32>,
    pub sheets: SheetNames,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = SheetNames::default();
        Self {
            workbook: get(ENV_WORKBOOK).map(PathBuf::from),
            boards: get(ENV_BOARDS).map(PathBuf::from),
            min_matches: get(ENV_MIN_MATCHES).and_then(|v| v.parse::<u32>().ok()),
            sheets: SheetNames {
                players: get(ENV_PLAYERS_SHEET).unwrap_or(defaults.players),
                matches: get(ENV_MATCHES_SHEET).unwrap_or(defaults.matches),
                lineups: get(ENV_LINEUPS_SHEET).unwrap_or(defaults.lineups),
            },
        }
    }

    pub fn workbook_or(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.workbook.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK))
    }
}
