use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::{Player, columns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatKey {
    MatchPlayed,
    GoalScored,
    Assists,
    GamesWon,
    GamesDrew,
    GamesLost,
    GoalDifference,
    OwnGoals,
    Mvp,
    GoalsPerGame,
    WinPct,
}

impl StatKey {
    pub const ALL: [StatKey; 11] = [
        StatKey::MatchPlayed,
        StatKey::GoalScored,
        StatKey::Assists,
        StatKey::GamesWon,
        StatKey::GamesDrew,
        StatKey::GamesLost,
        StatKey::GoalDifference,
        StatKey::OwnGoals,
        StatKey::Mvp,
        StatKey::GoalsPerGame,
        StatKey::WinPct,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            StatKey::MatchPlayed => columns::MATCH_PLAYED,
            StatKey::GoalScored => columns::GOAL_SCORED,
            StatKey::Assists => columns::ASSISTS,
            StatKey::GamesWon => columns::GAMES_WON,
            StatKey::GamesDrew => columns::GAMES_DREW,
            StatKey::GamesLost => columns::GAMES_LOST,
            StatKey::GoalDifference => columns::GOAL_DIFFERENCE,
            StatKey::OwnGoals => columns::OWN_GOALS,
            StatKey::Mvp => columns::MVP,
            StatKey::GoalsPerGame => columns::GOALS_PER_GAME,
            StatKey::WinPct => columns::WIN_PCT,
        }
    }

    pub fn is_rate(self) -> bool {
        matches!(self, StatKey::GoalsPerGame | StatKey::WinPct)
    }

    pub fn value(self, p: &Player) -> f64 {
        match self {
            StatKey::MatchPlayed => p.matches_played as f64,
            StatKey::GoalScored => p.goals_scored as f64,
            StatKey::Assists => p.assists as f64,
            StatKey::GamesWon => p.games_won as f64,
            StatKey::GamesDrew => p.games_drawn as f64,
            StatKey::GamesLost => p.games_lost as f64,
            StatKey::GoalDifference => p.goal_difference as f64,
            StatKey::OwnGoals => p.own_goals as f64,
            StatKey::Mvp => p.mvp as f64,
            StatKey::GoalsPerGame => p.goals_per_game,
            StatKey::WinPct => p.win_pct,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for StatKey {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StatKey::ALL
            .into_iter()
            .find(|k| k.column_name() == s)
            .ok_or_else(|| StatsError::UnknownColumn(s.to_string()))
    }
}

impl TryFrom<String> for StatKey {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatKey> for String {
    fn from(value: StatKey) -> Self {
        value.column_name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SortKeyRepr")]
pub struct SortKey {
    pub stat: StatKey,
    pub descending: bool,
}

/// Config files may name a key by its column alone, meaning descending.
#[derive(Deserialize)]
#[serde(untagged)]
enum SortKeyRepr {
    Column(StatKey),
    Full {
        stat: StatKey,
        #[serde(default = "descending_default")]
        descending: bool,
    },
}

fn descending_default() -> bool {
    true
}

impl From<SortKeyRepr> for SortKey {
    fn from(repr: SortKeyRepr) -> Self {
        match repr {
            SortKeyRepr::Column(stat) => SortKey::desc(stat),
            SortKeyRepr::Full { stat, descending } => SortKey { stat, descending },
        }
    }
}

impl SortKey {
    pub fn desc(stat: StatKey) -> Self {
        Self {
            stat,
            descending: true,
        }
    }

    pub fn asc(stat: StatKey) -> Self {
        Self {
            stat,
            descending: false,
        }
    }

    fn compare(&self, a: &Player, b: &Player) -> Ordering {
        let ord = self.stat.value(a).total_cmp(&self.stat.value(b));
        if self.descending { ord.reverse() } else { ord }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankSpec {
    pub min_matches: u32,
    pub sort_keys: Vec<SortKey>,
    pub limit: Option<usize>,
}

/// Filter by matches played, stable-sort by the keys in priority order, then
/// truncate. Rows tied on every key keep their input order.
pub fn rank<'a>(players: &'a [Player], spec: &RankSpec) -> Vec<&'a Player> {
    let mut rows: Vec<&Player> = players
        .iter()
        .filter(|p| p.matches_played >= spec.min_matches)
        .collect();

    rows.sort_by(|a, b| {
        spec.sort_keys
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    if let Some(limit) = spec.limit {
        rows.truncate(limit);
    }
    rows
}

/// [`rank`] with one direction shared by every key.
pub fn rank_by<'a>(
    players: &'a [Player],
    min_matches: u32,
    keys: &[StatKey],
    descending: bool,
    limit: Option<usize>,
) -> Vec<&'a Player> {
    let spec = RankSpec {
        min_matches,
        sort_keys: keys
            .iter()
            .map(|&stat| SortKey { stat, descending })
            .collect(),
        limit,
    };
    rank(players, &spec)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            0 => Some(Podium::Gold),
            1 => Some(Podium::Silver),
            2 => Some(Podium::Bronze),
            _ => None,
        }
    }
}
