use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::{Player, columns};
use crate::rank::{Podium, RankSpec, SortKey, StatKey, rank};

pub const DEFAULT_MIN_MATCHES: u32 = 1;
pub const CATEGORY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Column {
    PlayerName,
    Stat(StatKey),
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::PlayerName => columns::PLAYER_NAME,
            Column::Stat(key) => key.column_name(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == columns::PLAYER_NAME {
            return Ok(Column::PlayerName);
        }
        s.parse().map(Column::Stat)
    }
}

impl TryFrom<String> for Column {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Column> for String {
    fn from(value: Column) -> Self {
        value.header().to_string()
    }
}

/// Which observed ordering the primary leaderboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardVariant {
    /// Games Won, % Win, MVP, Goal Scored.
    WinRate,
    /// Games Won, Goal Difference, Goal Scored, MVP.
    GoalDifference,
    /// Games Won, Games Drew, Goal Difference, Goal Scored, MVP.
    #[default]
    Complete,
}

impl LeaderboardVariant {
    pub fn sort_keys(self) -> Vec<SortKey> {
        let keys: &[StatKey] = match self {
            LeaderboardVariant::WinRate => &[
                StatKey::GamesWon,
                StatKey::WinPct,
                StatKey::Mvp,
                StatKey::GoalScored,
            ],
            LeaderboardVariant::GoalDifference => &[
                StatKey::GamesWon,
                StatKey::GoalDifference,
                StatKey::GoalScored,
                StatKey::Mvp,
            ],
            LeaderboardVariant::Complete => &[
                StatKey::GamesWon,
                StatKey::GamesDrew,
                StatKey::GoalDifference,
                StatKey::GoalScored,
                StatKey::Mvp,
            ],
        };
        keys.iter().copied().map(SortKey::desc).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub title: String,
    pub columns: Vec<Column>,
    pub sort_keys: Vec<SortKey>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default = "default_min_matches")]
    pub min_matches: u32,
}

fn default_min_matches() -> u32 {
    DEFAULT_MIN_MATCHES
}

impl BoardSpec {
    pub fn leaderboard(variant: LeaderboardVariant) -> Self {
        let mut cols = vec![Column::PlayerName];
        cols.extend(StatKey::ALL.into_iter().map(Column::Stat));
        Self {
            title: "Overall Leaderboard".to_string(),
            columns: cols,
            sort_keys: variant.sort_keys(),
            limit: None,
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }

    pub fn category(title: impl Into<String>, stat: StatKey) -> Self {
        Self {
            title: title.into(),
            columns: vec![Column::PlayerName, Column::Stat(stat)],
            sort_keys: vec![SortKey::desc(stat)],
            limit: Some(CATEGORY_LIMIT),
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }

    pub fn rank_spec(&self) -> RankSpec {
        RankSpec {
            min_matches: self.min_matches,
            sort_keys: self.sort_keys.clone(),
            limit: self.limit,
        }
    }
}

pub fn default_categories() -> Vec<BoardSpec> {
    vec![
        BoardSpec::category("Most Appearances", StatKey::MatchPlayed),
        BoardSpec::category("Top Scorers", StatKey::GoalScored),
        BoardSpec::category("Top Assists", StatKey::Assists),
        BoardSpec::category("Most MVP Awards", StatKey::Mvp),
        BoardSpec::category("Most Own Goals", StatKey::OwnGoals),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardsConfig {
    #[serde(default = "default_leaderboard")]
    pub leaderboard: BoardSpec,
    #[serde(default = "default_categories")]
    pub categories: Vec<BoardSpec>,
}

fn default_leaderboard() -> BoardSpec {
    BoardSpec::leaderboard(LeaderboardVariant::default())
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self::for_variant(LeaderboardVariant::default())
    }
}

impl BoardsConfig {
    pub fn for_variant(variant: LeaderboardVariant) -> Self {
        Self {
            leaderboard: BoardSpec::leaderboard(variant),
            categories: default_categories(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parse boards config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read boards config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("in {}", path.display()))
    }

    pub fn with_min_matches(mut self, min_matches: u32) -> Self {
        self.leaderboard.min_matches = min_matches;
        for board in &mut self.categories {
            board.min_matches = min_matches;
        }
        self
    }

    pub fn boards(&self) -> impl Iterator<Item = &BoardSpec> {
        std::iter::once(&self.leaderboard).chain(self.categories.iter())
    }

    pub fn build_all(&self, players: &[Player]) -> Vec<Leaderboard> {
        self.boards().map(|spec| build_board(players, spec)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoardValue {
    Text(String),
    Count(i64),
    Rate(f64),
}

impl BoardValue {
    // Rates are only rounded here.
    pub fn display(&self) -> String {
        match self {
            BoardValue::Text(s) => s.clone(),
            BoardValue::Count(v) => v.to_string(),
            BoardValue::Rate(v) => format!("{v:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardRow {
    pub position: usize,
    pub podium: Option<Podium>,
    pub values: Vec<BoardValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<BoardRow>,
}

impl Leaderboard {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }
}

pub fn build_board(players: &[Player], spec: &BoardSpec) -> Leaderboard {
    let rows = rank(players, &spec.rank_spec())
        .into_iter()
        .enumerate()
        .map(|(position, player)| BoardRow {
            position,
            podium: Podium::for_position(position),
            values: spec.columns.iter().map(|c| project(player, *c)).collect(),
        })
        .collect();

    Leaderboard {
        title: spec.title.clone(),
        columns: spec.columns.clone(),
        rows,
    }
}

fn project(player: &Player, column: Column) -> BoardValue {
    match column {
        Column::PlayerName => BoardValue::Text(player.name.clone()),
        Column::Stat(key) if key.is_rate() => BoardValue::Rate(key.value(player)),
        Column::Stat(key) => BoardValue::Count(key.value(player) as i64),
    }
}
