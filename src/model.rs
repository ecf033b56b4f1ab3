use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod columns {
    pub const PLAYER_NAME: &str = "Player Name";
    pub const MATCH_PLAYED: &str = "Match Played";
    pub const GOAL_SCORED: &str = "Goal Scored";
    pub const ASSISTS: &str = "Assists";
    pub const GAMES_WON: &str = "Games Won";
    pub const GAMES_DREW: &str = "Games Drew";
    pub const GAMES_LOST: &str = "Games Lost";
    pub const GOAL_DIFFERENCE: &str = "Goal Difference";
    pub const OWN_GOALS: &str = "Own Goals";
    pub const MVP: &str = "MVP";
    pub const GOALS_PER_GAME: &str = "Goal/Game";
    pub const WIN_PCT: &str = "% Win";

    pub const MATCH_ID: &str = "Match ID";
    pub const DATE: &str = "Date";

    pub const TEAM: &str = "Team";
    pub const TEAM_SCORE: &str = "Team Score";
    pub const GOALS_SCORED: &str = "Goals Scored";
    pub const RESULT: &str = "Result";

    pub const PLAYERS: [&str; 12] = [
        PLAYER_NAME,
        MATCH_PLAYED,
        GOAL_SCORED,
        ASSISTS,
        GAMES_WON,
        GAMES_DREW,
        GAMES_LOST,
        GOAL_DIFFERENCE,
        OWN_GOALS,
        MVP,
        GOALS_PER_GAME,
        WIN_PCT,
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub matches_played: u32,
    pub goals_scored: u32,
    pub assists: u32,
    pub games_won: u32,
    pub games_drawn: u32,
    pub games_lost: u32,
    // Supplied by the Players sheet; aggregation carries it through untouched.
    pub goal_difference: i32,
    // Same as goal_difference.
    pub own_goals: u32,
    pub mvp: u32,
    pub goals_per_game: f64,
    pub win_pct: f64,
}

impl Player {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub mvp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            s if s.eq_ignore_ascii_case("a") => Some(Self::A),
            s if s.eq_ignore_ascii_case("b") => Some(Self::B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
    /// Anything other than the three exact labels, blank included.
    Unrecognized(String),
}

impl Outcome {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Win" => Self::Win,
            "Draw" => Self::Draw,
            "Loss" => Self::Loss,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub match_id: String,
    pub date: Option<NaiveDate>,
    pub player: String,
    pub team: Option<TeamSide>,
    pub team_score: Option<u32>,
    pub goals: u32,
    pub assists: u32,
    pub result: Outcome,
}

impl LineupEntry {
    pub fn new(match_id: impl Into<String>, player: impl Into<String>, result: Outcome) -> Self {
        Self {
            match_id: match_id.into(),
            date: None,
            player: player.into(),
            team: None,
            team_score: None,
            goals: 0,
            assists: 0,
            result,
        }
    }
}
