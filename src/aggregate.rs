use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::model::{LineupEntry, Match, Outcome, Player};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AggregateWarning {
    // Still counts towards matches played, goals and assists.
    UnrecognizedResult {
        match_id: String,
        player: String,
        value: String,
    },
    // Once per name.
    UnknownPlayer { match_id: String, player: String },
    UnknownMvp { match_id: String, player: String },
}

impl std::fmt::Display for AggregateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedResult {
                match_id,
                player,
                value,
            } => write!(
                f,
                "match {match_id}: result `{value}` for {player} is not Win/Draw/Loss"
            ),
            Self::UnknownPlayer { match_id, player } => {
                write!(f, "match {match_id}: lineup player `{player}` is not on the roster")
            }
            Self::UnknownMvp { match_id, player } => {
                write!(f, "match {match_id}: MVP `{player}` is not on the roster")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub players: Vec<Player>,
    pub warnings: Vec<AggregateWarning>,
    pub season_span: Option<(NaiveDate, NaiveDate)>,
}

/// Recompute every player's season counters from lineups and matches.
///
/// Output keeps roster order. Goal difference and own goals are carried over
/// from the input records as they are.
pub fn aggregate(players: &[Player], matches: &[Match], lineups: &[LineupEntry]) -> Vec<Player> {
    aggregate_with_report(players, matches, lineups).players
}

pub fn aggregate_with_report(
    players: &[Player],
    matches: &[Match],
    lineups: &[LineupEntry],
) -> AggregateReport {
    let mut appearances: HashMap<&str, Vec<&LineupEntry>> = HashMap::new();
    for entry in lineups {
        appearances.entry(entry.player.as_str()).or_default().push(entry);
    }

    let mut mvp_awards: HashMap<&str, u32> = HashMap::new();
    for m in matches {
        *mvp_awards.entry(m.mvp.as_str()).or_insert(0) += 1;
    }

    let out: Vec<Player> = players
        .iter()
        .map(|p| {
            let apps = appearances
                .get(p.name.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            season_totals(p, apps, mvp_awards.get(p.name.as_str()).copied().unwrap_or(0))
        })
        .collect();

    let warnings = collect_warnings(players, matches, lineups);
    for w in &warnings {
        warn!("{w}");
    }

    let season_span = season_span(matches);
    info!(
        players = out.len(),
        matches = matches.len(),
        appearances = lineups.len(),
        warnings = warnings.len(),
        "aggregated season stats"
    );

    AggregateReport {
        players: out,
        warnings,
        season_span,
    }
}

fn season_totals(base: &Player, apps: &[&LineupEntry], mvp: u32) -> Player {
    let matches_played = apps.len() as u32;
    let goals_scored = apps.iter().map(|e| e.goals).sum::<u32>();
    let assists = apps.iter().map(|e| e.assists).sum::<u32>();
    let count = |outcome: Outcome| apps.iter().filter(|e| e.result == outcome).count() as u32;
    let games_won = count(Outcome::Win);
    let games_drawn = count(Outcome::Draw);
    let games_lost = count(Outcome::Loss);

    let (goals_per_game, win_pct) = if matches_played > 0 {
        let n = matches_played as f64;
        (goals_scored as f64 / n, games_won as f64 / n * 100.0)
    } else {
        (0.0, 0.0)
    };

    Player {
        name: base.name.clone(),
        matches_played,
        goals_scored,
        assists,
        games_won,
        games_drawn,
        games_lost,
        goal_difference: base.goal_difference,
        own_goals: base.own_goals,
        mvp,
        goals_per_game,
        win_pct,
    }
}

fn collect_warnings(
    players: &[Player],
    matches: &[Match],
    lineups: &[LineupEntry],
) -> Vec<AggregateWarning> {
    let roster: HashSet<&str> = players.iter().map(|p| p.name.as_str()).collect();
    let mut out = Vec::new();
    let mut unknown_seen: HashSet<&str> = HashSet::new();

    for entry in lineups {
        if let Outcome::Unrecognized(value) = &entry.result {
            out.push(AggregateWarning::UnrecognizedResult {
                match_id: entry.match_id.clone(),
                player: entry.player.clone(),
                value: value.clone(),
            });
        }
        if !roster.contains(entry.player.as_str()) && unknown_seen.insert(entry.player.as_str()) {
            out.push(AggregateWarning::UnknownPlayer {
                match_id: entry.match_id.clone(),
                player: entry.player.clone(),
            });
        }
    }

    for m in matches {
        if !m.mvp.trim().is_empty() && !roster.contains(m.mvp.as_str()) {
            out.push(AggregateWarning::UnknownMvp {
                match_id: m.id.clone(),
                player: m.mvp.clone(),
            });
        }
    }

    out
}

fn season_span(matches: &[Match]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = matches.iter().filter_map(|m| m.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}
