use std::collections::HashMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::{StatsError, StatsResult};
use crate::model::{LineupEntry, Match, Outcome, Player, TeamSide, columns};
use crate::table::{Cell, Table, format_number};

/// Decode the Players sheet. Only `Player Name` is required.
///
/// Every column aggregation rebuilds reads leniently: an unreadable value
/// (a stale `#DIV/0!` in `Goal/Game`, say) is logged and read as zero.
/// Goal difference and own goals are carried through, so a bad value there
/// is an error.
pub fn read_players(table: &Table) -> StatsResult<Vec<Player>> {
    let name_col = table.require_column(columns::PLAYER_NAME)?;
    let reader = RowReader::new(table);
    let mut out = Vec::new();

    for row in table.data_rows() {
        out.push(Player {
            name: reader.required_text(row, name_col, columns::PLAYER_NAME)?,
            matches_played: reader.derived_count(row, columns::MATCH_PLAYED),
            goals_scored: reader.derived_count(row, columns::GOAL_SCORED),
            assists: reader.derived_count(row, columns::ASSISTS),
            games_won: reader.derived_count(row, columns::GAMES_WON),
            games_drawn: reader.derived_count(row, columns::GAMES_DREW),
            games_lost: reader.derived_count(row, columns::GAMES_LOST),
            goal_difference: reader.signed(row, columns::GOAL_DIFFERENCE)?,
            own_goals: reader.count(row, columns::OWN_GOALS)?,
            mvp: reader.derived_count(row, columns::MVP),
            goals_per_game: reader.derived_rate(row, columns::GOALS_PER_GAME),
            win_pct: reader.derived_rate(row, columns::WIN_PCT),
        });
    }

    debug!(sheet = %table.name, players = out.len(), "decoded players");
    Ok(out)
}

pub fn read_matches(table: &Table) -> StatsResult<Vec<Match>> {
    let id_col = table.require_column(columns::MATCH_ID)?;
    let mvp_col = table.require_column(columns::MVP)?;
    let date_col = table.column(columns::DATE);
    let reader = RowReader::new(table);
    let mut out = Vec::new();

    for row in table.data_rows() {
        out.push(Match {
            id: reader.required_id(row, id_col, columns::MATCH_ID)?,
            date: date_col.and_then(|col| cell_date(table.cell(row, col))),
            mvp: cell_text(table.cell(row, mvp_col)).unwrap_or_default(),
        });
    }

    debug!(sheet = %table.name, matches = out.len(), "decoded matches");
    Ok(out)
}

pub fn read_lineups(table: &Table) -> StatsResult<Vec<LineupEntry>> {
    let id_col = table.require_column(columns::MATCH_ID)?;
    let name_col = table.require_column(columns::PLAYER_NAME)?;
    let result_col = table.require_column(columns::RESULT)?;
    let date_col = table.column(columns::DATE);
    let team_col = table.column(columns::TEAM);
    let reader = RowReader::new(table);
    let mut out = Vec::new();

    for row in table.data_rows() {
        let team_score = match table.column(columns::TEAM_SCORE) {
            Some(col) if !table.cell(row, col).is_blank() => {
                Some(reader.count(row, columns::TEAM_SCORE)?)
            }
            _ => None,
        };
        out.push(LineupEntry {
            match_id: reader.required_id(row, id_col, columns::MATCH_ID)?,
            date: date_col.and_then(|col| cell_date(table.cell(row, col))),
            player: reader.required_text(row, name_col, columns::PLAYER_NAME)?,
            team: team_col
                .and_then(|col| cell_text(table.cell(row, col)))
                .and_then(|raw| TeamSide::parse(&raw)),
            team_score,
            goals: reader.count(row, columns::GOALS_SCORED)?,
            assists: reader.count(row, columns::ASSISTS)?,
            result: Outcome::parse(&cell_text(table.cell(row, result_col)).unwrap_or_default()),
        });
    }

    debug!(sheet = %table.name, entries = out.len(), "decoded lineup entries");
    Ok(out)
}

/// Canonical columns missing from the sheet are appended; other columns pass
/// through untouched. Rows are matched by exact name.
pub fn write_players(table: &mut Table, players: &[Player]) -> StatsResult<()> {
    let name_col = table.require_column(columns::PLAYER_NAME)?;
    let cols: Vec<usize> = columns::PLAYERS
        .iter()
        .map(|name| table.ensure_column(name))
        .collect();

    let by_name: HashMap<&str, &Player> = players.iter().map(|p| (p.name.as_str(), p)).collect();

    let rows: Vec<usize> = table.data_rows().collect();
    for row in rows {
        let Some(name) = cell_text(table.cell(row, name_col)) else {
            continue;
        };
        let Some(player) = by_name.get(name.as_str()) else {
            continue;
        };
        for (col, value) in cols.iter().zip(player_cells(player)) {
            table.set(row, *col, value);
        }
    }
    Ok(())
}

pub fn player_cells(player: &Player) -> [Cell; 12] {
    [
        Cell::Text(player.name.clone()),
        Cell::Int(player.matches_played.into()),
        Cell::Int(player.goals_scored.into()),
        Cell::Int(player.assists.into()),
        Cell::Int(player.games_won.into()),
        Cell::Int(player.games_drawn.into()),
        Cell::Int(player.games_lost.into()),
        Cell::Int(player.goal_difference.into()),
        Cell::Int(player.own_goals.into()),
        Cell::Int(player.mvp.into()),
        Cell::Float(player.goals_per_game),
        Cell::Float(player.win_pct),
    ]
}

struct RowReader<'a> {
    table: &'a Table,
}

impl<'a> RowReader<'a> {
    fn new(table: &'a Table) -> Self {
        Self { table }
    }

    fn required_text(&self, row: usize, col: usize, column: &str) -> StatsResult<String> {
        cell_text(self.table.cell(row, col)).ok_or_else(|| self.missing(row, column))
    }

    fn required_id(&self, row: usize, col: usize, column: &str) -> StatsResult<String> {
        cell_text(self.table.cell(row, col))
            .map(|raw| raw.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| self.missing(row, column))
    }

    fn count(&self, row: usize, column: &str) -> StatsResult<u32> {
        let Some(col) = self.table.column(column) else {
            return Ok(0);
        };
        let cell = self.table.cell(row, col);
        cell_integer(cell)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(row, column, cell, "a non-negative whole number"))
    }

    fn signed(&self, row: usize, column: &str) -> StatsResult<i32> {
        let Some(col) = self.table.column(column) else {
            return Ok(0);
        };
        let cell = self.table.cell(row, col);
        cell_integer(cell)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| self.invalid(row, column, cell, "a whole number"))
    }

    fn rate(&self, row: usize, column: &str) -> StatsResult<f64> {
        let Some(col) = self.table.column(column) else {
            return Ok(0.0);
        };
        let cell = self.table.cell(row, col);
        cell_float(cell).ok_or_else(|| self.invalid(row, column, cell, "a number"))
    }

    fn derived_count(&self, row: usize, column: &str) -> u32 {
        self.count(row, column).unwrap_or_else(|err| {
            warn!(%err, "reading as 0");
            0
        })
    }

    fn derived_rate(&self, row: usize, column: &str) -> f64 {
        self.rate(row, column).unwrap_or_else(|err| {
            warn!(%err, "reading as 0");
            0.0
        })
    }

    fn missing(&self, row: usize, column: &str) -> StatsError {
        StatsError::MissingValue {
            sheet: self.table.name.clone(),
            row: self.table.sheet_row(row),
            column: column.to_string(),
        }
    }

    fn invalid(&self, row: usize, column: &str, cell: &Cell, expected: &'static str) -> StatsError {
        StatsError::InvalidCell {
            sheet: self.table.name.clone(),
            row: self.table.sheet_row(row),
            column: column.to_string(),
            value: cell.display(),
            expected,
        }
    }
}

// Numbers render without a trailing `.0` so numeric ids compare like text.
fn cell_text(cell: &Cell) -> Option<String> {
    let cell = cell.value();
    if cell.is_blank() {
        return None;
    }
    match cell {
        Cell::Text(s) => Some(s.clone()),
        Cell::Float(v) | Cell::Date(v) => Some(format_number(*v)),
        other => Some(other.display()),
    }
}

// Blank reads as zero.
fn cell_integer(cell: &Cell) -> Option<i64> {
    match cell.value() {
        Cell::Empty => Some(0),
        Cell::Int(v) => Some(*v),
        Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(0);
            }
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && v.fract() == 0.0)
                    .map(|v| v as i64)
            })
        }
        _ => None,
    }
}

fn cell_float(cell: &Cell) -> Option<f64> {
    match cell.value() {
        Cell::Empty => Some(0.0),
        Cell::Int(v) => Some(*v as f64),
        Cell::Float(v) if v.is_finite() => Some(*v),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
        _ => None,
    }
}

const TEXT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const TEXT_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell.value() {
        Cell::Date(serial) | Cell::Float(serial) => serial_to_date(*serial),
        Cell::Int(serial) => serial_to_date(*serial as f64),
        Cell::Text(s) => {
            let s = s.trim();
            TEXT_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .or_else(|| {
                    TEXT_DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|dt| dt.date())
                })
        }
        _ => None,
    }
}

// Excel counts days from 1899-12-30.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}
