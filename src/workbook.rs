use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};
use tracing::{debug, info, warn};

use crate::aggregate::{AggregateReport, aggregate_with_report};
use crate::config::SheetNames;
use crate::error::{StatsError, StatsResult};
use crate::model::{LineupEntry, Match, Player};
use crate::sheets;
use crate::table::{Cell, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonData {
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub lineups: Vec<LineupEntry>,
}

impl SeasonData {
    pub fn aggregate(&self) -> AggregateReport {
        aggregate_with_report(&self.players, &self.matches, &self.lineups)
    }
}

/// Every sheet of a workbook, in file order. Formula cells keep their text
/// next to the cached result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsWorkbook {
    pub sheets: Vec<Table>,
}

impl StatsWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("open workbook {}", path.display()))?;
        let sheet_names = workbook.sheet_names().to_owned();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook
                .worksheet_range(&name)
                .with_context(|| format!("read sheet `{name}` from {}", path.display()))?;
            let mut table = table_from_range(&name, &range);
            match workbook.worksheet_formula(&name) {
                Ok(formulas) => attach_formulas(&mut table, &formulas),
                Err(err) => warn!(sheet = %name, %err, "formulas unreadable, keeping cached values only"),
            }
            debug!(sheet = %name, rows = table.rows.len(), columns = table.headers.len(), "loaded sheet");
            sheets.push(table);
        }
        Ok(Self { sheets })
    }

    pub fn sheet(&self, name: &str) -> StatsResult<&Table> {
        self.sheets
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| StatsError::MissingSheet {
                sheet: name.to_string(),
            })
    }

    pub fn sheet_mut(&mut self, name: &str) -> StatsResult<&mut Table> {
        self.sheets
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| StatsError::MissingSheet {
                sheet: name.to_string(),
            })
    }

    pub fn season(&self, names: &SheetNames) -> StatsResult<SeasonData> {
        Ok(SeasonData {
            players: sheets::read_players(self.sheet(&names.players)?)?,
            matches: sheets::read_matches(self.sheet(&names.matches)?)?,
            lineups: sheets::read_lineups(self.sheet(&names.lineups)?)?,
        })
    }

    pub fn update_players(&mut self, names: &SheetNames, players: &[Player]) -> StatsResult<()> {
        sheets::write_players(self.sheet_mut(&names.players)?, players)
    }

    // Written to a temporary file first; a failed write leaves `path` alone.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        for table in &self.sheets {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(&table.name)
                .with_context(|| format!("name sheet `{}`", table.name))?;
            write_table(sheet, table, &date_format)
                .with_context(|| format!("write sheet `{}`", table.name))?;
        }

        let tmp = path.with_extension("xlsx.tmp");
        workbook
            .save(&tmp)
            .with_context(|| format!("failed writing workbook to {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("replace {} with {}", path.display(), tmp.display()))?;
        Ok(())
    }
}

pub fn recompute_workbook(input: &Path, output: &Path, names: &SheetNames) -> Result<AggregateReport> {
    let mut workbook = StatsWorkbook::open(input)?;
    let season = workbook
        .season(names)
        .with_context(|| format!("decode season tables from {}", input.display()))?;
    let report = season.aggregate();
    workbook.update_players(names, &report.players)?;
    workbook.save(output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        players = report.players.len(),
        "wrote recomputed players"
    );
    Ok(report)
}

fn table_from_range(name: &str, range: &Range<Data>) -> Table {
    let origin = range.start().unwrap_or((0, 0));
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|cells| cells.iter().map(|c| convert_cell(c).display()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|cells| cells.iter().map(convert_cell).collect())
        .collect();

    Table {
        name: name.to_string(),
        origin,
        headers,
        rows,
    }
}

fn attach_formulas(table: &mut Table, formulas: &Range<String>) {
    let Some((start_row, start_col)) = formulas.start() else {
        return;
    };
    let (row0, col0) = (table.origin.0 as usize, table.origin.1 as usize);

    for (r, c, text) in formulas.used_cells() {
        if text.is_empty() {
            continue;
        }
        // Formulas in the header row or left of the table stay as read.
        let (Some(row), Some(col)) = (
            (start_row as usize + r).checked_sub(row0 + 1),
            (start_col as usize + c).checked_sub(col0),
        ) else {
            continue;
        };
        if table.rows.len() <= row {
            table.rows.resize(row + 1, Vec::new());
        }
        let cached = table.cell(row, col).clone();
        table.set(
            row,
            col,
            Cell::Formula {
                text: text.clone(),
                cached: Box::new(cached),
            },
        );
    }
}

fn convert_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Bool(v) => Cell::Bool(*v),
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::Float(*v),
        Data::String(v) => Cell::Text(v.clone()),
        Data::DateTime(v) => Cell::Date(v.as_f64()),
        Data::DateTimeIso(v) | Data::DurationIso(v) => Cell::Text(v.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

fn write_table(sheet: &mut Worksheet, table: &Table, date_format: &Format) -> Result<()> {
    let (row0, col0) = table.origin;
    let col0 = u16::try_from(col0).context("sheet origin column out of range")?;

    for (idx, header) in table.headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        sheet.write_string(row0, col0 + idx as u16, header)?;
    }

    for (r, cells) in table.rows.iter().enumerate() {
        let row = row0 + 1 + r as u32;
        for (c, cell) in cells.iter().enumerate() {
            let col = col0 + c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Bool(v) => {
                    sheet.write_boolean(row, col, *v)?;
                }
                Cell::Int(v) => {
                    sheet.write_number(row, col, *v as f64)?;
                }
                Cell::Float(v) => {
                    sheet.write_number(row, col, *v)?;
                }
                Cell::Text(s) | Cell::Error(s) => {
                    sheet.write_string(row, col, s)?;
                }
                Cell::Date(v) => {
                    sheet.write_number_with_format(row, col, *v, date_format)?;
                }
                Cell::Formula { text, cached } => {
                    let formula = Formula::new(text.as_str()).set_result(cached.display());
                    if matches!(cached.value(), Cell::Date(_)) {
                        sheet.write_formula_with_format(row, col, formula, date_format)?;
                    } else {
                        sheet.write_formula(row, col, formula)?;
                    }
                }
            }
        }
    }
    Ok(())
}
