use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::boards::{BoardValue, Leaderboard};
use crate::rank::Podium;

const SHEET_NAME_MAX: usize = 31;

pub struct ExportReport {
    pub boards: usize,
    pub rows: usize,
    pub sheet_names: Vec<String>,
}

/// One sheet per board plus an `Info` sheet. Podium rows are filled
/// gold/silver/bronze.
pub fn export_boards_xlsx(
    path: &Path,
    boards: &[Leaderboard],
    source: Option<&Path>,
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let styles = Styles::new();
    let mut used: HashSet<String> = HashSet::from(["info".to_string()]);
    let mut sheet_names = Vec::with_capacity(boards.len());
    let mut rows = 0usize;

    for board in boards {
        let name = unique_sheet_name(&board.title, &mut used);
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name)?;
        write_board(sheet, board, &styles)
            .with_context(|| format!("write board `{}`", board.title))?;
        rows += board.rows.len();
        sheet_names.push(name);
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Info")?;
        let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let source = source.map(|p| p.display().to_string()).unwrap_or_default();
        let info = [
            ("Generated", generated),
            ("Source", source),
            ("Boards", boards.len().to_string()),
        ];
        for (idx, (key, value)) in info.iter().enumerate() {
            sheet.write_string_with_format(idx as u32, 0, *key, &styles.header)?;
            sheet.write_string(idx as u32, 1, value)?;
        }
        sheet.set_column_width(1, 40)?;
    }

    let tmp = path.with_extension("xlsx.tmp");
    workbook
        .save(&tmp)
        .with_context(|| format!("failed writing workbook to {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;

    Ok(ExportReport {
        boards: boards.len(),
        rows,
        sheet_names,
    })
}

pub fn export_boards_json(path: &Path, boards: &[Leaderboard]) -> Result<()> {
    let json = serde_json::to_string_pretty(boards).context("serialize boards")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

pub fn render_text(board: &Leaderboard) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(board.headers().iter().map(|h| h.to_string()));

    let mut lines: Vec<Vec<String>> = vec![header];
    for row in &board.rows {
        let mut cells = vec![(row.position + 1).to_string()];
        cells.extend(row.values.iter().map(BoardValue::display));
        lines.push(cells);
    }

    let ncols = lines.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|c| {
            lines
                .iter()
                .filter_map(|l| l.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{}\n", board.title);
    for (idx, line) in lines.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(c, s)| {
                let pad = widths[c].saturating_sub(s.chars().count());
                // Names read left-aligned, numbers right-aligned.
                if c == 0 || s.parse::<f64>().is_ok() {
                    format!("{}{s}", " ".repeat(pad))
                } else {
                    format!("{s}{}", " ".repeat(pad))
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
        if idx == 0 {
            let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            out.push_str(&"-".repeat(total));
            out.push('\n');
        }
    }
    if board.rows.is_empty() {
        out.push_str("(no players)\n");
    }
    out
}

struct Styles {
    header: Format,
    // Indexed by podium (gold, silver, bronze, none); second is the 0.00 variant.
    rows: [(Format, Format); 4],
}

impl Styles {
    fn new() -> Self {
        let row = |fill: Option<(u32, Option<Color>)>| {
            let mut base = Format::new();
            if let Some((rgb, font)) = fill {
                base = base.set_background_color(Color::RGB(rgb));
                if let Some(font) = font {
                    base = base.set_font_color(font);
                }
            }
            let rate = base.clone().set_num_format("0.00");
            (base, rate)
        };
        Self {
            header: Format::new().set_bold(),
            rows: [
                row(Some((0xFFFF00, None))),
                row(Some((0xD3D3D3, None))),
                row(Some((0x8B4513, Some(Color::White)))),
                row(None),
            ],
        }
    }

    fn for_row(&self, podium: Option<Podium>) -> &(Format, Format) {
        match podium {
            Some(Podium::Gold) => &self.rows[0],
            Some(Podium::Silver) => &self.rows[1],
            Some(Podium::Bronze) => &self.rows[2],
            None => &self.rows[3],
        }
    }
}

fn write_board(sheet: &mut Worksheet, board: &Leaderboard, styles: &Styles) -> Result<()> {
    for (col, header) in board.headers().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &styles.header)?;
        sheet.set_column_width(col as u16, header.len().max(10) as f64 + 2.0)?;
    }

    for (r, row) in board.rows.iter().enumerate() {
        let (plain, rate) = styles.for_row(row.podium);
        let xrow = r as u32 + 1;
        for (c, value) in row.values.iter().enumerate() {
            let col = c as u16;
            match value {
                BoardValue::Text(s) => sheet.write_string_with_format(xrow, col, s, plain)?,
                BoardValue::Count(v) => sheet.write_number_with_format(xrow, col, *v as f64, plain)?,
                BoardValue::Rate(v) => sheet.write_number_with_format(xrow, col, *v, rate)?,
            };
        }
    }
    Ok(())
}

// Excel rejects some characters and caps names at 31; uniqueness is case-insensitive.
fn unique_sheet_name(title: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let base: String = if cleaned.is_empty() {
        "Board".to_string()
    } else {
        cleaned.chars().take(SHEET_NAME_MAX).collect()
    };

    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        let keep = SHEET_NAME_MAX.saturating_sub(suffix.chars().count());
        candidate = format!("{}{suffix}", base.chars().take(keep).collect::<String>());
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}
