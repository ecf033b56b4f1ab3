use crate::error::{StatsError, StatsResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Excel serial date (days since 1899-12-30, fractional part is the time).
    Date(f64),
    Error(String),
    /// Formula text without the leading `=`, plus the value last computed for it.
    Formula { text: String, cached: Box<Cell> },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn value(&self) -> &Cell {
        match self {
            Self::Formula { cached, .. } => cached.value(),
            other => other,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self.value() {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format_number(*v),
            Self::Text(s) => s.clone(),
            Self::Date(v) => format_number(*v),
            Self::Error(e) => e.clone(),
            Self::Formula { cached, .. } => cached.display(),
        }
    }
}

pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: String,
    // Zero-based (row, column) of the header's first cell.
    pub origin: (u32, u32),
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            origin: (0, 0),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn require_column(&self, name: &str) -> StatsResult<usize> {
        self.column(name).ok_or_else(|| StatsError::MissingColumn {
            sheet: self.name.clone(),
            column: name.to_string(),
        })
    }

    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        self.headers.len() - 1
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
    }

    pub fn data_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.is_blank()))
            .map(|(idx, _)| idx)
    }

    pub fn sheet_row(&self, row: usize) -> usize {
        self.origin.0 as usize + row + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_match_trimmed_headers() {
        let table = Table {
            name: "Players".to_string(),
            origin: (0, 0),
            headers: vec![" Player Name ".to_string(), "MVP".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(table.column("Player Name"), Some(0));
        assert_eq!(table.column("mvp"), None);
        assert!(matches!(
            table.require_column("Assists"),
            Err(StatsError::MissingColumn { .. })
        ));
    }

    #[test]
    fn blank_rows_are_not_data() {
        let mut table = Table::new("Matches", &["Match ID"]);
        table.push_row(vec![Cell::Int(1)]);
        table.push_row(vec![Cell::Empty, Cell::text("  ")]);
        table.push_row(vec![Cell::Int(3)]);
        assert_eq!(table.data_rows().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table.sheet_row(2), 4);
    }

    #[test]
    fn set_pads_short_rows() {
        let mut table = Table::new("Players", &["Player Name"]);
        table.push_row(vec![Cell::text("Rossi")]);
        let col = table.ensure_column("MVP");
        table.set(0, col, Cell::Int(2));
        assert_eq!(table.cell(0, 1), &Cell::Int(2));
        assert_eq!(table.cell(5, 1), &Cell::Empty);
    }

    #[test]
    fn formulas_read_as_their_cached_value() {
        let cell = Cell::Formula {
            text: "C2/B2".to_string(),
            cached: Box::new(Cell::Float(0.5)),
        };
        assert_eq!(cell.value(), &Cell::Float(0.5));
        assert_eq!(cell.display(), "0.5");
        let blank = Cell::Formula {
            text: "\"\"".to_string(),
            cached: Box::new(Cell::text("")),
        };
        assert!(blank.is_blank());
    }

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(2.5), "2.5");
    }
}
