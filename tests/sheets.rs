use football_stats::StatsError;
use football_stats::model::Outcome;
use football_stats::sheets::{read_lineups, read_matches, read_players};
use football_stats::table::{Cell, Table};

const LINEUP_HEADERS: [&str; 5] = ["Match ID", "Player Name", "Goals Scored", "Assists", "Result"];

fn lineup_row(id: i64, name: &str, goals: Cell, result: &str) -> Vec<Cell> {
    vec![Cell::Int(id), Cell::text(name), goals, Cell::Int(0), Cell::text(result)]
}

#[test]
fn blank_match_id_in_filled_row_is_missing_value() {
    let mut table = Table::new("Matches", &["Match ID", "Date", "MVP"]);
    table.push_row(vec![Cell::Int(1), Cell::Date(45292.0), Cell::text("Rossi")]);
    table.push_row(vec![Cell::Empty, Cell::Date(45299.0), Cell::text("Verdi")]);

    assert_eq!(
        read_matches(&table).unwrap_err(),
        StatsError::MissingValue {
            sheet: "Matches".to_string(),
            row: 3,
            column: "Match ID".to_string(),
        }
    );
}

#[test]
fn whitespace_match_id_in_lineups_is_missing_value() {
    let mut table = Table::new("Team Lineups", &LINEUP_HEADERS);
    table.push_row(vec![Cell::text("  "), Cell::text("Rossi"), Cell::Int(1), Cell::Int(0), Cell::text("Win")]);

    assert!(matches!(
        read_lineups(&table),
        Err(StatsError::MissingValue { row: 2, column, .. }) if column == "Match ID"
    ));
}

#[test]
fn non_numeric_goals_is_invalid_cell() {
    let mut table = Table::new("Team Lineups", &LINEUP_HEADERS);
    table.push_row(lineup_row(1, "Rossi", Cell::Int(1), "Win"));
    table.push_row(lineup_row(1, "Verdi", Cell::text("two"), "Loss"));

    assert_eq!(
        read_lineups(&table).unwrap_err(),
        StatsError::InvalidCell {
            sheet: "Team Lineups".to_string(),
            row: 3,
            column: "Goals Scored".to_string(),
            value: "two".to_string(),
            expected: "a non-negative whole number",
        }
    );
}

#[test]
fn negative_goals_is_invalid_cell() {
    let mut table = Table::new("Team Lineups", &LINEUP_HEADERS);
    table.push_row(lineup_row(1, "Rossi", Cell::Int(-1), "Win"));

    assert!(matches!(
        read_lineups(&table),
        Err(StatsError::InvalidCell { row: 2, column, value, .. })
            if column == "Goals Scored" && value == "-1"
    ));
}

#[test]
fn all_blank_rows_are_skipped_and_rows_keep_sheet_numbers() {
    let mut table = Table::new("Team Lineups", &LINEUP_HEADERS);
    table.push_row(lineup_row(1, "Rossi", Cell::Int(2), "Win"));
    table.push_row(vec![Cell::Empty, Cell::text(" "), Cell::Empty, Cell::Empty, Cell::Empty]);
    table.push_row(lineup_row(1, "Verdi", Cell::Int(0), "Loss"));

    let entries = read_lineups(&table).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].player, "Verdi");
    assert_eq!(entries[1].result, Outcome::Loss);

    table.push_row(vec![]);
    table.push_row(lineup_row(2, "Bianchi", Cell::text("-"), "Draw"));
    assert!(matches!(
        read_lineups(&table),
        Err(StatsError::InvalidCell { row: 6, .. })
    ));
}

#[test]
fn carried_through_players_columns_stay_strict() {
    let mut table = Table::new("Players", &["Player Name", "Own Goals", "% Win"]);
    table.push_row(vec![Cell::text("Rossi"), Cell::Int(1), Cell::Error("#DIV/0!".to_string())]);
    let players = read_players(&table).unwrap();
    assert_eq!(players[0].own_goals, 1);
    assert_eq!(players[0].win_pct, 0.0);

    table.push_row(vec![Cell::text("Verdi"), Cell::Int(-1)]);
    assert!(matches!(
        read_players(&table),
        Err(StatsError::InvalidCell { row: 3, column, .. }) if column == "Own Goals"
    ));
}
