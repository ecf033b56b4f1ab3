use football_stats::boards::{BoardSpec, BoardsConfig, build_board};
use football_stats::export::{export_boards_json, export_boards_xlsx, render_text};
use football_stats::model::Player;
use football_stats::rank::StatKey;
use football_stats::workbook::StatsWorkbook;

fn roster() -> Vec<Player> {
    [("Rossi", 3, 2, 3), ("Verdi", 3, 0, 1), ("Bianchi", 0, 0, 0)]
        .into_iter()
        .map(|(name, played, won, goals)| {
            let mut p = Player::named(name);
            p.matches_played = played;
            p.games_won = won;
            p.goals_scored = goals;
            p.goals_per_game = goals as f64 / played.max(1) as f64;
            p.win_pct = if played > 0 { won as f64 / played as f64 * 100.0 } else { 0.0 };
            p
        })
        .collect()
}

#[test]
fn text_board_lists_ranked_players_with_two_decimal_rates() {
    let board = build_board(&roster(), &BoardSpec::category("Top Scorers", StatKey::GoalScored));
    let text = render_text(&board);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Top Scorers");
    assert!(lines[1].contains("Player Name"));
    assert!(lines[3].starts_with("1  Rossi"));
    assert!(lines[4].starts_with("2  Verdi"));
    assert!(!text.contains("Bianchi"));

    let full = build_board(&roster(), &BoardsConfig::default().leaderboard);
    assert!(render_text(&full).contains("66.67"));
}

#[test]
fn empty_board_says_so() {
    let board = build_board(&[], &BoardSpec::category("Top Assists", StatKey::Assists));
    assert!(render_text(&board).ends_with("(no players)\n"));
}

#[test]
fn xlsx_export_writes_one_sheet_per_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.xlsx");
    let boards = BoardsConfig::default().build_all(&roster());

    let report = export_boards_xlsx(&path, &boards, None).unwrap();
    assert_eq!(report.boards, 6);
    assert_eq!(report.sheet_names[0], "Overall Leaderboard");

    let written = StatsWorkbook::open(&path).unwrap();
    assert_eq!(written.sheets.len(), 7);
    let top = written.sheet("Overall Leaderboard").unwrap();
    assert_eq!(top.headers[0], "Player Name");
    assert_eq!(top.rows.len(), 2);
    assert!(written.sheet("Info").is_ok());
    assert!(!dir.path().join("boards.xlsx.tmp").exists());
}

#[test]
fn json_export_is_an_array_of_boards() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boards.json");
    let boards = BoardsConfig::default().build_all(&roster());

    export_boards_json(&path, &boards).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 6);
    assert_eq!(arr[0]["rows"][0]["podium"], "Gold");
    assert_eq!(arr[0]["rows"][0]["values"][0], "Rossi");
    assert_eq!(arr[0]["columns"][11], "% Win");
}
