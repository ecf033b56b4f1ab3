use football_stats::boards::{BoardSpec, BoardValue, BoardsConfig, Column, LeaderboardVariant, build_board};
use football_stats::model::Player;
use football_stats::rank::{Podium, RankSpec, SortKey, StatKey, rank, rank_by};

fn player(name: &str, played: u32, won: u32) -> Player {
    let mut p = Player::named(name);
    p.matches_played = played;
    p.games_won = won;
    p
}

fn names(rows: &[&Player]) -> Vec<String> {
    rows.iter().map(|p| p.name.clone()).collect()
}

#[test]
fn ties_keep_input_order() {
    let players = vec![player("C", 3, 1), player("A", 3, 2), player("B", 3, 2)];
    let out = rank_by(&players, 1, &[StatKey::GamesWon], true, None);
    assert_eq!(names(&out), vec!["A", "B", "C"]);
}

#[test]
fn threshold_excludes_players_without_matches() {
    let mut idle = player("Idle", 0, 0);
    idle.goals_scored = 99;
    idle.own_goals = 99;
    let players = vec![idle, player("A", 1, 0), player("B", 2, 1)];

    for key in StatKey::ALL {
        let out = rank_by(&players, 1, &[key], true, None);
        assert!(out.iter().all(|p| p.name != "Idle"), "{key} leaked idle player");
        assert_eq!(out.len(), 2);
    }
}

#[test]
fn higher_threshold_filters_more() {
    let players = vec![player("A", 1, 1), player("B", 5, 0), player("C", 3, 3)];
    let out = rank_by(&players, 3, &[StatKey::GamesWon], true, None);
    assert_eq!(names(&out), vec!["C", "B"]);
}

#[test]
fn second_key_breaks_first_key_ties() {
    let mut a = player("A", 4, 2);
    a.goal_difference = 1;
    let mut b = player("B", 4, 2);
    b.goal_difference = 6;
    let players = vec![a, b];

    let spec = RankSpec {
        min_matches: 1,
        sort_keys: LeaderboardVariant::GoalDifference.sort_keys(),
        limit: None,
    };
    assert_eq!(names(&rank(&players, &spec)), vec!["B", "A"]);
}

#[test]
fn first_key_dominates_later_keys() {
    let mut a = player("A", 4, 3);
    a.goals_scored = 0;
    let mut b = player("B", 4, 2);
    b.goals_scored = 30;
    b.mvp = 4;
    let players = vec![b, a];

    let out = rank_by(&players, 1, &[StatKey::GamesWon, StatKey::GoalScored, StatKey::Mvp], true, None);
    assert_eq!(names(&out), vec!["A", "B"]);
}

#[test]
fn rate_keys_sort_on_unrounded_values() {
    let mut a = player("A", 3, 2);
    a.win_pct = 66.666_666;
    let mut b = player("B", 3, 2);
    b.win_pct = 66.67;
    let players = vec![a, b];

    let out = rank_by(&players, 1, &[StatKey::WinPct], true, None);
    assert_eq!(names(&out), vec!["B", "A"]);
}

#[test]
fn limit_truncates_after_sorting() {
    let players: Vec<Player> = (0..8).map(|i| player(&format!("P{i}"), 8, i)).collect();
    let spec = RankSpec {
        min_matches: 1,
        sort_keys: vec![SortKey::desc(StatKey::GamesWon)],
        limit: Some(5),
    };
    assert_eq!(names(&rank(&players, &spec)), vec!["P7", "P6", "P5", "P4", "P3"]);
}

#[test]
fn board_marks_podium_and_projects_columns() {
    let mut players = vec![
        player("A", 2, 0),
        player("B", 2, 0),
        player("C", 2, 0),
        player("D", 2, 0),
        player("E", 0, 0),
    ];
    for (p, goals) in players.iter_mut().zip([1, 4, 2, 3, 9]) {
        p.goals_scored = goals;
        p.goals_per_game = goals as f64 / 2.0;
    }

    let board = build_board(&players, &BoardSpec::category("Top Scorers", StatKey::GoalScored));
    assert_eq!(board.headers(), vec!["Player Name", "Goal Scored"]);
    let podium: Vec<Option<Podium>> = board.rows.iter().map(|r| r.podium).collect();
    assert_eq!(
        podium,
        vec![Some(Podium::Gold), Some(Podium::Silver), Some(Podium::Bronze), None]
    );
    assert_eq!(
        board.rows[0].values,
        vec![BoardValue::Text("B".to_string()), BoardValue::Count(4)]
    );

    let spec = BoardSpec {
        title: "Rates".to_string(),
        columns: vec![Column::PlayerName, Column::Stat(StatKey::GoalsPerGame)],
        sort_keys: vec![SortKey::desc(StatKey::GoalsPerGame)],
        limit: Some(1),
        min_matches: 1,
    };
    let rates = build_board(&players, &spec);
    assert_eq!(rates.rows.len(), 1);
    assert_eq!(rates.rows[0].values[1], BoardValue::Rate(2.0));
    assert_eq!(rates.rows[0].values[1].display(), "2.00");
}

#[test]
fn default_config_builds_leaderboard_and_five_categories() {
    let players = vec![player("A", 1, 1), player("B", 1, 0)];
    let boards = BoardsConfig::default().build_all(&players);
    assert_eq!(boards.len(), 6);
    assert_eq!(boards[0].columns.len(), 12);
    assert!(boards[1..].iter().all(|b| b.rows.len() <= 5));
}

#[test]
fn boards_config_json_fills_missing_fields() {
    let raw = r#"{
        "leaderboard": {
            "title": "Table",
            "columns": ["Player Name", "Games Won", "% Win"],
            "sort_keys": ["Games Won", {"stat": "% Win"}, {"stat": "Games Lost", "descending": false}]
        }
    }"#;
    let cfg = BoardsConfig::from_json(raw).expect("config should parse");
    assert_eq!(cfg.leaderboard.min_matches, 1);
    assert_eq!(cfg.leaderboard.limit, None);
    assert_eq!(
        cfg.leaderboard.sort_keys,
        vec![
            SortKey::desc(StatKey::GamesWon),
            SortKey::desc(StatKey::WinPct),
            SortKey::asc(StatKey::GamesLost),
        ]
    );
    assert_eq!(cfg.categories.len(), 5);

    let cfg = cfg.with_min_matches(3);
    assert!(cfg.boards().all(|b| b.min_matches == 3));
}

#[test]
fn boards_config_rejects_unknown_columns() {
    let raw = r#"{"categories": [{"title": "x", "columns": ["Player Name", "Goals"], "sort_keys": ["Goal Scored"]}]}"#;
    assert!(BoardsConfig::from_json(raw).is_err());
}

#[test]
fn boards_config_serializes_with_column_names() {
    let json = serde_json::to_string(&BoardsConfig::for_variant(LeaderboardVariant::WinRate))
        .expect("config should serialize");
    assert!(json.contains("\"% Win\""));
    let back = BoardsConfig::from_json(&json).expect("config should parse back");
    assert_eq!(back, BoardsConfig::for_variant(LeaderboardVariant::WinRate));
}
