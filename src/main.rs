use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use football_stats::aggregate::AggregateReport;
use football_stats::boards::{BoardsConfig, LeaderboardVariant};
use football_stats::config::AppConfig;
use football_stats::export;
use football_stats::logging;
use football_stats::model::Player;
use football_stats::sheets;
use football_stats::workbook::{self, StatsWorkbook};

const DEFAULT_EXPORT_XLSX: &str = "leaderboards.xlsx";

#[derive(Debug, Parser)]
#[command(name = "football_stats", version, about = "Recompute and rank football season stats from a workbook")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rebuild the Players sheet from Matches and Team Lineups.
    Recompute {
        #[arg(long)]
        workbook: Option<PathBuf>,
        /// Where to write the result; defaults to overwriting the input.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the leaderboard and category boards.
    Show(BoardArgs),
    /// Write the boards to xlsx and/or JSON.
    Export {
        #[command(flatten)]
        boards: BoardArgs,
        #[arg(long)]
        xlsx: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct BoardArgs {
    #[arg(long)]
    workbook: Option<PathBuf>,
    /// JSON board configuration.
    #[arg(long)]
    boards: Option<PathBuf>,
    #[arg(long)]
    min_matches: Option<u32>,
    #[arg(long, value_enum)]
    variant: Option<LeaderboardVariant>,
    /// Aggregate from lineups in memory instead of trusting the Players sheet.
    #[arg(long)]
    recompute: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Command::Recompute { workbook, output } => run_recompute(&config, workbook, output),
        Command::Show(args) => run_show(&config, &args),
        Command::Export { boards, xlsx, json } => run_export(&config, &boards, xlsx, json),
    }
}

fn run_recompute(config: &AppConfig, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let input = config.workbook_or(input);
    let output = output.unwrap_or_else(|| input.clone());
    let report = workbook::recompute_workbook(&input, &output, &config.sheets)?;

    println!("Recompute complete");
    println!("Workbook: {}", output.display());
    println!("Players: {}", report.players.len());
    println!(
        "With appearances: {}",
        report.players.iter().filter(|p| p.matches_played > 0).count()
    );
    print_season(&report);
    Ok(())
}

fn run_show(config: &AppConfig, args: &BoardArgs) -> Result<()> {
    let (_, players) = load_players(config, args)?;
    let boards = boards_config(config, args)?.build_all(&players);
    for (idx, board) in boards.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        print!("{}", export::render_text(board));
    }
    Ok(())
}

fn run_export(
    config: &AppConfig,
    args: &BoardArgs,
    xlsx: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let (source, players) = load_players(config, args)?;
    let boards = boards_config(config, args)?.build_all(&players);

    let xlsx = match (&xlsx, &json) {
        (None, None) => Some(PathBuf::from(DEFAULT_EXPORT_XLSX)),
        _ => xlsx,
    };
    if let Some(path) = xlsx {
        let report = export::export_boards_xlsx(&path, &boards, Some(&source))?;
        println!(
            "Wrote {} boards ({} rows) to {}",
            report.boards,
            report.rows,
            path.display()
        );
        println!("Sheets: {}", report.sheet_names.join(", "));
    }
    if let Some(path) = json {
        export::export_boards_json(&path, &boards)?;
        println!("Wrote {} boards to {}", boards.len(), path.display());
    }
    Ok(())
}

fn load_players(config: &AppConfig, args: &BoardArgs) -> Result<(PathBuf, Vec<Player>)> {
    let path = config.workbook_or(args.workbook.clone());
    let workbook = StatsWorkbook::open(&path)?;
    let players = if args.recompute {
        let season = workbook
            .season(&config.sheets)
            .with_context(|| format!("decode season tables from {}", path.display()))?;
        let report = season.aggregate();
        print_season(&report);
        report.players
    } else {
        let table = workbook.sheet(&config.sheets.players)?;
        sheets::read_players(table)
            .with_context(|| format!("decode players from {}", path.display()))?
    };
    Ok((path, players))
}

fn boards_config(config: &AppConfig, args: &BoardArgs) -> Result<BoardsConfig> {
    let mut boards = match args.boards.as_ref().or(config.boards.as_ref()) {
        Some(path) => {
            let mut loaded = BoardsConfig::load(path)?;
            if let Some(variant) = args.variant {
                loaded.leaderboard.sort_keys = variant.sort_keys();
            }
            loaded
        }
        None => BoardsConfig::for_variant(args.variant.unwrap_or_default()),
    };
    if let Some(min) = args.min_matches.or(config.min_matches) {
        boards = boards.with_min_matches(min);
    }
    Ok(boards)
}

fn print_season(report: &AggregateReport) {
    if let Some((first, last)) = report.season_span {
        println!("Season: {first} to {last}");
    }
    // Each warning is already logged as it is found.
    if !report.warnings.is_empty() {
        println!("Warnings: {}", report.warnings.len());
    }
}
