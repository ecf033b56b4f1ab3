pub mod aggregate;
pub mod boards;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod rank;
pub mod sheets;
pub mod table;
pub mod workbook;

pub use aggregate::{AggregateReport, AggregateWarning, aggregate, aggregate_with_report};
pub use error::{StatsError, StatsResult};
pub use model::{LineupEntry, Match, Outcome, Player, TeamSide};
pub use rank::{Podium, RankSpec, SortKey, StatKey, rank, rank_by};
