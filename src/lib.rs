pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{SourceSpec, TomlConfig};

pub use adapters::{FileRecordSource, HttpRecordSource, LocalStorage, RecordSource};
pub use core::{compute_for_snapshot, compute_standings, etl::StandingsRunner, pipeline::StandingsPipeline};
pub use domain::model::{
    ChampionshipSnapshot, Match, MatchStatus, ScoringRules, StandingsEntry, StandingsRow,
    StandingsTable, Team, Zone,
};
pub use utils::error::{Result, StandingsError};
