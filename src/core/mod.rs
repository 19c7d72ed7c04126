pub mod aggregation;
pub mod etl;
pub mod export;
pub mod overview;
pub mod pipeline;
pub mod ranking;
pub mod scorers;
pub mod standings;
pub mod zones;

pub use crate::domain::model::{ChampionshipSnapshot, StandingsReport, StandingsTable};
pub use crate::domain::ports::{ConfigProvider, MatchRecordSource, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use standings::{compute_for_snapshot, compute_standings, StandingsInput};
