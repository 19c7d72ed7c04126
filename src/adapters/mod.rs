// Adapters layer: concrete record sources and storage backends.

pub mod file_source;
pub mod http_source;
pub mod storage;

use crate::config::SourceSpec;
use crate::domain::model::ChampionshipSnapshot;
use crate::domain::ports::MatchRecordSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use file_source::{FileRecordSource, StoreDump};
pub use http_source::HttpRecordSource;
pub use storage::LocalStorage;

/// Source picked at runtime from configuration.
#[derive(Debug, Clone)]
pub enum RecordSource {
    File(FileRecordSource),
    Http(HttpRecordSource),
}

impl RecordSource {
    pub fn from_spec(spec: &SourceSpec) -> Result<Self> {
        match spec {
            SourceSpec::File { path } => Ok(Self::File(FileRecordSource::new(path))),
            SourceSpec::Http {
                endpoint,
                headers,
                timeout_seconds,
            } => Ok(Self::Http(HttpRecordSource::new(
                endpoint,
                headers,
                Duration::from_secs(*timeout_seconds),
            )?)),
        }
    }
}

#[async_trait]
impl MatchRecordSource for RecordSource {
    async fn fetch_snapshot(&self, championship_id: &str) -> Result<ChampionshipSnapshot> {
        match self {
            Self::File(source) => source.fetch_snapshot(championship_id).await,
            Self::Http(source) => source.fetch_snapshot(championship_id).await,
        }
    }
}
