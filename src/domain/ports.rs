use crate::domain::model::{ChampionshipSnapshot, StandingsReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read-only access to the league store. Implementations return every match of
/// the championship; the engine filters on status itself.
#[async_trait]
pub trait MatchRecordSource: Send + Sync {
    async fn fetch_snapshot(&self, championship_id: &str) -> Result<ChampionshipSnapshot>;
}

pub trait ConfigProvider: Send + Sync {
    fn championship_id(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn bundle_filename(&self) -> Option<&str>;
    fn top_scorers(&self) -> Option<usize>;
    fn include_overview(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ChampionshipSnapshot>;
    async fn transform(&self, snapshot: ChampionshipSnapshot) -> Result<StandingsReport>;
    async fn load(&self, report: StandingsReport) -> Result<Vec<String>>;
}
