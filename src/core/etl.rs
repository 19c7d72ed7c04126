use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through fetch, compute and export.
pub struct StandingsRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StandingsRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Fetching championship snapshot...");
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} teams and {} matches ({} finished)",
            snapshot.teams.len(),
            snapshot.matches.len(),
            snapshot.finished_matches().count()
        );

        tracing::info!("Computing standings...");
        let report = self.pipeline.transform(snapshot).await?;
        if let Some(leader) = report.standings.rows.first() {
            tracing::info!(
                "Ranked {} teams, leader {} with {} points",
                report.standings.rows.len(),
                leader.entry.team_name,
                leader.entry.points
            );
        }
        if !report.standings.issues.is_empty() {
            tracing::warn!(
                "{} match references were skipped, see warnings above",
                report.standings.issues.len()
            );
        }

        tracing::info!("Writing outputs...");
        let written = self.pipeline.load(report).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(written)
    }
}
