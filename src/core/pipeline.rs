use crate::core::export;
use crate::core::overview::match_overview;
use crate::core::scorers::top_scorers;
use crate::core::standings::compute_for_snapshot;
use crate::core::{ConfigProvider, MatchRecordSource, Pipeline, Storage};
use crate::domain::model::{ChampionshipFormat, ChampionshipSnapshot, StandingsReport};
use crate::utils::error::{Result, StandingsError};
use chrono::{DateTime, Utc};

pub struct StandingsPipeline<R: MatchRecordSource, S: Storage, C: ConfigProvider> {
    source: R,
    storage: S,
    config: C,
    reference_time: Option<DateTime<Utc>>,
}

impl<R: MatchRecordSource, S: Storage, C: ConfigProvider> StandingsPipeline<R, S, C> {
    pub fn new(source: R, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
            reference_time: None,
        }
    }

    /// Pins "now" for the match overview instead of reading the clock.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    fn output_location(&self, filename: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), filename)
    }
}

#[async_trait::async_trait]
impl<R: MatchRecordSource, S: Storage, C: ConfigProvider> Pipeline for StandingsPipeline<R, S, C> {
    async fn extract(&self) -> Result<ChampionshipSnapshot> {
        let championship_id = self.config.championship_id();

        let snapshot = match self.source.fetch_snapshot(championship_id).await {
            Ok(snapshot) => snapshot,
            Err(e @ StandingsError::ChampionshipNotFound { .. }) => return Err(e),
            Err(e) => {
                return Err(StandingsError::DataUnavailable {
                    championship_id: championship_id.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        if snapshot.championship.format != ChampionshipFormat::RoundRobin {
            tracing::warn!(
                "Championship {} uses {:?}; standings aggregate all finished matches as a single table",
                snapshot.championship.name,
                snapshot.championship.format
            );
        }

        Ok(snapshot)
    }

    async fn transform(&self, snapshot: ChampionshipSnapshot) -> Result<StandingsReport> {
        let standings = compute_for_snapshot(&snapshot)?;

        for issue in &standings.issues {
            tracing::warn!("⚠️ {}", StandingsError::from(issue.clone()));
        }

        let scorers = self
            .config
            .top_scorers()
            .map(|limit| top_scorers(&snapshot, Some(limit)));

        let overview = self.config.include_overview().then(|| {
            let now = self.reference_time.unwrap_or_else(Utc::now);
            match_overview(&snapshot, now)
        });

        Ok(StandingsReport {
            championship_name: snapshot.championship.name,
            standings,
            scorers,
            overview,
        })
    }

    async fn load(&self, report: StandingsReport) -> Result<Vec<String>> {
        let files = export::render(&report, self.config.output_formats())?;

        if let Some(bundle_name) = self.config.bundle_filename() {
            tracing::debug!("Creating ZIP bundle with {} files", files.len());
            let zip_data = export::bundle(&files)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(bundle_name, &zip_data).await?;
            return Ok(vec![self.output_location(bundle_name)]);
        }

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            self.storage
                .write_file(&file.filename, file.contents.as_bytes())
                .await?;
            written.push(self.output_location(&file.filename));
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Championship, ChampionshipStatus, EventType, Match, MatchEvent, MatchStatus, Player,
        PlayerPosition, Team,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                StandingsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    enum MockSource {
        Ready(ChampionshipSnapshot),
        Missing,
        Down,
    }

    #[async_trait]
    impl MatchRecordSource for MockSource {
        async fn fetch_snapshot(&self, championship_id: &str) -> Result<ChampionshipSnapshot> {
            match self {
                MockSource::Ready(snapshot) => Ok(snapshot.clone()),
                MockSource::Missing => Err(StandingsError::ChampionshipNotFound {
                    championship_id: championship_id.to_string(),
                }),
                MockSource::Down => Err(StandingsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "store offline",
                ))),
            }
        }
    }

    struct MockConfig {
        formats: Vec<String>,
        bundle: Option<String>,
        top_scorers: Option<usize>,
        overview: bool,
    }

    impl MockConfig {
        fn new(formats: &[&str]) -> Self {
            Self {
                formats: formats.iter().map(|f| f.to_string()).collect(),
                bundle: None,
                top_scorers: None,
                overview: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn championship_id(&self) -> &str {
            "c1"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn bundle_filename(&self) -> Option<&str> {
            self.bundle.as_deref()
        }

        fn top_scorers(&self) -> Option<usize> {
            self.top_scorers
        }

        fn include_overview(&self) -> bool {
            self.overview
        }
    }

    fn finished(id: &str, home: &str, away: &str, hs: u32, aws: u32) -> Match {
        Match {
            id: id.to_string(),
            championship_id: "c1".to_string(),
            home_team_id: home.to_string(),
            away_team_id: away.to_string(),
            round: 1,
            status: MatchStatus::Finished,
            home_score: Some(hs),
            away_score: Some(aws),
            match_date: None,
            location: None,
        }
    }

    fn snapshot() -> ChampionshipSnapshot {
        ChampionshipSnapshot {
            championship: Championship {
                id: "c1".to_string(),
                name: "Liga Teste".to_string(),
                format: ChampionshipFormat::RoundRobin,
                status: ChampionshipStatus::Active,
                max_teams: Some(20),
                start_date: None,
                end_date: None,
                points_victory: Some(3),
                points_draw: Some(1),
                points_defeat: Some(0),
            },
            teams: vec![Team::new("a", "A"), Team::new("b", "B"), Team::new("c", "C")],
            matches: vec![
                finished("m1", "a", "b", 2, 1),
                finished("m2", "b", "c", 0, 0),
                finished("m3", "c", "a", 1, 1),
                finished("m4", "a", "x", 5, 0),
            ],
            players: vec![Player {
                id: "p1".to_string(),
                team_id: "a".to_string(),
                name: "Silva".to_string(),
                position: PlayerPosition::Forward,
                shirt_number: Some(9),
            }],
            events: vec![MatchEvent {
                id: "e1".to_string(),
                match_id: "m1".to_string(),
                player_id: "p1".to_string(),
                event_type: EventType::Goal,
                minute: Some(10),
            }],
        }
    }

    #[tokio::test]
    async fn test_source_failure_becomes_data_unavailable() {
        let pipeline = StandingsPipeline::new(MockSource::Down, MockStorage::new(), MockConfig::new(&["csv"]));
        assert!(matches!(
            pipeline.extract().await,
            Err(StandingsError::DataUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_not_found_is_passed_through() {
        let pipeline =
            StandingsPipeline::new(MockSource::Missing, MockStorage::new(), MockConfig::new(&["csv"]));
        assert!(matches!(
            pipeline.extract().await,
            Err(StandingsError::ChampionshipNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_keeps_issues_and_optional_sections() {
        let mut config = MockConfig::new(&["json"]);
        config.top_scorers = Some(5);
        config.overview = true;
        let pipeline = StandingsPipeline::new(MockSource::Ready(snapshot()), MockStorage::new(), config)
            .with_reference_time(Utc::now());

        let snap = pipeline.extract().await.unwrap();
        let report = pipeline.transform(snap).await.unwrap();

        assert_eq!(report.championship_name, "Liga Teste");
        assert_eq!(report.standings.issues.len(), 1);
        assert_eq!(report.standings.rows[0].entry.team_name, "A");
        assert_eq!(report.scorers.as_ref().map(Vec::len), Some(1));
        assert_eq!(report.overview.as_ref().map(|o| o.counts.finished), Some(4));
    }

    #[tokio::test]
    async fn test_transform_without_rules_fails() {
        let mut snap = snapshot();
        snap.championship.points_draw = None;
        let pipeline = StandingsPipeline::new(
            MockSource::Ready(snap.clone()),
            MockStorage::new(),
            MockConfig::new(&["csv"]),
        );
        assert!(matches!(
            pipeline.transform(snap).await,
            Err(StandingsError::MissingScoringRules { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_writes_each_format() {
        let storage = MockStorage::new();
        let pipeline = StandingsPipeline::new(
            MockSource::Ready(snapshot()),
            storage.clone(),
            MockConfig::new(&["csv", "tsv", "json"]),
        );

        let report = pipeline.transform(snapshot()).await.unwrap();
        let written = pipeline.load(report).await.unwrap();

        assert_eq!(
            written,
            vec![
                "test_output/standings.csv",
                "test_output/standings.tsv",
                "test_output/standings.json"
            ]
        );
        let csv = String::from_utf8(storage.get_file("standings.csv").await.unwrap()).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("1,a,A,"));
        assert!(storage.get_file("standings.tsv").await.is_some());
    }

    #[tokio::test]
    async fn test_load_bundle_writes_single_archive() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new(&["csv", "json"]);
        config.bundle = Some("standings.zip".to_string());
        let pipeline = StandingsPipeline::new(MockSource::Ready(snapshot()), storage.clone(), config);

        let report = pipeline.transform(snapshot()).await.unwrap();
        let written = pipeline.load(report).await.unwrap();

        assert_eq!(written, vec!["test_output/standings.zip"]);
        assert!(storage.get_file("standings.csv").await.is_none());

        let zip_data = storage.get_file("standings.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);
    }
}
