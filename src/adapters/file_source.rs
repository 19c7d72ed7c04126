use crate::domain::model::{
    Championship, ChampionshipSnapshot, ChampionshipTeam, Match, MatchEvent, Player, Team,
};
use crate::adapters::storage::LocalStorage;
use crate::domain::ports::{MatchRecordSource, Storage};
use crate::utils::error::{Result, StandingsError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Table-per-array export of the league store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDump {
    #[serde(default)]
    pub championships: Vec<Championship>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub championship_teams: Vec<ChampionshipTeam>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub match_events: Vec<MatchEvent>,
}

impl StoreDump {
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Selects one championship's slice of the dump.
    pub fn snapshot_for(&self, championship_id: &str) -> Result<ChampionshipSnapshot> {
        let championship = self
            .championships
            .iter()
            .find(|c| c.id == championship_id)
            .cloned()
            .ok_or_else(|| StandingsError::ChampionshipNotFound {
                championship_id: championship_id.to_string(),
            })?;

        let mut teams = Vec::new();
        for registration in self
            .championship_teams
            .iter()
            .filter(|ct| ct.championship_id == championship_id)
        {
            match self.teams.iter().find(|t| t.id == registration.team_id) {
                Some(team) => teams.push(team.clone()),
                None => tracing::warn!(
                    "Championship {} registers unknown team {}, skipping",
                    championship_id,
                    registration.team_id
                ),
            }
        }

        let matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| m.championship_id == championship_id)
            .cloned()
            .collect();

        let team_ids: HashSet<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        let match_ids: HashSet<&str> = matches.iter().map(|m| m.id.as_str()).collect();

        let players = self
            .players
            .iter()
            .filter(|p| team_ids.contains(p.team_id.as_str()))
            .cloned()
            .collect();
        let events = self
            .match_events
            .iter()
            .filter(|e| match_ids.contains(e.match_id.as_str()))
            .cloned()
            .collect();

        Ok(ChampionshipSnapshot {
            championship,
            teams,
            matches,
            players,
            events,
        })
    }
}

/// Reads a JSON `StoreDump` through a `Storage` on every fetch.
#[derive(Debug, Clone)]
pub struct FileRecordSource<S: Storage = LocalStorage> {
    storage: S,
    path: String,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (base, name) = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => (parent.to_path_buf(), name.to_string_lossy().into_owned()),
            _ => (PathBuf::new(), path.to_string_lossy().into_owned()),
        };
        Self::with_storage(LocalStorage::new(base), name)
    }
}

impl<S: Storage> FileRecordSource<S> {
    pub fn with_storage(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> MatchRecordSource for FileRecordSource<S> {
    async fn fetch_snapshot(&self, championship_id: &str) -> Result<ChampionshipSnapshot> {
        tracing::debug!("Reading store dump from {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        let dump = StoreDump::from_json(&data)?;
        tracing::debug!(
            "Store dump holds {} championships, {} teams, {} matches",
            dump.championships.len(),
            dump.teams.len(),
            dump.matches.len()
        );
        dump.snapshot_for(championship_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dump_json() -> serde_json::Value {
        serde_json::json!({
            "championships": [
                {"id": "c1", "name": "Serie A", "format": "round_robin", "status": "active",
                 "points_victory": 3, "points_draw": 1, "points_defeat": 0},
                {"id": "c2", "name": "Copa", "format": "single_elimination", "status": "upcoming"}
            ],
            "teams": [
                {"id": "t1", "name": "Alpha", "city": "Recife"},
                {"id": "t2", "name": "Bravo"},
                {"id": "t3", "name": "Charlie"}
            ],
            "championship_teams": [
                {"championship_id": "c1", "team_id": "t1"},
                {"championship_id": "c1", "team_id": "t2"},
                {"championship_id": "c1", "team_id": "t9"},
                {"championship_id": "c2", "team_id": "t3"}
            ],
            "matches": [
                {"id": "m1", "championship_id": "c1", "home_team_id": "t1", "away_team_id": "t2",
                 "round": 1, "status": "finished", "home_score": 1, "away_score": 0,
                 "match_date": "2024-03-10T18:00:00Z"},
                {"id": "m2", "championship_id": "c2", "home_team_id": "t3", "away_team_id": "t1",
                 "round": 1, "status": "scheduled"}
            ],
            "players": [
                {"id": "p1", "team_id": "t1", "name": "Silva", "position": "forward"},
                {"id": "p3", "team_id": "t3", "name": "Alves", "position": "defender"}
            ],
            "match_events": [
                {"id": "e1", "match_id": "m1", "player_id": "p1", "event_type": "goal", "minute": 12},
                {"id": "e2", "match_id": "m2", "player_id": "p3", "event_type": "yellow_card"}
            ]
        })
    }

    #[test]
    fn test_snapshot_selects_one_championship() {
        let dump: StoreDump = serde_json::from_value(dump_json()).unwrap();
        let snap = dump.snapshot_for("c1").unwrap();

        assert_eq!(snap.championship.name, "Serie A");
        let ids: Vec<&str> = snap.teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(snap.matches.len(), 1);
        assert_eq!(snap.players.len(), 1);
        assert_eq!(snap.events.len(), 1);
        assert_eq!(snap.teams[0].city.as_deref(), Some("Recife"));
    }

    #[test]
    fn test_unknown_championship() {
        let dump: StoreDump = serde_json::from_value(dump_json()).unwrap();
        assert!(matches!(
            dump.snapshot_for("nope"),
            Err(StandingsError::ChampionshipNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let dump = StoreDump::from_json(br#"{"championships": []}"#).unwrap();
        assert!(dump.teams.is_empty());
        assert!(dump.match_events.is_empty());
    }

    struct MemoryStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                StandingsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fetch_reads_through_storage() {
        let mut files = HashMap::new();
        files.insert("dumps/league.json".to_string(), dump_json().to_string().into_bytes());
        let source = FileRecordSource::with_storage(MemoryStorage { files }, "dumps/league.json");

        let snap = source.fetch_snapshot("c1").await.unwrap();
        assert_eq!(snap.teams.len(), 2);

        let missing = FileRecordSource::with_storage(MemoryStorage { files: HashMap::new() }, "absent.json");
        assert!(matches!(
            missing.fetch_snapshot("c1").await,
            Err(StandingsError::IoError(_))
        ));
    }

    #[test]
    fn test_fetch_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(dump_json().to_string().as_bytes()).unwrap();

        let source = FileRecordSource::new(file.path());
        let snap = tokio_test::block_on(source.fetch_snapshot("c2")).unwrap();
        assert_eq!(snap.teams.len(), 1);
        assert_eq!(snap.championship.scoring_rules(), None);
    }
}
