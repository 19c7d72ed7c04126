use crate::domain::model::{Championship, ChampionshipSnapshot, Match, MatchEvent, Player, Team};
use crate::domain::ports::MatchRecordSource;
use crate::utils::error::{Result, StandingsError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Row of `championship_teams` with the team embedded by the store.
#[derive(Debug, Deserialize)]
struct RegistrationRow {
    team_id: String,
    #[serde(default)]
    teams: Option<Team>,
}

/// Reads a championship from a PostgREST-style REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    base: Url,
}

impl HttpRecordSource {
    pub fn new(endpoint: &str, headers: &HashMap<String, String>, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(endpoint).map_err(|e| StandingsError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        // Url::join drops the last segment unless the path ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .default_headers(header_map(headers)?)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base })
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let mut url = self.base.join(table).map_err(|e| StandingsError::ConfigError {
            message: format!("Cannot build URL for table {}: {}", table, e),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let rows = response.error_for_status()?.json::<Vec<T>>().await?;
        Ok(rows)
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            StandingsError::InvalidConfigValueError {
                field: "source.headers".to_string(),
                value: name.clone(),
                reason: e.to_string(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            StandingsError::InvalidConfigValueError {
                field: format!("source.headers.{}", name),
                value: "<redacted>".to_string(),
                reason: e.to_string(),
            }
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn in_list<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    format!("in.({})", ids.into_iter().collect::<Vec<_>>().join(","))
}

#[async_trait]
impl MatchRecordSource for HttpRecordSource {
    async fn fetch_snapshot(&self, championship_id: &str) -> Result<ChampionshipSnapshot> {
        let eq_id = format!("eq.{}", championship_id);

        let championship = self
            .get_rows::<Championship>("championships", &[("id", eq_id.clone())])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StandingsError::ChampionshipNotFound {
                championship_id: championship_id.to_string(),
            })?;

        let registrations: Vec<RegistrationRow> = self
            .get_rows(
                "championship_teams",
                &[
                    ("championship_id", eq_id.clone()),
                    ("select", "team_id,teams(*)".to_string()),
                ],
            )
            .await?;
        let mut teams = Vec::with_capacity(registrations.len());
        for row in registrations {
            match row.teams {
                Some(team) => teams.push(team),
                None => tracing::warn!(
                    "Championship {} registers team {} without a team record, skipping",
                    championship_id,
                    row.team_id
                ),
            }
        }

        let matches: Vec<Match> = self
            .get_rows(
                "matches",
                &[("championship_id", eq_id), ("order", "round".to_string())],
            )
            .await?;

        let players: Vec<Player> = if teams.is_empty() {
            Vec::new()
        } else {
            self.get_rows("players", &[("team_id", in_list(teams.iter().map(|t| t.id.as_str())))])
                .await?
        };

        let events: Vec<MatchEvent> = if matches.is_empty() {
            Vec::new()
        } else {
            self.get_rows(
                "match_events",
                &[("match_id", in_list(matches.iter().map(|m| m.id.as_str())))],
            )
            .await?
        };

        tracing::debug!(
            "Fetched {} teams, {} matches, {} players, {} events",
            teams.len(),
            matches.len(),
            players.len(),
            events.len()
        );

        Ok(ChampionshipSnapshot {
            championship,
            teams,
            matches,
            players,
            events,
        })
    }
}
