use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_url: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: None,
            stadium: None,
            badge_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Postponed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub championship_id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub round: u32,
    pub status: MatchStatus,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub match_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Both scores, when recorded.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }
}

/// Points awarded per result. Ordering between the three values is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub win_points: u32,
    pub draw_points: u32,
    pub loss_points: u32,
}

impl ScoringRules {
    pub fn new(win_points: u32, draw_points: u32, loss_points: u32) -> Self {
        Self {
            win_points,
            draw_points,
            loss_points,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::new(3, 1, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChampionshipFormat {
    RoundRobin,
    SingleElimination,
    DoubleElimination,
    GroupKnockout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChampionshipStatus {
    Upcoming,
    Active,
    Finished,
}

/// Championship record as held by the store. Point values are optional there,
/// so the scoring rules only exist once all three are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Championship {
    pub id: String,
    pub name: String,
    pub format: ChampionshipFormat,
    pub status: ChampionshipStatus,
    #[serde(default)]
    pub max_teams: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub points_victory: Option<u32>,
    #[serde(default)]
    pub points_draw: Option<u32>,
    #[serde(default)]
    pub points_defeat: Option<u32>,
}

impl Championship {
    pub fn scoring_rules(&self) -> Option<ScoringRules> {
        Some(ScoringRules::new(
            self.points_victory?,
            self.points_draw?,
            self.points_defeat?,
        ))
    }
}

/// Registration of a team in a championship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionshipTeam {
    pub championship_id: String,
    pub team_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub position: PlayerPosition,
    #[serde(default)]
    pub shirt_number: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    YellowCard,
    RedCard,
    Assist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: String,
    pub match_id: String,
    pub player_id: String,
    pub event_type: EventType,
    #[serde(default)]
    pub minute: Option<u32>,
}

/// Everything fetched for one championship in a single read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionshipSnapshot {
    pub championship: Championship,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
}

impl ChampionshipSnapshot {
    pub fn finished_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_finished())
    }

    pub fn team_name<'a>(&'a self, team_id: &'a str) -> &'a str {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.as_str())
            .unwrap_or(team_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Qualification,
    Neutral,
    Relegation,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Qualification => "qualification",
            Zone::Neutral => "neutral",
            Zone::Relegation => "relegation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub position: u32,
    pub team_id: String,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    #[serde(flatten)]
    pub entry: StandingsEntry,
    pub zone: Zone,
}

/// Recoverable problems found while aggregating. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    UnknownTeamReference { match_id: String, team_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub championship_id: String,
    pub rules: ScoringRules,
    pub rows: Vec<StandingsRow>,
    pub issues: Vec<DataIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerEntry {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub goals: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureLine {
    pub match_id: String,
    pub round: u32,
    pub home_team: String,
    pub away_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub finished: usize,
    pub postponed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSize {
    pub round: u32,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOverview {
    pub counts: StatusCounts,
    pub upcoming: Vec<FixtureLine>,
    pub recent_results: Vec<FixtureLine>,
    pub rounds: Vec<RoundSize>,
}

/// What the transform phase hands to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsReport {
    pub championship_name: String,
    pub standings: StandingsTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorers: Option<Vec<ScorerEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<MatchOverview>,
}
