use crate::domain::model::DataIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("Scoring rules are not configured for championship {championship_id}")]
    MissingScoringRules { championship_id: String },

    #[error("Match {match_id} is finished but is missing its {side} score")]
    IncompleteMatchData { match_id: String, side: &'static str },

    #[error("Match {match_id} references team {team_id}, which is not registered")]
    UnknownTeamReference { match_id: String, team_id: String },

    #[error("Championship not found: {championship_id}")]
    ChampionshipNotFound { championship_id: String },

    #[error("Data unavailable for championship {championship_id}: {reason}")]
    DataUnavailable {
        championship_id: String,
        reason: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Engine,
    Data,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StandingsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingScoringRules { .. }
            | Self::IncompleteMatchData { .. }
            | Self::UnknownTeamReference { .. } => ErrorCategory::Engine,
            Self::ChampionshipNotFound { .. }
            | Self::DataUnavailable { .. }
            | Self::ProcessingError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ZipError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Exit codes in the binaries are derived from this.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownTeamReference { .. } => ErrorSeverity::Low,
            Self::DataUnavailable { .. } | Self::ApiError(_) => ErrorSeverity::Medium,
            Self::IoError(_) | Self::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() > ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingScoringRules { .. } => {
                "Set points_victory, points_draw and points_defeat on the championship"
            }
            Self::IncompleteMatchData { .. } => {
                "Record both scores for the match or change its status from finished"
            }
            Self::UnknownTeamReference { .. } => {
                "Register the team in the championship or fix the match's team reference"
            }
            Self::ChampionshipNotFound { .. } => "Check the championship id against the data source",
            Self::DataUnavailable { .. } | Self::ApiError(_) => {
                "Check connectivity and credentials for the data source, then retry"
            }
            Self::ProcessingError { .. } | Self::CsvError(_) | Self::SerializationError(_) => {
                "Check that the snapshot data is well-formed"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration file or command-line flags",
            Self::IoError(_) | Self::ZipError(_) => {
                "Check file permissions and free disk space for the output path"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingScoringRules { championship_id } => format!(
                "Championship {} has no scoring rules, standings cannot be computed",
                championship_id
            ),
            Self::IncompleteMatchData { match_id, .. } => format!(
                "Match {} is marked finished but its result is incomplete",
                match_id
            ),
            Self::DataUnavailable { championship_id, .. } => format!(
                "Standings data for championship {} is currently unavailable",
                championship_id
            ),
            other => other.to_string(),
        }
    }
}

impl From<DataIssue> for StandingsError {
    fn from(issue: DataIssue) -> Self {
        match issue {
            DataIssue::UnknownTeamReference { match_id, team_id } => {
                Self::UnknownTeamReference { match_id, team_id }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StandingsError>;
