pub mod toml_config;

use crate::utils::error::{Result, StandingsError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub use toml_config::TomlConfig;

/// Where the snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSpec {
    File {
        path: String,
    },
    Http {
        endpoint: String,
        headers: HashMap<String, String>,
        timeout_seconds: u64,
    },
}

/// Parses repeated `KEY=VALUE` flags.
pub fn parse_headers(pairs: &[String]) -> Result<HashMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| StandingsError::InvalidConfigValueError {
                    field: "header".to_string(),
                    value: pair.clone(),
                    reason: "Expected KEY=VALUE".to_string(),
                })
        })
        .collect()
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "league-standings")]
#[command(about = "Compute league standings from a championship snapshot")]
pub struct CliConfig {
    #[arg(long)]
    pub championship_id: String,

    #[arg(long, help = "Read the snapshot from a JSON store dump")]
    pub source_file: Option<String>,

    #[arg(long, help = "Fetch the snapshot from a REST endpoint")]
    pub api_endpoint: Option<String>,

    #[arg(long = "header", help = "Extra request header as KEY=VALUE (repeatable)")]
    pub headers: Vec<String>,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Write all formats into this ZIP file instead")]
    pub bundle: Option<String>,

    #[arg(long, help = "Include the N best scorers in the JSON report")]
    pub top_scorers: Option<usize>,

    #[arg(long, help = "Include the match overview in the JSON report")]
    pub overview: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn source_spec(&self) -> Result<SourceSpec> {
        match (&self.source_file, &self.api_endpoint) {
            (Some(path), None) => Ok(SourceSpec::File { path: path.clone() }),
            (None, Some(endpoint)) => Ok(SourceSpec::Http {
                endpoint: endpoint.clone(),
                headers: parse_headers(&self.headers)?,
                timeout_seconds: self.timeout_seconds,
            }),
            (None, None) => Err(StandingsError::MissingConfigError {
                field: "--source-file or --api-endpoint".to_string(),
            }),
            (Some(_), Some(_)) => Err(StandingsError::ConfigError {
                message: "--source-file and --api-endpoint are mutually exclusive".to_string(),
            }),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("championship_id", &self.championship_id)?;
        match self.source_spec()? {
            SourceSpec::File { path } => validation::validate_path("source_file", &path)?,
            SourceSpec::Http { endpoint, .. } => {
                validation::validate_url("api_endpoint", &endpoint)?;
                validation::validate_positive_number(
                    "timeout_seconds",
                    self.timeout_seconds as usize,
                    1,
                )?;
            }
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_formats("formats", &self.formats)?;
        if let Some(bundle) = &self.bundle {
            validation::validate_path("bundle", bundle)?;
        }
        if let Some(top) = self.top_scorers {
            validation::validate_positive_number("top_scorers", top, 1)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn championship_id(&self) -> &str {
        &self.championship_id
    }

    fn output_path(&self) -> &str {
        &self.output_path
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
