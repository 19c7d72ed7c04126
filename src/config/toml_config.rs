use crate::adapters::http_source::DEFAULT_TIMEOUT_SECONDS;
use crate::config::SourceSpec;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StandingsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub championship: ChampionshipConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionshipConfig {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// `file` or `http`.
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub top_scorers: Option<usize>,
    pub include_overview: Option<bool>,
    pub bundle: Option<BundleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StandingsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// in place so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StandingsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    pub fn source_spec(&self) -> Result<SourceSpec> {
        match self.source.r#type.as_str() {
            "file" => {
                let path = validation::validate_required_field("source.path", &self.source.path)?;
                Ok(SourceSpec::File { path: path.clone() })
            }
            "http" => {
                let endpoint =
                    validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                Ok(SourceSpec::Http {
                    endpoint: endpoint.clone(),
                    headers: self.source.headers.clone().unwrap_or_default(),
                    timeout_seconds: self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
                })
            }
            other => Err(StandingsError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: other.to_string(),
                reason: "Valid source types: file, http".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_non_empty_string("championship.id", &self.championship.id)?;

        match self.source_spec()? {
            SourceSpec::File { path } => validation::validate_path("source.path", &path)?,
            SourceSpec::Http {
                endpoint,
                timeout_seconds,
                ..
            } => {
                validation::validate_url("source.endpoint", &endpoint)?;
                validation::validate_positive_number(
                    "source.timeout_seconds",
                    timeout_seconds as usize,
                    1,
                )?;
            }
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_formats("output.formats", &self.output.formats)?;

        if let Some(bundle) = &self.output.bundle {
            if bundle.enabled {
                validation::validate_path("output.bundle.filename", &bundle.filename)?;
            }
        }
        if let Some(top) = self.output.top_scorers {
            validation::validate_positive_number("output.top_scorers", top, 1)?;
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn championship_id(&self) -> &str {
        &self.championship.id
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn bundle_filename(&self) -> Option<&str> {
        self.output
            .bundle
            .as_ref()
            .filter(|b| b.enabled)
            .map(|b| b.filename.as_str())
    }

    fn top_scorers(&self) -> Option<usize> {
        self.output.top_scorers
    }

    fn include_overview(&self) -> bool {
        self.output.include_overview.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
