//! The standings engine: aggregate, rank, classify.
//!
//! Everything here is a pure function over borrowed input. Nothing is cached
//! between calls, so independent championships can be computed side by side.

use crate::core::aggregation::aggregate;
use crate::core::ranking::rank;
use crate::core::zones::classify;
use crate::domain::model::{ChampionshipSnapshot, Match, ScoringRules, StandingsTable, Team};
use crate::utils::error::{Result, StandingsError};

#[derive(Debug, Clone, Copy)]
pub struct StandingsInput<'a> {
    pub championship_id: &'a str,
    pub rules: Option<ScoringRules>,
    pub teams: &'a [Team],
    pub matches: &'a [Match],
}

impl<'a> From<&'a ChampionshipSnapshot> for StandingsInput<'a> {
    fn from(snapshot: &'a ChampionshipSnapshot) -> Self {
        Self {
            championship_id: &snapshot.championship.id,
            rules: snapshot.championship.scoring_rules(),
            teams: &snapshot.teams,
            matches: &snapshot.matches,
        }
    }
}

pub fn compute_standings(input: StandingsInput<'_>) -> Result<StandingsTable> {
    let rules = input
        .rules
        .ok_or_else(|| StandingsError::MissingScoringRules {
            championship_id: input.championship_id.to_string(),
        })?;

    let aggregation = aggregate(input.teams, input.matches)?;
    let entries = rank(&aggregation.accumulators, &rules);

    Ok(StandingsTable {
        championship_id: input.championship_id.to_string(),
        rules,
        rows: classify(entries),
        issues: aggregation.issues,
    })
}

pub fn compute_for_snapshot(snapshot: &ChampionshipSnapshot) -> Result<StandingsTable> {
    compute_standings(StandingsInput::from(snapshot))
}
