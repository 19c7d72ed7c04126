//! Folds finished matches into per-team running totals.

use crate::domain::model::{DataIssue, Match, Team};
use crate::utils::error::{Result, StandingsError};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAccumulator<'a> {
    pub team: &'a Team,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Goal totals are 64-bit so that summing `u32` match scores cannot overflow.
    pub goals_for: u64,
    pub goals_against: u64,
}

impl<'a> TeamAccumulator<'a> {
    fn new(team: &'a Team) -> Self {
        Self {
            team,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for += u64::from(scored);
        self.goals_against += u64::from(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.won += 1,
            std::cmp::Ordering::Equal => self.drawn += 1,
            std::cmp::Ordering::Less => self.lost += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.won + self.drawn + self.lost
    }

    pub fn goal_difference(&self) -> i64 {
        let diff = i128::from(self.goals_for) - i128::from(self.goals_against);
        i64::try_from(diff).unwrap_or(if diff > 0 { i64::MAX } else { i64::MIN })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation<'a> {
    /// One per registered team, in registration order.
    pub accumulators: Vec<TeamAccumulator<'a>>,
    pub issues: Vec<DataIssue>,
}

/// Credits every finished match to both of its sides.
///
/// Matches that are not finished are skipped. A side that is not in `teams`
/// is left out and reported in `issues`; the other side is still credited.
/// A finished match without both scores aborts the whole pass.
pub fn aggregate<'a, 'm, I>(teams: &'a [Team], matches: I) -> Result<Aggregation<'a>>
where
    I: IntoIterator<Item = &'m Match>,
{
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(teams.len());
    let mut accumulators = Vec::with_capacity(teams.len());
    for team in teams {
        if !index.contains_key(team.id.as_str()) {
            index.insert(team.id.as_str(), accumulators.len());
            accumulators.push(TeamAccumulator::new(team));
        }
    }

    let mut issues = Vec::new();
    for m in matches.into_iter().filter(|m| m.is_finished()) {
        let (home_score, away_score) = finished_score(m)?;

        let sides = [
            (&m.home_team_id, home_score, away_score),
            (&m.away_team_id, away_score, home_score),
        ];
        for (team_id, scored, conceded) in sides {
            match index.get(team_id.as_str()) {
                Some(&slot) => accumulators[slot].record(scored, conceded),
                None => issues.push(DataIssue::UnknownTeamReference {
                    match_id: m.id.clone(),
                    team_id: team_id.clone(),
                }),
            }
        }
    }

    Ok(Aggregation {
        accumulators,
        issues,
    })
}

fn finished_score(m: &Match) -> Result<(u32, u32)> {
    match (m.home_score, m.away_score) {
        (Some(home), Some(away)) => Ok((home, away)),
        (None, _) => Err(StandingsError::IncompleteMatchData {
            match_id: m.id.clone(),
            side: "home",
        }),
        (_, None) => Err(StandingsError::IncompleteMatchData {
            match_id: m.id.clone(),
            side: "away",
        }),
    }
}
