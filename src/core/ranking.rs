// Ranking of aggregated teams into a strictly ordered table.
use std::cmp::Ordering;

use crate::core::aggregation::TeamAccumulator;
use crate::domain::model::{ScoringRules, StandingsEntry};

type CmpFunc = fn(&StandingsEntry, &StandingsEntry) -> Ordering;

fn compare_points(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_goal_difference(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.goal_difference.cmp(&a.goal_difference)
}

fn compare_goals_for(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    b.goals_for.cmp(&a.goals_for)
}

// Lower is better.
fn compare_team_name(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    a.team_name.cmp(&b.team_name)
}

// Only reached when two registered teams share a display name.
fn compare_team_id(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    a.team_id.cmp(&b.team_id)
}

/// Tie-break cascade, highest priority first.
const CASCADE: [CmpFunc; 5] = [
    compare_points,
    compare_goal_difference,
    compare_goals_for,
    compare_team_name,
    compare_team_id,
];

pub fn compare_entries(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    CASCADE
        .iter()
        .map(|cmp| cmp(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Saturates at `u64::MAX` instead of wrapping.
pub fn points_for(acc: &TeamAccumulator<'_>, rules: &ScoringRules) -> u64 {
    let part = |count: u32, value: u32| u64::from(count).saturating_mul(u64::from(value));
    part(acc.won, rules.win_points)
        .saturating_add(part(acc.drawn, rules.draw_points))
        .saturating_add(part(acc.lost, rules.loss_points))
}

/// Scores each team under `rules`, sorts by the cascade and numbers the
/// result from 1 with no shared positions.
pub fn rank(accumulators: &[TeamAccumulator<'_>], rules: &ScoringRules) -> Vec<StandingsEntry> {
    let mut entries: Vec<StandingsEntry> = accumulators
        .iter()
        .map(|acc| StandingsEntry {
            position: 0,
            team_id: acc.team.id.clone(),
            team_name: acc.team.name.clone(),
            played: acc.played(),
            won: acc.won,
            drawn: acc.drawn,
            lost: acc.lost,
            goals_for: acc.goals_for,
            goals_against: acc.goals_against,
            goal_difference: acc.goal_difference(),
            points: points_for(acc, rules),
        })
        .collect();

    entries.sort_by(compare_entries);

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as u32 + 1;
    }

    entries
}
