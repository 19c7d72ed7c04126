use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::model::{
    ChampionshipSnapshot, FixtureLine, Match, MatchOverview, MatchStatus, RoundSize, StatusCounts,
};

pub const FIXTURE_LIST_LIMIT: usize = 5;

/// Dashboard view of a championship's fixtures relative to `now`.
pub fn match_overview(snapshot: &ChampionshipSnapshot, now: DateTime<Utc>) -> MatchOverview {
    let mut counts = StatusCounts::default();
    let mut rounds: BTreeMap<u32, usize> = BTreeMap::new();

    for m in &snapshot.matches {
        counts.total += 1;
        match m.status {
            MatchStatus::Scheduled => counts.scheduled += 1,
            MatchStatus::InProgress => counts.in_progress += 1,
            MatchStatus::Finished => counts.finished += 1,
            MatchStatus::Postponed => counts.postponed += 1,
        }
        *rounds.entry(m.round).or_default() += 1;
    }

    let mut upcoming: Vec<&Match> = snapshot
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled && m.match_date.is_some_and(|d| d > now))
        .collect();
    upcoming.sort_by(|a, b| a.match_date.cmp(&b.match_date).then_with(|| a.id.cmp(&b.id)));

    let mut recent: Vec<&Match> = snapshot
        .matches
        .iter()
        .filter(|m| m.is_finished() && m.score().is_some())
        .collect();
    // Undated results sort last.
    recent.sort_by(|a, b| match (a.match_date, b.match_date) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });

    MatchOverview {
        counts,
        upcoming: fixture_lines(snapshot, upcoming),
        recent_results: fixture_lines(snapshot, recent),
        rounds: rounds
            .into_iter()
            .map(|(round, matches)| RoundSize { round, matches })
            .collect(),
    }
}

fn fixture_lines(snapshot: &ChampionshipSnapshot, matches: Vec<&Match>) -> Vec<FixtureLine> {
    matches
        .into_iter()
        .take(FIXTURE_LIST_LIMIT)
        .map(|m| FixtureLine {
            match_id: m.id.clone(),
            round: m.round,
            home_team: snapshot.team_name(&m.home_team_id).to_string(),
            away_team: snapshot.team_name(&m.away_team_id).to_string(),
            home_score: m.home_score,
            away_score: m.away_score,
            match_date: m.match_date,
        })
        .collect()
}
