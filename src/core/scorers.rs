use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::domain::model::{ChampionshipSnapshot, EventType, ScorerEntry};

/// Goal and assist leaders of the snapshot, best first.
///
/// Events on matches outside the snapshot, or credited to unknown players,
/// do not count.
pub fn top_scorers(snapshot: &ChampionshipSnapshot, limit: Option<usize>) -> Vec<ScorerEntry> {
    let match_ids: HashSet<&str> = snapshot.matches.iter().map(|m| m.id.as_str()).collect();
    let mut tallies: HashMap<&str, (u32, u32)> = HashMap::new();

    for event in &snapshot.events {
        if !match_ids.contains(event.match_id.as_str()) {
            continue;
        }
        let tally = tallies.entry(event.player_id.as_str()).or_default();
        match event.event_type {
            EventType::Goal => tally.0 += 1,
            EventType::Assist => tally.1 += 1,
            EventType::YellowCard | EventType::RedCard => {}
        }
    }

    let mut scorers: Vec<ScorerEntry> = snapshot
        .players
        .iter()
        .filter_map(|player| {
            let &(goals, assists) = tallies.get(player.id.as_str())?;
            if goals == 0 && assists == 0 {
                return None;
            }
            Some(ScorerEntry {
                player_id: player.id.clone(),
                player_name: player.name.clone(),
                team_id: player.team_id.clone(),
                team_name: snapshot
                    .teams
                    .iter()
                    .find(|t| t.id == player.team_id)
                    .map(|t| t.name.clone()),
                goals,
                assists,
            })
        })
        .collect();

    scorers.sort_by(compare_scorers);
    if let Some(limit) = limit {
        scorers.truncate(limit);
    }
    scorers
}

fn compare_scorers(a: &ScorerEntry, b: &ScorerEntry) -> Ordering {
    b.goals
        .cmp(&a.goals)
        .then_with(|| b.assists.cmp(&a.assists))
        .then_with(|| a.player_name.cmp(&b.player_name))
        .then_with(|| a.player_id.cmp(&b.player_id))
}
