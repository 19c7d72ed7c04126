use crate::domain::model::{StandingsEntry, StandingsRow, Zone};

pub const QUALIFICATION_SPOTS: u32 = 4;
pub const RELEGATION_SPOTS: u32 = 3;

/// Zone for a 1-based position in a table of `team_count` teams.
///
/// Qualification wins where the two bands overlap, which happens whenever
/// there are fewer than `QUALIFICATION_SPOTS + RELEGATION_SPOTS` teams.
pub fn zone_for(position: u32, team_count: u32) -> Zone {
    if position <= QUALIFICATION_SPOTS {
        Zone::Qualification
    } else if position + RELEGATION_SPOTS > team_count {
        Zone::Relegation
    } else {
        Zone::Neutral
    }
}

pub fn classify(entries: Vec<StandingsEntry>) -> Vec<StandingsRow> {
    let team_count = entries.len() as u32;
    entries
        .into_iter()
        .map(|entry| {
            let zone = zone_for(entry.position, team_count);
            StandingsRow { entry, zone }
        })
        .collect()
}
