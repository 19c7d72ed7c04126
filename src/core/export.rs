use crate::domain::model::{StandingsReport, StandingsRow};
use crate::utils::error::{Result, StandingsError};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Flat row for delimited output; `StandingsRow` flattens its entry, which the
/// csv serializer cannot handle.
#[derive(Debug, Serialize)]
struct DelimitedRow<'a> {
    position: u32,
    team_id: &'a str,
    team: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u64,
    goals_against: u64,
    goal_difference: i64,
    points: u64,
    zone: &'static str,
}

impl<'a> From<&'a StandingsRow> for DelimitedRow<'a> {
    fn from(row: &'a StandingsRow) -> Self {
        let e = &row.entry;
        Self {
            position: e.position,
            team_id: &e.team_id,
            team: &e.team_name,
            played: e.played,
            won: e.won,
            drawn: e.drawn,
            lost: e.lost,
            goals_for: e.goals_for,
            goals_against: e.goals_against,
            goal_difference: e.goal_difference,
            points: e.points,
            zone: row.zone.as_str(),
        }
    }
}

const HEADER: [&str; 12] = [
    "position",
    "team_id",
    "team",
    "played",
    "won",
    "drawn",
    "lost",
    "goals_for",
    "goals_against",
    "goal_difference",
    "points",
    "zone",
];

// Header is written by hand so an empty table still yields one line.
fn render_delimited(rows: &[StandingsRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(DelimitedRow::from(row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StandingsError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| StandingsError::ProcessingError {
        message: format!("Rendered table is not valid UTF-8: {}", e),
    })
}

pub fn to_csv(rows: &[StandingsRow]) -> Result<String> {
    render_delimited(rows, b',')
}

pub fn to_tsv(rows: &[StandingsRow]) -> Result<String> {
    render_delimited(rows, b'\t')
}

pub fn to_json(report: &StandingsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub filename: String,
    pub contents: String,
}

pub fn render(report: &StandingsReport, formats: &[String]) -> Result<Vec<RenderedFile>> {
    formats
        .iter()
        .map(|format| {
            let contents = match format.as_str() {
                "csv" => to_csv(&report.standings.rows)?,
                "tsv" => to_tsv(&report.standings.rows)?,
                "json" => to_json(report)?,
                other => {
                    return Err(StandingsError::InvalidConfigValueError {
                        field: "formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            };
            Ok(RenderedFile {
                filename: format!("standings.{}", format),
                contents,
            })
        })
        .collect()
}

pub fn bundle(files: &[RenderedFile]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for file in files {
        zip.start_file(file.filename.as_str(), SimpleFileOptions::default())?;
        zip.write_all(file.contents.as_bytes())?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ScoringRules, StandingsEntry, StandingsTable, Zone};
    use std::io::Read;

    fn report() -> StandingsReport {
        let row = |position: u32, id: &str, name: &str, points: u64, zone: Zone| StandingsRow {
            entry: StandingsEntry {
                position,
                team_id: id.to_string(),
                team_name: name.to_string(),
                played: 1,
                won: u32::from(points == 3),
                drawn: 0,
                lost: u32::from(points == 0),
                goals_for: if points == 3 { 2 } else { 0 },
                goals_against: if points == 3 { 0 } else { 2 },
                goal_difference: if points == 3 { 2 } else { -2 },
                points,
            },
            zone,
        };
        StandingsReport {
            championship_name: "Liga".to_string(),
            standings: StandingsTable {
                championship_id: "c1".to_string(),
                rules: ScoringRules::default(),
                rows: vec![
                    row(1, "a", "Alpha, FC", 3, Zone::Qualification),
                    row(2, "b", "Bravo", 0, Zone::Qualification),
                ],
                issues: vec![],
            },
            scorers: None,
            overview: None,
        }
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&report().standings.rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("position,team_id,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points,zone")
        );
        assert_eq!(lines.next(), Some("1,a,\"Alpha, FC\",1,1,0,0,2,0,2,3,qualification"));
        assert_eq!(lines.next(), Some("2,b,Bravo,1,0,0,1,0,2,-2,0,qualification"));
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("position,team_id,team"));
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let tsv = to_tsv(&report().standings.rows).unwrap();
        assert!(tsv.lines().nth(1).unwrap().starts_with("1\ta\tAlpha, FC\t"));
    }

    #[test]
    fn test_json_flattens_rows() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();
        let first = &json["standings"]["rows"][0];
        assert_eq!(first["team_name"], "Alpha, FC");
        assert_eq!(first["zone"], "qualification");
        assert!(json.get("scorers").is_none());
    }

    #[test]
    fn test_render_rejects_unknown_format() {
        assert!(render(&report(), &["xml".to_string()]).is_err());
    }

    #[test]
    fn test_bundle_contains_every_file() {
        let files = render(&report(), &["csv".to_string(), "json".to_string()]).unwrap();
        let zipped = bundle(&files).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zipped)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut csv = String::new();
        archive
            .by_name("standings.csv")
            .unwrap()
            .read_to_string(&mut csv)
            .unwrap();
        assert!(csv.contains("Bravo"));
    }
}
