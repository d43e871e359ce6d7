//! Schedule file loader
//!
//! Plain comma-separated text, one record per line:
//!
//! ```text
//! # comment
//! TEAM,Lions
//! TEAM,Tigers
//! GAME,Lions,Tigers,Lions   <- played, winner given
//! GAME,Tigers,Lions         <- remaining
//! GAME,Tigers,Lions,        <- remaining (empty winner)
//! ```
//!
//! Records may come in any order: all TEAM lines are registered before any
//! GAME line is checked against the roster.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use league_core::Schedule;
use std::fs;
use std::path::Path;

/// One parsed line of a schedule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleRecord {
    Team(String),
    Game { home: String, away: String, winner: Option<String> },
}

/// Load and validate a schedule file
pub fn load_schedule(path: &Path) -> Result<Schedule> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open schedule file: {}", path.display()))?;

    parse_schedule(&text).with_context(|| format!("Invalid schedule file: {}", path.display()))
}

/// Parse a schedule from in-memory text
///
/// Line numbers in errors are 1-based and count comment and blank lines.
pub fn parse_schedule(text: &str) -> Result<Schedule> {
    let mut records = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = read_row(raw).with_context(|| format!("line {}", line))?;
        if let Some(record) = parse_record(&row).with_context(|| format!("line {}", line))? {
            records.push((line, record));
        }
    }

    let mut builder = Schedule::builder();

    for (line, record) in &records {
        if let ScheduleRecord::Team(name) = record {
            builder.add_team(name).with_context(|| format!("line {}", line))?;
        }
    }

    for (line, record) in &records {
        let ScheduleRecord::Game { home, away, winner } = record else {
            continue;
        };
        let added = match winner {
            Some(winner) => builder.add_played(home, away, winner),
            None => builder.add_remaining(home, away),
        };
        added.with_context(|| format!("line {}", line))?;
    }

    Ok(builder.build())
}

/// Split one line into fields, honoring csv quoting.
fn read_row(line: &str) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut row = StringRecord::new();
    reader.read_record(&mut row).context("Failed to read schedule record")?;
    Ok(row)
}

/// `Ok(None)` for lines with nothing but separators/whitespace.
pub fn parse_record(row: &StringRecord) -> Result<Option<ScheduleRecord>> {
    if row.iter().all(str::is_empty) {
        return Ok(None);
    }

    let kind = &row[0];
    match kind {
        "TEAM" => {
            if row.len() != 2 {
                bail!("TEAM record needs 2 fields, found {}", row.len());
            }
            Ok(Some(ScheduleRecord::Team(row[1].to_string())))
        }
        "GAME" => {
            if !(3..=4).contains(&row.len()) {
                bail!("GAME record needs 3 or 4 fields, found {}", row.len());
            }
            let winner = row.get(3).filter(|w| !w.is_empty()).map(str::to_string);
            Ok(Some(ScheduleRecord::Game {
                home: row[1].to_string(),
                away: row[2].to_string(),
                winner,
            }))
        }
        other => bail!("Unknown record type '{}'", other),
    }
}
