//! Console and JSON output for simulation results

use anyhow::{Context, Result};
use league_core::{Schedule, SimulationReport};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const TEAM_WIDTH: usize = 22;
const COUNT_WIDTH: usize = 10;
const PERCENT_WIDTH: usize = 12;

/// Qualification table, most likely qualifiers first
pub fn render_report(report: &SimulationReport) -> String {
    let mut out = String::new();
    let rule = "-".repeat(TEAM_WIDTH + COUNT_WIDTH + PERCENT_WIDTH);

    let _ = writeln!(
        out,
        "Qualification odds (top-{}, {} trials, seed {}):",
        report.cutoff, report.trials, report.seed
    );
    let _ = writeln!(
        out,
        "{:<tw$}{:>cw$}{:>pw$}",
        "Team",
        "Count",
        "Percent",
        tw = TEAM_WIDTH,
        cw = COUNT_WIDTH,
        pw = PERCENT_WIDTH
    );
    let _ = writeln!(out, "{}", rule);

    for odds in report.ranked() {
        let _ = writeln!(
            out,
            "{:<tw$}{:>cw$}{:>pw$.2}%",
            odds.team,
            odds.qualified,
            odds.percentage,
            tw = TEAM_WIDTH,
            cw = COUNT_WIDTH,
            pw = PERCENT_WIDTH - 1
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Coinflip tiebreaks affecting top-{}: {} ({:.2}%)",
        report.cutoff,
        report.cutoff_coinflips,
        report.coinflip_rate()
    );
    out
}

/// Roster with played records and the number of open games
pub fn render_schedule_summary(schedule: &Schedule) -> String {
    let mut out = String::new();
    let records = schedule.played_records();

    let _ = writeln!(
        out,
        "{} teams, {} played games, {} remaining games",
        schedule.team_count(),
        schedule.played().len(),
        schedule.remaining().len()
    );

    let mut remaining = vec![0usize; schedule.team_count()];
    for fixture in schedule.remaining() {
        remaining[fixture.home] += 1;
        remaining[fixture.away] += 1;
    }

    let _ = writeln!(out, "{:<tw$}{:>6}{:>6}{:>8}", "Team", "W", "L", "Left", tw = TEAM_WIDTH);
    for (id, name) in schedule.teams().iter().enumerate() {
        let (wins, losses) = records[id];
        let _ = writeln!(
            out,
            "{:<tw$}{:>6}{:>6}{:>8}",
            name,
            wins,
            losses,
            remaining[id],
            tw = TEAM_WIDTH
        );
    }
    out
}

pub fn save_report_json(path: &Path, report: &SimulationReport) -> Result<()> {
    let json = report.to_json().context("Failed to serialize report")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::TeamOdds;

    fn report() -> SimulationReport {
        SimulationReport {
            trials: 1000,
            cutoff: 1,
            workers: 2,
            seed: 42,
            cutoff_coinflips: 125,
            teams: vec![
                TeamOdds { team: "Lions".into(), qualified: 250, percentage: 25.0 },
                TeamOdds { team: "Tigers".into(), qualified: 750, percentage: 75.0 },
            ],
            created_at: "2026-01-01T00:00:00+00:00".into(),
        }
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&report());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Qualification odds (top-1, 1000 trials, seed 42):");
        assert_eq!(lines[1], format!("{:<22}{:>10}{:>12}", "Team", "Count", "Percent"));
        assert_eq!(lines[2].len(), 44);
        assert_eq!(lines[3], format!("{:<22}{:>10}{:>11}%", "Tigers", 750, "75.00"));
        assert_eq!(lines[4], format!("{:<22}{:>10}{:>11}%", "Lions", 250, "25.00"));
        assert_eq!(lines[6], "Coinflip tiebreaks affecting top-1: 125 (12.50%)");
    }

    #[test]
    fn test_render_schedule_summary() {
        let schedule = crate::parse_schedule("TEAM,A\nTEAM,B\nGAME,A,B,B\nGAME,B,A\n").unwrap();
        let text = render_schedule_summary(&schedule);

        assert!(text.starts_with("2 teams, 1 played games, 1 remaining games"));
        assert!(text.contains(&format!("{:<22}{:>6}{:>6}{:>8}", "B", 1, 0, 1)));
    }

    #[test]
    fn test_save_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        save_report_json(&path, &report()).unwrap();

        let parsed: SimulationReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, report());
    }
}
