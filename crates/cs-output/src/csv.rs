//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `eliminations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EliminationRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries:    Writer<File>,
    eliminations: Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "elapsed_secs",
            "alive_crewmates",
            "alive_adversaries",
            "eliminated",
            "stations_busy",
            "stations_completed",
            "stations_total",
            "task_progress",
            "winner",
        ])?;

        let mut eliminations = Writer::from_path(dir.join("eliminations.csv"))?;
        eliminations.write_record(["tick", "victim", "killer", "x", "y", "witnesses", "released_station"])?;

        Ok(Self {
            summaries,
            eliminations,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.alive_crewmates.to_string(),
            row.alive_adversaries.to_string(),
            row.eliminated.to_string(),
            row.stations_busy.to_string(),
            row.stations_completed.to_string(),
            row.stations_total.to_string(),
            format!("{:.3}", row.task_progress),
            row.winner.map_or("", |s| s.as_str()).to_owned(),
        ])?;
        Ok(())
    }

    fn write_elimination(&mut self, row: &EliminationRow) -> OutputResult<()> {
        self.eliminations.write_record(&[
            row.tick.to_string(),
            row.victim.to_string(),
            row.killer.to_string(),
            format!("{:.3}", row.x),
            format!("{:.3}", row.y),
            row.witnesses.to_string(),
            row.released_station.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.eliminations.flush()?;
        Ok(())
    }
}
