//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cs_sim::{EliminationEvent, SimObserver, SimulationStats};

use crate::row::{EliminationRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and eliminations to any
/// [`OutputWriter`] backend.
///
/// Tick summaries are written every `interval` ticks, plus the tick on which
/// a side wins.  An interval of `0` writes only the final summary.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, stats: &SimulationStats) {
        let due = self.interval > 0 && stats.tick.0.is_multiple_of(self.interval);
        if due || stats.winner.is_some() {
            let result = self.writer.write_tick_summary(&TickSummaryRow::from(stats));
            self.store_err(result);
        }
    }

    fn on_elimination(&mut self, event: &EliminationEvent) {
        let result = self.writer.write_elimination(&EliminationRow::from(event));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, stats: &SimulationStats) {
        // A run cut off by the tick limit still gets its final row.
        if stats.winner.is_none() && (self.interval == 0 || !stats.tick.0.is_multiple_of(self.interval)) {
            let result = self.writer.write_tick_summary(&TickSummaryRow::from(stats));
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
