//! `cs-output` — simulation output writers for the `crewsim` simulator.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `tick_summaries.csv`, `eliminations.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, /*interval=*/ 50);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EliminationRow, TickSummaryRow};
pub use writer::OutputWriter;
