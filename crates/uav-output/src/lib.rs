//! `uav-output`: output writers and mode comparison for the uav_patrol
//! simulator.
//!
//! | Item                  | Purpose                                              |
//! |-----------------------|------------------------------------------------------|
//! | [`CsvWriter`]         | `slot_metrics.csv`, `frames.csv` in a directory      |
//! | [`SimOutputObserver`] | drives any [`OutputWriter`] from the slot loop       |
//! | [`run_averaged`]      | slot-wise mean of several seeded runs of one mode    |
//! | [`PercentageGains`]   | PURE's relative gain over ECOP and MPC-ONLY          |
//! | [`threat_sweep`]      | PURE efficiency and neutralizations per threat count |
//!
//! # Usage
//!
//! ```rust,ignore
//! use uav_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod compare;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use compare::{
    AveragedMetrics, PercentageGains, SweepPoint, percentage_gain, run_averaged, threat_sweep,
};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EntityKind, FrameRow, SlotMetricsRow};
pub use writer::OutputWriter;
