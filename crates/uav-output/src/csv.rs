//! CSV output backend.
//!
//! Creates two files in the target directory:
//! - `slot_metrics.csv`
//! - `frames.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FrameRow, OutputResult, SlotMetricsRow};

pub const SLOT_METRICS_FILE: &str = "slot_metrics.csv";
pub const FRAMES_FILE: &str = "frames.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    slots:    Writer<File>,
    frames:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    ///
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut slots = Writer::from_path(dir.join(SLOT_METRICS_FILE))?;
        slots.write_record([
            "slot",
            "energy_efficiency",
            "threats_handled",
            "total_energy",
            "served_devices",
        ])?;

        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record(["slot", "kind", "index", "x", "y", "neutralized"])?;

        Ok(Self { slots, frames, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_slot(&mut self, row: &SlotMetricsRow) -> OutputResult<()> {
        self.slots.write_record(&[
            row.slot.to_string(),
            row.energy_efficiency.to_string(),
            row.threats_handled.to_string(),
            row.total_energy.to_string(),
            row.served_devices.to_string(),
        ])?;
        Ok(())
    }

    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(&[
                row.slot.to_string(),
                row.kind.as_str().to_owned(),
                row.index.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.neutralized as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.slots.flush()?;
        self.frames.flush()?;
        Ok(())
    }
}
