//! Slot-loop observer that streams rows into an [`OutputWriter`].

use uav_core::Slot;
use uav_sim::{SimObserver, SlotMetrics, VisualFrame};

use crate::row::{FrameRow, SlotMetricsRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes one metrics row per slot and, every `frame_interval` slots, the
/// frame's position rows.
///
/// Observer hooks cannot fail, so the first writer error is held back and
/// handed out by [`take_error`][Self::take_error] once the run is over.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    frame_interval: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer that writes every slot and every frame.
    pub fn new(writer: W) -> Self {
        Self { writer, frame_interval: 1, last_error: None }
    }

    /// Only write frames for slots that are a multiple of `interval`.
    /// An interval of 0 disables frame output.
    pub fn frame_interval(mut self, interval: u64) -> Self {
        self.frame_interval = interval;
        self
    }

    /// The first write error of the run, if any.  Clears it.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // First error wins.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_slot_end(&mut self, metrics: &SlotMetrics) {
        let result = self.writer.write_slot(&SlotMetricsRow::from(metrics));
        self.store_err(result);
    }

    fn on_frame(&mut self, frame: &VisualFrame) {
        if self.frame_interval == 0 || frame.slot.0 % self.frame_interval != 0 {
            return;
        }
        let rows = FrameRow::from_frame(frame);
        if !rows.is_empty() {
            let result = self.writer.write_frame(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_slot: Slot) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
