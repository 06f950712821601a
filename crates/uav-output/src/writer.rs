//! The `OutputWriter` trait implemented by backend writers.

use crate::{FrameRow, OutputResult, SlotMetricsRow};

/// Sink for per-slot metrics and frame rows.
///
/// Errors surface to the observer, which stores them for retrieval with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one slot's metrics.
    fn write_slot(&mut self, row: &SlotMetricsRow) -> OutputResult<()>;

    /// Write every row of one frame.
    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
