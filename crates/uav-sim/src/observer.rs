//! Hooks into the slot loop for progress reporting and output.

use uav_core::Slot;

use crate::{SlotMetrics, VisualFrame};

/// Called by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_slots`][crate::Sim::run_slots] around every slot.
///
/// Every hook defaults to a no-op.
///
/// # Example
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_slot_end(&mut self, m: &SlotMetrics) {
///         println!("{}: efficiency {:.4}", m.slot, m.energy_efficiency);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each slot, before any processing.
    fn on_slot_start(&mut self, _slot: Slot) {}

    /// Called once the slot's metrics are computed.
    fn on_slot_end(&mut self, _metrics: &SlotMetrics) {}

    /// Called with the slot's positional snapshot, after `on_slot_end`.
    fn on_frame(&mut self, _frame: &VisualFrame) {}

    /// Called once after the final slot completes.
    fn on_sim_end(&mut self, _final_slot: Slot) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
