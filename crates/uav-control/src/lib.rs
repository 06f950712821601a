//! `uav-control`: per-slot decision logic.
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`controller`] | `AllocationController`, `Allocation`                      |
//! | [`offload`]    | `TaskOffloader` trait, `RangeOffloader`, offload costs    |
//!
//! Both components are stateless between calls: they borrow the world slices
//! they need for one call and keep nothing.

pub mod controller;
pub mod offload;

#[cfg(test)]
mod tests;

pub use controller::{Allocation, AllocationController};
pub use offload::{ENERGY_REFERENCE, OFFLOAD_COST, RangeOffloader, TaskOffloader};
