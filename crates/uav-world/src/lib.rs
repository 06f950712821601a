//! `uav-world`: entity storage and initial layout.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`entity`]  | `Device`, `Uav`, `Threat`, movement cost constant          |
//! | [`task`]    | `Task`, `Urgency`                                          |
//! | [`patrol`]  | `PatrolPaths`: cyclic border segments, one per node       |
//! | [`world`]   | `World`: the owned container passed around by borrow      |
//! | [`builder`] | `WorldBuilder`: deterministic layout from a config + RNG  |

pub mod builder;
pub mod entity;
pub mod patrol;
pub mod task;
pub mod world;


pub use builder::WorldBuilder;
pub use entity::{Device, MOVE_COST_PER_UNIT, Threat, Uav};
pub use patrol::PatrolPaths;
pub use task::{Task, Urgency};
pub use world::World;
