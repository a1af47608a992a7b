//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait
//! but are themselves concrete structs, not traits.

mod check;
mod materialize;
mod outline;

pub use check::{CheckService, TreeStatus};
pub use materialize::{MaterializeReport, MaterializeService};
pub use outline::{OutlineService, OutlineSource};
