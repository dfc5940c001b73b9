//! Engine services
//!
//! Services coordinate repositories and the pure core in `fitplan_shared`.
//! Every operation takes the store, the user id and (where time matters) the
//! caller's local `now` explicitly.

pub mod adjustment;
pub mod consistency;
pub mod guidance;
pub mod progress;
pub mod schedule;
pub mod weight;

pub use adjustment::MacroAdjustmentService;
pub use consistency::ConsistencyService;
pub use guidance::GuidanceService;
pub use progress::{GoalProgress, ProgressService};
pub use schedule::ScheduleService;
pub use weight::{WeightEntryInput, WeightService};
