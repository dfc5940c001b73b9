//! Fitplan Shared Library
//!
//! Pure domain logic for the adaptive progress and scheduling engine:
//! records, policy, time windows, progress analysis, macro arithmetic,
//! guidance text, schedule resolution and consistency scoring. No I/O.

pub mod consistency;
pub mod errors;
pub mod guidance;
pub mod macros;
pub mod models;
pub mod policy;
pub mod progress;
pub mod schedule;
pub mod time_window;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use policy::{AdjustmentRule, AnalysisPolicy, ConsistencyPolicy, EnginePolicy, MacroPolicy};
pub use time_window::{DateWindow, WeekdayKey};
