//! Fitplan Engine Backend Library
//!
//! Async adaptive progress and scheduling engine over an external document
//! store. The pure rules live in `fitplan_shared`; this crate loads and
//! stores documents around them.

pub mod config;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
