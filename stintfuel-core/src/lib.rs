//! StintFuel Core Library
//!
//! This crate provides the stint fuel tracking engine: a pure, tick-driven
//! state machine that turns raw telemetry snapshots into per-lap fuel
//! consumption metrics, lap-count projections and pit-overlay data.

pub mod engine;
pub mod flags;
pub mod history;
pub mod overlay;
pub mod projection;
pub mod snapshot;
pub mod source;
pub mod stint;
pub mod target;
pub mod units;

pub use engine::{EngineOutput, EngineStatus, FuelEngine, LapAdjust};
pub use snapshot::TelemetrySnapshot;
pub use source::TelemetrySource;
pub use units::FuelUnit;
