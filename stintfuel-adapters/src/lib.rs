//! Game-specific telemetry sources for StintFuel

pub mod demo;
pub mod iracing;

pub use demo::DemoSource;
pub use iracing::IRacingSource;
