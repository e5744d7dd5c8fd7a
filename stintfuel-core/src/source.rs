//! Telemetry source trait definition

use crate::snapshot::TelemetrySnapshot;
use anyhow::Result;

/// Trait for game-specific telemetry sources
///
/// Each source is responsible for:
/// - Detecting if the simulator is currently running
/// - Reading the session/car variables the fuel engine needs
/// - Converting them into a `TelemetrySnapshot`
pub trait TelemetrySource: Send + Sync {
    /// Get the name of this source (e.g. "iRacing", "Demo")
    fn name(&self) -> &str;

    /// Check if the simulator is currently running and accessible
    ///
    /// This should be a lightweight check (e.g. shared memory existence)
    fn detect(&self) -> bool;

    /// Start reading telemetry data
    ///
    /// Called when the simulator is detected. Initialize any connections.
    fn start(&mut self) -> Result<()>;

    /// Stop reading telemetry data
    ///
    /// Called when the simulator exits or the source is being shut down.
    fn stop(&mut self) -> Result<()>;

    /// Poll the current telemetry snapshot
    ///
    /// Returns:
    /// - `Ok(Some(snapshot))` if data is available this tick
    /// - `Ok(None)` if no data is available (non-blocking)
    /// - `Err(_)` if an error occurred
    ///
    /// This should be non-blocking or have a short timeout. Individual
    /// fields inside the snapshot may still be `None`; the engine decides
    /// whether the snapshot is complete enough to track.
    fn poll(&mut self) -> Result<Option<TelemetrySnapshot>>;

    /// Get whether the source is currently active
    fn is_active(&self) -> bool;
}
