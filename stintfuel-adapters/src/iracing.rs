//! iRacing source backed by the iracing.rs shared-memory reader
//!
//! Only the handful of variables the fuel engine consumes are read. A
//! variable that is missing or has an unexpected type becomes `None` in the
//! snapshot; completeness is judged downstream, not here. Windows only.

#[cfg(target_os = "windows")]
mod windows_impl {
    use anyhow::Result;
    use chrono::Utc;
    use iracing::telemetry::{Blocking, Connection, Sample};
    use stintfuel_core::{snapshot::TelemetrySnapshot, source::TelemetrySource, units::FuelUnit};
    use std::convert::TryInto;
    use std::time::Duration;

    /// Sample wait per poll. The poll cadence is owned by the caller, so
    /// this stays near zero to keep the tick loop non-blocking.
    const SAMPLE_WAIT: Duration = Duration::from_millis(1);

    pub struct IRacingSource {
        conn: Option<Connection>,
        feed: Option<Blocking>,
        active: bool,
    }

    // SAFETY: both handles wrap read-only views of iRacing's memory-mapped
    // telemetry region. Reads are synchronized by the OS mapping and nothing
    // here writes through them, so moving or sharing the source across
    // threads is sound.
    unsafe impl Send for IRacingSource {}
    unsafe impl Sync for IRacingSource {}

    impl IRacingSource {
        pub fn new() -> Self {
            Self {
                conn: None,
                feed: None,
                active: false,
            }
        }

        fn snapshot_from(sample: &Sample) -> TelemetrySnapshot {
            let f32_var = |name: &'static str| -> Option<f32> {
                sample.get(name).ok().and_then(|v| v.try_into().ok())
            };
            let i32_var = |name: &'static str| -> Option<i32> {
                sample.get(name).ok().and_then(|v| v.try_into().ok())
            };
            let bool_var = |name: &'static str| -> Option<bool> {
                sample.get(name).ok().and_then(|v| v.try_into().ok())
            };

            TelemetrySnapshot {
                timestamp: Utc::now(),
                source: "iRacing".to_string(),
                // FuelLevel is liters no matter what DisplayUnits says
                fuel_level: f32_var("FuelLevel").map(f64::from),
                lap: i32_var("Lap"),
                lap_dist_pct: f32_var("LapDistPct").map(f64::from),
                on_track: bool_var("IsOnTrack"),
                on_pit_road: bool_var("OnPitRoad"),
                // SessionFlags is a bitfield exposed as a signed int
                session_flags: i32_var("SessionFlags").map(|f| f as u32),
                display_unit: i32_var("DisplayUnits").and_then(FuelUnit::from_iracing),
            }
        }
    }

    impl TelemetrySource for IRacingSource {
        fn name(&self) -> &str {
            "iRacing"
        }

        fn detect(&self) -> bool {
            // The shared memory region only exists while the sim runs, so a
            // successful open doubles as detection.
            Connection::new().is_ok()
        }

        fn start(&mut self) -> Result<()> {
            let conn = Connection::new()?;
            self.feed = Some(conn.blocking()?);
            self.conn = Some(conn);
            self.active = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.feed = None;
            self.conn = None;
            self.active = false;
            Ok(())
        }

        fn poll(&mut self) -> Result<Option<TelemetrySnapshot>> {
            if !self.active {
                return Ok(None);
            }
            let feed = match self.feed.as_ref() {
                Some(feed) => feed,
                None => return Ok(None),
            };
            // A timeout is just "nothing this tick", not a failure
            match feed.sample(SAMPLE_WAIT) {
                Ok(sample) => Ok(Some(Self::snapshot_from(&sample))),
                Err(_) => Ok(None),
            }
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }
}

#[cfg(target_os = "windows")]
pub use windows_impl::IRacingSource;

/// Placeholder on non-Windows hosts: never detected, never yields data.
#[cfg(not(target_os = "windows"))]
#[derive(Default)]
pub struct IRacingSource;

#[cfg(not(target_os = "windows"))]
impl IRacingSource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_os = "windows"))]
impl stintfuel_core::source::TelemetrySource for IRacingSource {
    fn name(&self) -> &str {
        "iRacing"
    }

    fn detect(&self) -> bool {
        false
    }

    fn start(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("iRacing telemetry requires Windows shared memory")
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn poll(&mut self) -> anyhow::Result<Option<stintfuel_core::snapshot::TelemetrySnapshot>> {
        Ok(None)
    }

    fn is_active(&self) -> bool {
        false
    }
}
