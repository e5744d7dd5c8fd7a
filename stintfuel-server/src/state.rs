//! Application state management

use stintfuel_core::{EngineOutput, FuelEngine, TelemetrySource};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// All registered telemetry sources
    pub sources: Arc<RwLock<Vec<Box<dyn TelemetrySource>>>>,

    /// Name of the currently active source
    pub active_source: Arc<RwLock<Option<String>>>,

    /// The fuel engine, ticked exclusively by the monitor loop
    pub engine: Arc<RwLock<FuelEngine>>,

    /// Broadcast channel for per-tick engine output
    /// Multiple consumers can subscribe to receive outputs
    pub output_tx: broadcast::Sender<EngineOutput>,

    /// Most recent engine output, for request/response consumers
    pub latest_output: Arc<RwLock<Option<EngineOutput>>>,
}

impl AppState {
    pub fn new() -> Self {
        // Capacity for 100 outputs; slow subscribers just skip ahead
        let (output_tx, _) = broadcast::channel(100);

        Self {
            sources: Arc::new(RwLock::new(Vec::new())),
            active_source: Arc::new(RwLock::new(None)),
            engine: Arc::new(RwLock::new(FuelEngine::new())),
            output_tx,
            latest_output: Arc::new(RwLock::new(None)),
        }
    }

    /// Register a telemetry source
    pub async fn register_source(&self, source: Box<dyn TelemetrySource>) {
        let mut sources = self.sources.write().await;
        sources.push(source);
    }

    /// Subscribe to engine outputs
    pub fn subscribe(&self) -> broadcast::Receiver<EngineOutput> {
        self.output_tx.subscribe()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
