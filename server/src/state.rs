use crate::config::ToolSettings;
use crate::store::{ResultSink, SimulationRecord, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct AppState {
    pub store: Arc<dyn ResultSink>,
    pub tools: ToolSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn ResultSink>, tools: ToolSettings) -> Self {
        AppState { store, tools }
    }

    /// Best-effort write: the record goes to a blocking task and the caller
    /// does not wait for it. A failed write is logged and dropped, never retried.
    /// The handle is only awaited by tests.
    pub fn persist(&self, record: SimulationRecord) -> JoinHandle<Result<(), StoreError>> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let result = store.save(&record);
            match &result {
                Ok(()) => log::debug!("stored {} {} result", record.algorithm, record.action),
                Err(StoreError::Disabled) => {
                    log::debug!("history disabled, {} {} result not stored", record.algorithm, record.action)
                }
                Err(e) => log::warn!("failed to store {} {} result: {e}", record.algorithm, record.action),
            }
            result
        })
    }
}
