use inspection_ai::workflows::inspection::{
    ActionError, ActionPublisher, AnalysisRepository, ComplianceAnalysisRecord, CreateActionInput,
    RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps completed-session summaries in process memory. Stands in for the
/// compliance datastore until one is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    records: Arc<Mutex<Vec<ComplianceAnalysisRecord>>>,
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn save(&self, record: ComplianceAnalysisRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("analysis mutex poisoned");
        guard.push(record);
        Ok(())
    }
}

impl InMemoryAnalysisRepository {
    pub(crate) fn records(&self) -> Vec<ComplianceAnalysisRecord> {
        self.records.lock().expect("analysis mutex poisoned").clone()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryActionPublisher {
    actions: Arc<Mutex<Vec<CreateActionInput>>>,
}

impl ActionPublisher for InMemoryActionPublisher {
    fn create_actions(&self, actions: &[CreateActionInput]) -> Result<usize, ActionError> {
        let mut guard = self.actions.lock().expect("action mutex poisoned");
        guard.extend_from_slice(actions);
        Ok(actions.len())
    }
}

impl InMemoryActionPublisher {
    pub(crate) fn actions(&self) -> Vec<CreateActionInput> {
        self.actions.lock().expect("action mutex poisoned").clone()
    }
}
