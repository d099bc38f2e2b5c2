use metrics_exporter_prometheus::PrometheusHandle;
use profit_mix::catalog::{CatalogRepository, Fund, RepositoryError};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local catalog store. Catalogs are replaced wholesale on load.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogRepository {
    funds: Arc<Mutex<Vec<Fund>>>,
}

impl InMemoryCatalogRepository {
    /// Swap in a freshly loaded catalog, returning the fund count.
    pub(crate) fn seed(&self, funds: Vec<Fund>) -> usize {
        let mut guard = self.funds.lock().expect("catalog mutex poisoned");
        *guard = funds;
        guard.len()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn funds(&self) -> Result<Vec<Fund>, RepositoryError> {
        let guard = self.funds.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn replace(&self, funds: Vec<Fund>) -> Result<usize, RepositoryError> {
        Ok(self.seed(funds))
    }
}
