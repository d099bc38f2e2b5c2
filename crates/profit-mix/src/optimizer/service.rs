use std::sync::Arc;

use super::domain::{BlendCandidate, OptimizeRequest};
use super::engine::{BlendOptimizer, OptimizeError};
use super::report::CatalogSummaryView;
use crate::catalog::{CatalogRepository, RepositoryError};

/// Service composing the catalog repository and the blend optimizer.
pub struct BlendService<C> {
    repository: Arc<C>,
}

/// Result of one optimization run, sized for API responses.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// Catalog size at the time of the run.
    pub funds_considered: usize,
    /// Ranked shortlist, best first, at most three entries.
    pub alternatives: Vec<BlendCandidate>,
}

impl<C> BlendService<C>
where
    C: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Run one batch optimization against the current catalog.
    pub fn optimize(
        &self,
        request: OptimizeRequest,
    ) -> Result<OptimizationOutcome, BlendServiceError> {
        let funds = self.repository.funds()?;
        let optimizer = BlendOptimizer::new(request);
        let alternatives = optimizer.optimize(&funds)?;

        Ok(OptimizationOutcome {
            funds_considered: funds.len(),
            alternatives,
        })
    }

    /// Catalog snapshot for the transparency view.
    pub fn catalog_summary(&self) -> Result<CatalogSummaryView, BlendServiceError> {
        let funds = self.repository.funds()?;
        Ok(CatalogSummaryView::from_funds(&funds))
    }
}

/// Error raised by the blend service.
#[derive(Debug, thiserror::Error)]
pub enum BlendServiceError {
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
