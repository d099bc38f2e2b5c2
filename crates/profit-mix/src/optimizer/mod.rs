//! Blend construction, scoring, and selection.
//!
//! The engine enumerates 1/2/3-fund subsets of the catalog, grid-searches
//! allocation weights per subset, scores each blend against the target
//! exposure profile, and picks a diversified top-3 shortlist.

mod blend;
pub mod domain;
mod engine;
pub mod report;
pub mod router;
mod search;
mod select;
pub mod service;

pub use domain::{
    AggregateProfile, BlendCandidate, BlendSize, ExposureTarget, MetricWeights, OptimizeRequest,
    ServiceScores,
};
pub use engine::{BlendOptimizer, OptimizeError};
pub use report::{alternative_views, BlendAlternativeView, CatalogSummaryView};
pub use router::{optimizer_router, OptimizeRequestBody, OptimizeResponseBody};
pub use select::MAX_ALTERNATIVES;
pub use service::{BlendService, BlendServiceError, OptimizationOutcome};
