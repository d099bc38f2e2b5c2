use super::domain::{BlendCandidate, OptimizeRequest};
use super::search::enumerate_candidates;
use super::select::select_diverse;
use crate::catalog::Fund;
use std::cmp::Ordering;

/// Stateless optimizer that runs one batch search for a fixed request.
///
/// Single-threaded and deterministic: given the same catalog and request it
/// produces the same ranking. No caching, no state across calls.
pub struct BlendOptimizer {
    request: OptimizeRequest,
}

impl BlendOptimizer {
    pub fn new(request: OptimizeRequest) -> Self {
        Self { request }
    }

    /// Enumerate, score, rank, and diversify. Returns the ranked shortlist
    /// or a recoverable, user-facing error; never panics on valid input.
    pub fn optimize(&self, funds: &[Fund]) -> Result<Vec<BlendCandidate>, OptimizeError> {
        let needed = self.request.size.fund_count();
        if funds.len() < needed {
            return Err(OptimizeError::InsufficientCatalog {
                needed,
                available: funds.len(),
            });
        }

        let mut pool = enumerate_candidates(funds, &self.request);
        if pool.is_empty() {
            return Err(OptimizeError::NoValidCombinations);
        }

        // Stable sort: equal scores keep enumeration order.
        pool.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

        Ok(select_diverse(&pool, self.request.same_provider_only))
    }
}

/// Terminal, recoverable outcomes of a search that produced no shortlist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptimizeError {
    #[error("at least {needed} funds are required; the catalog has {available}")]
    InsufficientCatalog { needed: usize, available: usize },
    #[error("no valid fund combinations matched the current constraints; try relaxing them")]
    NoValidCombinations,
}
