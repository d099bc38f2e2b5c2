use super::domain::{AggregateProfile, ExposureTarget, MetricWeights, ServiceScores};
use crate::catalog::Fund;

/// Weight-dot-product of the member funds' exposure fields.
///
/// Pure; mismatched lengths are a caller bug, not a runtime state.
pub(crate) fn blend_profile(funds: &[&Fund], weights: &[f64]) -> AggregateProfile {
    debug_assert_eq!(funds.len(), weights.len());

    let dot = |field: fn(&Fund) -> f64| {
        funds
            .iter()
            .zip(weights)
            .map(|(fund, weight)| weight * field(fund))
            .sum()
    };

    AggregateProfile {
        equity: dot(|f| f.equity),
        abroad: dot(|f| f.abroad),
        fx: dot(|f| f.fx),
        illiquid: dot(|f| f.illiquid),
        sharpe: dot(|f| f.sharpe),
    }
}

/// Weighted sum of absolute deviations from the target, over the four
/// exposure metrics. Illiquid participates as a soft penalty like the rest.
pub(crate) fn deviation(
    profile: &AggregateProfile,
    target: &ExposureTarget,
    weights: &MetricWeights,
) -> f64 {
    weights.equity * (profile.equity - target.equity).abs()
        + weights.abroad * (profile.abroad - target.abroad).abs()
        + weights.fx * (profile.fx - target.fx).abs()
        + weights.illiquid * (profile.illiquid - target.illiquid).abs()
}

/// Allocation-weighted service score across the member providers.
pub(crate) fn blended_service(funds: &[&Fund], weights: &[f64], scores: &ServiceScores) -> f64 {
    debug_assert_eq!(funds.len(), weights.len());
    funds
        .iter()
        .zip(weights)
        .map(|(fund, weight)| weight * scores.lookup(&fund.provider))
        .sum()
}

/// Final candidate score. Lower is better: deviation is a cost, sharpe and
/// service are credits.
pub(crate) fn final_score(
    deviation: f64,
    sharpe: f64,
    service: f64,
    sharpe_weight: f64,
    service_weight: f64,
) -> f64 {
    deviation - sharpe_weight * sharpe - service_weight * (service / 100.0)
}
