use super::blend::{blend_profile, blended_service, deviation, final_score};
use super::domain::{AggregateProfile, BlendCandidate, BlendSize, OptimizeRequest};
use crate::catalog::Fund;

/// 101 grid points: weights 0.00 to 1.00 in steps of 0.01.
const PAIR_GRID_POINTS: usize = 101;
/// 21 grid points per simplex axis: 0.00 to 1.00 in steps of 0.05.
const TRIPLE_GRID_POINTS: usize = 21;
/// Tolerance for residual-weight drift in the 3-fund simplex grid.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Enumerate every eligible fund subset of the requested size and keep the
/// single best-scoring weight split per subset. Candidates are emitted in
/// input index order so equal scores stay deterministic downstream.
pub(crate) fn enumerate_candidates(
    funds: &[Fund],
    request: &OptimizeRequest,
) -> Vec<BlendCandidate> {
    match request.size {
        BlendSize::Single => single_candidates(funds, request),
        BlendSize::Pair => pair_candidates(funds, request),
        BlendSize::Triple => triple_candidates(funds, request),
    }
}

fn single_candidates(funds: &[Fund], request: &OptimizeRequest) -> Vec<BlendCandidate> {
    funds
        .iter()
        .map(|fund| {
            let members = [fund];
            materialize(&members, evaluate(&members, vec![1.0], request))
        })
        .collect()
}

fn pair_candidates(funds: &[Fund], request: &OptimizeRequest) -> Vec<BlendCandidate> {
    let mut candidates = Vec::new();
    for i in 0..funds.len() {
        for j in (i + 1)..funds.len() {
            let members = [&funds[i], &funds[j]];
            if request.same_provider_only && members[0].provider != members[1].provider {
                continue;
            }

            let best = pair_weights()
                .map(|(w1, w2)| evaluate(&members, vec![w1, w2], request))
                .reduce(keep_better);
            let Some(best) = best else { continue };
            candidates.push(materialize(&members, best));
        }
    }
    candidates
}

fn triple_candidates(funds: &[Fund], request: &OptimizeRequest) -> Vec<BlendCandidate> {
    let mut candidates = Vec::new();
    for i in 0..funds.len() {
        for j in (i + 1)..funds.len() {
            for k in (j + 1)..funds.len() {
                let members = [&funds[i], &funds[j], &funds[k]];
                if request.same_provider_only
                    && !(members[0].provider == members[1].provider
                        && members[1].provider == members[2].provider)
                {
                    continue;
                }

                let best = triple_weights()
                    .map(|weights| evaluate(&members, weights.to_vec(), request))
                    .reduce(keep_better);
                let Some(best) = best else { continue };
                candidates.push(materialize(&members, best));
            }
        }
    }
    candidates
}

/// Lazy 2-fund weight grid: (w1, 1 - w1) over 101 points.
fn pair_weights() -> impl Iterator<Item = (f64, f64)> {
    (0..PAIR_GRID_POINTS).map(|i| {
        let w1 = i as f64 / 100.0;
        (w1, 1.0 - w1)
    })
}

/// Lazy 3-fund simplex grid: w1 and w2 sweep 21 points each, w3 is the
/// residual rounded to 3 decimals. Residuals outside [0, 1] beyond the
/// tolerance are rejected; in-tolerance drift is clamped, so a clamped
/// triple may sum to marginally off 1. That leniency is intentional and
/// load-bearing for the grid's corner points.
fn triple_weights() -> impl Iterator<Item = [f64; 3]> {
    (0..TRIPLE_GRID_POINTS).flat_map(|i| {
        (0..TRIPLE_GRID_POINTS).filter_map(move |j| {
            let w1 = (i * 5) as f64 / 100.0;
            let w2 = (j * 5) as f64 / 100.0;
            let w3 = round3(1.0 - w1 - w2);
            if !(-WEIGHT_TOLERANCE..=1.0 + WEIGHT_TOLERANCE).contains(&w3) {
                return None;
            }
            Some([w1, w2, w3.clamp(0.0, 1.0)])
        })
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// One scored point on a subset's weight grid.
struct Evaluation {
    weights: Vec<f64>,
    profile: AggregateProfile,
    deviation: f64,
    service: f64,
    score: f64,
}

fn evaluate(members: &[&Fund], weights: Vec<f64>, request: &OptimizeRequest) -> Evaluation {
    let profile = blend_profile(members, &weights);
    let deviation = deviation(&profile, &request.target, &request.metric_weights);
    let service = blended_service(members, &weights, &request.service_scores);
    let score = final_score(
        deviation,
        profile.sharpe,
        service,
        request.sharpe_weight,
        request.service_weight,
    );

    Evaluation {
        weights,
        profile,
        deviation,
        service,
        score,
    }
}

/// Strictly-lower score wins; ties keep the earlier grid point.
fn keep_better(best: Evaluation, next: Evaluation) -> Evaluation {
    if next.score < best.score {
        next
    } else {
        best
    }
}

fn materialize(members: &[&Fund], evaluation: Evaluation) -> BlendCandidate {
    BlendCandidate {
        funds: members.iter().map(|fund| (*fund).clone()).collect(),
        weights: evaluation.weights,
        profile: evaluation.profile,
        deviation: evaluation.deviation,
        service: evaluation.service,
        score: evaluation.score,
    }
}
