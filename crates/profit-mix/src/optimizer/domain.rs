use crate::catalog::Fund;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired exposure profile. Values are percentages; the engine accepts any
/// real and never clamps (callers may constrain their own input ranges).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureTarget {
    pub equity: f64,
    pub abroad: f64,
    pub fx: f64,
    pub illiquid: f64,
}

/// Per-metric importance multipliers for deviation scoring. A weight of 0
/// disables that metric's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub equity: f64,
    pub abroad: f64,
    pub fx: f64,
    pub illiquid: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            equity: 1.0,
            abroad: 1.0,
            fx: 1.0,
            illiquid: 1.0,
        }
    }
}

/// Number of funds in a blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BlendSize {
    Single,
    Pair,
    Triple,
}

impl BlendSize {
    pub const fn fund_count(self) -> usize {
        match self {
            BlendSize::Single => 1,
            BlendSize::Pair => 2,
            BlendSize::Triple => 3,
        }
    }
}

impl TryFrom<u8> for BlendSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BlendSize::Single),
            2 => Ok(BlendSize::Pair),
            3 => Ok(BlendSize::Triple),
            other => Err(format!("blend size must be 1, 2, or 3 (got {other})")),
        }
    }
}

impl From<BlendSize> for u8 {
    fn from(value: BlendSize) -> Self {
        value.fund_count() as u8
    }
}

/// Provider service-quality scores with a default for unmapped providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceScores {
    scores: BTreeMap<String, f64>,
    default_score: f64,
}

impl ServiceScores {
    pub fn new(default_score: f64) -> Self {
        Self {
            scores: BTreeMap::new(),
            default_score,
        }
    }

    pub fn from_map(scores: BTreeMap<String, f64>, default_score: f64) -> Self {
        Self {
            scores,
            default_score,
        }
    }

    pub fn insert(&mut self, provider: String, score: f64) {
        self.scores.insert(provider, score);
    }

    pub fn lookup(&self, provider: &str) -> f64 {
        self.scores
            .get(provider)
            .copied()
            .unwrap_or(self.default_score)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Weighted aggregate of the member funds' exposure fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateProfile {
    pub equity: f64,
    pub abroad: f64,
    pub fx: f64,
    pub illiquid: f64,
    pub sharpe: f64,
}

impl AggregateProfile {
    /// Domestic share is always computed as the complement of abroad.
    pub fn domestic(&self) -> f64 {
        100.0 - self.abroad
    }
}

/// One evaluated blend: the member funds, their allocation weights (summing
/// to 1 within floating tolerance), and the scores that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendCandidate {
    pub funds: Vec<Fund>,
    pub weights: Vec<f64>,
    pub profile: AggregateProfile,
    pub deviation: f64,
    pub service: f64,
    pub score: f64,
}

/// Full input to one optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeRequest {
    pub target: ExposureTarget,
    pub metric_weights: MetricWeights,
    pub sharpe_weight: f64,
    pub service_weight: f64,
    pub service_scores: ServiceScores,
    pub same_provider_only: bool,
    pub size: BlendSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_size_round_trips_through_u8() {
        for n in 1u8..=3 {
            let size = BlendSize::try_from(n).expect("valid size");
            assert_eq!(u8::from(size), n);
        }
        assert!(BlendSize::try_from(4).is_err());
        assert!(BlendSize::try_from(0).is_err());
    }

    #[test]
    fn service_scores_fall_back_to_default() {
        let mut scores = ServiceScores::new(70.0);
        scores.insert("כלל".to_string(), 85.0);
        assert_eq!(scores.lookup("כלל"), 85.0);
        assert_eq!(scores.lookup("מור"), 70.0);
    }

    #[test]
    fn domestic_is_complement_of_abroad() {
        let profile = AggregateProfile {
            equity: 40.0,
            abroad: 62.5,
            fx: 30.0,
            illiquid: 10.0,
            sharpe: 1.0,
        };
        assert_eq!(profile.domestic(), 37.5);
    }
}
