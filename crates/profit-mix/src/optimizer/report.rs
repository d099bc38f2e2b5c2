use super::domain::BlendCandidate;
use crate::catalog::Fund;
use serde::Serialize;
use std::collections::BTreeSet;

const BADGES: [&str; 3] = ["Primary pick", "Second alternative", "Third alternative"];

/// One fund leg of a presented blend.
#[derive(Debug, Clone, Serialize)]
pub struct BlendLegView {
    pub name: String,
    pub sheet: String,
    pub provider: String,
    pub weight_pct: f64,
}

/// Aggregate exposures of a presented blend, including the computed
/// domestic share.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub equity: f64,
    pub abroad: f64,
    pub domestic: f64,
    pub fx: f64,
    pub illiquid: f64,
    pub sharpe: f64,
}

/// A ranked alternative, carrying everything a caller needs to render
/// comparison tables or summary cards without recomputing.
#[derive(Debug, Clone, Serialize)]
pub struct BlendAlternativeView {
    pub rank: usize,
    pub badge: &'static str,
    pub legs: Vec<BlendLegView>,
    pub profile: ProfileView,
    pub deviation: f64,
    pub service: f64,
    pub score: f64,
    pub advantage: String,
}

pub fn alternative_views(alternatives: &[BlendCandidate]) -> Vec<BlendAlternativeView> {
    alternatives
        .iter()
        .enumerate()
        .map(|(rank, candidate)| BlendAlternativeView {
            rank: rank + 1,
            badge: BADGES.get(rank).copied().unwrap_or("Alternative"),
            legs: candidate
                .funds
                .iter()
                .zip(&candidate.weights)
                .map(|(fund, weight)| BlendLegView {
                    name: fund.name.clone(),
                    sheet: fund.sheet.clone(),
                    provider: fund.provider.clone(),
                    weight_pct: weight * 100.0,
                })
                .collect(),
            profile: ProfileView {
                equity: candidate.profile.equity,
                abroad: candidate.profile.abroad,
                domestic: candidate.profile.domestic(),
                fx: candidate.profile.fx,
                illiquid: candidate.profile.illiquid,
                sharpe: candidate.profile.sharpe,
            },
            deviation: candidate.deviation,
            service: candidate.service,
            score: candidate.score,
            advantage: advantage_text(rank, candidate),
        })
        .collect()
}

/// Per-rank one-liner explaining what the alternative is good at.
fn advantage_text(rank: usize, candidate: &BlendCandidate) -> String {
    match rank {
        0 => format!("closest to target (deviation {:.1})", candidate.deviation),
        1 => format!(
            "sharpe {:.2} + service {:.1} | deviation {:.1}",
            candidate.profile.sharpe, candidate.service, candidate.deviation
        ),
        _ => format!(
            "high weighted service {:.1} | deviation {:.1}",
            candidate.service, candidate.deviation
        ),
    }
}

/// One catalog row in the transparency view.
#[derive(Debug, Clone, Serialize)]
pub struct FundRowView {
    pub name: String,
    pub provider: String,
    pub sheet: String,
    pub equity: f64,
    pub abroad: f64,
    pub domestic: f64,
    pub fx: f64,
    pub illiquid: f64,
    pub sharpe: f64,
}

/// Catalog snapshot: counts, providers, and per-fund rows.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummaryView {
    pub fund_count: usize,
    pub provider_count: usize,
    pub sheet_count: usize,
    pub providers: Vec<String>,
    pub funds: Vec<FundRowView>,
}

impl CatalogSummaryView {
    pub fn from_funds(funds: &[Fund]) -> Self {
        let providers: BTreeSet<&str> = funds.iter().map(|f| f.provider.as_str()).collect();
        let sheets: BTreeSet<&str> = funds.iter().map(|f| f.sheet.as_str()).collect();

        let mut rows: Vec<FundRowView> = funds
            .iter()
            .map(|fund| FundRowView {
                name: fund.name.clone(),
                provider: fund.provider.clone(),
                sheet: fund.sheet.clone(),
                equity: fund.equity,
                abroad: fund.abroad,
                domestic: 100.0 - fund.abroad,
                fx: fund.fx,
                illiquid: fund.illiquid,
                sharpe: fund.sharpe,
            })
            .collect();
        rows.sort_by(|a, b| a.provider.cmp(&b.provider).then(a.name.cmp(&b.name)));

        Self {
            fund_count: funds.len(),
            provider_count: providers.len(),
            sheet_count: sheets.len(),
            providers: providers.into_iter().map(str::to_string).collect(),
            funds: rows,
        }
    }
}
