use super::domain::BlendCandidate;
use std::collections::BTreeSet;

/// Maximum number of alternatives presented to the caller.
pub const MAX_ALTERNATIVES: usize = 3;

/// Pick up to three alternatives from a pool sorted ascending by score.
///
/// Diversity is a soft preference: the strict pass forbids repeating fund
/// names and (unless blends are intentionally single-provider) providers
/// across picks; the relaxed pass drops provider uniqueness; the final
/// fallback returns the top three by score so a valid answer is never
/// suppressed by diversity alone.
pub(crate) fn select_diverse(
    pool: &[BlendCandidate],
    same_provider_only: bool,
) -> Vec<BlendCandidate> {
    let mut chosen: Vec<usize> = Vec::new();
    let mut used_names: BTreeSet<&str> = BTreeSet::new();
    let mut used_providers: BTreeSet<&str> = BTreeSet::new();

    // Strict pass: unique fund names, and unique providers across picks.
    for (index, candidate) in pool.iter().enumerate() {
        if candidate
            .funds
            .iter()
            .any(|fund| used_names.contains(fund.name.as_str()))
        {
            continue;
        }
        if !same_provider_only
            && candidate
                .funds
                .iter()
                .any(|fund| used_providers.contains(fund.provider.as_str()))
        {
            continue;
        }

        chosen.push(index);
        for fund in &candidate.funds {
            used_names.insert(fund.name.as_str());
            used_providers.insert(fund.provider.as_str());
        }
        if chosen.len() == MAX_ALTERNATIVES {
            break;
        }
    }

    // Relaxed pass: provider uniqueness dropped, fund names still unique.
    if chosen.len() < MAX_ALTERNATIVES {
        for (index, candidate) in pool.iter().enumerate() {
            if chosen.contains(&index) {
                continue;
            }
            if candidate
                .funds
                .iter()
                .any(|fund| used_names.contains(fund.name.as_str()))
            {
                continue;
            }

            chosen.push(index);
            for fund in &candidate.funds {
                used_names.insert(fund.name.as_str());
            }
            if chosen.len() == MAX_ALTERNATIVES {
                break;
            }
        }
    }

    // Diversity abandoned entirely rather than returning nothing.
    if chosen.is_empty() {
        return pool.iter().take(MAX_ALTERNATIVES).cloned().collect();
    }

    chosen.into_iter().map(|index| pool[index].clone()).collect()
}
