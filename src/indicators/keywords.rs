//! Keyword aggregation: merge, rank and cut to a deterministic top-N.

use crate::core::{KeywordCount, KeywordObservation};

/// Default number of keywords kept after ranking.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;

/// Merge counts per distinct keyword and return the `limit` highest.
///
/// Blank keywords (after trimming) and zero counts are dropped before
/// merging. Ties keep the order in which a keyword was first observed.
pub fn rank_keywords(observations: &[KeywordObservation], limit: usize) -> Vec<KeywordCount> {
    let mut merged: Vec<KeywordCount> = Vec::new();

    for obs in observations {
        let keyword = obs.keyword.trim();
        if keyword.is_empty() || obs.count == 0 {
            continue;
        }
        match merged.iter_mut().find(|k| k.keyword == keyword) {
            Some(existing) => existing.count = existing.count.saturating_add(obs.count),
            None => merged.push(KeywordCount::new(keyword, obs.count)),
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    merged.sort_by(|a, b| b.count.cmp(&a.count));
    merged.truncate(limit);
    merged
}

/// Re-rank an already ranked list; yields the same list.
pub fn rerank(ranked: &[KeywordCount], limit: usize) -> Vec<KeywordCount> {
    let observations: Vec<KeywordObservation> = ranked
        .iter()
        .map(|k| KeywordObservation::new(k.keyword.clone(), k.count))
        .collect();
    rank_keywords(&observations, limit)
}
