use super::aggregator::compute_ranking;
use crate::error::{RankingError, RankingResult};
use crate::store::{RankingEntry, RankingStore, RegionId};

/// Filters accepted by [`get_ranking`]. All optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingFilters {
    /// Snapshot year; a past year is read from history instead of recomputed
    pub year: Option<i32>,
    pub region_id: Option<RegionId>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Ranking for the requested year, filtered and paginated.
///
/// Past years come from their stored snapshot (empty if never computed);
/// the current year is always computed fresh, which also refreshes its snapshot.
pub fn get_ranking<S: RankingStore + ?Sized>(
    store: &mut S,
    filters: &RankingFilters,
    current_year: i32,
) -> RankingResult<Vec<RankingEntry>> {
    let entries = match filters.year {
        Some(year) if year != current_year => store
            .history(year)
            .map_err(RankingError::Lookup)?
            .into_iter()
            .map(RankingEntry::from)
            .collect(),
        _ => compute_ranking(store, current_year)?.entries,
    };

    Ok(apply_filters(entries, filters))
}

/// Region filter, then offset, then limit. Ranks keep their overall values.
pub fn apply_filters(entries: Vec<RankingEntry>, filters: &RankingFilters) -> Vec<RankingEntry> {
    entries
        .into_iter()
        .filter(|e| filters.region_id.map_or(true, |id| e.team.region_id == id))
        .skip(filters.offset.unwrap_or(0))
        .take(filters.limit.unwrap_or(usize::MAX))
        .collect()
}
