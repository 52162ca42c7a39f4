pub mod aggregator;
pub mod query;
pub mod stats;

pub use aggregator::{
    compute_ranking, ranking_window, recalculate_ranking, sort_and_rank, RankingRun,
    RecalculationReport, RANKING_WINDOW_YEARS,
};
pub use query::{apply_filters, get_ranking, RankingFilters};
pub use stats::{get_ranking_stats, summarize, RankingStats, RegionStats};

use crate::error::{RankingError, RankingResult};
use crate::store::RankingStore;

/// Years that have a stored ranking snapshot, ascending.
pub fn snapshot_years<S: RankingStore + ?Sized>(store: &S) -> RankingResult<Vec<i32>> {
    store.history_years().map_err(RankingError::Lookup)
}
