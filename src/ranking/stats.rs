use super::aggregator::compute_ranking;
use crate::error::{RankingError, RankingResult};
use crate::store::{RankingEntry, RankingStore, Region, RegionId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub region_id: RegionId,
    pub region_name: String,
    pub team_count: usize,
    pub total_points: f64,
    pub average_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    pub year: i32,
    pub team_count: usize,
    pub average_points: f64,
    pub top: Vec<RankingEntry>,
    /// Sorted by region name
    pub regions: Vec<RegionStats>,
}

/// Statistics over a freshly computed ranking for `current_year`.
pub fn get_ranking_stats<S: RankingStore + ?Sized>(
    store: &mut S,
    current_year: i32,
    top_n: usize,
) -> RankingResult<RankingStats> {
    let run = compute_ranking(store, current_year)?;
    let regions = store.regions().map_err(RankingError::Lookup)?;
    Ok(summarize(current_year, &run.entries, &regions, top_n))
}

/// Reduce ranked entries into overall and per-region figures.
pub fn summarize(year: i32, entries: &[RankingEntry], regions: &[Region], top_n: usize) -> RankingStats {
    let team_count = entries.len();
    let total: f64 = entries.iter().map(|e| e.total_points).sum();

    let mut by_region: BTreeMap<RegionId, (usize, f64)> = BTreeMap::new();
    for entry in entries {
        let slot = by_region.entry(entry.team.region_id).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += entry.total_points;
    }

    let mut region_stats: Vec<RegionStats> = by_region
        .into_iter()
        .map(|(region_id, (count, sum))| RegionStats {
            region_id,
            region_name: regions
                .iter()
                .find(|r| r.id == region_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| format!("Region {}", region_id)),
            team_count: count,
            total_points: sum,
            average_points: sum / count as f64,
        })
        .collect();
    region_stats.sort_by(|a, b| {
        a.region_name
            .cmp(&b.region_name)
            .then_with(|| a.region_id.cmp(&b.region_id))
    });

    RankingStats {
        year,
        team_count,
        average_points: if team_count == 0 { 0.0 } else { total / team_count as f64 },
        top: entries.iter().take(top_n).cloned().collect(),
        regions: region_stats,
    }
}
