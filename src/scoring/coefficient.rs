use super::config::{CoefficientParams, ScoringConfiguration};
use crate::error::{RankingError, RankingResult};
use crate::store::{RankingStore, RegionId, Tier};
use std::collections::HashMap;
use tracing::debug;

/// Bounded multiplier for a region that earned `total_points` in the top two tiers.
pub fn coefficient_from_points(total_points: f64, params: &CoefficientParams) -> f64 {
    (params.floor + total_points * params.increment)
        .max(params.floor)
        .min(params.ceiling)
}

/// Regional coefficient of `region_id` for `year`, read straight from the store.
///
/// Only top and second division finishes count. Regional-tier results are
/// the ones the coefficient multiplies, so they never feed it.
pub fn compute_coefficient<S: RankingStore + ?Sized>(
    store: &S,
    config: &ScoringConfiguration,
    region_id: RegionId,
    year: i32,
) -> RankingResult<f64> {
    if store.region(region_id).map_err(RankingError::Lookup)?.is_none() {
        return Err(RankingError::region_not_found(region_id));
    }

    let results = store
        .region_positions(region_id, year, &Tier::COEFFICIENT_TIERS)
        .map_err(RankingError::Lookup)?;

    let total_points: f64 = results
        .iter()
        .filter(|r| r.tier.feeds_coefficient())
        .map(|r| config.points(r.tier, r.position))
        .sum();

    let coefficient = coefficient_from_points(total_points, &config.coefficient);
    debug!(
        "Region {} in {}: {} division points -> coefficient {:.3}",
        region_id, year, total_points, coefficient
    );
    Ok(coefficient)
}

/// Per-run memo of regional coefficients keyed by (region, year).
///
/// Results are deterministic for fixed data, so each key is computed once
/// per ranking run no matter how many teams share the region.
pub struct RegionalCoefficients<'a> {
    config: &'a ScoringConfiguration,
    memo: HashMap<(RegionId, i32), f64>,
}

impl<'a> RegionalCoefficients<'a> {
    pub fn new(config: &'a ScoringConfiguration) -> Self {
        Self {
            config,
            memo: HashMap::new(),
        }
    }

    pub fn coefficient<S: RankingStore + ?Sized>(
        &mut self,
        store: &S,
        region_id: RegionId,
        year: i32,
    ) -> RankingResult<f64> {
        if let Some(value) = self.memo.get(&(region_id, year)) {
            return Ok(*value);
        }

        // Failures are not memoized; a later call may succeed
        let value = compute_coefficient(store, self.config, region_id, year)?;
        self.memo.insert((region_id, year), value);
        Ok(value)
    }

    /// Coefficients computed for `year`, sorted by region id
    pub fn for_year(&self, year: i32) -> Vec<(RegionId, f64)> {
        let mut values: Vec<_> = self
            .memo
            .iter()
            .filter(|((_, y), _)| *y == year)
            .map(|((region_id, _), value)| (*region_id, *value))
            .collect();
        values.sort_by_key(|(region_id, _)| *region_id);
        values
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
