use super::coefficient::RegionalCoefficients;
use super::config::ScoringConfiguration;
use crate::error::{RankingError, RankingResult};
use crate::store::{PlacedResult, RankingStore, TeamId, Tier, YearBreakdown};

/// Raw points of one team-year, split by what the regional coefficient touches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierPoints {
    /// Top and second division
    pub ce_points: f64,
    pub regional_points: f64,
}

pub fn sum_tier_points(results: &[PlacedResult], config: &ScoringConfiguration) -> TierPoints {
    results.iter().fold(TierPoints::default(), |mut acc, r| {
        let points = config.points(r.tier, r.position);
        match r.tier {
            Tier::TopDivision | Tier::SecondDivision => acc.ce_points += points,
            Tier::Regional => acc.regional_points += points,
        }
        acc
    })
}

/// `(ce + regional * coefficient) * weight`. The coefficient never touches division points.
pub fn weighted_points(points: TierPoints, regional_coefficient: f64, temporal_weight: f64) -> f64 {
    (points.ce_points + points.regional_points * regional_coefficient) * temporal_weight
}

/// Score `team_id` for one `year` of the window ending at `current_year`.
///
/// Returns every intermediate value so the ranking can show its work.
pub fn score_team_year<S: RankingStore + ?Sized>(
    store: &S,
    config: &ScoringConfiguration,
    coefficients: &mut RegionalCoefficients<'_>,
    team_id: TeamId,
    year: i32,
    current_year: i32,
) -> RankingResult<YearBreakdown> {
    let team = store
        .team(team_id)
        .map_err(RankingError::Lookup)?
        .ok_or_else(|| RankingError::team_not_found(team_id))?;

    let results = store
        .team_positions(team_id, year)
        .map_err(RankingError::Lookup)?;
    let points = sum_tier_points(&results, config);

    let regional_coefficient = coefficients.coefficient(store, team.region_id, year)?;
    let temporal_weight = config.temporal_weights.weight(current_year, year);

    Ok(YearBreakdown {
        year,
        ce_points: points.ce_points,
        regional_points: points.regional_points,
        regional_coefficient,
        temporal_weight,
        weighted_points: weighted_points(points, regional_coefficient, temporal_weight),
        zero_filled: false,
    })
}
