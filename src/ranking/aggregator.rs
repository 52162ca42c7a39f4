use crate::error::{RankingError, RankingResult};
use crate::scoring::{get_configuration, score_team_year, RegionalCoefficients, ScoringConfiguration};
use crate::store::{RankingEntry, RankingHistoryEntry, RankingStore, YearBreakdown};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Number of years (current year included) a ranking looks back over
pub const RANKING_WINDOW_YEARS: i32 = 4;

/// Years of the ranking window, newest first.
pub fn ranking_window(current_year: i32) -> Vec<i32> {
    (0..RANKING_WINDOW_YEARS).map(|offset| current_year - offset).collect()
}

/// Outcome of one ranking computation.
#[derive(Debug, Clone)]
pub struct RankingRun {
    pub year: i32,
    /// Ordered by rank
    pub entries: Vec<RankingEntry>,
    /// Team-years that could not be scored and were zero-filled
    pub zero_filled: usize,
}

/// Summary returned to administrative callers of [`recalculate_ranking`].
#[derive(Debug, Clone)]
pub struct RecalculationReport {
    pub year: i32,
    pub teams_processed: usize,
    pub zero_filled: usize,
    pub elapsed: Duration,
}

/// Sort by total points descending, ties by team id ascending, then number 1..N.
pub fn sort_and_rank(entries: &mut [RankingEntry]) {
    entries.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.team.id.cmp(&b.team.id))
    });
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }
}

/// Compute the ranking as of `current_year` and store it as that year's snapshot.
///
/// A team-year that cannot be scored is zero-filled, using the built-in
/// temporal weight for the audit trail, and the run carries on. Failing to
/// list teams or to persist the results fails the whole run.
pub fn compute_ranking<S: RankingStore + ?Sized>(
    store: &mut S,
    current_year: i32,
) -> RankingResult<RankingRun> {
    let config = get_configuration(&*store);
    let fallback_weights = ScoringConfiguration::default().temporal_weights;
    let window = ranking_window(current_year);

    let teams = store.teams().map_err(RankingError::Lookup)?;
    debug!("Scoring {} teams over {:?}", teams.len(), window);

    let mut coefficients = RegionalCoefficients::new(&config);
    let mut zero_filled = 0;
    let mut entries = Vec::with_capacity(teams.len());

    for team in teams {
        let year_breakdown: Vec<YearBreakdown> = window
            .iter()
            .map(|&year| {
                match score_team_year(&*store, &config, &mut coefficients, team.id, year, current_year) {
                    Ok(breakdown) => breakdown,
                    Err(e) => {
                        warn!("Scoring team {} for {} failed, counting it as zero: {}", team.id, year, e);
                        zero_filled += 1;
                        YearBreakdown::zero_filled(year, fallback_weights.weight(current_year, year))
                    }
                }
            })
            .collect();

        let total_points: f64 = year_breakdown.iter().map(|y| y.weighted_points).sum();
        entries.push(RankingEntry {
            rank: 0,
            team,
            total_points,
            year_breakdown,
        });
    }

    sort_and_rank(&mut entries);

    for (region_id, coefficient) in coefficients.for_year(current_year) {
        store
            .set_region_coefficient(region_id, coefficient)
            .map_err(RankingError::PersistenceFailure)?;
    }

    let snapshot = entries
        .iter()
        .map(|entry| RankingHistoryEntry::from_entry(current_year, entry))
        .collect();
    store
        .replace_history(current_year, snapshot)
        .map_err(RankingError::PersistenceFailure)?;

    Ok(RankingRun {
        year: current_year,
        entries,
        zero_filled,
    })
}

/// Administrative recomputation: logs progress and hands any terminal error back.
pub fn recalculate_ranking<S: RankingStore + ?Sized>(
    store: &mut S,
    current_year: i32,
) -> RankingResult<RecalculationReport> {
    info!("Recalculating ranking for {}", current_year);
    let start = Instant::now();

    match compute_ranking(store, current_year) {
        Ok(run) => {
            let report = RecalculationReport {
                year: run.year,
                teams_processed: run.entries.len(),
                zero_filled: run.zero_filled,
                elapsed: start.elapsed(),
            };
            if report.zero_filled > 0 {
                warn!("{} team-years were zero-filled", report.zero_filled);
            }
            info!(
                "Ranking for {} recalculated: {} teams in {:?}",
                report.year, report.teams_processed, report.elapsed
            );
            Ok(report)
        }
        Err(e) => {
            error!("Ranking recalculation for {} failed: {}", current_year, e);
            Err(e)
        }
    }
}
