use serde::{Deserialize, Serialize};

pub type TeamId = u64;
pub type RegionId = u64;
pub type TournamentId = u64;

/// Competition level of a tournament. Each tier has its own points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    TopDivision,
    SecondDivision,
    Regional,
}

impl Tier {
    /// Tiers whose results feed the regional coefficient.
    pub const COEFFICIENT_TIERS: [Tier; 2] = [Tier::TopDivision, Tier::SecondDivision];

    pub fn feeds_coefficient(self) -> bool {
        matches!(self, Tier::TopDivision | Tier::SecondDivision)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tier::TopDivision => "top_division",
            Tier::SecondDivision => "second_division",
            Tier::Regional => "regional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Last computed coefficient. Derived data, rewritten by every ranking run.
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
}

fn default_coefficient() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub club: Option<String>,
    pub region_id: RegionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub year: i32,
    pub tier: Tier,
    /// Only meaningful for regional tournaments
    #[serde(default)]
    pub region_id: Option<RegionId>,
}

/// A team's finishing place in one tournament (1 = winner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub team_id: TeamId,
    pub tournament_id: TournamentId,
    pub position: u32,
}

/// A position joined with the tournament facts scoring needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedResult {
    pub team_id: TeamId,
    pub tournament_id: TournamentId,
    pub year: i32,
    pub tier: Tier,
    pub position: u32,
}

/// Scoring audit for one team in one year of the ranking window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBreakdown {
    pub year: i32,
    /// Top and second division points, undifferentiated
    pub ce_points: f64,
    pub regional_points: f64,
    pub regional_coefficient: f64,
    pub temporal_weight: f64,
    pub weighted_points: f64,
    /// Set when the year could not be scored and was replaced by a zero contribution
    #[serde(default)]
    pub zero_filled: bool,
}

impl YearBreakdown {
    /// Fallback entry for a year whose scoring failed: no points, weight kept for the audit trail.
    pub fn zero_filled(year: i32, temporal_weight: f64) -> Self {
        Self {
            year,
            ce_points: 0.0,
            regional_points: 0.0,
            regional_coefficient: 0.0,
            temporal_weight,
            weighted_points: 0.0,
            zero_filled: true,
        }
    }
}

/// One row of a computed ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub team: Team,
    pub total_points: f64,
    pub year_breakdown: Vec<YearBreakdown>,
}

/// Persisted snapshot row: a ranking entry tagged with the year it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingHistoryEntry {
    pub year: i32,
    pub rank: u32,
    pub team: Team,
    pub total_points: f64,
    pub year_breakdown: Vec<YearBreakdown>,
}

impl RankingHistoryEntry {
    pub fn from_entry(year: i32, entry: &RankingEntry) -> Self {
        Self {
            year,
            rank: entry.rank,
            team: entry.team.clone(),
            total_points: entry.total_points,
            year_breakdown: entry.year_breakdown.clone(),
        }
    }
}

impl From<RankingHistoryEntry> for RankingEntry {
    fn from(entry: RankingHistoryEntry) -> Self {
        Self {
            rank: entry.rank,
            team: entry.team,
            total_points: entry.total_points,
            year_breakdown: entry.year_breakdown,
        }
    }
}
