pub mod json;
pub mod memory;
pub mod types;

pub use json::{get_data_path, JsonFileStore};
pub use memory::{MemoryStore, RankingDocument};
pub use types::*;

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access needed by the ranking engine.
///
/// Reads take `&self`; writes take `&mut self`, so a single store handle
/// serializes ranking runs within a process.
pub trait RankingStore {
    /// All teams, in storage order.
    fn teams(&self) -> StoreResult<Vec<Team>>;

    fn team(&self, id: TeamId) -> StoreResult<Option<Team>>;

    fn regions(&self) -> StoreResult<Vec<Region>>;

    fn region(&self, id: RegionId) -> StoreResult<Option<Region>>;

    /// Every finish of `team_id` in tournaments held in `year`.
    fn team_positions(&self, team_id: TeamId, year: i32) -> StoreResult<Vec<PlacedResult>>;

    /// Every finish of teams from `region_id` in tournaments of `year` whose tier is in `tiers`.
    fn region_positions(
        &self,
        region_id: RegionId,
        year: i32,
        tiers: &[Tier],
    ) -> StoreResult<Vec<PlacedResult>>;

    /// Opaque settings document stored under `key`.
    fn load_setting(&self, key: &str) -> StoreResult<Option<serde_json::Value>>;

    fn save_setting(&mut self, key: &str, value: serde_json::Value) -> StoreResult<()>;

    /// Returns true if a value was stored under `key`.
    fn remove_setting(&mut self, key: &str) -> StoreResult<bool>;

    fn set_region_coefficient(&mut self, region_id: RegionId, coefficient: f64) -> StoreResult<()>;

    /// Replace the whole snapshot for `year` in one step. Readers never see a partial year.
    fn replace_history(&mut self, year: i32, entries: Vec<RankingHistoryEntry>) -> StoreResult<()>;

    /// Snapshot for `year`, ordered by rank. Empty if the year was never computed.
    fn history(&self, year: i32) -> StoreResult<Vec<RankingHistoryEntry>>;

    /// Years that have a stored snapshot, ascending.
    fn history_years(&self) -> StoreResult<Vec<i32>>;
}
