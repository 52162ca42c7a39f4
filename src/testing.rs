//! Shared fixtures for unit tests.

use crate::error::StoreError;
use crate::store::*;
use std::collections::HashSet;

/// Builds a populated `MemoryStore`, creating one tournament per (year, tier, region).
pub struct StoreBuilder {
    store: MemoryStore,
    next_tournament: TournamentId,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            next_tournament: 1,
        }
    }

    pub fn region(mut self, id: RegionId, name: &str) -> Self {
        self.store.insert_region(Region { id, name: name.to_string(), coefficient: 1.0 });
        self
    }

    pub fn team(mut self, id: TeamId, name: &str, region_id: RegionId) -> Self {
        self.store.insert_team(Team { id, name: name.to_string(), club: None, region_id });
        self
    }

    /// Record a finish for `team_id` in a fresh tournament of `tier` held in `year`.
    pub fn result(mut self, team_id: TeamId, year: i32, tier: Tier, position: u32) -> Self {
        let id = self.next_tournament;
        self.next_tournament += 1;
        let region_id = match tier {
            Tier::Regional => self.store.team(team_id).unwrap().map(|t| t.region_id),
            _ => None,
        };
        self.store.insert_tournament(Tournament {
            id,
            name: format!("{} {} #{}", tier.as_str(), year, id),
            year,
            tier,
            region_id,
        });
        self.store
            .record_position(Position { team_id, tournament_id: id, position })
            .unwrap();
        self
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}

/// Wraps a `MemoryStore` and fails selected operations.
pub struct FaultyStore {
    pub inner: MemoryStore,
    settings_down: bool,
    history_writes_down: bool,
    coefficient_writes_down: bool,
    broken_teams: HashSet<TeamId>,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            settings_down: false,
            history_writes_down: false,
            coefficient_writes_down: false,
            broken_teams: HashSet::new(),
        }
    }

    pub fn fail_settings(mut self) -> Self {
        self.settings_down = true;
        self
    }

    pub fn fail_history_writes(mut self) -> Self {
        self.history_writes_down = true;
        self
    }

    pub fn fail_coefficient_writes(mut self) -> Self {
        self.coefficient_writes_down = true;
        self
    }

    /// Position lookups for `team_id` fail
    pub fn fail_team_positions(mut self, team_id: TeamId) -> Self {
        self.broken_teams.insert(team_id);
        self
    }
}

fn offline() -> StoreError {
    StoreError::Unavailable("backend offline".to_string())
}

impl RankingStore for FaultyStore {
    fn teams(&self) -> StoreResult<Vec<Team>> {
        self.inner.teams()
    }

    fn team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        self.inner.team(id)
    }

    fn regions(&self) -> StoreResult<Vec<Region>> {
        self.inner.regions()
    }

    fn region(&self, id: RegionId) -> StoreResult<Option<Region>> {
        self.inner.region(id)
    }

    fn team_positions(&self, team_id: TeamId, year: i32) -> StoreResult<Vec<PlacedResult>> {
        if self.broken_teams.contains(&team_id) {
            return Err(offline());
        }
        self.inner.team_positions(team_id, year)
    }

    fn region_positions(
        &self,
        region_id: RegionId,
        year: i32,
        tiers: &[Tier],
    ) -> StoreResult<Vec<PlacedResult>> {
        self.inner.region_positions(region_id, year, tiers)
    }

    fn load_setting(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        if self.settings_down {
            return Err(offline());
        }
        self.inner.load_setting(key)
    }

    fn save_setting(&mut self, key: &str, value: serde_json::Value) -> StoreResult<()> {
        if self.settings_down {
            return Err(offline());
        }
        self.inner.save_setting(key, value)
    }

    fn remove_setting(&mut self, key: &str) -> StoreResult<bool> {
        if self.settings_down {
            return Err(offline());
        }
        self.inner.remove_setting(key)
    }

    fn set_region_coefficient(&mut self, region_id: RegionId, coefficient: f64) -> StoreResult<()> {
        if self.coefficient_writes_down {
            return Err(offline());
        }
        self.inner.set_region_coefficient(region_id, coefficient)
    }

    fn replace_history(&mut self, year: i32, entries: Vec<RankingHistoryEntry>) -> StoreResult<()> {
        if self.history_writes_down {
            return Err(offline());
        }
        self.inner.replace_history(year, entries)
    }

    fn history(&self, year: i32) -> StoreResult<Vec<RankingHistoryEntry>> {
        self.inner.history(year)
    }

    fn history_years(&self) -> StoreResult<Vec<i32>> {
        self.inner.history_years()
    }
}
