use super::types::*;
use super::{RankingStore, StoreResult};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current on-disk document version
pub const DOCUMENT_VERSION: u32 = 1;

/// Everything a ranking store holds, in one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingDocument {
    pub version: u32,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
    /// Ranking snapshots keyed by computation year
    #[serde(default)]
    pub history: BTreeMap<i32, Vec<RankingHistoryEntry>>,
}

impl Default for RankingDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingDocument {
    pub fn new() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            regions: Vec::new(),
            teams: Vec::new(),
            tournaments: Vec::new(),
            positions: Vec::new(),
            settings: BTreeMap::new(),
            history: BTreeMap::new(),
        }
    }

    fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    fn placed(&self, position: &Position) -> Option<PlacedResult> {
        self.tournament(position.tournament_id).map(|t| PlacedResult {
            team_id: position.team_id,
            tournament_id: t.id,
            year: t.year,
            tier: t.tier,
            position: position.position,
        })
    }
}

/// Store kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: RankingDocument,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: RankingDocument) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &RankingDocument {
        &self.doc
    }

    /// Insert or replace a region by id
    pub fn insert_region(&mut self, region: Region) {
        match self.doc.regions.iter_mut().find(|r| r.id == region.id) {
            Some(existing) => *existing = region,
            None => self.doc.regions.push(region),
        }
    }

    /// Insert or replace a team by id
    pub fn insert_team(&mut self, team: Team) {
        match self.doc.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => self.doc.teams.push(team),
        }
    }

    /// Insert or replace a tournament by id
    pub fn insert_tournament(&mut self, tournament: Tournament) {
        match self.doc.tournaments.iter_mut().find(|t| t.id == tournament.id) {
            Some(existing) => *existing = tournament,
            None => self.doc.tournaments.push(tournament),
        }
    }

    /// Record a finishing position.
    ///
    /// A team has at most one position per tournament: recording again for
    /// the same pair replaces the earlier finish.
    pub fn record_position(&mut self, position: Position) -> StoreResult<()> {
        if position.position == 0 {
            return Err(StoreError::InvalidRecord(format!(
                "position for team {} in tournament {} must be at least 1",
                position.team_id, position.tournament_id
            )));
        }
        if !self.doc.teams.iter().any(|t| t.id == position.team_id) {
            return Err(StoreError::InvalidRecord(format!(
                "unknown team {}",
                position.team_id
            )));
        }
        if self.doc.tournament(position.tournament_id).is_none() {
            return Err(StoreError::InvalidRecord(format!(
                "unknown tournament {}",
                position.tournament_id
            )));
        }

        match self.doc.positions.iter_mut().find(|p| {
            p.team_id == position.team_id && p.tournament_id == position.tournament_id
        }) {
            Some(existing) => existing.position = position.position,
            None => self.doc.positions.push(position),
        }
        Ok(())
    }
}

impl RankingStore for MemoryStore {
    fn teams(&self) -> StoreResult<Vec<Team>> {
        Ok(self.doc.teams.clone())
    }

    fn team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.doc.teams.iter().find(|t| t.id == id).cloned())
    }

    fn regions(&self) -> StoreResult<Vec<Region>> {
        Ok(self.doc.regions.clone())
    }

    fn region(&self, id: RegionId) -> StoreResult<Option<Region>> {
        Ok(self.doc.regions.iter().find(|r| r.id == id).cloned())
    }

    fn team_positions(&self, team_id: TeamId, year: i32) -> StoreResult<Vec<PlacedResult>> {
        Ok(self
            .doc
            .positions
            .iter()
            .filter(|p| p.team_id == team_id)
            .filter_map(|p| self.doc.placed(p))
            .filter(|r| r.year == year)
            .collect())
    }

    fn region_positions(
        &self,
        region_id: RegionId,
        year: i32,
        tiers: &[Tier],
    ) -> StoreResult<Vec<PlacedResult>> {
        Ok(self
            .doc
            .positions
            .iter()
            .filter(|p| {
                self.doc
                    .teams
                    .iter()
                    .any(|t| t.id == p.team_id && t.region_id == region_id)
            })
            .filter_map(|p| self.doc.placed(p))
            .filter(|r| r.year == year && tiers.contains(&r.tier))
            .collect())
    }

    fn load_setting(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        Ok(self.doc.settings.get(key).cloned())
    }

    fn save_setting(&mut self, key: &str, value: serde_json::Value) -> StoreResult<()> {
        self.doc.settings.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_setting(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.doc.settings.remove(key).is_some())
    }

    fn set_region_coefficient(&mut self, region_id: RegionId, coefficient: f64) -> StoreResult<()> {
        let region = self
            .doc
            .regions
            .iter_mut()
            .find(|r| r.id == region_id)
            .ok_or_else(|| StoreError::InvalidRecord(format!("unknown region {}", region_id)))?;
        region.coefficient = coefficient;
        Ok(())
    }

    fn replace_history(&mut self, year: i32, entries: Vec<RankingHistoryEntry>) -> StoreResult<()> {
        self.doc.history.insert(year, entries);
        Ok(())
    }

    fn history(&self, year: i32) -> StoreResult<Vec<RankingHistoryEntry>> {
        let mut entries = self.doc.history.get(&year).cloned().unwrap_or_default();
        entries.sort_by_key(|e| e.rank);
        Ok(entries)
    }

    fn history_years(&self) -> StoreResult<Vec<i32>> {
        Ok(self.doc.history.keys().copied().collect())
    }
}
