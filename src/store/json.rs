use super::memory::{MemoryStore, RankingDocument, DOCUMENT_VERSION};
use super::types::*;
use super::{RankingStore, StoreResult};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the platform-appropriate default data file (e.g. ~/.local/share/club-ranking/ranking.json)
pub fn get_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("club-ranking").join("ranking.json"))
        .unwrap_or_else(|| crate::config::get_config_dir().join("ranking.json"))
}

/// Store persisted as a single JSON document.
///
/// Every write rewrites the whole document atomically, so other readers
/// of the file see either the old or the new state, never a mix.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// If the file doesn't exist, starts from an empty document.
    /// If the file has an unsupported version, returns an error.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open data file at {}", path.display()))?;
            let doc: RankingDocument = serde_json::from_reader(std::io::BufReader::new(file))
                .with_context(|| format!("Failed to parse data file at {}", path.display()))?;
            if doc.version != DOCUMENT_VERSION {
                anyhow::bail!("Unsupported data file version: {}", doc.version);
            }
            doc
        } else {
            RankingDocument::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::from_document(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &RankingDocument {
        self.inner.document()
    }

    /// Apply administrative edits (teams, tournaments, positions) and persist them.
    pub fn edit<F>(&mut self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut MemoryStore) -> StoreResult<()>,
    {
        self.update(f)
    }

    /// Run `f` on a copy of the current state and only keep it once it is on disk.
    fn update<T, F>(&mut self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut MemoryStore) -> StoreResult<T>,
    {
        let mut next = self.inner.clone();
        let value = f(&mut next)?;
        write_document(&self.path, next.document())?;
        self.inner = next;
        Ok(value)
    }
}

fn write_document(path: &Path, doc: &RankingDocument) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = AtomicWriteFile::open(path)?;
    serde_json::to_writer_pretty(&mut file, doc)?;
    file.commit()?;
    Ok(())
}

impl RankingStore for JsonFileStore {
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
        self.inner.load_setting(key)
    }

    fn save_setting(&mut self, key: &str, value: serde_json::Value) -> StoreResult<()> {
        self.update(|store| store.save_setting(key, value))
    }

    fn remove_setting(&mut self, key: &str) -> StoreResult<bool> {
        if self.inner.load_setting(key)?.is_none() {
            return Ok(false);
        }
        self.update(|store| store.remove_setting(key))
    }

    fn set_region_coefficient(&mut self, region_id: RegionId, coefficient: f64) -> StoreResult<()> {
        self.update(|store| store.set_region_coefficient(region_id, coefficient))
    }

    fn replace_history(&mut self, year: i32, entries: Vec<RankingHistoryEntry>) -> StoreResult<()> {
        self.update(|store| store.replace_history(year, entries))
    }

    fn history(&self, year: i32) -> StoreResult<Vec<RankingHistoryEntry>> {
        self.inner.history(year)
    }

    fn history_years(&self) -> StoreResult<Vec<i32>> {
        self.inner.history_years()
    }
}
