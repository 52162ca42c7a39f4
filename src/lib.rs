//! Multi-year club ranking.
//!
//! Tournament finishes are converted to points per competition tier,
//! regional-tier points are scaled by the region's strength in the top two
//! tiers, and each year is weighted by how long ago it was. The summed
//! result over a four-year window orders every team, and each run is kept
//! as that year's history snapshot.

pub mod config;
pub mod error;
pub mod output;
pub mod ranking;
pub mod scoring;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{RankingError, RankingResult, StoreError};
