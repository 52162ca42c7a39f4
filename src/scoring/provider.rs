use super::config::{ScoringConfiguration, RANKING_CONFIGURATION_KEY};
use super::validation::validate_scoring;
use crate::error::{RankingError, RankingResult};
use crate::store::RankingStore;
use tracing::{debug, warn};

/// Effective scoring configuration.
///
/// Returns the stored document when there is a usable one and the built-in
/// defaults otherwise. Never fails: an unreachable or corrupt store only
/// costs the custom configuration, not the ranking run.
pub fn get_configuration<S: RankingStore + ?Sized>(store: &S) -> ScoringConfiguration {
    match stored_configuration(store) {
        Ok(Some(config)) => config,
        Ok(None) => {
            debug!("No stored scoring configuration, using defaults");
            ScoringConfiguration::default()
        }
        Err(e) => {
            warn!("{}. Using default scoring configuration.", e);
            ScoringConfiguration::default()
        }
    }
}

/// The stored configuration, if any. A document that no longer parses or
/// validates counts as absent.
pub fn stored_configuration<S: RankingStore + ?Sized>(
    store: &S,
) -> RankingResult<Option<ScoringConfiguration>> {
    let value = store
        .load_setting(RANKING_CONFIGURATION_KEY)
        .map_err(RankingError::ConfigurationUnavailable)?;

    let Some(value) = value else {
        return Ok(None);
    };

    match serde_json::from_value::<ScoringConfiguration>(value) {
        Ok(config) => match validate_scoring(&config) {
            Ok(()) => Ok(Some(config)),
            Err(errors) => {
                warn!(
                    "Ignoring invalid stored scoring configuration: {}",
                    errors.join("; ")
                );
                Ok(None)
            }
        },
        Err(e) => {
            warn!("Ignoring unreadable stored scoring configuration: {}", e);
            Ok(None)
        }
    }
}

/// Validate and store `config`, replacing any previous configuration.
pub fn save_configuration<S: RankingStore + ?Sized>(
    store: &mut S,
    config: &ScoringConfiguration,
) -> RankingResult<()> {
    validate_scoring(config).map_err(RankingError::InvalidConfiguration)?;

    let value = serde_json::to_value(config)
        .map_err(|e| RankingError::PersistenceFailure(e.into()))?;
    store
        .save_setting(RANKING_CONFIGURATION_KEY, value)
        .map_err(RankingError::PersistenceFailure)
}

/// Drop the stored configuration so the defaults apply again.
/// Returns true if a configuration was stored.
pub fn reset_configuration<S: RankingStore + ?Sized>(store: &mut S) -> RankingResult<bool> {
    store
        .remove_setting(RANKING_CONFIGURATION_KEY)
        .map_err(RankingError::PersistenceFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CoefficientParams, PointTable};
    use crate::store::{MemoryStore, Tier};
    use crate::testing::FaultyStore;

    #[test]
    fn test_missing_configuration_uses_defaults() {
        let store = MemoryStore::new();
        assert_eq!(get_configuration(&store), ScoringConfiguration::default());
    }

    #[test]
    fn test_stored_configuration_wins() {
        let mut store = MemoryStore::new();
        let mut config = ScoringConfiguration::default();
        config.regional = PointTable::from_ordered(&[200.0, 100.0]);
        save_configuration(&mut store, &config).unwrap();

        let loaded = get_configuration(&store);
        assert_eq!(loaded.points(Tier::Regional, 1), 200.0);
        assert_eq!(loaded.points(Tier::Regional, 3), 0.0);
    }

    #[test]
    fn test_corrupt_configuration_uses_defaults() {
        let mut store = MemoryStore::new();
        store
            .save_setting(RANKING_CONFIGURATION_KEY, serde_json::json!({"top_division": "nope"}))
            .unwrap();

        assert!(stored_configuration(&store).unwrap().is_none());
        assert_eq!(get_configuration(&store), ScoringConfiguration::default());
    }

    #[test]
    fn test_stored_configuration_failing_validation_uses_defaults() {
        let mut store = MemoryStore::new();
        let mut config = ScoringConfiguration::default();
        config.coefficient.increment = -1.0;
        store
            .save_setting(RANKING_CONFIGURATION_KEY, serde_json::to_value(&config).unwrap())
            .unwrap();

        assert_eq!(get_configuration(&store), ScoringConfiguration::default());
    }

    #[test]
    fn test_invalid_configuration_not_saved() {
        let mut store = MemoryStore::new();
        let mut config = ScoringConfiguration::default();
        config.coefficient = CoefficientParams { floor: 1.0, ceiling: 1.0, increment: 0.01 };

        let err = save_configuration(&mut store, &config).unwrap_err();
        assert!(matches!(err, RankingError::InvalidConfiguration(_)));
        assert!(store.load_setting(RANKING_CONFIGURATION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset_configuration() {
        let mut store = MemoryStore::new();
        save_configuration(&mut store, &ScoringConfiguration::default()).unwrap();
        assert!(reset_configuration(&mut store).unwrap());
        assert!(!reset_configuration(&mut store).unwrap());
    }

    #[test]
    fn test_unreachable_settings_fall_back_to_defaults() {
        let store = FaultyStore::new(MemoryStore::new()).fail_settings();
        assert!(matches!(
            stored_configuration(&store),
            Err(RankingError::ConfigurationUnavailable(_))
        ));
        assert_eq!(get_configuration(&store), ScoringConfiguration::default());
    }
}
