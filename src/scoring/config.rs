use crate::store::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finishing position -> points. Positions outside the table score nothing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct PointTable(pub BTreeMap<u32, f64>);

impl PointTable {
    /// Build a table from points listed in finishing order (first entry = 1st place).
    pub fn from_ordered(points: &[f64]) -> Self {
        Self(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (i as u32 + 1, *p))
                .collect(),
        )
    }

    pub fn points(&self, position: u32) -> f64 {
        self.0.get(&position).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Years ago (0 = current year) -> multiplier in [0, 1].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct TemporalWeights(pub BTreeMap<u32, f64>);

impl TemporalWeights {
    /// Weight for results from `year` when ranking as of `current_year`.
    /// Years outside the table, including future years, weigh 0.
    pub fn weight(&self, current_year: i32, year: i32) -> f64 {
        match u32::try_from(current_year - year) {
            Ok(offset) => self.0.get(&offset).copied().unwrap_or(0.0),
            Err(_) => 0.0,
        }
    }
}

/// Bounds of the regional strength multiplier.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CoefficientParams {
    pub floor: f64,
    pub ceiling: f64,
    /// Coefficient gained per top/second division point
    pub increment: f64,
}

impl Default for CoefficientParams {
    fn default() -> Self {
        Self {
            floor: 0.8,
            ceiling: 1.2,
            increment: 0.01,
        }
    }
}

/// Main scoring configuration.
///
/// Stored in the data store under [`RANKING_CONFIGURATION_KEY`]; the built-in
/// defaults apply whenever nothing usable is stored.
///
/// Example YAML:
/// ```yaml
/// top_division: { 1: 1000, 2: 800, 3: 650 }
/// second_division: { 1: 500, 2: 400 }
/// regional: { 1: 140, 2: 115 }
/// temporal_weights: { 0: 1.0, 1: 0.75, 2: 0.5, 3: 0.25 }
/// coefficient: { floor: 0.8, ceiling: 1.2, increment: 0.01 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfiguration {
    pub top_division: PointTable,
    pub second_division: PointTable,
    pub regional: PointTable,
    pub temporal_weights: TemporalWeights,
    #[serde(default)]
    pub coefficient: CoefficientParams,
}

/// Well-known store key of the scoring configuration document
pub const RANKING_CONFIGURATION_KEY: &str = "ranking_configuration";

const TOP_DIVISION_POINTS: [f64; 24] = [
    1000.0, 800.0, 650.0, 550.0, 480.0, 420.0, 370.0, 330.0, 300.0, 270.0, 245.0, 220.0, 200.0,
    180.0, 165.0, 150.0, 135.0, 120.0, 110.0, 100.0, 90.0, 80.0, 70.0, 60.0,
];

const SECOND_DIVISION_POINTS: [f64; 24] = [
    500.0, 400.0, 330.0, 280.0, 240.0, 210.0, 185.0, 165.0, 150.0, 135.0, 120.0, 110.0, 100.0,
    90.0, 80.0, 72.0, 65.0, 58.0, 52.0, 46.0, 40.0, 35.0, 30.0, 25.0,
];

const REGIONAL_POINTS: [f64; 24] = [
    140.0, 115.0, 95.0, 80.0, 70.0, 62.0, 55.0, 49.0, 44.0, 40.0, 36.0, 32.0, 29.0, 26.0, 23.0,
    20.0, 18.0, 16.0, 14.0, 12.0, 10.0, 8.0, 6.0, 4.0,
];

const TEMPORAL_WEIGHTS: [f64; 4] = [1.0, 0.75, 0.5, 0.25];

impl Default for ScoringConfiguration {
    fn default() -> Self {
        Self {
            top_division: PointTable::from_ordered(&TOP_DIVISION_POINTS),
            second_division: PointTable::from_ordered(&SECOND_DIVISION_POINTS),
            regional: PointTable::from_ordered(&REGIONAL_POINTS),
            temporal_weights: TemporalWeights(
                TEMPORAL_WEIGHTS
                    .iter()
                    .enumerate()
                    .map(|(offset, w)| (offset as u32, *w))
                    .collect(),
            ),
            coefficient: CoefficientParams::default(),
        }
    }
}

impl ScoringConfiguration {
    pub fn table(&self, tier: Tier) -> &PointTable {
        match tier {
            Tier::TopDivision => &self.top_division,
            Tier::SecondDivision => &self.second_division,
            Tier::Regional => &self.regional,
        }
    }

    /// Points for a finish in a tournament of `tier`
    pub fn points(&self, tier: Tier, position: u32) -> f64 {
        self.table(tier).points(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_configuration() {
        let config = ScoringConfiguration::default();

        assert_eq!(config.points(Tier::TopDivision, 1), 1000.0);
        assert_eq!(config.points(Tier::SecondDivision, 1), 500.0);
        assert_eq!(config.points(Tier::Regional, 1), 140.0);
        assert!(config.top_division.len() >= 24);
        assert!(config.second_division.len() >= 24);
        assert!(config.regional.len() >= 24);
        assert_eq!(config.coefficient.floor, 0.8);
        assert_eq!(config.coefficient.ceiling, 1.2);
        assert_eq!(config.coefficient.increment, 0.01);
    }

    #[test]
    fn test_position_outside_table_scores_zero() {
        let config = ScoringConfiguration::default();
        assert_eq!(config.points(Tier::TopDivision, 25), 0.0);
        assert_eq!(config.points(Tier::Regional, 1000), 0.0);
        assert_eq!(config.points(Tier::SecondDivision, 0), 0.0);
    }

    #[test]
    fn test_temporal_weight_window() {
        let weights = ScoringConfiguration::default().temporal_weights;
        assert_eq!(weights.weight(2025, 2025), 1.0);
        assert_eq!(weights.weight(2025, 2024), 0.75);
        assert_eq!(weights.weight(2025, 2022), 0.25);
        assert_eq!(weights.weight(2025, 2021), 0.0);
        assert_eq!(weights.weight(2025, 2026), 0.0);
    }

    #[test]
    fn test_scoring_configuration_json_roundtrip() {
        let config = ScoringConfiguration::default();
        let value = serde_json::to_value(&config).unwrap();
        let parsed: ScoringConfiguration = serde_json::from_value(value).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_scoring_configuration_yaml_roundtrip() {
        let config = ScoringConfiguration::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfiguration = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_yaml_uses_default_coefficient() {
        let yaml = r#"
top_division: { 1: 100, 2: 50 }
second_division: { 1: 40 }
regional: { 1: 10 }
temporal_weights: { 0: 1.0, 1: 0.5 }
"#;
        let config: ScoringConfiguration = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.points(Tier::TopDivision, 2), 50.0);
        assert_eq!(config.points(Tier::TopDivision, 3), 0.0);
        assert_eq!(config.coefficient, CoefficientParams::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
top_division: {}
second_division: {}
regional: {}
temporal_weights: {}
bonus: 3
"#;
        let result: Result<ScoringConfiguration, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
