use super::config::{PointTable, ScoringConfiguration};

/// Validate a scoring configuration before it is stored.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfiguration) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_table("top_division", &config.top_division, &mut errors);
    validate_table("second_division", &config.second_division, &mut errors);
    validate_table("regional", &config.regional, &mut errors);

    for (offset, weight) in &config.temporal_weights.0 {
        if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
            errors.push(format!(
                "temporal_weights[{}]: must be between 0 and 1, got {}",
                offset, weight
            ));
        }
    }

    let params = &config.coefficient;
    if !params.floor.is_finite() || !params.ceiling.is_finite() || params.floor >= params.ceiling {
        errors.push(format!(
            "coefficient: floor ({}) must be below ceiling ({})",
            params.floor, params.ceiling
        ));
    }
    if !params.increment.is_finite() || params.increment <= 0.0 {
        errors.push(format!(
            "coefficient.increment: must be positive, got {}",
            params.increment
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_table(name: &str, table: &PointTable, errors: &mut Vec<String>) {
    let mut previous: Option<(u32, f64)> = None;

    // BTreeMap iterates in ascending position order
    for (&position, &points) in &table.0 {
        if position == 0 {
            errors.push(format!("{}[0]: positions start at 1", name));
        }
        if !points.is_finite() || points < 0.0 {
            errors.push(format!(
                "{}[{}]: points must be non-negative, got {}",
                name, position, points
            ));
        }
        if let Some((prev_position, prev_points)) = previous {
            if points > prev_points {
                errors.push(format!(
                    "{}[{}]: {} points exceeds {} for position {}",
                    name, position, points, prev_points, prev_position
                ));
            }
        }
        previous = Some((position, points));
    }
}
