pub mod coefficient;
pub mod config;
pub mod engine;
pub mod provider;
pub mod validation;

pub use coefficient::{coefficient_from_points, compute_coefficient, RegionalCoefficients};
pub use config::*;
pub use engine::{score_team_year, sum_tier_points, weighted_points, TierPoints};
pub use provider::{get_configuration, reset_configuration, save_configuration, stored_configuration};
pub use validation::validate_scoring;
