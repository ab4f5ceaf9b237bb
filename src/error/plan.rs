//! Selection and planning errors

use super::PlinthError;

/// Build a cycle error from the closed cycle path (first id repeated last)
pub fn circular(cycle: Vec<String>) -> PlinthError {
    PlinthError::CircularDependency {
        chain: cycle.join(" -> "),
        cycle,
    }
}

/// Build a conflict error from normalized pairs
pub fn conflict(pairs: Vec<(String, String)>) -> PlinthError {
    PlinthError::Conflict { pairs }
}
