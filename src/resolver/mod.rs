//! Dependency resolution for unit selections
//!
//! This module handles:
//! - Expanding a selection to its transitive requirement closure
//! - Circular dependency detection
//! - Mutual exclusion checks between units
//! - Topological sorting to determine installation order
//! - Building the final [`InstallationPlan`]

pub mod conflict;
pub mod graph;
pub mod planner;
pub mod sort;

pub use conflict::ConflictDetector;
pub use graph::DependencyGraph;
pub use planner::{InstallationPlan, InstallationPlanner, OptionChoices, PlanEntry};
