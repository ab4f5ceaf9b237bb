//! Configuration handling for Plinth
//!
//! This module contains:
//! - `.plinth/config.yaml` - per-project defaults ([`ProjectConfig`])
//! - `UNIT:NAME=VALUE` option specs given on the command line

pub mod options;
pub mod project;

pub use options::{merge_option_specs, parse_option_spec};
pub use project::ProjectConfig;
