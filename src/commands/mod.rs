//! Command implementations for Plinth CLI

pub mod completions;
pub mod context;
pub mod init;
pub mod install;
pub mod list;
pub mod plan;
pub mod prompt;
pub mod reset;
pub mod show;
pub mod status;
pub mod validate;
pub mod version;
