//! Unit descriptor types
//!
//! A [`Unit`] is one installable plugin from the catalog. Units are built by
//! the manifest loader after validation and never change afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Catalog category of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "foundations")]
    Foundation,
    #[serde(alias = "languages")]
    Language,
    Infrastructure,
    #[serde(alias = "standards")]
    Standard,
    #[serde(alias = "applications")]
    Application,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Foundation,
        Category::Language,
        Category::Infrastructure,
        Category::Standard,
        Category::Application,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Foundation => "foundation",
            Category::Language => "language",
            Category::Infrastructure => "infrastructure",
            Category::Standard => "standard",
            Category::Application => "application",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a unit. Only `Stable` units can be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Stable,
    Planned,
    CommunityRequested,
}

impl Status {
    pub fn is_installable(self) -> bool {
        self == Status::Stable
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Stable => "stable",
            Status::Planned => "planned",
            Status::CommunityRequested => "community-requested",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named choice with its allowed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOption {
    /// Allowed values in declaration order
    pub values: Vec<String>,
    /// Value used when the caller makes no choice
    pub default: String,
}

impl UnitOption {
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// What the bundled installers do for a unit
///
/// The core never interprets this; it is handed to the `UnitInstaller`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstallAction {
    /// Run a shell command in the project directory
    Command { command: String },
    /// Copy a directory tree into the project
    Copy { copy: CopySpec },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopySpec {
    /// Source directory, relative to the catalog file
    pub from: PathBuf,
    /// Destination inside the project
    #[serde(default = "default_copy_destination")]
    pub to: PathBuf,
}

fn default_copy_destination() -> PathBuf {
    PathBuf::from(".")
}

/// An installable plugin descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub category: Category,
    pub status: Status,
    pub description: Option<String>,
    pub requires: BTreeSet<String>,
    pub conflicts: BTreeSet<String>,
    pub options: BTreeMap<String, UnitOption>,
    pub install: Option<InstallAction>,
}

impl Unit {
    /// Default choice for every option of this unit
    pub fn default_options(&self) -> BTreeMap<String, String> {
        self.options
            .iter()
            .map(|(name, option)| (name.clone(), option.default.clone()))
            .collect()
    }

    /// Whether this unit declares a conflict with `other`
    pub fn conflicts_with(&self, other: &str) -> bool {
        self.conflicts.contains(other)
    }
}
