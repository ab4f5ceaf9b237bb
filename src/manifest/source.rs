//! Catalog sources
//!
//! A [`CatalogSource`] yields the raw, unvalidated catalog document. The
//! manifest loader does not care where the declarations come from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlinthError, Result};
use crate::hash;
use crate::manifest::document::CatalogDocument;

/// Unvalidated catalog plus where it came from
#[derive(Debug, Clone)]
pub struct RawCatalog {
    pub document: CatalogDocument,
    /// Directory relative install paths are resolved against
    pub base_dir: Option<PathBuf>,
    /// BLAKE3 digest of the source content
    pub digest: String,
    /// Human readable origin for diagnostics
    pub origin: String,
}

/// Anything that can produce catalog declarations
pub trait CatalogSource {
    /// Read the declarations
    ///
    /// # Errors
    ///
    /// Returns a catalog error when the source cannot be read or parsed.
    fn read(&self) -> Result<RawCatalog>;
}

/// Catalog stored in a YAML (or JSON) file
#[derive(Debug, Clone)]
pub struct YamlFileSource {
    path: PathBuf,
}

impl YamlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for YamlFileSource {
    fn read(&self) -> Result<RawCatalog> {
        let origin = self.path.display().to_string();

        if !self.path.is_file() {
            return Err(PlinthError::CatalogNotFound { path: origin });
        }

        let bytes = fs::read(&self.path).map_err(|e| PlinthError::CatalogReadFailed {
            path: origin.clone(),
            reason: e.to_string(),
        })?;

        let document: CatalogDocument =
            serde_yaml::from_slice(&bytes).map_err(|e| PlinthError::CatalogParseFailed {
                path: origin.clone(),
                reason: e.to_string(),
            })?;

        Ok(RawCatalog {
            document,
            base_dir: self.path.parent().map(Path::to_path_buf),
            digest: hash::hash_bytes(&bytes),
            origin,
        })
    }
}

/// Catalog already held in memory (stdin, tests)
#[derive(Debug, Clone)]
pub struct InMemorySource {
    document: CatalogDocument,
    base_dir: Option<PathBuf>,
}

impl InMemorySource {
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document,
            base_dir: None,
        }
    }

    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document = serde_yaml::from_str(yaml).map_err(|e| PlinthError::CatalogParseFailed {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(document))
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }
}

impl CatalogSource for InMemorySource {
    fn read(&self) -> Result<RawCatalog> {
        let canonical = serde_json::to_vec(&self.document)?;
        Ok(RawCatalog {
            document: self.document.clone(),
            base_dir: self.base_dir.clone(),
            digest: hash::hash_bytes(&canonical),
            origin: "<memory>".to_string(),
        })
    }
}
