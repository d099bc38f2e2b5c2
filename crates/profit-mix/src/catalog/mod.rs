//! Fund catalog model and loaders.
//!
//! Catalogs are built wholesale from a CSV exposure export and replaced, never
//! patched: every load produces a fresh set of immutable [`Fund`] records.

mod parser;
pub(crate) mod provider;
mod service_scores;
mod values;

pub use parser::{CatalogImporter, CatalogLoad};
pub use provider::derive_provider;
pub use service_scores::parse_service_scores;

use serde::{Deserialize, Serialize};

/// A single fund's exposure snapshot. All exposure fields are percentages on
/// a 0-100 scale (not clamped; source data may exceed 100). `equity`,
/// `abroad`, and `illiquid` are never NaN: the loader drops rows missing
/// them. `fx` and `sharpe` default to 0.0 when the export lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Source group identifier (sheet name in the upstream export).
    pub sheet: String,
    pub name: String,
    /// Managing institution, derived from the display name.
    pub provider: String,
    pub equity: f64,
    pub abroad: f64,
    pub fx: f64,
    pub illiquid: f64,
    pub sharpe: f64,
}

/// Storage abstraction so the optimizer service can be exercised in isolation.
///
/// `replace` swaps the entire catalog at once, matching the wholesale-reload
/// lifecycle of the upstream export.
pub trait CatalogRepository: Send + Sync {
    fn funds(&self) -> Result<Vec<Fund>, RepositoryError>;
    fn replace(&self, funds: Vec<Fund>) -> Result<usize, RepositoryError>;
}

/// Error enumeration for catalog storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Error raised while importing a catalog export.
#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read exposure export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid exposure CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
