//! Catalog-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The identity listing could not be fetched; the whole catalog is unusable
    #[error("Creature source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// One record could not be fetched; it is left out of the store
    #[error("Creature detail unavailable for {reference}: {message}")]
    DetailUnavailable { reference: String, message: String },

    /// Species or evolution data could not be resolved
    #[error("Evolution data unavailable for species {species_id}: {message}")]
    EvolutionUnavailable { species_id: u32, message: String },

    #[error("Catalog has not finished loading")]
    NotLoaded,

    #[error("Unknown creature id: {id}")]
    UnknownCreature { id: u32 },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON serialization error: {message}")]
    Json { message: String },
}

impl CatalogError {
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        CatalogError::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn detail_unavailable(reference: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::DetailUnavailable {
            reference: reference.into(),
            message: message.into(),
        }
    }

    pub fn evolution_unavailable(species_id: u32, message: impl Into<String>) -> Self {
        CatalogError::EvolutionUnavailable {
            species_id,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json {
            message: err.to_string(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
