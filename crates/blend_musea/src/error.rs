//! Error types for documentation and markup generation.

use blend_croquis::CroquisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MuseaError {
    #[error("unknown section type '{0}' (expected one of: {names})", names = crate::scaffold::SectionType::names().join(", "))]
    UnknownSection(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Croquis(#[from] CroquisError),
}

pub type Result<T> = std::result::Result<T, MuseaError>;
