use thiserror::Error;
use zoo_store::StoreError;
use zoo_types::{AnimalId, AnimalKind, FieldTextError, KindChangeError, WeightError};

#[derive(Debug, Error)]
pub enum ZooError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid name: {0}")]
    InvalidName(FieldTextError),
    #[error("invalid weight: {0}")]
    InvalidWeight(#[from] WeightError),
    #[error("invalid {} for {kind}: {raw:?}", .kind.extra_label().unwrap_or("attribute"))]
    InvalidExtra { kind: AnimalKind, raw: String },
    #[error("invalid {} for {kind}: {source}", .kind.extra_label().unwrap_or("attribute"))]
    InvalidExtraText {
        kind: AnimalKind,
        source: FieldTextError,
    },
    #[error("invalid credentials: {0}")]
    InvalidCredential(FieldTextError),
    #[error("no animal with id {0}")]
    AnimalNotFound(AnimalId),
    #[error(transparent)]
    KindChange(#[from] KindChangeError),
}

pub type Result<T> = std::result::Result<T, ZooError>;
