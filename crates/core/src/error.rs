use thiserror::Error;

use crate::generator::GenerateError;
use crate::model::{EntryError, SnapshotError, TransitionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
