use thiserror::Error;

use crate::model::{AppSettingsError, CatalogError, ExerciseValidationError, SessionSummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exercise(#[from] ExerciseValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
}
