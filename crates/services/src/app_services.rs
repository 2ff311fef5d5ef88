use std::sync::Arc;

use indent_core::model::ExerciseCatalog;
use storage::repository::Storage;

use crate::Clock;
use crate::app_settings_service::AppSettingsService;
use crate::error::{AppServicesError, SessionError};
use crate::sessions::{CheckOutcome, SessionService};

/// Assembles app-facing services around the built-in catalog.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<ExerciseCatalog>,
    app_settings: Arc<AppSettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, clock))
    }

    /// Build services over in-memory storage, for tests and prototyping.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::with_storage(Storage::in_memory(), clock)
    }

    fn with_storage(storage: Storage, clock: Clock) -> Self {
        let app_settings = Arc::new(AppSettingsService::new(Arc::clone(&storage.settings)));
        Self {
            clock,
            catalog: Arc::new(ExerciseCatalog::builtin()),
            app_settings,
        }
    }

    /// Start a fresh session over the catalog, stamped from the service
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyCatalog` if the catalog has no
    /// exercises.
    pub fn start_session(&self) -> Result<SessionService, SessionError> {
        SessionService::new(Arc::clone(&self.catalog), self.clock.now())
    }

    /// Check the current attempt, stamping completion from the service
    /// clock.
    pub fn check_current(&self, session: &mut SessionService) -> CheckOutcome {
        session.check(self.clock.now())
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ExerciseCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }
}
