#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_settings_service;
pub mod error;
pub mod sessions;

pub use indent_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use error::{AppServicesError, AppSettingsServiceError, SessionError};

pub use sessions::{
    CheckOutcome, ExerciseView, PASS_THRESHOLD, SessionProgress, SessionService, SessionView,
};
