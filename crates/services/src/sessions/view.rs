use indent_core::model::ExerciseCatalog;

use super::service::SessionService;

/// Presentation-agnostic snapshot of one exercise.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// It also never carries the reference solution: scoring stays behind the
/// session boundary, and the shell cannot leak what it never receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseView {
    pub index: usize,
    pub total: usize,
    pub title: String,
    pub description: String,
    pub initial_code: String,
}

impl ExerciseView {
    #[must_use]
    pub fn from_catalog(catalog: &ExerciseCatalog, index: usize) -> Option<Self> {
        let exercise = catalog.get(index)?;
        Some(Self {
            index,
            total: catalog.len(),
            title: exercise.title().to_string(),
            description: exercise.description().to_string(),
            initial_code: exercise.initial_code().to_string(),
        })
    }
}

/// Render-ready snapshot of the whole session for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub exercise: ExerciseView,
    pub current_code: String,
    pub last_score: Option<u8>,
    pub elapsed_seconds: u64,
    pub is_complete: bool,
    pub average_score: u8,
}

impl SessionView {
    #[must_use]
    pub fn from_session(session: &SessionService) -> Self {
        let current = session.current_exercise();
        let exercise = ExerciseView {
            index: session.current_index(),
            total: session.catalog().len(),
            title: current.title().to_string(),
            description: current.description().to_string(),
            initial_code: current.initial_code().to_string(),
        };

        Self {
            exercise,
            current_code: session.current_code().to_string(),
            last_score: session.last_score(),
            elapsed_seconds: session.elapsed_seconds(),
            is_complete: session.is_complete(),
            average_score: session.average_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indent_core::model::ExerciseCatalog;
    use indent_core::time::fixed_now;
    use std::sync::Arc;

    #[test]
    fn view_mirrors_session_state_without_the_solution() {
        let catalog = Arc::new(ExerciseCatalog::builtin());
        let mut session = SessionService::new(Arc::clone(&catalog), fixed_now()).unwrap();
        session.tick();

        let view = SessionView::from_session(&session);

        assert_eq!(view.exercise.index, 0);
        assert_eq!(view.exercise.total, catalog.len());
        assert_eq!(view.exercise.title, catalog.get(0).unwrap().title());
        assert_eq!(view.current_code, catalog.get(0).unwrap().initial_code());
        assert_eq!(view.last_score, None);
        assert_eq!(view.elapsed_seconds, 1);
        assert!(!view.is_complete);
        assert_eq!(view.average_score, 0);
    }

    #[test]
    fn out_of_range_index_yields_no_view() {
        let catalog = ExerciseCatalog::builtin();
        assert!(ExerciseView::from_catalog(&catalog, catalog.len()).is_none());
    }
}
