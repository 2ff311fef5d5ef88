use std::collections::HashSet;
use thiserror::Error;

use crate::model::exercise::{Exercise, ExerciseDraft, ExerciseValidationError};
use crate::model::ids::ExerciseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one exercise")]
    Empty,

    #[error("duplicate exercise id: {0}")]
    DuplicateId(ExerciseId),

    #[error(transparent)]
    Exercise(#[from] ExerciseValidationError),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, read-only sequence of exercises.
///
/// Catalog order defines presentation order. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    /// Build a catalog from validated exercises.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if no exercises are given and
    /// `CatalogError::DuplicateId` if two exercises share an id.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        if exercises.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !seen.insert(exercise.id()) {
                return Err(CatalogError::DuplicateId(exercise.id()));
            }
        }

        Ok(Self { exercises })
    }

    /// The catalog shipped with the trainer.
    ///
    /// # Panics
    ///
    /// Panics if the built-in exercise data fails validation, which would be
    /// a programming error in this module.
    #[must_use]
    pub fn builtin() -> Self {
        let drafts = vec![
            ExerciseDraft {
                id: ExerciseId::new(1),
                title: "Einfache Webseite".to_string(),
                description: "Rücke diese einfache Webseite richtig ein. \
                              Beachte die Verschachtelung der Elemente!"
                    .to_string(),
                initial_code: concat!(
                    "<html><head><title>Meine erste Webseite</title></head>",
                    "<body><h1>Willkommen!</h1><div><p>Das ist ein Paragraph.</p>",
                    "<ul><li>Erster Punkt</li><li>Zweiter Punkt</li></ul></div>",
                    "</body></html>",
                )
                .to_string(),
                solution: concat!(
                    "<html>\n",
                    "  <head>\n",
                    "    <title>Meine erste Webseite</title>\n",
                    "  </head>\n",
                    "  <body>\n",
                    "    <h1>Willkommen!</h1>\n",
                    "    <div>\n",
                    "      <p>Das ist ein Paragraph.</p>\n",
                    "      <ul>\n",
                    "        <li>Erster Punkt</li>\n",
                    "        <li>Zweiter Punkt</li>\n",
                    "      </ul>\n",
                    "    </div>\n",
                    "  </body>\n",
                    "</html>",
                )
                .to_string(),
            },
            ExerciseDraft {
                id: ExerciseId::new(2),
                title: "Navigation".to_string(),
                description: "Formatiere diese Navigation richtig. \
                              Achte auf die verschachtelten Listen!"
                    .to_string(),
                initial_code: concat!(
                    "<nav><ul><li><a href=\"/\">Start</a></li>",
                    "<li><a href=\"/ueber\">Über uns</a>",
                    "<ul><li><a href=\"/team\">Team</a></li>",
                    "<li><a href=\"/geschichte\">Geschichte</a></li></ul></li>",
                    "</ul></nav>",
                )
                .to_string(),
                solution: concat!(
                    "<nav>\n",
                    "  <ul>\n",
                    "    <li>\n",
                    "      <a href=\"/\">Start</a>\n",
                    "    </li>\n",
                    "    <li>\n",
                    "      <a href=\"/ueber\">Über uns</a>\n",
                    "      <ul>\n",
                    "        <li>\n",
                    "          <a href=\"/team\">Team</a>\n",
                    "        </li>\n",
                    "        <li>\n",
                    "          <a href=\"/geschichte\">Geschichte</a>\n",
                    "        </li>\n",
                    "      </ul>\n",
                    "    </li>\n",
                    "  </ul>\n",
                    "</nav>",
                )
                .to_string(),
            },
        ];

        let exercises = drafts
            .into_iter()
            .map(ExerciseDraft::validate)
            .collect::<Result<Vec<_>, _>>()
            .expect("built-in exercises should be valid");

        Self::new(exercises).expect("built-in catalog should be valid")
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Index of the final exercise.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.exercises.len().saturating_sub(1)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_exercise(id: u64) -> Exercise {
        ExerciseDraft {
            id: ExerciseId::new(id),
            title: format!("Exercise {id}"),
            description: String::new(),
            initial_code: "<p>x</p>".to_string(),
            solution: "<p>x</p>".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = ExerciseCatalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err =
            ExerciseCatalog::new(vec![build_exercise(1), build_exercise(1)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ExerciseId::new(1)));
    }

    #[test]
    fn catalog_preserves_order() {
        let catalog = ExerciseCatalog::new(vec![build_exercise(2), build_exercise(1)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().id(), ExerciseId::new(2));
        assert_eq!(catalog.last_index(), 1);
    }

    #[test]
    fn builtin_catalog_is_well_formed() {
        let catalog = ExerciseCatalog::builtin();
        assert!(!catalog.is_empty());
        for exercise in catalog.exercises() {
            // The solution is a multi-line rendering of the one-line prompt.
            assert!(exercise.solution_line_count() > 1);
            assert_eq!(exercise.initial_code().split('\n').count(), 1);
        }
    }
}
