use thiserror::Error;

use crate::model::ids::ExerciseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseValidationError {
    #[error("exercise title cannot be empty")]
    EmptyTitle,

    #[error("exercise initial code cannot be empty")]
    EmptyInitialCode,

    #[error("exercise solution cannot be empty")]
    EmptySolution,
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// Unvalidated exercise input, as authored or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub id: ExerciseId,
    pub title: String,
    pub description: String,
    pub initial_code: String,
    pub solution: String,
}

impl ExerciseDraft {
    /// Validate the draft into an immutable `Exercise`.
    ///
    /// The title and description are trimmed. The code fields are kept
    /// verbatim: leading whitespace is the exercise content.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseValidationError` if the title, initial code, or
    /// solution is empty.
    pub fn validate(self) -> Result<Exercise, ExerciseValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ExerciseValidationError::EmptyTitle);
        }
        if self.initial_code.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyInitialCode);
        }
        if self.solution.trim().is_empty() {
            return Err(ExerciseValidationError::EmptySolution);
        }

        Ok(Exercise {
            id: self.id,
            title,
            description: self.description.trim().to_string(),
            initial_code: self.initial_code,
            solution: self.solution,
        })
    }
}

/// One indentation-practice unit: a prompt plus a hidden reference solution.
///
/// The solution is consumed by the scorer only; presentation views never
/// carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    title: String,
    description: String,
    initial_code: String,
    solution: String,
}

impl Exercise {
    #[must_use]
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The unformatted code shown at exercise start.
    #[must_use]
    pub fn initial_code(&self) -> &str {
        &self.initial_code
    }

    /// The canonical formatted rendering, used only for scoring.
    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Number of newline-delimited lines in the solution.
    ///
    /// This is the fixed scoring denominator for the exercise.
    #[must_use]
    pub fn solution_line_count(&self) -> usize {
        self.solution.split('\n').count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
