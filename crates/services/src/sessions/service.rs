use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indent_core::model::{Exercise, ExerciseCatalog, SessionSummary};
use indent_core::scorer;

use super::progress::SessionProgress;
use crate::error::SessionError;

/// Minimum score required to unlock progression to the next exercise.
pub const PASS_THRESHOLD: u8 = 90;

//
// ─── CHECK OUTCOME ─────────────────────────────────────────────────────────────
//

/// Captures the outcome of checking the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub score: u8,
    pub passed: bool,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one learner's run through the catalog.
///
/// Every operation executes synchronously and atomically. Invalid-but-
/// harmless calls (`advance` before passing, `tick` after completion) are
/// no-ops rather than errors, so the shell never has to guard call order.
pub struct SessionService {
    catalog: Arc<ExerciseCatalog>,
    current: usize,
    current_code: String,
    last_score: Option<u8>,
    scores: BTreeMap<usize, u8>,
    elapsed_seconds: u64,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionService {
    /// Create a new session positioned at the first exercise.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyCatalog` if the catalog has no exercises.
    pub fn new(
        catalog: Arc<ExerciseCatalog>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let Some(first) = catalog.get(0) else {
            return Err(SessionError::EmptyCatalog);
        };
        let current_code = first.initial_code().to_string();

        Ok(Self {
            catalog,
            current: 0,
            current_code,
            last_score: None,
            scores: BTreeMap::new(),
            elapsed_seconds: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The exercise the learner is currently working on.
    #[must_use]
    pub fn current_exercise(&self) -> &Exercise {
        // Index validity is a construction invariant: new() requires a
        // non-empty catalog and advance() never steps past the end.
        &self.catalog.exercises()[self.current]
    }

    /// The learner's in-progress edit of the current exercise.
    #[must_use]
    pub fn current_code(&self) -> &str {
        &self.current_code
    }

    /// Score of the most recent check, cleared by any edit.
    #[must_use]
    pub fn last_score(&self) -> Option<u8> {
        self.last_score
    }

    /// Best-effort latest passing score per exercise index.
    #[must_use]
    pub fn scores(&self) -> &BTreeMap<usize, u8> {
        &self.scores
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// True when the most recent check passed the threshold.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.last_score.is_some_and(|score| score >= PASS_THRESHOLD)
    }

    /// Replace the working buffer with the shell's latest text.
    ///
    /// Any edit invalidates the prior check result; `advance` stays gated
    /// until the learner checks again.
    pub fn edit(&mut self, new_text: impl Into<String>) {
        self.current_code = new_text.into();
        self.last_score = None;
    }

    /// Score the working buffer against the current exercise's solution.
    ///
    /// On a pass the score is recorded for the exercise (re-checks keep the
    /// latest passing value) and, on the final exercise, the session is
    /// marked complete with `checked_at` as its completion time.
    pub fn check(&mut self, checked_at: DateTime<Utc>) -> CheckOutcome {
        let score = scorer::score(&self.current_code, self.current_exercise().solution());
        self.last_score = Some(score);

        let passed = score >= PASS_THRESHOLD;
        if passed {
            self.scores.insert(self.current, score);
            if self.current == self.catalog.last_index() && self.completed_at.is_none() {
                self.completed_at = Some(checked_at);
            }
        }

        CheckOutcome {
            score,
            passed,
            is_complete: self.is_complete(),
        }
    }

    /// Move to the next exercise after a passing check.
    ///
    /// Returns `false` without touching any state when the current exercise
    /// has not been passed or the session is already on the final exercise.
    pub fn advance(&mut self) -> bool {
        if !self.passed() || self.current >= self.catalog.last_index() {
            return false;
        }

        self.current += 1;
        self.current_code = self.current_exercise().initial_code().to_string();
        self.last_score = None;
        true
    }

    /// Restore the current exercise's starting code.
    ///
    /// Recorded scores and elapsed time are untouched.
    pub fn reset(&mut self) {
        self.current_code = self.current_exercise().initial_code().to_string();
        self.last_score = None;
    }

    /// Consume one timer tick; frozen once the session is complete.
    pub fn tick(&mut self) {
        if self.is_complete() {
            return;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.catalog.len();
        let passed = self.scores.len();
        SessionProgress {
            total,
            passed,
            remaining: total.saturating_sub(passed),
            is_complete: self.is_complete(),
        }
    }

    /// Nearest-integer mean of the recorded passing scores; 0 when empty.
    #[must_use]
    pub fn average_score(&self) -> u8 {
        SessionSummary::average_of(&self.scores)
    }

    /// Build the completion summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` before the final exercise has
    /// been passed.
    pub fn build_summary(&self) -> Result<SessionSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::NotComplete)?;
        Ok(SessionSummary::from_scores(
            self.started_at,
            completed_at,
            self.elapsed_seconds,
            &self.scores,
        )?)
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("current", &self.current)
            .field("catalog_len", &self.catalog.len())
            .field("last_score", &self.last_score)
            .field("scores_len", &self.scores.len())
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use indent_core::model::{ExerciseCatalog, ExerciseDraft, ExerciseId};
    use indent_core::time::fixed_now;

    fn build_exercise(id: u64, initial: &str, solution: &str) -> indent_core::model::Exercise {
        ExerciseDraft {
            id: ExerciseId::new(id),
            title: format!("Exercise {id}"),
            description: String::new(),
            initial_code: initial.to_string(),
            solution: solution.to_string(),
        }
        .validate()
        .unwrap()
    }

    fn two_exercise_catalog() -> Arc<ExerciseCatalog> {
        Arc::new(
            ExerciseCatalog::new(vec![
                build_exercise(1, "<ul><li>a</li></ul>", "<ul>\n  <li>a</li>\n</ul>"),
                build_exercise(2, "<p><b>x</b></p>", "<p>\n  <b>x</b>\n</p>"),
            ])
            .unwrap(),
        )
    }

    fn build_session() -> SessionService {
        SessionService::new(two_exercise_catalog(), fixed_now()).unwrap()
    }

    #[test]
    fn session_starts_at_first_exercise() {
        let session = build_session();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_code(), "<ul><li>a</li></ul>");
        assert_eq!(session.last_score(), None);
        assert!(!session.is_complete());
    }

    #[test]
    fn exact_solution_scores_full_and_records_pass() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>\n</ul>");

        let outcome = session.check(fixed_now());

        assert_eq!(outcome.score, 100);
        assert!(outcome.passed);
        assert!(!outcome.is_complete);
        assert_eq!(session.scores().get(&0), Some(&100));
    }

    #[test]
    fn missing_line_scores_zero() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>");

        let outcome = session.check(fixed_now());

        assert_eq!(outcome.score, 0);
        assert!(!outcome.passed);
        assert!(session.scores().is_empty());
    }

    #[test]
    fn advance_enters_next_exercise_with_its_initial_code() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());

        assert!(session.advance());

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_code(), "<p><b>x</b></p>");
        assert_eq!(session.last_score(), None);
    }

    #[test]
    fn advance_is_a_noop_without_a_passing_check() {
        let mut session = build_session();
        assert!(!session.advance());

        session.edit("wrong\nline\ncount\nhere");
        session.check(fixed_now());
        assert!(!session.advance());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn passing_final_exercise_completes_and_freezes_timer() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());
        session.advance();

        session.tick();
        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);

        session.edit("<p>\n  <b>x</b>\n</p>");
        let outcome = session.check(fixed_now());
        assert!(outcome.passed);
        assert!(outcome.is_complete);

        session.tick();
        assert_eq!(session.elapsed_seconds(), 2);
        assert_eq!(session.completed_at(), Some(fixed_now()));

        // The final exercise cannot be advanced past.
        assert!(!session.advance());
    }

    #[test]
    fn edit_after_passing_check_regates_advance() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());
        assert!(session.passed());

        session.edit("<ul>\n<li>a</li>\n</ul>");
        assert_eq!(session.last_score(), None);
        assert!(!session.advance());

        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());
        assert!(session.advance());
    }

    #[test]
    fn recheck_after_pass_keeps_latest_passing_value() {
        // Solution with 10 lines so a single wrong line still passes at 90.
        let solution = "a\n a\n  a\na\na\na\na\na\na\na";
        let catalog = Arc::new(
            ExerciseCatalog::new(vec![build_exercise(1, "unformatted", solution)]).unwrap(),
        );
        let mut session = SessionService::new(catalog, fixed_now()).unwrap();

        session.edit(solution);
        assert_eq!(session.check(fixed_now()).score, 100);
        assert_eq!(session.scores().get(&0), Some(&100));

        // One wrong depth out of ten lines: 90, still passing.
        session.edit("a\n  a\n  a\na\na\na\na\na\na\na");
        let outcome = session.check(fixed_now());
        assert_eq!(outcome.score, 90);
        assert!(outcome.passed);
        assert_eq!(session.scores().get(&0), Some(&90));
    }

    #[test]
    fn reset_restores_initial_code_only() {
        let mut session = build_session();
        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());
        session.tick();

        session.reset();

        assert_eq!(session.current_code(), "<ul><li>a</li></ul>");
        assert_eq!(session.last_score(), None);
        assert_eq!(session.scores().get(&0), Some(&100));
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn completion_time_is_set_once() {
        let catalog = Arc::new(
            ExerciseCatalog::new(vec![build_exercise(1, "x", "x")]).unwrap(),
        );
        let mut session = SessionService::new(catalog, fixed_now()).unwrap();

        session.edit("x");
        session.check(fixed_now());
        let first = session.completed_at();
        assert!(first.is_some());

        session.check(fixed_now() + chrono::Duration::seconds(30));
        assert_eq!(session.completed_at(), first);
    }

    #[test]
    fn progress_counts_passed_exercises() {
        let mut session = build_session();
        let progress = session.progress();
        assert_eq!(progress.total, 2);
        assert_eq!(progress.passed, 0);
        assert_eq!(progress.remaining, 2);

        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());

        let progress = session.progress();
        assert_eq!(progress.passed, 1);
        assert_eq!(progress.remaining, 1);
        assert!(!progress.is_complete);
    }

    #[test]
    fn summary_requires_completion() {
        let mut session = build_session();
        let err = session.build_summary().unwrap_err();
        assert!(matches!(err, SessionError::NotComplete));

        session.edit("<ul>\n  <li>a</li>\n</ul>");
        session.check(fixed_now());
        session.advance();
        session.edit("<p>\n  <b>x</b>\n</p>");
        session.check(fixed_now());

        let summary = session.build_summary().unwrap();
        assert_eq!(summary.exercises_passed(), 2);
        assert_eq!(summary.average_score(), 100);
    }

}
