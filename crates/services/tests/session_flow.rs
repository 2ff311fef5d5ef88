use indent_core::time::{fixed_clock, fixed_now};
use services::{AppServices, SessionView};

#[test]
fn full_catalog_walkthrough_completes_the_session() {
    let services = AppServices::in_memory(fixed_clock());
    let catalog = services.catalog();
    let mut session = services.start_session().unwrap();

    while !session.is_complete() {
        session.tick();

        // A learner submitting the exact reference formatting.
        let solution = catalog
            .get(session.current_index())
            .expect("session index within catalog")
            .solution()
            .to_string();
        session.edit(solution);

        let outcome = services.check_current(&mut session);
        assert_eq!(outcome.score, 100);
        assert!(outcome.passed);

        if !outcome.is_complete {
            assert!(session.advance());
        }
    }

    let ticks_before_completion = session.elapsed_seconds();
    assert_eq!(ticks_before_completion, catalog.len() as u64);

    // The timer is frozen after completion.
    session.tick();
    assert_eq!(session.elapsed_seconds(), ticks_before_completion);

    let summary = session.build_summary().unwrap();
    assert_eq!(summary.exercises_passed() as usize, catalog.len());
    assert_eq!(summary.average_score(), 100);
    assert_eq!(summary.started_at(), fixed_now());
    assert_eq!(summary.completed_at(), fixed_now());

    let view = SessionView::from_session(&session);
    assert!(view.is_complete);
    assert_eq!(view.average_score, 100);
}

#[test]
fn failed_check_invites_retry_without_state_damage() {
    let services = AppServices::in_memory(fixed_clock());
    let mut session = services.start_session().unwrap();

    // Unindented submission keeps the original single line: hard mismatch.
    let outcome = services.check_current(&mut session);
    assert_eq!(outcome.score, 0);
    assert!(!outcome.passed);
    assert!(!session.advance());

    session.reset();
    assert_eq!(
        session.current_code(),
        services.catalog().get(0).unwrap().initial_code()
    );
    assert_eq!(session.current_index(), 0);
    assert!(session.scores().is_empty());
}
