use maison_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn session() -> (Rc<ManualScheduler>, QuizSession, Rc<RefCell<Vec<QuizPhase>>>) {
    let clock = Rc::new(ManualScheduler::new());
    let session = QuizSession::new(QuizEngine::default(), clock.clone(), QuizTimings::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    session.on_change(move |snap| log.borrow_mut().push(snap.phase));
    (clock, session, seen)
}

#[test]
fn advance_lands_after_exit_animation() {
    let (clock, session, _) = session();
    assert!(session.advance());
    assert_eq!(session.snapshot().phase, QuizPhase::Question(0));
    assert_eq!(session.snapshot().exiting, Some(Direction::Forward));
    clock.advance(ms(599));
    assert_eq!(session.snapshot().phase, QuizPhase::Question(0));
    clock.advance(ms(1));
    assert_eq!(session.snapshot().phase, QuizPhase::Question(1));
    assert_eq!(session.snapshot().exiting, None);
}

#[test]
fn double_advance_does_not_skip_a_step() {
    let (clock, session, _) = session();
    assert!(session.advance());
    assert!(!session.advance());
    clock.advance(ms(300));
    assert!(!session.advance());
    clock.run_until_idle();
    assert_eq!(session.snapshot().phase, QuizPhase::Question(1));
}

#[test]
fn full_run_reveals_after_compute_delay() {
    let (clock, session, seen) = session();
    for value in [3.0, 3.0, 3.0] {
        let id = session.snapshot().step.unwrap().id;
        session.set_answer(id, value).unwrap();
        session.commit_answer(id).unwrap();
        assert!(session.advance());
        clock.advance(ms(600));
    }
    assert_eq!(session.snapshot().phase, QuizPhase::Computing);
    assert_eq!(session.result(), None);
    clock.advance(ms(2499));
    assert_eq!(session.result(), None);
    clock.advance(ms(1));
    assert_eq!(session.result(), Some(ResultKey::C));
    assert_eq!(session.pending_timers(), 0);

    let phases = seen.borrow();
    let computing = phases.iter().position(|p| *p == QuizPhase::Computing).unwrap();
    let result = phases
        .iter()
        .position(|p| matches!(p, QuizPhase::Result(_)))
        .unwrap();
    assert!(computing < result);
}

#[test]
fn restart_while_computing_never_applies_stale_result() {
    let (clock, session, _) = session();
    for _ in 0..3 {
        session.advance();
        clock.advance(ms(600));
    }
    assert_eq!(session.snapshot().phase, QuizPhase::Computing);
    clock.advance(ms(1000));
    session.restart();
    assert_eq!(session.pending_timers(), 0);
    clock.advance(ms(5000));
    assert_eq!(session.snapshot().phase, QuizPhase::Question(0));
    assert_eq!(session.result(), None);
}

#[test]
fn restart_then_quick_rerun_reveals_once() {
    let (clock, session, _) = session();
    for _ in 0..3 {
        session.advance();
        clock.advance(ms(600));
    }
    session.restart();
    for v in [1.0, 1.0, 1.0] {
        let id = session.snapshot().step.unwrap().id;
        session.choose_label(id, LabelStop::Left).unwrap();
        assert_eq!(session.snapshot().value, Some(v));
        session.advance();
        clock.advance(ms(600));
    }
    clock.run_until_idle();
    assert_eq!(session.result(), Some(ResultKey::A));
}

#[test]
fn retreat_returns_to_previous_step() {
    let (clock, session, _) = session();
    assert!(!session.retreat());
    session.advance();
    clock.advance(ms(600));
    assert!(session.retreat());
    assert_eq!(session.snapshot().exiting, Some(Direction::Back));
    clock.advance(ms(600));
    assert_eq!(session.snapshot().phase, QuizPhase::Question(0));
}

#[test]
fn dropping_session_cancels_its_timers() {
    let (clock, session, seen) = session();
    session.advance();
    let before = seen.borrow().len();
    drop(session);
    clock.run_until_idle();
    assert_eq!(seen.borrow().len(), before);
}

#[test]
fn listener_sees_live_drag_values() {
    let clock = Rc::new(ManualScheduler::new());
    let session = QuizSession::new(QuizEngine::default(), clock, QuizTimings::default());
    let values = Rc::new(RefCell::new(Vec::new()));
    let v = values.clone();
    session.on_change(move |snap| v.borrow_mut().push(snap.value));
    session.set_answer("projection", 2.4).unwrap();
    session.set_answer("projection", 2.8).unwrap();
    session.commit_answer("projection").unwrap();
    assert_eq!(*values.borrow(), vec![Some(2.4), Some(2.8), Some(3.0)]);
    assert!(session.set_answer("character", 1.0).is_err());
    assert_eq!(values.borrow().len(), 3);
}
