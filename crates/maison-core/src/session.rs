use crate::catalog::ResultKey;
use crate::constants::{COMPUTE_DELAY, STEP_EXIT};
use crate::error::QuizError;
use crate::quiz::{ExitTicket, LabelStop, QuizEngine, QuizSnapshot, RevealTicket};
use crate::schedule::{Scheduler, TimerScope};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTimings {
    /// Length of the outbound step animation; moves land when it ends.
    pub exit: Duration,
    /// Pause spent in `Computing` before the result is revealed.
    pub compute: Duration,
}

impl Default for QuizTimings {
    fn default() -> Self {
        Self {
            exit: STEP_EXIT,
            compute: COMPUTE_DELAY,
        }
    }
}

type Listener = Rc<dyn Fn(&QuizSnapshot)>;

struct Inner {
    engine: RefCell<QuizEngine>,
    timers: TimerScope,
    timings: QuizTimings,
    listener: RefCell<Option<Listener>>,
}

impl Inner {
    fn emit(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            let snap = self.engine.borrow().snapshot();
            listener(&snap);
        }
    }
}

/// A quiz engine driven by real (or virtual) time.
///
/// Owns the exit and scoring timers of one page's quiz; dropping the session
/// cancels them.
pub struct QuizSession {
    inner: Rc<Inner>,
}

impl QuizSession {
    pub fn new(engine: QuizEngine, scheduler: Rc<dyn Scheduler>, timings: QuizTimings) -> Self {
        Self {
            inner: Rc::new(Inner {
                engine: RefCell::new(engine),
                timers: TimerScope::new(scheduler),
                timings,
                listener: RefCell::new(None),
            }),
        }
    }

    /// Called with a fresh snapshot after every state change.
    pub fn on_change(&self, listener: impl Fn(&QuizSnapshot) + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.engine.borrow().snapshot()
    }

    pub fn result(&self) -> Option<ResultKey> {
        self.inner.engine.borrow().result()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.timers.pending()
    }

    pub fn set_answer(&self, step_id: &str, value: f32) -> Result<f32, QuizError> {
        let v = self.inner.engine.borrow_mut().set_answer(step_id, value)?;
        self.inner.emit();
        Ok(v)
    }

    pub fn commit_answer(&self, step_id: &str) -> Result<f32, QuizError> {
        let v = self.inner.engine.borrow_mut().commit_answer(step_id)?;
        self.inner.emit();
        Ok(v)
    }

    pub fn choose_label(&self, step_id: &str, stop: LabelStop) -> Result<f32, QuizError> {
        let v = self.inner.engine.borrow_mut().choose_label(step_id, stop)?;
        self.inner.emit();
        Ok(v)
    }

    /// Start moving to the next step. Returns false when ignored.
    pub fn advance(&self) -> bool {
        let ticket = self.inner.engine.borrow_mut().advance();
        self.start_exit(ticket)
    }

    /// Start moving to the previous step. Returns false when ignored.
    pub fn retreat(&self) -> bool {
        let ticket = self.inner.engine.borrow_mut().retreat();
        self.start_exit(ticket)
    }

    pub fn restart(&self) {
        self.inner.timers.cancel_all();
        self.inner.engine.borrow_mut().restart();
        log::info!("[quiz] restart");
        self.inner.emit();
    }

    fn start_exit(&self, ticket: Option<ExitTicket>) -> bool {
        let Some(ticket) = ticket else {
            return false;
        };
        self.inner.emit();
        let weak = Rc::downgrade(&self.inner);
        self.inner.timers.schedule(
            self.inner.timings.exit,
            Box::new(move || finish_exit(&weak, ticket)),
        );
        true
    }
}

fn finish_exit(weak: &Weak<Inner>, ticket: ExitTicket) {
    let Some(inner) = weak.upgrade() else { return };
    let reveal = inner.engine.borrow_mut().finish_exit(ticket);
    inner.emit();
    if let Some(reveal) = reveal {
        let weak = weak.clone();
        inner.timers.schedule(
            inner.timings.compute,
            Box::new(move || finish_reveal(&weak, reveal)),
        );
    }
}

fn finish_reveal(weak: &Weak<Inner>, ticket: RevealTicket) {
    let Some(inner) = weak.upgrade() else { return };
    let revealed = inner.engine.borrow_mut().reveal(ticket);
    if revealed.is_some() {
        inner.emit();
    }
}
