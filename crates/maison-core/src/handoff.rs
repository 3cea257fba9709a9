use crate::constants::{FORWARD_EXIT, RETURN_EXIT, RETURN_SETTLE};
use crate::route::{Navigator, Route};
use crate::schedule::{Scheduler, TaskHandle};
use crate::signal::{WarpPhase, WarpSignal};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandoffTimings {
    pub forward_exit: Duration,
    pub return_exit: Duration,
    pub return_settle: Duration,
}

impl Default for HandoffTimings {
    fn default() -> Self {
        Self {
            forward_exit: FORWARD_EXIT,
            return_exit: RETURN_EXIT,
            return_settle: RETURN_SETTLE,
        }
    }
}

/// Forward journeys hand the "stay fast" intent to the destination; return
/// journeys clean up after themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Journey {
    Forward(Route),
    Return(Route),
}

impl Journey {
    /// Home page -> quiz, arriving at warp.
    pub fn into_quiz() -> Self {
        Journey::Forward(Route::quiz().with_entry())
    }

    /// Quiz -> discovery section of the home page.
    pub fn back_home() -> Self {
        Journey::Return(Route::home().with_fragment("discovery-hub"))
    }
}

/// Accelerates the background and, once the exit animation has played,
/// leaves the page.
///
/// Timers started here are deliberately not tied to the page that started
/// them: the navigation they perform is what unmounts that page.
pub struct NavigationHandoff {
    signal: WarpSignal,
    navigator: Rc<dyn Navigator>,
    scheduler: Rc<dyn Scheduler>,
    timings: HandoffTimings,
    pending: RefCell<Option<TaskHandle>>,
}

impl NavigationHandoff {
    pub fn new(
        signal: WarpSignal,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
        timings: HandoffTimings,
    ) -> Self {
        Self {
            signal,
            navigator,
            scheduler,
            timings,
            pending: RefCell::new(None),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .map(|h| h.is_pending())
            .unwrap_or(false)
    }

    /// Start `journey`. The caller plays its exit animation alongside.
    /// Returns false if a journey is already under way.
    pub fn begin(&self, journey: Journey) -> bool {
        if self.is_pending() {
            log::debug!("[handoff] already leaving, ignoring {:?}", journey);
            return false;
        }
        self.signal.claim(WarpPhase::Handoff);
        self.signal.set_zooming(true);

        let signal = self.signal.clone();
        let navigator = self.navigator.clone();
        let handle = match journey {
            Journey::Forward(route) => {
                log::info!("[handoff] forward to {}", route);
                self.scheduler.schedule(
                    self.timings.forward_exit,
                    Box::new(move || {
                        signal.set_start_at_warp(true);
                        navigator.navigate(&route);
                    }),
                )
            }
            Journey::Return(route) => {
                log::info!("[handoff] return to {}", route);
                let scheduler = self.scheduler.clone();
                let settle = self.timings.return_settle;
                self.scheduler.schedule(
                    self.timings.return_exit,
                    Box::new(move || {
                        navigator.navigate(&route);
                        scheduler.schedule(
                            settle,
                            Box::new(move || {
                                if signal.phase() != WarpPhase::Handoff {
                                    log::info!(
                                        "[handoff] {:?} took over, leaving warp as is",
                                        signal.phase()
                                    );
                                    return;
                                }
                                signal.set_zooming(false);
                                signal.set_start_at_warp(false);
                                signal.release(WarpPhase::Handoff);
                            }),
                        );
                    }),
                )
            }
        };
        *self.pending.borrow_mut() = Some(handle);
        true
    }

    /// Abort a journey whose navigation has not happened yet.
    pub fn cancel(&self) {
        if let Some(h) = self.pending.borrow_mut().take() {
            h.cancel();
        }
    }
}
