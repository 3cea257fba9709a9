use crate::constants::{CURTAIN_RETRIES, DECELERATE_AFTER};
use crate::schedule::{Scheduler, TimerScope};
use crate::signal::{WarpPhase, WarpSignal};
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Full-screen cover shown while a page loads.
pub trait Curtain {
    /// Start fading the cover out and detach it afterwards. Returns false if
    /// the cover is not in the page (yet).
    fn dismiss(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryTimings {
    /// Delays after mount at which a missing curtain is looked up again.
    pub curtain_retries: SmallVec<[Duration; 2]>,
    pub decelerate_after: Duration,
}

impl Default for EntryTimings {
    fn default() -> Self {
        Self {
            curtain_retries: SmallVec::from_slice(&CURTAIN_RETRIES),
            decelerate_after: DECELERATE_AFTER,
        }
    }
}

/// Settles a freshly mounted motion page.
///
/// On mount: dismiss the curtain (retrying while it is missing), force
/// `is_zooming` to match `start_at_warp`, then after `decelerate_after` clear
/// both flags. Every timer belongs to this mount; dropping the coordinator
/// cancels whatever has not fired.
pub struct PageEntryCoordinator {
    timers: TimerScope,
    settled: Rc<Cell<bool>>,
    curtain_gone: Rc<Cell<bool>>,
}

impl PageEntryCoordinator {
    pub fn mount(
        signal: &WarpSignal,
        curtain: Rc<dyn Curtain>,
        scheduler: Rc<dyn Scheduler>,
        timings: &EntryTimings,
    ) -> Self {
        let timers = TimerScope::new(scheduler);
        let settled = Rc::new(Cell::new(false));
        let curtain_gone = Rc::new(Cell::new(curtain.dismiss()));

        if !curtain_gone.get() {
            log::debug!("[entry] curtain not mounted yet, retrying");
            for delay in &timings.curtain_retries {
                let curtain = curtain.clone();
                let gone = curtain_gone.clone();
                timers.schedule(
                    *delay,
                    Box::new(move || {
                        if !gone.get() && curtain.dismiss() {
                            gone.set(true);
                        }
                    }),
                );
            }
        }

        signal.claim(WarpPhase::Settle);
        let at_warp = signal.start_at_warp();
        signal.set_zooming(at_warp);
        log::info!("[entry] mounted start_at_warp={}", at_warp);

        let sig = signal.clone();
        let done = settled.clone();
        timers.schedule(
            timings.decelerate_after,
            Box::new(move || {
                // a journey started since mount owns the cells now
                if sig.phase() == WarpPhase::Settle {
                    sig.set_zooming(false);
                    sig.set_start_at_warp(false);
                    sig.release(WarpPhase::Settle);
                    log::info!("[entry] decelerated");
                } else {
                    log::info!("[entry] {:?} owns the warp, not decelerating", sig.phase());
                }
                done.set(true);
            }),
        );

        Self {
            timers,
            settled,
            curtain_gone,
        }
    }

    /// The deceleration has fired.
    pub fn is_settled(&self) -> bool {
        self.settled.get()
    }

    pub fn curtain_dismissed(&self) -> bool {
        self.curtain_gone.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Tear down early; equivalent to dropping.
    pub fn unmount(self) {}
}

impl Drop for PageEntryCoordinator {
    fn drop(&mut self) {
        if !self.settled.get() {
            log::debug!("[entry] unmounted before settling");
        }
        self.timers.cancel_all();
    }
}
