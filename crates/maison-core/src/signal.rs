//! Observable cells and the shared warp signal.
//!
//! [`Observable<T>`] is a reference-counted cell that notifies subscribers in
//! registration order when its value changes (by `PartialEq`). Subscribers are
//! held weakly; dropping the returned [`Subscription`] unsubscribes.
//!
//! [`WarpSignal`] pairs two such cells: `is_zooming` ("motion should be at high
//! speed now") and `start_at_warp` ("the next page should start already fast").
//! Neither cell is locked; the last writer wins. Write access is split by
//! phase, recorded in [`WarpPhase`]:
//!
//! - `Handoff`: the navigation handoff of the page being left owns both cells.
//! - `Settle`: the entry coordinator of the freshly mounted page owns both
//!   cells until its deceleration fires.
//! - `Resting`: nobody is sequencing; motion is at rest.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// Shared value with change notification. Clones share the same cell.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Store `value`; subscribers run only if it differs from the current one.
    /// Subscribers may call `set` again from inside their callback.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of value-changing writes so far.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(|w| w.upgrade()).collect()
        };
        if callbacks.is_empty() {
            return;
        }
        let value = self.get();
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// Keeps a subscriber callback alive. Drop to unsubscribe.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WarpPhase {
    #[default]
    Resting,
    Handoff,
    Settle,
}

/// Process-wide warp state shared by the handoff, the entry coordinator and
/// the motion renderer. Cloning hands out another view of the same cells.
#[derive(Clone, Debug)]
pub struct WarpSignal {
    pub is_zooming: Observable<bool>,
    pub start_at_warp: Observable<bool>,
    phase: Rc<Cell<WarpPhase>>,
}

impl Default for WarpSignal {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WarpSignal {
    /// `start_at_warp` seeds the entry flag, e.g. from a cold load that carried
    /// the entry query marker.
    pub fn new(start_at_warp: bool) -> Self {
        Self {
            is_zooming: Observable::new(false),
            start_at_warp: Observable::new(start_at_warp),
            phase: Rc::new(Cell::new(WarpPhase::Resting)),
        }
    }

    pub fn is_zooming(&self) -> bool {
        self.is_zooming.get()
    }

    pub fn start_at_warp(&self) -> bool {
        self.start_at_warp.get()
    }

    pub fn set_zooming(&self, value: bool) {
        log::debug!("[warp] is_zooming={} phase={:?}", value, self.phase.get());
        self.is_zooming.set(value);
    }

    pub fn set_start_at_warp(&self, value: bool) {
        log::debug!("[warp] start_at_warp={} phase={:?}", value, self.phase.get());
        self.start_at_warp.set(value);
    }

    pub fn phase(&self) -> WarpPhase {
        self.phase.get()
    }

    /// Record which sequencer owns the cells from now on. A claim that
    /// overrides another active phase is logged; it is not refused.
    pub fn claim(&self, phase: WarpPhase) {
        let prev = self.phase.replace(phase);
        if prev != WarpPhase::Resting && phase != WarpPhase::Resting && prev != phase {
            log::warn!("[warp] {:?} taking over from {:?}", phase, prev);
        }
    }

    /// Hand the cells back to `Resting` if `owner` still holds them. Returns
    /// false when another sequencer claimed them since.
    pub fn release(&self, owner: WarpPhase) -> bool {
        if self.phase.get() != owner {
            return false;
        }
        self.phase.set(WarpPhase::Resting);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_write_does_not_notify() {
        let cell = Observable::new(false);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _sub = cell.subscribe(move |_| h.set(h.get() + 1));
        cell.set(false);
        assert_eq!(hits.get(), 0);
        cell.set(true);
        assert_eq!(hits.get(), 1);
        assert_eq!(cell.version(), 1);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let cell = Observable::new(0_u8);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = cell.subscribe(move |_| h.set(h.get() + 1));
        cell.set(1);
        drop(sub);
        cell.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }
}
