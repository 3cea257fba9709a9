//! Fixed-delay task scheduling.
//!
//! Every delayed callback in the crate goes through a [`Scheduler`] and comes
//! back as a [`TaskHandle`]. Cancelling a handle guarantees the task will not
//! run, whatever the underlying timer does. Owners that must not leave
//! callbacks behind keep their handles in a [`TimerScope`], which cancels
//! everything it holds when dropped.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::BinaryHeap;
use std::cmp::Ordering;
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

#[derive(Default)]
struct TaskState {
    cancelled: Cell<bool>,
    fired: Cell<bool>,
}

#[derive(Clone, Default)]
pub struct TaskHandle {
    state: Rc<TaskState>,
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("cancelled", &self.state.cancelled.get())
            .field("fired", &self.state.fired.get())
            .finish()
    }
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `task` so it becomes a no-op once this handle is cancelled.
    /// Scheduler implementations hand the wrapped task to their timer.
    pub fn guard(&self, task: Task) -> Task {
        let state = self.state.clone();
        Box::new(move || {
            if state.cancelled.get() || state.fired.replace(true) {
                return;
            }
            task();
        })
    }

    pub fn cancel(&self) {
        if !self.state.fired.get() {
            self.state.cancelled.set(true);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    pub fn has_fired(&self) -> bool {
        self.state.fired.get()
    }

    pub fn is_pending(&self) -> bool {
        !self.is_cancelled() && !self.has_fired()
    }
}

/// Tasks scheduled on behalf of one owner (a page mount, a quiz session).
pub struct TimerScope {
    scheduler: Rc<dyn Scheduler>,
    handles: RefCell<SmallVec<[TaskHandle; 4]>>,
}

impl TimerScope {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            handles: RefCell::new(SmallVec::new()),
        }
    }

    pub fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = self.scheduler.schedule(delay, task);
        let mut handles = self.handles.borrow_mut();
        handles.retain(|h| h.is_pending());
        handles.push(handle.clone());
        handle
    }

    pub fn pending(&self) -> usize {
        self.handles.borrow().iter().filter(|h| h.is_pending()).count()
    }

    pub fn cancel_all(&self) {
        for h in self.handles.borrow_mut().drain(..) {
            h.cancel();
        }
    }
}

impl Drop for TimerScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

struct Entry {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // min-heap on (due, seq)
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deterministic virtual-clock scheduler. Tasks run in deadline order, ties in
/// scheduling order, and may schedule further tasks while running.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    queue: RefCell<BinaryHeap<Entry>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Tasks still queued, including cancelled ones not yet reached.
    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.peek() {
                    Some(e) if e.due <= target => queue.pop(),
                    _ => None,
                }
            };
            let Some(entry) = next else { break };
            self.now.set(entry.due);
            (entry.task)();
        }
        self.now.set(target);
    }

    /// Run everything queued, advancing the clock as far as needed.
    pub fn run_until_idle(&self) {
        loop {
            let next = self.queue.borrow_mut().pop();
            let Some(entry) = next else { break };
            if entry.due > self.now.get() {
                self.now.set(entry.due);
            }
            (entry.task)();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Entry {
            due: self.now.get() + delay,
            seq,
            task: handle.guard(task),
        });
        handle
    }
}
