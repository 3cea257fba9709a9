use maison_core::{Scheduler, Task, TaskHandle};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `window.setTimeout` backed scheduler.
///
/// The JS closure frees itself after its single call. Cancellation goes
/// through the task guard: a cancelled timer still fires but does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let guarded = handle.guard(task);
        let Some(window) = web::window() else {
            log::error!("no window to schedule on");
            handle.cancel();
            return handle;
        };
        let callback = Closure::once_into_js(move || guarded());
        let millis = delay.as_millis().min(i32::MAX as u128) as i32;
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        ) {
            log::error!("setTimeout failed: {:?}", e);
            handle.cancel();
        }
        handle
    }
}
