//! Cancellable timed effects.
//!
//! Every chained effect (tooltip fade, particle loop, ripple removal) runs as
//! an abortable future on the local executor. Dropping the [`ScheduledTask`]
//! aborts the future at its next await point, which in turn drops whatever
//! the future owns, so DOM guards held across awaits clean up after
//! themselves.

use futures_util::future::{abortable, AbortHandle};
use gloo_timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub async fn sleep(millis: u32) {
    TimeoutFuture::new(millis).await;
}

pub struct ScheduledTask {
    abort: AbortHandle,
    finished: Rc<Cell<bool>>,
}

impl ScheduledTask {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + 'static,
    {
        let finished = Rc::new(Cell::new(false));
        let (task, abort) = abortable(future);

        let done = finished.clone();
        spawn_local(async move {
            let _ = task.await;
            done.set(true);
        });

        Self {
            abort,
            finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Owns any number of short-lived tasks; finished ones are pruned on push.
#[derive(Default)]
pub struct TaskSet {
    tasks: RefCell<Vec<ScheduledTask>>,
}

impl TaskSet {
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let mut tasks = self.tasks.borrow_mut();
        tasks.retain(|task| !task.is_finished());
        tasks.push(ScheduledTask::spawn(future));
    }

    pub fn cancel_all(&self) {
        let drained: Vec<ScheduledTask> = self.tasks.borrow_mut().drain(..).collect();
        drop(drained);
    }
}
