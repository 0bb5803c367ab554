//! Completion context for service callbacks.
//!
//! `ResponseQueue` is the sending half the service holds; `ResponseLoop` is
//! driven by the consumer. A completion posted to the queue only runs when
//! the loop is driven, on the task that drives it, so a single-threaded
//! consumer never sees a completion run on a network task.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Create a connected queue/loop pair.
pub fn channel() -> (ResponseQueue, ResponseLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResponseQueue { jobs: tx }, ResponseLoop { jobs: rx })
}

#[derive(Clone)]
pub struct ResponseQueue {
    jobs: mpsc::UnboundedSender<Job>,
}

impl ResponseQueue {
    /// Post a job to run on the loop. Jobs run in posting order.
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.jobs.send(Box::new(job)).is_err() {
            debug!("response loop dropped, discarding completion");
        }
    }
}

pub struct ResponseLoop {
    jobs: mpsc::UnboundedReceiver<Job>,
}

impl ResponseLoop {
    /// Run jobs until every `ResponseQueue` has been dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.jobs.recv().await {
            job();
        }
    }

    /// Run jobs while waiting for `done`, then return its output.
    ///
    /// Jobs still queued when `done` resolves stay queued.
    pub async fn run_until<F: Future>(&mut self, done: F) -> F::Output {
        tokio::pin!(done);
        loop {
            tokio::select! {
                biased;
                output = &mut done => return output,
                Some(job) = self.jobs.recv() => job(),
            }
        }
    }
}
