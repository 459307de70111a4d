use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::queue::BoundedQueue;

/// Spawns a single worker thread that pulls jobs from the queue until
/// the queue reports it is stopping.
pub(super) fn spawn_worker(id: u32, queue: Arc<BoundedQueue>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || {
            while let Some(job) = queue.pop() {
                debug!("Worker {id} executing job");
                // Catch panics so the worker loop continues
                if catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("Worker {id} job panicked, continuing");
                }
            }
            debug!("Worker {id}: queue stopped, shutting down");
        })
}
