//! A fixed-size thread pool with a bounded job queue.
//!
//! Jobs are dispatched in submission order to a fixed set of worker
//! threads. When the queue is full, submission blocks until a worker
//! frees a slot, so producers that outpace the workers are throttled
//! instead of growing the backlog without bound.

mod queue;
mod worker;

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::{error, warn};

use self::queue::BoundedQueue;
use crate::{Result, ServerError};

/// Maximum number of worker threads a pool may be created with.
pub const MAX_THREADS: u32 = 200;

/// Maximum queue capacity a pool may be created with.
pub const MAX_QUEUE_SIZE: usize = 65536;

/// A thread pool with a fixed number of workers and a bounded job queue.
///
/// Shutting down is a two-phase sequence: the pool first stops
/// accepting jobs and waits for the queue to drain, then stops the
/// workers and joins them. Every job accepted before shutdown began is
/// executed; jobs submitted afterwards are dropped.
pub struct ThreadPool {
    queue: Arc<BoundedQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl ThreadPool {
    /// Creates a pool with `threads` workers and room for `queue_size`
    /// pending jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is zero or above its
    /// maximum, or if a worker thread cannot be started. In the latter
    /// case the workers already started are shut down before the error
    /// is returned.
    pub fn new(threads: u32, queue_size: usize) -> Result<ThreadPool> {
        if threads == 0 || threads > MAX_THREADS {
            return Err(ServerError::InvalidThreadCount(threads));
        }
        if queue_size == 0 || queue_size > MAX_QUEUE_SIZE {
            return Err(ServerError::InvalidQueueSize(queue_size));
        }

        let queue = Arc::new(BoundedQueue::new(queue_size));
        let mut workers = Vec::with_capacity(threads as usize);

        for id in 0..threads {
            match worker::spawn_worker(id, Arc::clone(&queue)) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Tear down the workers already started so no
                    // partial pool outlives the failed construction.
                    queue.close();
                    for handle in workers {
                        if handle.join().is_err() {
                            error!("Worker panicked during pool teardown");
                        }
                    }
                    return Err(e.into());
                }
            }
        }

        Ok(ThreadPool {
            queue,
            workers: Mutex::new(workers),
        })
    }

    /// Spawns a function into the thread pool.
    ///
    /// Blocks while the queue is full. There is no fairness guarantee
    /// among blocked submitters; they race for freed slots. Jobs
    /// submitted after [`shutdown`](ThreadPool::shutdown) has begun are
    /// dropped without running.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if !self.queue.push(Box::new(job)) {
            warn!("Thread pool is shutting down, job dropped");
        }
    }

    /// Shuts the pool down, running every queued job first.
    ///
    /// Stops accepting new jobs, waits for the queue to drain, then
    /// stops the workers and joins them. Returns only after every
    /// worker thread has exited. Calling `shutdown` again is a no-op.
    pub fn shutdown(&self) {
        self.queue.close();
        let handles: Vec<_> = self.workers.lock().unwrap().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                error!("Worker thread panicked");
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Dropping the pool drains outstanding jobs before the workers exit
        self.shutdown();
    }
}
