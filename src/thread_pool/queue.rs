use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// A unit of work submitted to the pool.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Queue contents and lifecycle flags, guarded by one mutex.
struct QueueState {
    items: VecDeque<Job>,
    /// False once shutdown has begun; no new job may be enqueued.
    accepting: bool,
    /// True once shutdown has committed to stopping the workers.
    stopping: bool,
}

/// A bounded FIFO job queue with blocking producers and consumers.
///
/// A single mutex guards the queue and both flags. Three condition
/// variables cover the three wait predicates over that state:
/// producers wait for room, workers wait for jobs, and shutdown waits
/// for the queue to drain.
pub(crate) struct BoundedQueue {
    capacity: usize,
    state: Mutex<QueueState>,
    not_full: Condvar,
    not_empty: Condvar,
    drained: Condvar,
}

impl BoundedQueue {
    pub(crate) fn new(capacity: usize) -> BoundedQueue {
        BoundedQueue {
            capacity,
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                accepting: true,
                stopping: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Appends a job at the tail, blocking while the queue is full.
    ///
    /// Returns `false` if the queue stopped accepting jobs before the
    /// job could be enqueued; the job is dropped without running.
    pub(crate) fn push(&self, job: Job) -> bool {
        let mut state = self.state.lock().unwrap();
        while state.items.len() == self.capacity && state.accepting {
            state = self.not_full.wait(state).unwrap();
        }
        if !state.accepting {
            return false;
        }
        state.items.push_back(job);
        self.not_empty.notify_one();
        true
    }

    /// Removes the job at the head, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue is stopping and fully drained,
    /// which is the worker's signal to exit its loop.
    pub(crate) fn pop(&self) -> Option<Job> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(job) = state.items.pop_front() {
                if state.items.is_empty() {
                    self.drained.notify_all();
                }
                self.not_full.notify_one();
                return Some(job);
            }
            if state.stopping {
                return None;
            }
            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Runs both shutdown phases: stop accepting jobs, wait for the
    /// queue to drain, then tell the workers to stop.
    ///
    /// Blocked producers are woken so none keeps waiting on a closed
    /// queue. The drain wait has no timeout: every job that was
    /// accepted gets executed before any worker is told to exit.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.accepting = false;
        self.not_full.notify_all();
        while !state.items.is_empty() {
            state = self.drained.wait(state).unwrap();
        }
        state.stopping = true;
        self.not_empty.notify_all();
    }
}
