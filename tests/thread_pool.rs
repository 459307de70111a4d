use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam::channel;
use webserver::thread_pool::{MAX_QUEUE_SIZE, MAX_THREADS};
use webserver::ThreadPool;

#[test]
fn rejects_invalid_configuration() {
    assert!(ThreadPool::new(0, 10).is_err());
    assert!(ThreadPool::new(MAX_THREADS + 1, 10).is_err());
    assert!(ThreadPool::new(4, 0).is_err());
    assert!(ThreadPool::new(4, MAX_QUEUE_SIZE + 1).is_err());
}

#[test]
fn executes_all_jobs_exactly_once() {
    let pool = ThreadPool::new(2, 5).unwrap();
    let executed = Arc::new(Mutex::new(Vec::new()));

    for i in 0..5 {
        let executed = Arc::clone(&executed);
        pool.spawn(move || executed.lock().unwrap().push(i));
    }
    pool.shutdown();

    let mut indices = executed.lock().unwrap().clone();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn single_worker_preserves_fifo_order() {
    let pool = ThreadPool::new(1, 8).unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));

    // Gate the worker so all eight jobs are queued before any runs.
    let (gate_tx, gate_rx) = channel::bounded::<()>(0);
    pool.spawn(move || gate_rx.recv().unwrap());
    for i in 0..8 {
        let order = Arc::clone(&order);
        pool.spawn(move || order.lock().unwrap().push(i));
    }

    gate_tx.send(()).unwrap();
    pool.shutdown();

    assert_eq!(*order.lock().unwrap(), (0..8).collect::<Vec<_>>());
}

#[test]
fn full_queue_blocks_submitters() {
    let pool = Arc::new(ThreadPool::new(1, 1).unwrap());

    // Job A occupies the single worker until released.
    let (started_tx, started_rx) = channel::bounded::<()>(0);
    let (release_tx, release_rx) = channel::bounded::<()>(0);
    pool.spawn(move || {
        started_tx.send(()).unwrap();
        release_rx.recv().unwrap();
    });
    started_rx.recv().unwrap();

    // With the worker busy, this fills the single queue slot.
    pool.spawn(|| {});

    // Job B's submit must block until A returns and its slot frees up.
    let submitted = Arc::new(AtomicBool::new(false));
    let submitter = {
        let pool = Arc::clone(&pool);
        let submitted = Arc::clone(&submitted);
        thread::spawn(move || {
            pool.spawn(|| {});
            submitted.store(true, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(200));
    assert!(
        !submitted.load(Ordering::SeqCst),
        "submit returned while the queue was still full"
    );

    release_tx.send(()).unwrap();
    submitter.join().unwrap();
    assert!(submitted.load(Ordering::SeqCst));

    pool.shutdown();
}

#[test]
fn shutdown_drains_queued_jobs() {
    let pool = ThreadPool::new(1, 8).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    let (gate_tx, gate_rx) = channel::bounded::<()>(0);
    pool.spawn(move || gate_rx.recv().unwrap());
    for _ in 0..6 {
        let counter = Arc::clone(&counter);
        pool.spawn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }

    // Release the gate only after shutdown has begun draining.
    let releaser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        gate_tx.send(()).unwrap();
    });

    pool.shutdown();
    assert_eq!(counter.load(Ordering::SeqCst), 6);
    releaser.join().unwrap();
}

#[test]
fn spawn_after_shutdown_is_dropped() {
    let pool = ThreadPool::new(2, 4).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..4 {
        let counter = Arc::clone(&counter);
        pool.spawn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }
    pool.shutdown();
    assert_eq!(counter.load(Ordering::SeqCst), 4);

    let late = Arc::clone(&counter);
    pool.spawn(move || {
        late.fetch_add(1, Ordering::SeqCst);
    });
    thread::sleep(Duration::from_millis(100));
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn worker_survives_panicking_job() {
    let pool = ThreadPool::new(1, 4).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    pool.spawn(|| panic!("job failure"));
    let after = Arc::clone(&counter);
    pool.spawn(move || {
        after.fetch_add(1, Ordering::SeqCst);
    });
    pool.shutdown();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_submitters_all_execute() {
    let pool = ThreadPool::new(4, 2).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    crossbeam_utils::thread::scope(|s| {
        for _ in 0..8 {
            let pool = &pool;
            let counter = Arc::clone(&counter);
            s.spawn(move |_| {
                for _ in 0..25 {
                    let counter = Arc::clone(&counter);
                    pool.spawn(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    });
                }
            });
        }
    })
    .unwrap();

    pool.shutdown();
    assert_eq!(counter.load(Ordering::SeqCst), 200);
}

#[test]
fn drop_runs_outstanding_jobs() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let pool = ThreadPool::new(2, 16).unwrap();
        for _ in 0..16 {
            let counter = Arc::clone(&counter);
            pool.spawn(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
    }
    assert_eq!(counter.load(Ordering::SeqCst), 16);
}
