use std::net::{TcpListener, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::Arc;

use log::error;

use crate::handler;
use crate::thread_pool::ThreadPool;
use crate::Result;

/// A static-file web server backed by a bounded thread pool.
///
/// Connections are accepted on the calling thread and handed to the
/// pool for handling. When the pool's queue is full, accepting pauses
/// until a worker frees a slot, which throttles bursts of clients.
pub struct WebServer {
    root: Arc<PathBuf>,
    pool: ThreadPool,
}

impl WebServer {
    /// Creates a server that serves files beneath `root`, handling
    /// connections on `pool`.
    pub fn new(root: impl Into<PathBuf>, pool: ThreadPool) -> WebServer {
        WebServer {
            root: Arc::new(root.into()),
            pool,
        }
    }

    /// Runs the server, listening for connections on the given address.
    ///
    /// Accepts up to `max_requests` connections when a limit is given,
    /// unlimited otherwise. Once the limit is reached the pool is shut
    /// down gracefully: every accepted connection still queued is
    /// handled before the workers stop and `run` returns.
    pub fn run(&self, addr: impl ToSocketAddrs, max_requests: Option<usize>) -> Result<()> {
        let listener = TcpListener::bind(addr)?;

        match max_requests {
            Some(limit) => {
                for _ in 0..limit {
                    self.accept_one(&listener);
                }
            }
            None => loop {
                self.accept_one(&listener);
            },
        }

        self.pool.shutdown();
        Ok(())
    }

    /// Accepts a single connection and dispatches it to the pool.
    fn accept_one(&self, listener: &TcpListener) {
        match listener.accept() {
            Ok((stream, _)) => {
                let root = Arc::clone(&self.root);
                self.pool.spawn(move || {
                    if let Err(e) = handler::handle_connection(&root, stream) {
                        error!("Error handling connection: {}", e);
                    }
                });
            }
            Err(e) => error!("Connection failed: {}", e),
        }
    }
}
