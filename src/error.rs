use std::io;
use thiserror::Error;

use crate::thread_pool::{MAX_QUEUE_SIZE, MAX_THREADS};

/// Error type for webserver operations.
#[derive(Error, Debug)]
pub enum ServerError {
    /// IO error from socket or file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Thread pool created with an invalid worker count.
    #[error("invalid thread count {0}, expected 1 to {max}", max = MAX_THREADS)]
    InvalidThreadCount(u32),

    /// Thread pool created with an invalid queue capacity.
    #[error("invalid queue size {0}, expected 1 to {max}", max = MAX_QUEUE_SIZE)]
    InvalidQueueSize(usize),
}

/// Result type alias for webserver operations.
pub type Result<T> = std::result::Result<T, ServerError>;
