#![deny(missing_docs)]

//! A multithreaded HTTP/1.0 static-file server.
//!
//! Connections are accepted on the main thread and handed to a fixed
//! pool of worker threads through a bounded queue, so a burst of
//! clients throttles the acceptor instead of growing the backlog
//! without bound. Shutdown drains the queue before any worker exits.

mod error;
mod handler;
mod server;
/// HTTP/1.0 request parsing and response formatting.
pub mod http;
/// Thread pool with a bounded job queue for connection handling.
pub mod thread_pool;

pub use error::{Result, ServerError};
pub use server::WebServer;
pub use thread_pool::ThreadPool;
