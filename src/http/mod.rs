//! HTTP/1.0 protocol types: request-line parsing, response
//! formatting, and the MIME table.

mod mime;
mod request;
mod response;

pub use self::mime::mime_type;
pub use self::request::Request;
pub use self::response::{Response, Status, SERVER_NAME};
