/// A parsed HTTP request line.
#[derive(Debug)]
pub struct Request {
    /// The request method, e.g. `GET`.
    pub method: String,
    /// The requested path, as sent by the client.
    pub path: String,
    /// The protocol version, `HTTP/1.0` or `HTTP/1.1`.
    pub protocol: String,
}

impl Request {
    /// Parses a request line of the form `GET /path HTTP/1.0`.
    ///
    /// Returns `None` if any of the three fields is missing or the
    /// protocol version is unknown. Anything after the protocol field
    /// is ignored.
    pub fn parse(line: &str) -> Option<Request> {
        let mut parts = line.split_whitespace();
        let method = parts.next()?.to_owned();
        let path = parts.next()?.to_owned();
        let protocol = parts.next()?.to_owned();

        if protocol != "HTTP/1.0" && protocol != "HTTP/1.1" {
            return None;
        }

        Some(Request {
            method,
            path,
            protocol,
        })
    }
}
