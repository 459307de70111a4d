use std::io::{self, Write};
use std::time::SystemTime;

/// Token sent in the `Server` header of every response.
pub const SERVER_NAME: &str = "webserver/1.0";

/// HTTP status codes the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 302 Found, sent for directory paths missing a trailing slash.
    Found,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Supported, sent for methods other than GET.
    NotImplemented,
}

impl Status {
    /// The numeric status code.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Found => 302,
            Status::BadRequest => 400,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
            Status::NotImplemented => 501,
        }
    }

    /// The reason string sent on the status line.
    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Found => "Found",
            Status::BadRequest => "Bad Request",
            Status::Forbidden => "Forbidden",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
            Status::NotImplemented => "Not Supported",
        }
    }

    /// The one-line explanation used in the canned HTML pages.
    fn phrase(self) -> &'static str {
        match self {
            Status::Ok => "",
            Status::Found => "Directories must end with a slash.",
            Status::BadRequest => "Bad Request.",
            Status::Forbidden => "Access denied.",
            Status::NotFound => "File not found.",
            Status::InternalServerError => "Some server side error.",
            Status::NotImplemented => "Method is not supported.",
        }
    }
}

/// An HTTP/1.0 response: status, a few optional headers, and a body.
///
/// Every response closes the connection; `Content-Length` is always
/// sent, `Content-Type` and `Last-Modified` only when known.
pub struct Response {
    /// Response status.
    pub status: Status,
    /// Value for the `Content-Type` header, if any.
    pub content_type: Option<&'static str>,
    /// Value for the `Location` header, sent on redirects.
    pub location: Option<String>,
    /// Modification time reported in the `Last-Modified` header.
    pub last_modified: Option<SystemTime>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates an empty response with the given status.
    pub fn new(status: Status) -> Response {
        Response {
            status,
            content_type: None,
            location: None,
            last_modified: None,
            body: Vec::new(),
        }
    }

    /// Creates the canned HTML page for a non-200 status.
    pub fn error_page(status: Status) -> Response {
        let code = status.code();
        let reason = status.reason();
        let body = format!(
            "<HTML><HEAD><TITLE>{code} {reason}</TITLE></HEAD>\n\
             <BODY><H4>{code} {reason}</H4>\n{phrase}\n</BODY></HTML>",
            phrase = status.phrase(),
        );

        let mut response = Response::new(status);
        response.content_type = Some("text/html");
        response.body = body.into_bytes();
        response
    }

    /// Writes the status line, headers, and body to `writer`.
    ///
    /// Headers go out in a fixed order: Server, Date, Location,
    /// Content-Type, Content-Length, Last-Modified, then
    /// `Connection: close`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(
            writer,
            "HTTP/1.0 {} {}\r\n",
            self.status.code(),
            self.status.reason()
        )?;
        write!(writer, "Server: {SERVER_NAME}\r\n")?;
        write!(
            writer,
            "Date: {}\r\n",
            httpdate::fmt_http_date(SystemTime::now())
        )?;
        if let Some(location) = &self.location {
            write!(writer, "Location: {location}\r\n")?;
        }
        if let Some(content_type) = self.content_type {
            write!(writer, "Content-Type: {content_type}\r\n")?;
        }
        write!(writer, "Content-Length: {}\r\n", self.body.len())?;
        if let Some(modified) = self.last_modified {
            write!(writer, "Last-Modified: {}\r\n", httpdate::fmt_http_date(modified))?;
        }
        write!(writer, "Connection: close\r\n\r\n")?;
        writer.write_all(&self.body)?;
        writer.flush()
    }
}
