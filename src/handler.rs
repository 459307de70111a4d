use std::fs;
use std::io::{BufRead, BufReader, BufWriter};
use std::net::TcpStream;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

use log::{debug, error};

use crate::http::{mime_type, Request, Response, Status, SERVER_NAME};
use crate::Result;

/// Reads one request from the stream and writes the response.
///
/// This is the unit of work handed to the thread pool, one call per
/// accepted connection. The connection is closed when the call
/// returns; every response carries `Connection: close`.
pub(crate) fn handle_connection(root: &Path, stream: TcpStream) -> Result<()> {
    let peer_addr = stream.peer_addr()?;
    debug!("Accepted connection from {}", peer_addr);

    let mut reader = BufReader::new(&stream);
    let mut line = String::new();
    let response = match reader.read_line(&mut line) {
        Err(_) | Ok(0) => Response::error_page(Status::BadRequest),
        Ok(_) => match Request::parse(line.trim_end()) {
            None => Response::error_page(Status::BadRequest),
            Some(request) if request.method != "GET" => {
                Response::error_page(Status::NotImplemented)
            }
            Some(request) => {
                debug!(
                    "Received request from {}: {} {}",
                    peer_addr, request.method, request.path
                );
                respond(root, &request.path)
            }
        },
    };

    let mut writer = BufWriter::new(&stream);
    Ok(response.write_to(&mut writer)?)
}

/// Produces the response for a GET request path.
fn respond(root: &Path, path: &str) -> Response {
    let relative = match sanitize(path) {
        Some(relative) => relative,
        None => return Response::error_page(Status::NotFound),
    };
    let full_path = root.join(relative);

    let metadata = match fs::metadata(&full_path) {
        Ok(metadata) => metadata,
        Err(_) => return Response::error_page(Status::NotFound),
    };

    if !has_permission(root, &full_path) {
        return Response::error_page(Status::Forbidden);
    }

    if metadata.is_dir() {
        if !path.ends_with('/') {
            let mut response = Response::error_page(Status::Found);
            response.location = Some(format!("{path}/"));
            return response;
        }
        serve_directory(root, &full_path, path)
    } else if metadata.is_file() {
        serve_file(&full_path)
    } else {
        Response::error_page(Status::Forbidden)
    }
}

/// Maps a request path to a path relative to the served root.
///
/// Returns `None` for paths that do not start with `/` or that try to
/// escape the root through `..` components.
fn sanitize(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.strip_prefix('/')?);
    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return None,
        }
    }
    Some(relative.to_owned())
}

/// Checks the world-permission bits on the target and on every
/// directory between the served root and the target: regular files
/// need the others-read bit, directories the others-execute bit.
/// Anything that is neither a regular file nor a directory is refused.
fn has_permission(root: &Path, full_path: &Path) -> bool {
    let metadata = match fs::metadata(full_path) {
        Ok(metadata) => metadata,
        Err(_) => return false,
    };

    let mode = metadata.permissions().mode();
    if metadata.is_file() {
        if mode & 0o004 == 0 {
            return false;
        }
    } else if metadata.is_dir() {
        if mode & 0o001 == 0 {
            return false;
        }
    } else {
        return false;
    }

    let mut current = full_path.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        let searchable = fs::metadata(dir)
            .map(|m| m.permissions().mode() & 0o001 != 0)
            .unwrap_or(false);
        if !searchable {
            return false;
        }
        current = dir.parent();
    }

    true
}

/// Serves a regular file, with its MIME type when the extension is
/// known and its modification time in `Last-Modified`.
fn serve_file(path: &Path) -> Response {
    let body = match fs::read(path) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Response::error_page(Status::InternalServerError);
        }
    };

    let mut response = Response::new(Status::Ok);
    response.content_type = mime_type(path);
    response.last_modified = fs::metadata(path).ok().and_then(|m| m.modified().ok());
    response.body = body;
    response
}

/// Serves a directory: its `index.html` when present, otherwise an
/// HTML listing of the entries sorted by name.
fn serve_directory(root: &Path, dir: &Path, request_path: &str) -> Response {
    let index = dir.join("index.html");
    if index.is_file() {
        if !has_permission(root, &index) {
            return Response::error_page(Status::Forbidden);
        }
        return serve_file(&index);
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to list {}: {}", dir.display(), e);
            return Response::error_page(Status::InternalServerError);
        }
    };

    let mut rows: Vec<(String, fs::Metadata)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            fs::metadata(entry.path()).ok().map(|metadata| (name, metadata))
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let mut body = format!(
        "<HTML>\n<HEAD><TITLE>Index of {request_path}</TITLE></HEAD>\r\n\
         <BODY>\n<H4>Index of {request_path}</H4>\n\
         <table CELLSPACING=8>\n\
         <tr><th>Name</th><th>Last Modified</th><th>Size</th></tr>\n\
         <tr>\n<td><A HREF=\"../\">..</A></td><td></td>\n<td></td>\n</tr>\n"
    );
    for (name, metadata) in rows {
        let modified = metadata
            .modified()
            .map(httpdate::fmt_http_date)
            .unwrap_or_default();
        let size = if metadata.is_dir() {
            String::new()
        } else {
            metadata.len().to_string()
        };
        body.push_str(&format!(
            "<tr>\n<td><A HREF=\"{name}\">{name}</A></td><td>{modified}</td>\n\
             <td>{size}</td>\n</tr>\n"
        ));
    }
    body.push_str(&format!(
        "</table>\n<HR>\n<ADDRESS>{SERVER_NAME}</ADDRESS>\n</BODY></HTML>\n"
    ));

    let mut response = Response::new(Status::Ok);
    response.content_type = Some("text/html");
    response.last_modified = fs::metadata(dir).ok().and_then(|m| m.modified().ok());
    response.body = body.into_bytes();
    response
}
