use std::path::Path;

/// Returns the MIME type for a file based on its extension, or `None`
/// for extensions the server does not know. Responses for unknown
/// types are sent without a `Content-Type` header.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let mime = match ext {
        "html" | "htm" => "text/html",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "png" => "image/png",
        "css" => "text/css",
        "au" => "audio/basic",
        "wav" => "audio/wav",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "mp3" => "audio/mpeg",
        _ => return None,
    };
    Some(mime)
}
