//! HTTP response handlers.

use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime::types::{HTML, PLAIN};

/// Poll the build version and reload when a rebuild lands.
const RELOAD_SCRIPT: &str = r#"<script>
(function(){
    var seen = null;
    var poll = function() {
        fetch('__URL__', { cache: 'no-store' })
            .then(function(r) { return r.ok ? r.text() : null; })
            .then(function(v) {
                if (v === null) return;
                if (seen !== null && v !== seen) location.reload();
                seen = v;
            })
            .catch(function() {});
    };
    poll();
    setInterval(poll, 1000);
})();
</script>"#;

/// Respond with a static file, injecting the reload poller into HTML when
/// `reload_url` is set.
pub fn respond_file(request: Request, path: &Path, reload_url: Option<&str>) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    // Check for Range header (video/audio seeking)
    if let Some(range) = get_range_header(&request) {
        return respond_range(request, path, content_type, &range);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let body = match reload_url {
        Some(url) if content_type == HTML => inject_reload(body, url),
        _ => body,
    };

    send_body(request, 200, content_type, body)
}

/// Insert the reload poller before `</body>`, or append it.
pub fn inject_reload(body: Vec<u8>, reload_url: &str) -> Vec<u8> {
    let script = RELOAD_SCRIPT.replace("__URL__", reload_url);
    let mut html = match String::from_utf8(body) {
        Ok(html) => html,
        Err(e) => return e.into_bytes(),
    };
    match html.rfind("</body>") {
        Some(pos) => html.insert_str(pos, &script),
        None => html.push_str(&script),
    }
    html.into_bytes()
}

/// Handle Range request for media files (video/audio seeking).
fn respond_range(
    request: Request,
    path: &Path,
    content_type: &'static str,
    range: &str,
) -> Result<()> {
    use std::io::{Read, Seek, SeekFrom};

    let file_size = fs::metadata(path)?.len();
    if file_size == 0 {
        return send_body(request, 200, content_type, Vec::new());
    }

    // Parse "bytes=start-end" format
    let range = range.strip_prefix("bytes=").unwrap_or(range);
    let Some((start, end)) = parse_range(range, file_size) else {
        return send_body(request, 416, PLAIN, b"416 Range Not Satisfiable".to_vec());
    };
    let length = end - start + 1;

    // Stream the requested range
    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let reader = file.take(length);

    let content_range = format!("bytes {start}-{end}/{file_size}");
    let response = Response::new(
        StatusCode(206),
        vec![
            make_header("Content-Type", content_type)?,
            make_header("Content-Range", &content_range)?,
            make_header("Accept-Ranges", "bytes")?,
        ],
        reader,
        Some(length as usize),
        None,
    );

    request.respond(response)?;
    Ok(())
}

/// Parse Range header value "start-end" into inclusive byte bounds.
///
/// `file_size` must be non-zero. Returns `None` for a start past the end.
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let last = file_size - 1;
    let (start, end) = match range.trim().split_once('-') {
        // "0-499" - specific range
        Some((s, e)) if !s.is_empty() && !e.is_empty() => {
            let start: u64 = s.trim().parse().unwrap_or(0);
            let end: u64 = e.trim().parse().unwrap_or(last);
            (start, end.min(last))
        }
        // "0-" - from start to end
        Some((s, "")) if !s.is_empty() => (s.trim().parse().unwrap_or(0), last),
        // "-500" - last 500 bytes
        Some(("", e)) if !e.is_empty() => {
            let suffix: u64 = e.trim().parse().unwrap_or(0);
            (file_size.saturating_sub(suffix), last)
        }
        _ => (0, last),
    };
    (start <= end).then_some((start, end))
}

/// Extract Range header from request.
fn get_range_header(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case("range"))
        .map(|h| h.value.to_string())
}

/// Respond with the current build version (plain text).
pub fn respond_version(request: Request, version: u64) -> Result<()> {
    let response = Response::from_string(version.to_string())
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Cache-Control", "no-store")?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with the last build error (500), polling so the page recovers
/// once a rebuild succeeds.
pub fn respond_build_error(request: Request, error: &str, reload_url: Option<&str>) -> Result<()> {
    let msg = crate::utils::html::escape(error);
    let body = format!("<html><body><h1>Build Error</h1><pre>{msg}</pre></body></html>");
    let body = match reload_url {
        Some(url) => inject_reload(body.into_bytes(), url),
        None => body.into_bytes(),
    };
    send_body(request, 500, HTML, body)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
