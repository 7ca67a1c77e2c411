//! HTTP response handlers.

use crate::compose::ComposedDocument;
use crate::sandbox::export;
use crate::store::File;
use crate::utils::mime::{self, types::{HTML, PLAIN}};
use anyhow::{Result, anyhow};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with the playground shell.
pub fn respond_shell(request: Request, ws_port: u16) -> Result<()> {
    use crate::embed::serve::{SHELL_HTML, ShellVars};

    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }
    let body = SHELL_HTML.render(&ShellVars { ws_port });
    send_body(request, 200, HTML, body.into_bytes())
}

/// Respond with the last composed document as a standalone page.
///
/// The ETag is a fingerprint of the document, so reopening an unchanged
/// preview is a 304.
pub fn respond_preview(request: Request, doc: Option<&ComposedDocument>) -> Result<()> {
    let Some(doc) = doc else {
        return send_body(request, 404, PLAIN, b"nothing composed yet".to_vec());
    };

    let etag = format!("\"{}\"", crate::utils::hash::fingerprint(&doc.html));
    if header_value(&request, "If-None-Match").as_deref() == Some(etag.as_str()) {
        let response = Response::empty(StatusCode(304)).with_header(dynamic_header("ETag", &etag)?);
        request.respond(response)?;
        return Ok(());
    }

    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }

    let response = Response::from_data(doc.html.clone().into_bytes())
        .with_header(make_header("Content-Type", HTML))
        .with_header(make_header("Cache-Control", "no-cache"))
        .with_header(dynamic_header("ETag", &etag)?);
    request.respond(response)?;
    Ok(())
}

/// Respond with the copy payload as plain text.
pub fn respond_copy(request: Request, doc: Option<&ComposedDocument>) -> Result<()> {
    match doc {
        Some(doc) => send_body(request, 200, PLAIN, export::copy_payload(doc).into_bytes()),
        None => send_body(request, 404, PLAIN, b"nothing composed yet".to_vec()),
    }
}

/// Respond with a project file's literal content as an attachment.
pub fn respond_download(request: Request, file: Option<&File>) -> Result<()> {
    let Some(file) = file else {
        return respond_not_found(request);
    };

    let content_type = mime::for_kind(file.kind);
    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let response = Response::from_data(file.content.clone().into_bytes())
        .with_header(make_header("Content-Type", content_type))
        .with_header(dynamic_header(
            "Content-Disposition",
            &content_disposition(&file.name),
        )?);
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

/// `attachment` disposition with an ASCII fallback and the exact UTF-8 name.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.to_string())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
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
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

fn dynamic_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|_| anyhow!("invalid {key} header value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("styles.css"),
            "attachment; filename=\"styles.css\"; filename*=UTF-8''styles%2Ecss"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii_is_header_safe() {
        let value = content_disposition("café \"x\".md");
        assert!(value.is_ascii());
        assert!(value.contains("filename=\"caf_ _x_.md\""));
        assert!(dynamic_header("Content-Disposition", &value).is_ok());
    }

    #[test]
    fn test_make_header() {
        let header = make_header("Content-Type", HTML);
        assert_eq!(header.value.as_str(), HTML);
    }
}
