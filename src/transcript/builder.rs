//! Transcript assembly.

use axum::http::{header, HeaderMap};
use bytes::Bytes;

use crate::config::RenderConfig;
use crate::http::capture::CaptureError;
use crate::http::request::RequestSnapshot;
use crate::http::response::ResponseSnapshot;
use crate::transcript::render::{render, render_raw, ContentKind};

/// Direction marker prefixed to every line when a transcript is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Echo mode: lines are written as-is.
    None,
    /// Request forwarded upstream.
    Outbound,
    /// Response relayed back to the caller.
    Inbound,
}

impl Marker {
    fn prefix(self) -> &'static str {
        match self {
            Marker::None => "",
            Marker::Outbound => "> ",
            Marker::Inbound => "< ",
        }
    }
}

/// Ordered, human-readable lines describing one request or response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A transcript made of a single line, used for relay failures.
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// One text block for a single sink write; every line ends with `\n`.
    pub fn to_block(&self, marker: Marker) -> String {
        let mut block = String::new();
        for line in &self.lines {
            block.push_str(marker.prefix());
            block.push_str(line);
            block.push('\n');
        }
        block
    }
}

/// Lines for an inbound request.
pub fn request_transcript(snapshot: &RequestSnapshot, config: &RenderConfig) -> Transcript {
    let mut lines = vec![
        format!("{} {} {:?}", snapshot.method, snapshot.uri, snapshot.version),
        format!("RemoteAddr: {}", snapshot.remote_addr),
        format!("Host: {}", snapshot.host),
    ];
    header_lines(&snapshot.headers, &mut lines);

    if let Some(length) = snapshot.declared_length.filter(|&n| n > 0) {
        lines.push(String::new());
        let kind = ContentKind::from_content_type(snapshot.content_type());
        lines.extend(body_lines(&snapshot.body, |body| {
            render(kind, body, length, config)
        }));
    }

    Transcript { lines }
}

/// Lines for an upstream response. Response bodies always use the raw policy.
pub fn response_transcript(snapshot: &ResponseSnapshot, config: &RenderConfig) -> Transcript {
    let mut lines = vec![snapshot.status_line()];
    header_lines(&snapshot.headers, &mut lines);

    let declared = snapshot.declared_length.filter(|_| snapshot.carries_body);
    if let Some(length) = declared.filter(|&n| n > 0) {
        lines.push(String::new());
        lines.extend(body_lines(&snapshot.body, |body| {
            render_raw(body, length, config.max_printable_size)
        }));
    }

    Transcript { lines }
}

/// `name: value` for every value; `host` already has its own line.
fn header_lines(headers: &HeaderMap, lines: &mut Vec<String>) {
    for (name, value) in headers.iter() {
        if *name == header::HOST {
            continue;
        }
        lines.push(format!(
            "{}: {}",
            name.as_str().to_ascii_lowercase(),
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
}

fn body_lines(
    body: &Result<Bytes, CaptureError>,
    render_body: impl FnOnce(&[u8]) -> Vec<String>,
) -> Vec<String> {
    match body {
        Ok(bytes) => render_body(bytes),
        Err(e) => vec![e.to_string()],
    }
}
