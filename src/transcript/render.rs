//! Body rendering.
//!
//! Turns a captured body into display lines according to its content type and
//! the configured size bound. Rendering never touches the bytes that are
//! relayed; it only reads the captured buffer.

use crate::config::RenderConfig;
use crate::transcript::form;

/// Placeholder for a JSON body that turned out to be empty.
pub const EMPTY_BODY: &str = "[empty body]";

/// Marker line following a truncated raw body.
pub const TRUNCATED: &str = "[request body truncated...]";

/// Rendering strategy, chosen by exact `Content-Type` match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Form,
    Raw,
}

impl ContentKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some("application/json") => ContentKind::Json,
            Some("application/x-www-form-urlencoded") => ContentKind::Form,
            _ => ContentKind::Raw,
        }
    }
}

/// Render `body` as display lines.
pub fn render(kind: ContentKind, body: &[u8], declared_length: u64, config: &RenderConfig) -> Vec<String> {
    match kind {
        ContentKind::Json => render_json(body),
        ContentKind::Form => render_form(body, config.pretty),
        ContentKind::Raw => render_raw(body, declared_length, config.max_printable_size),
    }
}

fn render_json(body: &[u8]) -> Vec<String> {
    if body.is_empty() {
        vec![EMPTY_BODY.to_string()]
    } else {
        vec![String::from_utf8_lossy(body).into_owned()]
    }
}

fn render_form(body: &[u8], pretty: bool) -> Vec<String> {
    let text = String::from_utf8_lossy(body);
    match form::parse(&text) {
        Err(e) => vec![e.to_string()],
        Ok(pairs) if pretty => form::pretty_lines(&pairs),
        Ok(pairs) => vec![form::encode(&pairs)],
    }
}

/// Raw text, bounded by `max` bytes when the declared length reaches it.
pub fn render_raw(body: &[u8], declared_length: u64, max: usize) -> Vec<String> {
    if max == 0 || declared_length < max as u64 {
        return vec![String::from_utf8_lossy(body).into_owned()];
    }

    match body.get(..max) {
        Some(head) => vec![
            String::from_utf8_lossy(head).into_owned(),
            TRUNCATED.to_string(),
        ],
        None => vec!["unexpected EOF".to_string()],
    }
}
