use askama::Template;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::routes::home::Html;

/// Client event that pops a modal `alert()` with the message.
pub const ALERT_EVENT: &str = "cropcare:alert";

/// Inline notice swapped into a form's status slot.
pub struct Alert {
    pub kind: &'static str,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info",
            message: message.into(),
        }
    }

    /// The backend's reason when it gave one, the localized fallback
    /// otherwise.
    pub fn refusal(detail: Option<String>, fallback: &str) -> Self {
        Self::error(detail.unwrap_or_else(|| fallback.to_string()))
    }
}

#[derive(Template)]
#[template(path = "components/alert.html")]
pub struct AlertTemplate {
    pub alert: Option<Alert>,
}

impl AlertTemplate {
    pub fn new(alert: Alert) -> Self {
        Self { alert: Some(alert) }
    }

    pub fn empty() -> Self {
        Self { alert: None }
    }
}

/// Renders the alert inline and, for errors, also asks the page to show it
/// as a modal dialog through `HX-Trigger`.
pub fn blocking(alert: Alert) -> Response {
    let trigger = (alert.kind == "error")
        .then(|| trigger_header(&alert.message))
        .flatten();
    let mut response = Html(AlertTemplate::new(alert)).into_response();
    if let Some(value) = trigger {
        response.headers_mut().insert("hx-trigger", value);
    }
    response
}

/// Header values reach the browser as Latin-1, so everything outside ASCII
/// goes out as JSON `\u` escapes.
fn trigger_header(message: &str) -> Option<HeaderValue> {
    let body = json!({ (ALERT_EVENT): { "message": message } }).to_string();
    let mut ascii = String::with_capacity(body.len());
    for c in body.chars() {
        if c.is_ascii() {
            ascii.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                ascii.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    HeaderValue::from_str(&ascii).ok()
}
