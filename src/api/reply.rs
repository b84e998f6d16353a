use serde_json::Value;

/// Read-only view over a raw backend reply.
///
/// The backend signals failures by including a `detail` field, sometimes with
/// a 2xx status and sometimes not, so every caller asks the body instead of
/// the status line.
#[derive(Debug, Clone, Copy)]
pub struct Reply<'a>(&'a Value);

impl<'a> Reply<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    /// The error detail, if the backend reported one.
    ///
    /// Validation failures arrive as a list of objects rather than a string;
    /// those are flattened to their `msg` fields.
    pub fn detail(&self) -> Option<String> {
        match self.0.get("detail")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if messages.is_empty() {
                    Some(Value::Array(items.clone()).to_string())
                } else {
                    Some(messages.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.detail().is_some()
    }

    pub fn message(&self) -> Option<&'a str> {
        self.text("message")
    }

    /// The identity the backend assigned, as an opaque string.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text(&self, field: &str) -> Option<&'a str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}
