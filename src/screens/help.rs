//! Help page: quick-help shortcuts, FAQs and the support contact form.

use serde::Deserialize;
use serde_json::Value;

use crate::api::{decode_lenient, ApiClient, ApiResult, ContactMessage, Faq, QuickHelpOption, Reply};
use crate::tasks::ScreenTasks;

/// A section whose fetch failed renders empty with a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    pub items: Vec<T>,
    pub unavailable: bool,
}

impl<T: serde::de::DeserializeOwned> Section<T> {
    fn from_fetch(what: &str, fetched: Option<ApiResult<Value>>) -> Self {
        match fetched {
            Some(Ok(body)) => {
                let unavailable = Reply::new(&body).is_failure();
                Self {
                    items: decode_lenient(what, body),
                    unavailable,
                }
            }
            Some(Err(e)) => {
                tracing::warn!(what, "Help section fetch failed: {}", e);
                Self::unavailable()
            }
            None => Self::unavailable(),
        }
    }

    fn unavailable() -> Self {
        Self {
            items: Vec::new(),
            unavailable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpScreen {
    pub quick_help: Section<QuickHelpOption>,
    pub faqs: Section<Faq>,
}

/// Fetches both sections at once. Neither failure blocks the other.
pub async fn mount(api: &ApiClient) -> HelpScreen {
    let tasks = ScreenTasks::new();
    let quick_help = tasks.spawn("quick-help", {
        let api = api.clone();
        async move { api.quick_help().await }
    });
    let faqs = tasks.spawn("faqs", {
        let api = api.clone();
        async move { api.faqs().await }
    });

    let (quick_help, faqs) = tokio::join!(quick_help.outcome(), faqs.outcome());

    HelpScreen {
        quick_help: Section::from_fetch("quick help", quick_help),
        faqs: Section::from_fetch("faqs", faqs),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// All four fields present after trimming.
    pub fn to_message(&self) -> Option<ContactMessage> {
        let message = ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        let complete = [
            &message.name,
            &message.email,
            &message.subject,
            &message.message,
        ]
        .iter()
        .all(|field| !field.is_empty());
        complete.then_some(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Incomplete,
    Sent,
    Rejected(String),
    Failed,
}

pub async fn submit_contact(api: &ApiClient, form: &ContactForm) -> ContactOutcome {
    let Some(message) = form.to_message() else {
        return ContactOutcome::Incomplete;
    };

    match api.contact_support(&message).await {
        Ok(body) => match Reply::new(&body).detail() {
            Some(detail) => ContactOutcome::Rejected(detail),
            None => {
                tracing::info!(subject = %message.subject, "Support message sent");
                ContactOutcome::Sent
            }
        },
        Err(e) => {
            tracing::warn!("Support message failed: {}", e);
            ContactOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn contact_form_needs_every_field() {
        assert!(form("Asha", "asha@example.com", "Upload", "It fails").to_message().is_some());
        assert!(form("Asha", "asha@example.com", "Upload", "   ").to_message().is_none());
        assert!(form("", "asha@example.com", "Upload", "It fails").to_message().is_none());
    }

    #[test]
    fn contact_form_trims_fields() {
        let message = form(" Asha ", "asha@example.com", "Upload", " It fails\n")
            .to_message()
            .unwrap();
        assert_eq!(message.name, "Asha");
        assert_eq!(message.message, "It fails");
    }

    #[test]
    fn section_reads_list() {
        let section: Section<Faq> = Section::from_fetch(
            "faqs",
            Some(Ok(json!([{"question": "Is the app free to use?", "answer": "Yes"}]))),
        );
        assert_eq!(section.items.len(), 1);
        assert!(!section.unavailable);
    }

    #[test]
    fn section_with_detail_is_unavailable() {
        let section: Section<Faq> =
            Section::from_fetch("faqs", Some(Ok(json!({"detail": "Internal error"}))));
        assert!(section.items.is_empty());
        assert!(section.unavailable);
    }

    #[test]
    fn cancelled_section_is_unavailable() {
        let section: Section<QuickHelpOption> = Section::from_fetch("quick help", None);
        assert!(section.items.is_empty());
        assert!(section.unavailable);
    }
}
