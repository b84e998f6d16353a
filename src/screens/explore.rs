//! Disease catalogue search and the assistant chat.

use crate::api::{ApiClient, ChatQuery, Reply};
use crate::diagnosis::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disease {
    pub name: &'static str,
    pub crop: &'static str,
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
    pub severity: Severity,
}

pub const DISEASES: &[Disease] = &[
    Disease {
        name: "Leaf Blight",
        crop: "Wheat",
        symptoms: "Brown spots on leaves, yellowing",
        treatment: "Fungicide spray, copper-based treatments",
        prevention: "Crop rotation, proper drainage",
        severity: Severity::High,
    },
    Disease {
        name: "Bacterial Spot",
        crop: "Tomato",
        symptoms: "Dark spots with yellow halos",
        treatment: "Bactericide application, remove infected parts",
        prevention: "Use disease-free seeds, avoid overhead watering",
        severity: Severity::Medium,
    },
    Disease {
        name: "Powdery Mildew",
        crop: "Grapes",
        symptoms: "White powdery coating on leaves",
        treatment: "Sulfur-based fungicide, neem oil",
        prevention: "Good air circulation, avoid overcrowding",
        severity: Severity::Medium,
    },
];

/// Case-insensitive substring match on name, crop or symptoms. A blank query
/// matches everything.
pub fn search<'a>(diseases: &'a [Disease], query: &str) -> Vec<&'a Disease> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return diseases.iter().collect();
    }
    diseases
        .iter()
        .filter(|d| {
            [d.name, d.crop, d.symptoms]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Blank question; nothing was sent.
    Empty,
    Reply(String),
    /// Render the fixed "assistant unavailable" text.
    Unavailable,
}

pub async fn ask(api: &ApiClient, question: &str) -> ChatOutcome {
    let query = question.trim();
    if query.is_empty() {
        return ChatOutcome::Empty;
    }

    let body = match api
        .chat(&ChatQuery {
            query: query.to_string(),
        })
        .await
    {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Chat request failed: {}", e);
            return ChatOutcome::Unavailable;
        }
    };

    match Reply::new(&body).text("reply") {
        Some(reply) => ChatOutcome::Reply(reply.to_string()),
        None => {
            tracing::warn!(detail = ?Reply::new(&body).detail(), "Chat reply missing");
            ChatOutcome::Unavailable
        }
    }
}
