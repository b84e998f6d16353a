use askama::Template;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::home::{Chrome, Html};
use crate::screens::explore::{self, ChatOutcome, Disease, DISEASES};
use crate::state::AppState;

pub struct DiseaseView {
    pub name: &'static str,
    pub crop: &'static str,
    pub symptoms: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
    pub severity_label: &'static str,
    pub emphasis: &'static str,
}

impl DiseaseView {
    fn new(disease: &Disease, t: &Translations) -> Self {
        Self {
            name: disease.name,
            crop: disease.crop,
            symptoms: disease.symptoms,
            treatment: disease.treatment,
            prevention: disease.prevention,
            severity_label: disease.severity.label(t),
            emphasis: disease.severity.emphasis(),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/explore.html")]
pub struct ExploreTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
    pub query: String,
    pub diseases: Vec<DiseaseView>,
}

/// `reply` is `None` for a blank question, which clears the answer box.
#[derive(Template)]
#[template(path = "components/chat_reply.html")]
pub struct ChatReplyTemplate {
    pub t: &'static Translations,
    pub reply: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub question: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/explore", get(explore_page))
        .route("/explore/chat", post(chat))
}

async fn explore_page(
    page: PageLanguage,
    Query(params): Query<SearchParams>,
) -> Html<ExploreTemplate> {
    let language = page.language();
    let t = language.translations();
    let diseases = explore::search(DISEASES, &params.q)
        .into_iter()
        .map(|d| DiseaseView::new(d, t))
        .collect();

    Html(ExploreTemplate {
        chrome: Chrome::new(language, "/explore"),
        t,
        query: params.q,
        diseases,
    })
}

async fn chat(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<ChatForm>,
) -> Html<ChatReplyTemplate> {
    let t = page.language().translations();
    let reply = match explore::ask(&state.api, &form.question).await {
        ChatOutcome::Empty => None,
        ChatOutcome::Reply(text) => Some(text),
        ChatOutcome::Unavailable => Some(t.explore.chat_fallback.to_string()),
    };
    Html(ChatReplyTemplate { t, reply })
}
