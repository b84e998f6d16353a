use askama::Template;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::api::{Faq, QuickHelpOption};
use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::alert::{Alert, AlertTemplate};
use crate::routes::home::{Chrome, Html};
use crate::screens::help::{self, ContactForm, ContactOutcome, Section};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/help.html")]
pub struct HelpTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
    pub quick_help: Section<QuickHelpOption>,
    pub faqs: Section<Faq>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/help", get(help_page))
        .route("/help/contact", post(contact))
}

async fn help_page(State(state): State<AppState>, page: PageLanguage) -> Html<HelpTemplate> {
    let language = page.language();
    let screen = help::mount(&state.api).await;

    Html(HelpTemplate {
        chrome: Chrome::new(language, "/help"),
        t: language.translations(),
        quick_help: screen.quick_help,
        faqs: screen.faqs,
    })
}

async fn contact(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<ContactForm>,
) -> Html<AlertTemplate> {
    let t = page.language().translations();
    let alert = match help::submit_contact(&state.api, &form).await {
        ContactOutcome::Sent => Alert::success(t.help.contact_sent),
        ContactOutcome::Incomplete => Alert::error(t.help.contact_incomplete),
        ContactOutcome::Rejected(detail) => Alert::error(detail),
        ContactOutcome::Failed => Alert::error(t.help.contact_failed),
    };
    Html(AlertTemplate::new(alert))
}
