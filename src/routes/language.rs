use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extractors::CookiePreferences;
use crate::i18n::Language;
use crate::preference;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LanguageForm {
    pub language: String,
    #[serde(default)]
    pub next: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/language", post(choose))
}

async fn choose(
    mut prefs: CookiePreferences,
    Form(form): Form<LanguageForm>,
) -> AppResult<Response> {
    let language: Language = form
        .language
        .parse()
        .map_err(|e: crate::i18n::UnknownLanguage| AppError::BadRequest(e.to_string()))?;

    preference::choose(&mut prefs, language);
    tracing::debug!(%language, "Language selected");

    let next = local_path(form.next.as_deref());
    Ok((AppendHeaders(prefs.into_set_cookies()), Redirect::to(next)).into_response())
}

/// Only same-site paths are followed after choosing a language.
fn local_path(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}
