use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::i18n::Language;
use crate::preference::{self, LanguageGate, PreferenceStore};
use crate::session::{self, VisitorState, VISITOR_COOKIE};
use crate::state::AppState;

/// Ten years; the language preference never expires on its own.
const PREFERENCE_MAX_AGE: u64 = 10 * 365 * 24 * 60 * 60;

/// Opaque per-browser id, set by [`ensure_visitor`].
#[derive(Debug, Clone)]
pub struct Visitor(pub String);

/// Middleware that makes sure every request carries a visitor id. A browser
/// without a valid cookie gets a fresh id, and the cookie is set on the way
/// out.
pub async fn ensure_visitor(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let existing = cookie_value(req.headers(), VISITOR_COOKIE)
        .filter(|id| uuid::Uuid::parse_str(id).is_ok())
        .map(str::to_string);
    let fresh = existing.is_none();
    let id = existing.unwrap_or_else(session::new_visitor_id);

    req.extensions_mut().insert(Visitor(id.clone()));
    let mut response = next.run(req).await;

    if fresh {
        let cookie = session::visitor_cookie(&id, state.config.session_idle());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid visitor cookie: {}", e),
        }
    }
    response
}

/// The calling visitor's in-memory state.
impl FromRequestParts<AppState> for VisitorState {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Visitor(id) = parts
            .extensions
            .get::<Visitor>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Missing visitor extension".into()))?;

        Ok(state.sessions.lock().await.visitor(&id))
    }
}

/// Preferences stored in the browser's cookie jar. Writes are collected and
/// turned into `Set-Cookie` headers by the handler.
#[derive(Debug, Default)]
pub struct CookiePreferences {
    jar: HashMap<String, String>,
    pending: Vec<String>,
}

impl CookiePreferences {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: cookies(headers)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            pending: Vec::new(),
        }
    }

    pub fn into_set_cookies(self) -> Vec<(header::HeaderName, String)> {
        self.pending
            .into_iter()
            .map(|cookie| (header::SET_COOKIE, cookie))
            .collect()
    }
}

impl PreferenceStore for CookiePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.pending.push(format!(
            "{}={}; SameSite=Lax; Path=/; Max-Age={}",
            key, value, PREFERENCE_MAX_AGE
        ));
        self.jar.insert(key.to_string(), value);
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CookiePreferences {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Language for this request, plus whether the first-visit overlay is due.
#[derive(Debug, Clone, Copy)]
pub struct PageLanguage(pub LanguageGate);

impl PageLanguage {
    pub fn language(self) -> Language {
        self.0.language()
    }

    pub fn shows_overlay(self) -> bool {
        self.0.shows_overlay()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for PageLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let prefs = CookiePreferences::from_headers(&parts.headers);
        Ok(PageLanguage(preference::gate(&prefs)))
    }
}

fn cookies(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|cookie| {
            let mut split = cookie.trim().splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            Some((key, val))
        })
}

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    cookies(headers).find_map(|(key, val)| (key == name).then_some(val))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::LANGUAGE_KEY;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_cookie_among_others() {
        let headers = headers("theme=dark; selectedLanguage=hi; cropcare_visitor=abc");
        assert_eq!(cookie_value(&headers, "selectedLanguage"), Some("hi"));
        assert_eq!(cookie_value(&headers, VISITOR_COOKIE), Some("abc"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn no_cookie_means_overlay() {
        let prefs = CookiePreferences::from_headers(&HeaderMap::new());
        assert_eq!(preference::gate(&prefs), LanguageGate::Overlay);
    }

    #[test]
    fn stored_cookie_selects_language() {
        let prefs = CookiePreferences::from_headers(&headers("selectedLanguage=hi"));
        assert_eq!(preference::gate(&prefs), LanguageGate::Ready(Language::Hi));
    }

    #[test]
    fn choosing_emits_set_cookie() {
        let mut prefs = CookiePreferences::default();
        preference::choose(&mut prefs, Language::Hi);

        assert_eq!(prefs.get(LANGUAGE_KEY).as_deref(), Some("hi"));
        let set = prefs.into_set_cookies();
        assert_eq!(set.len(), 1);
        assert!(set[0].1.starts_with("selectedLanguage=hi;"));
        assert!(set[0].1.contains("Path=/"));
    }
}
