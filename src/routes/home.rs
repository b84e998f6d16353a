use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::diagnosis::DiagnosisView;
use crate::extractors::PageLanguage;
use crate::i18n::{Language, Translations};
use crate::routes::upload::{upload_view, Toast, UploadView};
use crate::session::VisitorState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub selected: bool,
}

/// Navbar and page frame shared by every full page.
pub struct Chrome {
    pub t: &'static Translations,
    pub lang: &'static str,
    pub path: &'static str,
    pub nav: Vec<NavLink>,
    pub languages: Vec<LanguageOption>,
}

impl Chrome {
    pub fn new(language: Language, path: &'static str) -> Self {
        let t = language.translations();
        let nav = [
            ("/", t.nav.home),
            ("/explore", t.nav.explore),
            ("/community", t.nav.community),
            ("/about", t.nav.about),
            ("/help", t.nav.help),
        ]
        .into_iter()
        .map(|(href, label)| NavLink {
            href,
            label,
            active: href == path,
        })
        .collect();
        let languages = Language::ALL
            .into_iter()
            .map(|l| LanguageOption {
                code: l.code(),
                name: l.name(),
                native_name: l.native_name(),
                selected: l == language,
            })
            .collect();

        Self {
            t,
            lang: language.code(),
            path,
            nav,
            languages,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
    pub overlay: bool,
    pub widget: UploadView,
    pub toast: Option<Toast>,
    pub clear_result: bool,
    pub result: Option<DiagnosisView>,
}

pub async fn index(page: PageLanguage, visitor: VisitorState) -> Html<HomeTemplate> {
    let language = page.language();
    let t = language.translations();

    let (widget, result) = {
        let widget = visitor.upload.lock().await;
        (
            upload_view(&widget),
            widget.result().map(|r| DiagnosisView::new(r, t)),
        )
    };

    Html(HomeTemplate {
        chrome: Chrome::new(language, "/"),
        t,
        overlay: page.shows_overlay(),
        widget,
        toast: None,
        clear_result: false,
        result,
    })
}
