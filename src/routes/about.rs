use askama::Template;
use axum::routing::get;
use axum::Router;

use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::home::{Chrome, Html};
use crate::screens::about::{self, Achievement, TeamMember, ADDRESS_LINES, BUSINESS_EMAIL, BUSINESS_PHONE, TEAM};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
    pub team: &'static [TeamMember],
    pub achievements: [Achievement; 3],
    pub email: &'static str,
    pub phone: &'static str,
    pub address: [&'static str; 3],
}

pub fn router() -> Router<AppState> {
    Router::new().route("/about", get(about_page))
}

async fn about_page(page: PageLanguage) -> Html<AboutTemplate> {
    let language = page.language();
    let t = language.translations();
    Html(AboutTemplate {
        chrome: Chrome::new(language, "/about"),
        t,
        team: TEAM,
        achievements: about::achievements(t),
        email: BUSINESS_EMAIL,
        phone: BUSINESS_PHONE,
        address: ADDRESS_LINES,
    })
}
