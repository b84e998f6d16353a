use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::alert::{self, Alert};
use crate::routes::home::{Chrome, Html};
use crate::screens::login::{self, AuthOutcome, EmailSignupForm, OtpForm, PhoneForm, PhoneSignupForm};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login/otp/send", post(send_otp))
        .route("/login/otp/verify", post(verify_otp))
        .route("/login/signup/email", post(signup_email))
        .route("/login/signup/phone", post(signup_phone))
}

async fn login_page(page: PageLanguage) -> Html<LoginTemplate> {
    let language = page.language();
    Html(LoginTemplate {
        chrome: Chrome::new(language, "/login"),
        t: language.translations(),
    })
}

/// Localized texts for one flow's success and refusal.
struct FlowText {
    success: &'static str,
    refused: &'static str,
}

/// Failures also pop up as a modal alert; see [`alert::blocking`].
fn flow_alert(outcome: AuthOutcome, text: FlowText, t: &Translations) -> Alert {
    match outcome {
        AuthOutcome::MissingFields => Alert::error(t.login.fields_required),
        AuthOutcome::Accepted { .. } => Alert::success(text.success),
        AuthOutcome::Refused { detail } => Alert::refusal(detail, text.refused),
        AuthOutcome::Unreachable => Alert::error(t.login.request_error),
    }
}

async fn send_otp(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<PhoneForm>,
) -> Response {
    let t = page.language().translations();
    let notice = match login::send_otp(&state.api, &form).await {
        // The backend's own wording says where the code went.
        AuthOutcome::Accepted {
            message: Some(message),
            ..
        } => Alert::success(message),
        outcome => flow_alert(
            outcome,
            FlowText {
                success: t.login.send_otp,
                refused: t.login.otp_send_failed,
            },
            t,
        ),
    };
    alert::blocking(notice)
}

async fn verify_otp(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<OtpForm>,
) -> Response {
    let t = page.language().translations();
    let outcome = login::verify_otp(&state.api, &form).await;
    let text = FlowText {
        success: t.login.otp_verified,
        refused: t.login.otp_verify_failed,
    };
    alert::blocking(flow_alert(outcome, text, t))
}

async fn signup_email(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<EmailSignupForm>,
) -> Response {
    let t = page.language().translations();
    let outcome = login::signup_email(&state.api, &form).await;
    let text = FlowText {
        success: t.login.signup_succeeded,
        refused: t.login.signup_failed,
    };
    alert::blocking(flow_alert(outcome, text, t))
}

async fn signup_phone(
    State(state): State<AppState>,
    page: PageLanguage,
    Form(form): Form<PhoneSignupForm>,
) -> Response {
    let t = page.language().translations();
    let outcome = login::signup_phone(&state.api, &form).await;
    let text = FlowText {
        success: t.login.phone_signup_succeeded,
        refused: t.login.signup_failed,
    };
    alert::blocking(flow_alert(outcome, text, t))
}
