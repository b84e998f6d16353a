use askama::Template;
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use crate::analysis::{self, AnalysisOutcome};
use crate::diagnosis::DiagnosisView;
use crate::error::AppResult;
use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::alert::{Alert, AlertTemplate};
use crate::routes::home::Html;
use crate::session::VisitorState;
use crate::state::AppState;
use crate::upload::{FileSource, ImageFile, UploadError, UploadState, UploadWarning, UploadWidget};

// --- View structs ---

pub struct UploadView {
    pub state: &'static str,
    pub preview_url: Option<String>,
    pub file_name: String,
    pub analyzing: bool,
    pub can_analyze: bool,
}

pub fn upload_view(widget: &UploadWidget) -> UploadView {
    let state = widget.state();
    UploadView {
        state: match state {
            UploadState::Empty => "empty",
            UploadState::Previewing => "previewing",
            UploadState::Analyzing => "analyzing",
            UploadState::Ready => "ready",
        },
        preview_url: widget.preview_url().map(str::to_string),
        file_name: widget.file().map(|f| f.name.clone()).unwrap_or_default(),
        analyzing: state == UploadState::Analyzing,
        can_analyze: matches!(state, UploadState::Previewing | UploadState::Ready),
    }
}

/// Transient notice rendered in the toast slot.
pub struct Toast {
    pub title: &'static str,
    pub body: &'static str,
}

impl Toast {
    pub fn for_warning(warning: UploadWarning, t: &'static Translations) -> Self {
        match warning {
            UploadWarning::TooLarge => Toast {
                title: t.upload.too_large_title,
                body: t.upload.too_large_body,
            },
            UploadWarning::NotAnImage => Toast {
                title: t.upload.not_image_title,
                body: t.upload.not_image_body,
            },
        }
    }
}

// --- Templates ---

#[derive(Template)]
#[template(path = "components/upload_widget.html")]
pub struct UploadWidgetTemplate {
    pub t: &'static Translations,
    pub widget: UploadView,
    pub toast: Option<Toast>,
    pub clear_result: bool,
}

#[derive(Template)]
#[template(path = "components/diagnosis.html")]
pub struct DiagnosisTemplate {
    pub t: &'static Translations,
    pub result: DiagnosisView,
}

// --- Router ---

pub fn router(max_bytes: u64) -> Router<AppState> {
    // Reading stops as soon as a file passes the limit, so the body cap only
    // needs headroom for the form's other fields.
    let body_limit = usize::try_from(max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(1024 * 1024);

    Router::new()
        .route(
            "/upload",
            post(select_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/upload/analyze", post(analyze))
        .route("/upload/remove", post(remove))
}

// --- Handlers ---

enum Incoming {
    File(ImageFile),
    TooLarge,
}

/// Reads a file field chunk by chunk, giving up once it passes `max_bytes`.
async fn read_file(field: &mut Field<'_>, max_bytes: u64) -> AppResult<Option<Incoming>> {
    let name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if (bytes.len() + chunk.len()) as u64 > max_bytes {
            return Ok(Some(Incoming::TooLarge));
        }
        bytes.extend_from_slice(&chunk);
    }

    // An empty file input still submits a nameless, empty part.
    if name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Incoming::File(ImageFile {
        name,
        content_type,
        bytes,
    })))
}

async fn select_file(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
    mut multipart: Multipart,
) -> AppResult<Html<UploadWidgetTemplate>> {
    let t = page.language().translations();
    let max_bytes = state.config.upload.max_bytes;

    let mut source = FileSource::default();
    let mut incoming = None;
    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("source") => {
                source = field.text().await?.parse().unwrap_or_default();
            }
            Some("file") => {
                incoming = read_file(&mut field, max_bytes).await?;
                if incoming.is_some() {
                    break;
                }
            }
            _ => {}
        }
    }

    let mut widget = visitor.upload.lock().await;
    let warning = match incoming {
        Some(Incoming::File(file)) => widget.select_file(source, file).err(),
        Some(Incoming::TooLarge) => Some(UploadWarning::TooLarge),
        None => None,
    };
    if let Some(warning) = warning {
        tracing::info!(?source, "Upload rejected: {}", warning);
    }

    Ok(Html(UploadWidgetTemplate {
        t,
        widget: upload_view(&widget),
        toast: warning.map(|w| Toast::for_warning(w, t)),
        clear_result: warning.is_none(),
    }))
}

async fn analyze(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
) -> Response {
    let t = page.language().translations();
    match analysis::run(&visitor.upload, state.analyzer.as_ref()).await {
        AnalysisOutcome::Ready(result) => Html(DiagnosisTemplate {
            t,
            result: DiagnosisView::new(&result, t),
        })
        .into_response(),
        AnalysisOutcome::Refused(UploadError::AlreadyAnalyzing) => {
            Html(AlertTemplate::new(Alert::info(t.upload.already_analyzing))).into_response()
        }
        AnalysisOutcome::Refused(UploadError::NothingSelected) => {
            Html(AlertTemplate::new(Alert::error(t.upload.nothing_selected))).into_response()
        }
        AnalysisOutcome::Failed(_) => {
            Html(AlertTemplate::new(Alert::error(t.upload.analysis_failed))).into_response()
        }
        AnalysisOutcome::Superseded => Html(AlertTemplate::empty()).into_response(),
    }
}

async fn remove(page: PageLanguage, visitor: VisitorState) -> Html<UploadWidgetTemplate> {
    let t = page.language().translations();
    let mut widget = visitor.upload.lock().await;
    widget.remove();

    Html(UploadWidgetTemplate {
        t,
        widget: upload_view(&widget),
        toast: None,
        clear_result: true,
    })
}
