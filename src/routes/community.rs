use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::api::{NewPost, Post, PostId, PostKind};
use crate::error::{AppError, AppResult};
use crate::extractors::PageLanguage;
use crate::i18n::Translations;
use crate::routes::alert::{Alert, AlertTemplate};
use crate::routes::home::{Chrome, Html};
use crate::screens::community::{self, CommentOutcome, LikeOutcome, PostOutcome};
use crate::session::VisitorState;
use crate::state::AppState;

// --- View structs ---

pub struct PostView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub initial: String,
    pub location: String,
    pub time_ago: String,
    pub content: String,
    pub kind: &'static str,
    pub kind_label: &'static str,
    pub likes: u32,
    pub comments: u32,
    pub tags: Vec<String>,
    pub draft: String,
    pub notice: Option<Alert>,
}

fn post_view(post: &Post, draft: &str, t: &'static Translations) -> PostView {
    let (kind, kind_label) = match post.kind {
        PostKind::Question => ("question", t.community.question),
        PostKind::Tip => ("tip", t.community.tip),
        PostKind::Solved => ("solved", t.community.solved),
        PostKind::Urgent => ("urgent", t.community.urgent),
    };
    PostView {
        id: post.id.to_string(),
        title: post.title.clone(),
        author: post.author.clone(),
        initial: post
            .author
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default(),
        location: post.location.clone(),
        time_ago: community::time_label(post),
        content: post.content.clone(),
        kind,
        kind_label,
        likes: post.likes,
        comments: post.comments,
        tags: post.tags.iter().cloned().collect(),
        draft: draft.to_string(),
        notice: None,
    }
}

// --- Templates ---

#[derive(Template)]
#[template(path = "pages/community.html")]
pub struct CommunityTemplate {
    pub chrome: Chrome,
    pub t: &'static Translations,
    pub posts: Vec<PostView>,
    pub unavailable: bool,
}

#[derive(Template)]
#[template(path = "components/post_card.html")]
pub struct PostCardTemplate {
    pub t: &'static Translations,
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "components/reaction_bar.html")]
pub struct ReactionBarTemplate {
    pub t: &'static Translations,
    pub post: PostView,
}

// --- Forms ---

#[derive(Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Deserialize)]
pub struct CreateCommentForm {
    #[serde(default)]
    pub content: String,
}

// --- Router ---

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/community", get(community_page))
        .route("/community/posts", post(create_post))
        .route("/community/posts/{id}/like", post(like_post))
        .route("/community/posts/{id}/comments", post(create_comment))
}

// --- Handlers ---

async fn community_page(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
) -> Html<CommunityTemplate> {
    let language = page.language();
    let t = language.translations();

    community::mount(&visitor.community, &state.api).await;

    let screen = visitor.community.lock().await;
    let posts = screen
        .posts()
        .iter()
        .map(|p| post_view(p, screen.draft(p.id), t))
        .collect();

    Html(CommunityTemplate {
        chrome: Chrome::new(language, "/community"),
        t,
        posts,
        unavailable: screen.is_unavailable(),
    })
}

async fn create_post(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
    Form(form): Form<CreatePostForm>,
) -> Response {
    let t = page.language().translations();
    let draft = NewPost {
        title: form.title,
        content: form.content,
        author: form.author,
    };

    let alert = match community::create_post(&visitor.community, &state.api, draft).await {
        PostOutcome::Created(post) => {
            return Html(PostCardTemplate {
                t,
                post: post_view(&post, "", t),
            })
            .into_response();
        }
        PostOutcome::Incomplete => Alert::error(t.community.post_incomplete),
        PostOutcome::Rejected(detail) => Alert::error(detail),
        PostOutcome::Failed => Alert::error(t.community.post_failed),
    };

    // The form targets the post list; failures go to the status slot instead
    // and leave the form filled in.
    (
        [("HX-Retarget", "#post-status"), ("HX-Reswap", "innerHTML")],
        Html(AlertTemplate::new(alert)),
    )
        .into_response()
}

/// Runs `action` against the visitor's screen, reloading the post list once
/// if the post isn't known yet (for example after the session expired).
async fn with_loaded_post<F, Fut, T>(
    state: &AppState,
    visitor: &VisitorState,
    id: PostId,
    action: F,
) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    if visitor.community.lock().await.post(id).is_none() {
        community::mount(&visitor.community, &state.api).await;
        if visitor.community.lock().await.post(id).is_none() {
            return Err(AppError::NotFound);
        }
    }
    Ok(action().await)
}

async fn reaction_bar(
    visitor: &VisitorState,
    id: PostId,
    t: &'static Translations,
    notice: Option<Alert>,
) -> AppResult<Html<ReactionBarTemplate>> {
    let screen = visitor.community.lock().await;
    let post = screen.post(id).ok_or(AppError::NotFound)?;
    let mut post = post_view(post, screen.draft(id), t);
    post.notice = notice;
    Ok(Html(ReactionBarTemplate { t, post }))
}

async fn like_post(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
    Path(id): Path<u64>,
) -> AppResult<Html<ReactionBarTemplate>> {
    let t = page.language().translations();
    let id = PostId(id);

    let outcome = with_loaded_post(&state, &visitor, id, || {
        community::like(&visitor.community, &state.api, id)
    })
    .await?;

    let notice = match outcome {
        LikeOutcome::Liked { .. } => None,
        LikeOutcome::RolledBack { .. } => Some(Alert::error(t.community.action_failed)),
        LikeOutcome::UnknownPost => return Err(AppError::NotFound),
    };
    reaction_bar(&visitor, id, t, notice).await
}

async fn create_comment(
    State(state): State<AppState>,
    page: PageLanguage,
    visitor: VisitorState,
    Path(id): Path<u64>,
    Form(form): Form<CreateCommentForm>,
) -> AppResult<Html<ReactionBarTemplate>> {
    let t = page.language().translations();
    let id = PostId(id);

    let outcome = with_loaded_post(&state, &visitor, id, || {
        community::comment(&visitor.community, &state.api, id, &form.content)
    })
    .await?;

    let notice = match outcome {
        CommentOutcome::Empty | CommentOutcome::Posted { .. } => None,
        CommentOutcome::Failed { detail } => {
            Some(Alert::refusal(detail, t.community.action_failed))
        }
    };
    reaction_bar(&visitor, id, t, notice).await
}
