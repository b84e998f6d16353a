//! Community forum: post list, likes, comments and new posts.
//!
//! Likes are optimistic: the count goes up before the backend answers and
//! comes back down if the call fails. New posts are pessimistic: they only
//! show up once the backend has returned them.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::{decode_lenient, ApiClient, ApiResult, NewComment, NewPost, Post, PostId, Reply};

#[async_trait]
pub trait CommunityBackend: Send + Sync {
    async fn list_posts(&self) -> ApiResult<Value>;
    async fn create_post(&self, post: &NewPost) -> ApiResult<Value>;
    async fn like_post(&self, id: PostId) -> ApiResult<Value>;
    async fn add_comment(&self, id: PostId, comment: &NewComment) -> ApiResult<Value>;
}

#[async_trait]
impl CommunityBackend for ApiClient {
    async fn list_posts(&self) -> ApiResult<Value> {
        ApiClient::list_posts(self).await
    }

    async fn create_post(&self, post: &NewPost) -> ApiResult<Value> {
        ApiClient::create_post(self, post).await
    }

    async fn like_post(&self, id: PostId) -> ApiResult<Value> {
        ApiClient::like_post(self, id).await
    }

    async fn add_comment(&self, id: PostId, comment: &NewComment) -> ApiResult<Value> {
        ApiClient::add_comment(self, id, comment).await
    }
}

#[derive(Debug, Default)]
pub struct CommunityScreen {
    posts: Vec<Post>,
    drafts: HashMap<PostId, String>,
    unavailable: bool,
}

impl CommunityScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    pub fn draft(&self, id: PostId) -> &str {
        self.drafts.get(&id).map(String::as_str).unwrap_or("")
    }

    fn replace_posts(&mut self, posts: Vec<Post>) {
        self.drafts.retain(|id, _| posts.iter().any(|p| p.id == *id));
        self.posts = posts;
        self.unavailable = false;
    }

    fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    /// Optimistic +1. Returns false for a post this screen doesn't know.
    pub fn like(&mut self, id: PostId) -> bool {
        match self.post_mut(id) {
            Some(post) => {
                post.likes = post.likes.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn unlike(&mut self, id: PostId) {
        if let Some(post) = self.post_mut(id) {
            post.likes = post.likes.saturating_sub(1);
        }
    }

    /// Records the draft and returns the request to send. Whitespace-only
    /// text changes nothing and yields no request.
    pub fn stage_comment(&mut self, id: PostId, text: &str) -> Option<NewComment> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }
        self.drafts.insert(id, text.to_string());
        Some(NewComment {
            content: content.to_string(),
        })
    }

    pub fn comment_posted(&mut self, id: PostId) {
        self.drafts.remove(&id);
        if let Some(post) = self.post_mut(id) {
            post.comments = post.comments.saturating_add(1);
        }
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
    }
}

/// Re-derives the post list from the backend.
pub async fn mount(screen: &Mutex<CommunityScreen>, backend: &dyn CommunityBackend) {
    let loaded = match backend.list_posts().await {
        Ok(body) => Some(decode_lenient::<Post>("community posts", body)),
        Err(e) => {
            tracing::warn!("Could not load community posts: {}", e);
            None
        }
    };

    let mut screen = screen.lock().await;
    match loaded {
        Some(posts) => screen.replace_posts(posts),
        None => screen.unavailable = true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikeOutcome {
    Liked { likes: u32 },
    RolledBack { likes: u32 },
    UnknownPost,
}

pub async fn like(
    screen: &Mutex<CommunityScreen>,
    backend: &dyn CommunityBackend,
    id: PostId,
) -> LikeOutcome {
    if !screen.lock().await.like(id) {
        return LikeOutcome::UnknownPost;
    }

    let confirmed = match backend.like_post(id).await {
        Ok(body) => match Reply::new(&body).detail() {
            Some(detail) => {
                tracing::warn!(post = %id, "Like rejected: {}", detail);
                false
            }
            None => true,
        },
        Err(e) => {
            tracing::warn!(post = %id, "Like failed: {}", e);
            false
        }
    };

    let mut screen = screen.lock().await;
    if !confirmed {
        screen.unlike(id);
    }
    let likes = screen.post(id).map(|p| p.likes).unwrap_or_default();
    if confirmed {
        LikeOutcome::Liked { likes }
    } else {
        LikeOutcome::RolledBack { likes }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentOutcome {
    /// Nothing to send; no call was made.
    Empty,
    Posted { comments: u32 },
    Failed { detail: Option<String> },
}

pub async fn comment(
    screen: &Mutex<CommunityScreen>,
    backend: &dyn CommunityBackend,
    id: PostId,
    text: &str,
) -> CommentOutcome {
    let Some(request) = screen.lock().await.stage_comment(id, text) else {
        return CommentOutcome::Empty;
    };

    let failure = match backend.add_comment(id, &request).await {
        Ok(body) => Reply::new(&body).detail().map(Some),
        Err(e) => {
            tracing::warn!(post = %id, "Comment failed: {}", e);
            Some(None)
        }
    };

    match failure {
        None => {
            let mut screen = screen.lock().await;
            screen.comment_posted(id);
            let comments = screen.post(id).map(|p| p.comments).unwrap_or_default();
            CommentOutcome::Posted { comments }
        }
        Some(detail) => CommentOutcome::Failed { detail },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    Created(Post),
    Incomplete,
    Rejected(String),
    Failed,
}

pub async fn create_post(
    screen: &Mutex<CommunityScreen>,
    backend: &dyn CommunityBackend,
    draft: NewPost,
) -> PostOutcome {
    let post = NewPost {
        title: draft.title.trim().to_string(),
        content: draft.content.trim().to_string(),
        author: draft.author.trim().to_string(),
    };
    if post.title.is_empty() || post.content.is_empty() || post.author.is_empty() {
        return PostOutcome::Incomplete;
    }

    let body = match backend.create_post(&post).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Could not create post: {}", e);
            return PostOutcome::Failed;
        }
    };
    if let Some(detail) = Reply::new(&body).detail() {
        return PostOutcome::Rejected(detail);
    }

    match serde_json::from_value::<Post>(body) {
        Ok(created) => {
            tracing::info!(post = %created.id, "Community post created");
            screen.lock().await.add_post(created.clone());
            PostOutcome::Created(created)
        }
        Err(e) => {
            tracing::warn!("Backend returned an unreadable post: {}", e);
            PostOutcome::Failed
        }
    }
}

/// What the card shows under the author name: the backend's own label when
/// it sent one, otherwise a relative time from `created_at`.
pub fn time_label(post: &Post) -> String {
    if let Some(label) = post.time_ago.as_deref().filter(|s| !s.is_empty()) {
        return label.to_string();
    }
    post.created_at
        .as_deref()
        .map(parse_and_format_time)
        .unwrap_or_default()
}

/// Parse a backend timestamp and format as relative time. Returns the raw
/// string if it can't be parsed.
pub fn parse_and_format_time(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return format_relative_time(&dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| format_relative_time(&dt))
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_relative_time(dt: &NaiveDateTime) -> String {
    let diff = Utc::now().naive_utc().signed_duration_since(*dt);

    if diff.num_seconds() < 60 {
        return "just now".to_string();
    }
    let minutes = diff.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = diff.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }

    dt.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers every one with the same canned body.
    struct FakeBackend {
        reply: Option<Value>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn answering(reply: Value) -> Self {
            Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn answer(&self) -> ApiResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(body) => Ok(body.clone()),
                None => Err(ApiError::Decode {
                    path: "/fake".into(),
                    source: serde_json::from_str::<Value>("").unwrap_err(),
                }),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommunityBackend for FakeBackend {
        async fn list_posts(&self) -> ApiResult<Value> {
            self.answer()
        }
        async fn create_post(&self, _post: &NewPost) -> ApiResult<Value> {
            self.answer()
        }
        async fn like_post(&self, _id: PostId) -> ApiResult<Value> {
            self.answer()
        }
        async fn add_comment(&self, _id: PostId, _comment: &NewComment) -> ApiResult<Value> {
            self.answer()
        }
    }

    fn post(id: u64, likes: u32, comments: u32) -> Post {
        Post {
            id: PostId(id),
            author: format!("farmer {id}"),
            likes,
            comments,
            ..Post::default()
        }
    }

    fn screen() -> Mutex<CommunityScreen> {
        Mutex::new(CommunityScreen::with_posts(vec![
            post(1, 24, 8),
            post(2, 5, 1),
            post(3, 0, 0),
        ]))
    }

    async fn likes(screen: &Mutex<CommunityScreen>) -> Vec<u32> {
        screen.lock().await.posts().iter().map(|p| p.likes).collect()
    }

    #[tokio::test]
    async fn like_increments_exactly_one_post() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"message": "Post 2 liked successfully!"}));

        let outcome = like(&screen, &backend, PostId(2)).await;

        assert_eq!(outcome, LikeOutcome::Liked { likes: 6 });
        assert_eq!(likes(&screen).await, vec![24, 6, 0]);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn like_rolls_back_on_detail() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"detail": "Post not found"}));

        let outcome = like(&screen, &backend, PostId(1)).await;

        assert_eq!(outcome, LikeOutcome::RolledBack { likes: 24 });
        assert_eq!(likes(&screen).await, vec![24, 5, 0]);
    }

    #[tokio::test]
    async fn like_rolls_back_on_transport_failure() {
        let screen = screen();
        let backend = FakeBackend::unreachable();

        like(&screen, &backend, PostId(3)).await;

        assert_eq!(likes(&screen).await, vec![24, 5, 0]);
    }

    #[tokio::test]
    async fn like_unknown_post_makes_no_call() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"message": "ok"}));

        assert_eq!(
            like(&screen, &backend, PostId(99)).await,
            LikeOutcome::UnknownPost
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn whitespace_comment_makes_no_call() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"id": 1, "content": "x"}));

        let outcome = comment(&screen, &backend, PostId(1), "   \n\t").await;

        assert_eq!(outcome, CommentOutcome::Empty);
        assert_eq!(backend.calls(), 0);
        let screen = screen.lock().await;
        assert_eq!(screen.post(PostId(1)).unwrap().comments, 8);
        assert_eq!(screen.draft(PostId(1)), "");
    }

    #[tokio::test]
    async fn comment_clears_draft_and_counts() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"id": 10, "content": "Try neem oil", "post_id": 2}));

        let outcome = comment(&screen, &backend, PostId(2), " Try neem oil ").await;

        assert_eq!(outcome, CommentOutcome::Posted { comments: 2 });
        assert_eq!(screen.lock().await.draft(PostId(2)), "");
    }

    #[tokio::test]
    async fn failed_comment_keeps_draft() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({"detail": "Post not found"}));

        let outcome = comment(&screen, &backend, PostId(2), "Try neem oil").await;

        assert_eq!(
            outcome,
            CommentOutcome::Failed {
                detail: Some("Post not found".into())
            }
        );
        let screen = screen.lock().await;
        assert_eq!(screen.draft(PostId(2)), "Try neem oil");
        assert_eq!(screen.post(PostId(2)).unwrap().comments, 1);
    }

    #[tokio::test]
    async fn created_post_is_appended() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({
            "id": 4, "title": "Aphids", "content": "Help", "author": "Asha",
            "created_at": "2025-01-15T12:00:00", "likes": 0
        }));

        let outcome = create_post(
            &screen,
            &backend,
            NewPost {
                title: "Aphids".into(),
                content: "Help".into(),
                author: "Asha".into(),
            },
        )
        .await;

        assert!(matches!(outcome, PostOutcome::Created(ref p) if p.id == PostId(4)));
        let screen = screen.lock().await;
        assert_eq!(screen.posts().len(), 4);
        assert_eq!(screen.posts()[3].title, "Aphids");
    }

    #[tokio::test]
    async fn incomplete_post_is_refused_locally() {
        let screen = screen();
        let backend = FakeBackend::answering(json!({}));

        let outcome = create_post(
            &screen,
            &backend,
            NewPost {
                title: "  ".into(),
                content: "Help".into(),
                author: "Asha".into(),
            },
        )
        .await;

        assert_eq!(outcome, PostOutcome::Incomplete);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn failed_post_leaves_list_alone() {
        let screen = screen();
        let backend = FakeBackend::unreachable();

        let outcome = create_post(
            &screen,
            &backend,
            NewPost {
                title: "Aphids".into(),
                content: "Help".into(),
                author: "Asha".into(),
            },
        )
        .await;

        assert_eq!(outcome, PostOutcome::Failed);
        assert_eq!(screen.lock().await.posts().len(), 3);
    }

    #[tokio::test]
    async fn mount_replaces_posts() {
        let screen = screen();
        let backend = FakeBackend::answering(json!([{"id": 9, "title": "Fresh"}]));

        mount(&screen, &backend).await;

        let screen = screen.lock().await;
        assert_eq!(screen.posts().len(), 1);
        assert!(!screen.is_unavailable());
    }

    #[tokio::test]
    async fn mount_failure_marks_unavailable() {
        let screen = screen();
        mount(&screen, &FakeBackend::unreachable()).await;
        assert!(screen.lock().await.is_unavailable());
    }

    #[test]
    fn format_relative_time_just_now() {
        let now = Utc::now().naive_utc();
        assert_eq!(format_relative_time(&now), "just now");
    }

    #[test]
    fn format_relative_time_minutes() {
        let dt = Utc::now().naive_utc() - chrono::Duration::minutes(5);
        assert_eq!(format_relative_time(&dt), "5m ago");
    }

    #[test]
    fn format_relative_time_hours() {
        let dt = Utc::now().naive_utc() - chrono::Duration::hours(3);
        assert_eq!(format_relative_time(&dt), "3h ago");
    }

    #[test]
    fn format_relative_time_days() {
        let dt = Utc::now().naive_utc() - chrono::Duration::days(2);
        assert_eq!(format_relative_time(&dt), "2d ago");
    }

    #[test]
    fn format_relative_time_old_date() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(format_relative_time(&dt), "Jan 15, 2025");
    }

    #[test]
    fn parses_backend_timestamps() {
        assert_eq!(parse_and_format_time("2025-01-15T12:00:00.123456"), "Jan 15, 2025");
        assert_eq!(parse_and_format_time("2025-01-15T12:00:00Z"), "Jan 15, 2025");
        assert_eq!(parse_and_format_time("2025-01-15 12:00:00"), "Jan 15, 2025");
        assert_eq!(parse_and_format_time("not-a-date"), "not-a-date");
    }

    #[test]
    fn time_label_prefers_backend_label() {
        let mut p = post(1, 0, 0);
        p.time_ago = Some("2 hours ago".into());
        p.created_at = Some("2025-01-15T12:00:00".into());
        assert_eq!(time_label(&p), "2 hours ago");

        p.time_ago = None;
        assert_eq!(time_label(&p), "Jan 15, 2025");
    }
}
