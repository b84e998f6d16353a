//! Client for the CropCare backend REST API.
//!
//! Every endpoint issues exactly one request and hands back the parsed JSON
//! body untouched. Status codes are not inspected here: a 404 carrying
//! `{"detail": "Post not found"}` comes back as `Ok`, and callers use
//! [`Reply`] to tell a success from a backend-reported failure.

mod reply;
mod types;

pub use reply::Reply;
pub use types::*;

use std::time::Duration;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::upload::ImageFile;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid upload part: {0}")]
    Part(#[source] reqwest::Error),

    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {path} is not JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        tracing::debug!(path, "GET backend");
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        read_body(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        tracing::debug!(path, "POST backend");
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        read_body(path, response).await
    }

    async fn post_empty(&self, path: &str) -> ApiResult<Value> {
        tracing::debug!(path, "POST backend");
        let response = self
            .http
            .post(self.endpoint(path))
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        read_body(path, response).await
    }

    // --- Auth ---

    pub async fn signup_email(&self, signup: &EmailSignup) -> ApiResult<Value> {
        self.post_json("/auth/signup/email", signup).await
    }

    pub async fn signup_phone(&self, signup: &PhoneSignup) -> ApiResult<Value> {
        self.post_json("/auth/signup/phone", signup).await
    }

    pub async fn send_otp(&self, request: &OtpRequest) -> ApiResult<Value> {
        self.post_json("/auth/send-otp", request).await
    }

    pub async fn verify_otp(&self, verification: &OtpVerification) -> ApiResult<Value> {
        self.post_json("/auth/verify-otp", verification).await
    }

    // --- Community ---

    pub async fn list_posts(&self) -> ApiResult<Value> {
        self.get("/community/posts").await
    }

    pub async fn create_post(&self, post: &NewPost) -> ApiResult<Value> {
        self.post_json("/community/posts", post).await
    }

    pub async fn add_comment(&self, post_id: PostId, comment: &NewComment) -> ApiResult<Value> {
        self.post_json(&format!("/community/posts/{post_id}/comments"), comment)
            .await
    }

    pub async fn like_post(&self, post_id: PostId) -> ApiResult<Value> {
        self.post_empty(&format!("/community/posts/{post_id}/like"))
            .await
    }

    // --- Explore ---

    pub async fn chat(&self, query: &ChatQuery) -> ApiResult<Value> {
        self.post_json("/explore/chat", query).await
    }

    // --- Help ---

    pub async fn quick_help(&self) -> ApiResult<Value> {
        self.get("/help/quick-help").await
    }

    pub async fn faqs(&self) -> ApiResult<Value> {
        self.get("/help/faqs").await
    }

    pub async fn contact_support(&self, message: &ContactMessage) -> ApiResult<Value> {
        self.post_json("/help/contact", message).await
    }

    // --- Predict ---

    pub async fn predict(&self, image: &ImageFile) -> ApiResult<Value> {
        let path = "/predict/predict";
        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.content_type)
            .map_err(ApiError::Part)?;
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(path, size = image.size(), "POST backend");
        let response = self
            .http
            .post(self.endpoint(path))
            .multipart(form)
            .send()
            .await
            .map_err(|source| transport(path, source))?;
        read_body(path, response).await
    }

    pub async fn health(&self) -> ApiResult<Value> {
        self.get("/predict/health").await
    }
}

fn transport(path: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        path: path.to_string(),
        source,
    }
}

async fn read_body(path: &str, response: reqwest::Response) -> ApiResult<Value> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|source| transport(path, source))?;
    if !status.is_success() {
        tracing::debug!(path, %status, "Backend answered with non-success status");
    }
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Decodes a list endpoint's body into typed records.
///
/// A body that is not a JSON array (typically `{"detail": ...}`) yields an
/// empty list. Elements that fail to decode are skipped one by one so a
/// single odd record does not blank the whole screen.
pub fn decode_lenient<T: DeserializeOwned>(what: &str, body: Value) -> Vec<T> {
    let Value::Array(items) = body else {
        tracing::warn!(what, detail = ?Reply::new(&body).detail(), "Expected a list from backend");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(what, "Skipping malformed record: {}", e);
                None
            }
        })
        .collect()
}
