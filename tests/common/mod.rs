//! Stub CropCare backend bound to an ephemeral local port.

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

/// Requests seen by the stub, as `(method path, json body)`.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorded {
    async fn push(&self, route: &str, body: Value) {
        self.0.lock().await.push((route.to_string(), body));
    }

    pub async fn all(&self) -> Vec<(String, Value)> {
        self.0.lock().await.clone()
    }

    pub async fn count(&self, route: &str) -> usize {
        self.0.lock().await.iter().filter(|(r, _)| r == route).count()
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub recorded: Recorded,
}

pub async fn spawn_backend() -> StubBackend {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/signup/email", post(signup_email))
        .route("/auth/signup/phone", post(signup_phone))
        .route("/community/posts", get(list_posts).post(create_post))
        .route("/community/posts/{id}/like", post(like_post))
        .route("/community/posts/{id}/comments", post(add_comment))
        .route("/explore/chat", post(chat))
        .route("/help/quick-help", get(quick_help))
        .route("/help/faqs", get(faqs))
        .route("/help/contact", post(contact))
        .route("/predict/predict", post(predict))
        .route("/predict/health", get(health))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubBackend {
        base_url: format!("http://{addr}"),
        recorded,
    }
}

/// A base URL nothing listens on.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:9".to_string()
}

async fn send_otp(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /auth/send-otp", body.clone()).await;
    Json(json!({ "message": format!("OTP sent to {}", body["phone_number"].as_str().unwrap_or("")) }))
}

async fn verify_otp(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /auth/verify-otp", body.clone()).await;
    if body["otp_code"] == "123456" {
        (StatusCode::OK, Json(json!({ "id": 7, "phone_number": body["phone_number"] })))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid OTP" })))
    }
}

async fn signup_email(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /auth/signup/email", body.clone()).await;
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "detail": "Email already registered" })),
    )
}

async fn signup_phone(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /auth/signup/phone", body.clone()).await;
    Json(json!({ "id": 3, "name": body["name"], "phone_number": body["phone_number"] }))
}

async fn list_posts(State(rec): State<Recorded>) -> impl IntoResponse {
    rec.push("GET /community/posts", Value::Null).await;
    Json(json!([
        {
            "id": 1, "title": "Yellow spots on wheat", "author": "Rajesh Kumar",
            "location": "Punjab", "content": "What should I spray?", "type": "question",
            "likes": 24, "comments": 8, "tags": ["wheat"], "timeAgo": "2 hours ago"
        },
        {
            "id": 2, "title": "Neem oil works", "author": "Priya",
            "content": "Weekly spraying cleared aphids.", "type": "tip",
            "likes": 5, "comments": 1
        }
    ]))
}

async fn create_post(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /community/posts", body.clone()).await;
    Json(json!({
        "id": 3, "title": body["title"], "content": body["content"], "author": body["author"],
        "created_at": "2025-01-15T12:00:00", "likes": 0
    }))
}

async fn like_post(State(rec): State<Recorded>, Path(id): Path<u64>) -> impl IntoResponse {
    rec.push("POST /community/posts/{id}/like", json!(id)).await;
    if id == 1 {
        (StatusCode::OK, Json(json!({ "message": "Post 1 liked successfully!" })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Post not found" })))
    }
}

async fn add_comment(
    State(rec): State<Recorded>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    rec.push("POST /community/posts/{id}/comments", body.clone()).await;
    Json(json!({ "id": 10, "post_id": id, "content": body["content"] }))
}

async fn chat(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /explore/chat", body.clone()).await;
    if body["query"] == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({ "reply": format!("About {}: rotate crops.", body["query"].as_str().unwrap_or("")) }))
        .into_response()
}

async fn quick_help(State(rec): State<Recorded>) -> impl IntoResponse {
    rec.push("GET /help/quick-help", Value::Null).await;
    Json(json!([
        { "title": "Upload Guide", "description": "How to take good photos", "action": "upload" },
        { "title": "Contact Expert", "description": "Talk to an agronomist", "action": "contact" }
    ]))
}

async fn faqs(State(rec): State<Recorded>) -> impl IntoResponse {
    rec.push("GET /help/faqs", Value::Null).await;
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "detail": "FAQ service down" })))
}

async fn contact(State(rec): State<Recorded>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.push("POST /help/contact", body).await;
    Json(json!({ "message": "Support ticket created", "ticket_id": "T-1" }))
}

async fn predict(State(rec): State<Recorded>, mut multipart: Multipart) -> impl IntoResponse {
    let mut file = json!(null);
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let size = field.bytes().await.unwrap().len();
        if name == "file" {
            file = json!({ "file_name": file_name, "content_type": content_type, "size": size });
        }
    }
    rec.push("POST /predict/predict", file).await;
    Json(json!({
        "prediction": "Tomato___Early_blight",
        "confidence": 92.35,
        "remedy": "Remove affected leaves and apply copper fungicide."
    }))
}

async fn health(State(rec): State<Recorded>) -> impl IntoResponse {
    rec.push("GET /predict/health", Value::Null).await;
    Json(json!({ "status": "healthy" }))
}
