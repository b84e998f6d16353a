//! ApiClient and the screens built on it, against a stub backend.

mod common;

use std::time::Duration;

use cropcare::analysis::{Analyzer, BackendAnalyzer};
use cropcare::api::{ApiClient, ApiError, ChatQuery, NewPost, OtpRequest, PostId, Reply};
use cropcare::screens::{explore, help, login};
use cropcare::upload::ImageFile;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_send_otp_posts_phone_number() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let body = assert_ok!(
        api.send_otp(&OtpRequest {
            phone_number: "9876543210".into(),
        })
        .await
    );

    assert_eq!(body["message"], "OTP sent to 9876543210");
    let recorded = backend.recorded.all().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "POST /auth/send-otp");
    assert_eq!(recorded[0].1, json!({ "phone_number": "9876543210" }));
}

#[tokio::test]
async fn test_non_success_body_is_returned_unchanged() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let body = assert_ok!(api.like_post(PostId(42)).await);

    assert_eq!(body, json!({ "detail": "Post not found" }));
    assert_eq!(Reply::new(&body).detail().as_deref(), Some("Post not found"));
}

#[tokio::test]
async fn test_non_json_body_is_a_decode_error() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let err = assert_err!(
        api.chat(&ChatQuery {
            query: "broken".into(),
        })
        .await
    );

    assert!(
        matches!(err, ApiError::Decode { ref path, .. } if path == "/explore/chat"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    let api = client(&common::unreachable_url());
    let err = assert_err!(api.list_posts().await);
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[tokio::test]
async fn test_create_post_sends_all_fields() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let body = assert_ok!(
        api.create_post(&NewPost {
            title: "Aphids".into(),
            content: "Leaves curling".into(),
            author: "Asha".into(),
        })
        .await
    );

    assert_eq!(body["id"], 3);
    let recorded = backend.recorded.all().await;
    assert_eq!(
        recorded[0].1,
        json!({ "title": "Aphids", "content": "Leaves curling", "author": "Asha" })
    );
}

#[tokio::test]
async fn test_chat_reply_and_fallback() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    assert_eq!(
        explore::ask(&api, "  blight ").await,
        explore::ChatOutcome::Reply("About blight: rotate crops.".into())
    );
    assert_eq!(
        explore::ask(&api, "broken").await,
        explore::ChatOutcome::Unavailable
    );
    assert_eq!(explore::ask(&api, "   ").await, explore::ChatOutcome::Empty);
    assert_eq!(backend.recorded.count("POST /explore/chat").await, 2);
}

#[tokio::test]
async fn test_help_sections_fail_independently() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let screen = help::mount(&api).await;

    assert_eq!(screen.quick_help.items.len(), 2);
    assert!(!screen.quick_help.unavailable);
    assert!(screen.faqs.items.is_empty());
    assert!(screen.faqs.unavailable);
}

#[tokio::test]
async fn test_contact_requires_every_field() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let mut form = help::ContactForm {
        name: "Asha".into(),
        email: "asha@example.com".into(),
        subject: "Blight".into(),
        message: "   ".into(),
    };
    assert_eq!(
        help::submit_contact(&api, &form).await,
        help::ContactOutcome::Incomplete
    );
    assert_eq!(backend.recorded.count("POST /help/contact").await, 0);

    form.message = "My wheat has spots".into();
    assert_eq!(
        help::submit_contact(&api, &form).await,
        help::ContactOutcome::Sent
    );
}

#[tokio::test]
async fn test_login_flows_read_backend_verdicts() {
    let backend = common::spawn_backend().await;
    let api = client(&backend.base_url);

    let verified = login::verify_otp(
        &api,
        &login::OtpForm {
            phone_number: "9876543210".into(),
            otp_code: "123456".into(),
        },
    )
    .await;
    assert!(verified.is_success());

    let refused = login::verify_otp(
        &api,
        &login::OtpForm {
            phone_number: "9876543210".into(),
            otp_code: "000000".into(),
        },
    )
    .await;
    assert_eq!(
        refused,
        login::AuthOutcome::Refused {
            detail: Some("Invalid OTP".into())
        }
    );

    let duplicate = login::signup_email(
        &api,
        &login::EmailSignupForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "secret".into(),
        },
    )
    .await;
    assert_eq!(
        duplicate,
        login::AuthOutcome::Refused {
            detail: Some("Email already registered".into())
        }
    );
}

#[tokio::test]
async fn test_backend_analyzer_uploads_file_part() {
    let backend = common::spawn_backend().await;
    let analyzer = BackendAnalyzer::new(client(&backend.base_url));

    let image = ImageFile {
        name: "leaf.jpg".into(),
        content_type: "image/jpeg".into(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    };
    let result = analyzer.analyze(&image).await.unwrap();

    assert_eq!(result.name, "Tomato: Early blight");
    assert!((result.confidence - 92.35).abs() < f64::EPSILON);
    assert_eq!(
        result.prescription,
        "Remove affected leaves and apply copper fungicide."
    );

    let recorded = backend.recorded.all().await;
    assert_eq!(
        recorded[0].1,
        json!({ "file_name": "leaf.jpg", "content_type": "image/jpeg", "size": 4 })
    );
}
