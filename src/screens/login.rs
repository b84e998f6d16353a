//! Phone OTP login and the two signup flows.
//!
//! Each flow is one backend call. Success is read from the body (`message`
//! for OTP delivery, `id` for a created or verified user), and anything else
//! is a refusal carrying the backend's `detail` when it sent one.

use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiResult, EmailSignup, OtpRequest, OtpVerification, PhoneSignup, Reply};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneForm {
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtpForm {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub otp_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailSignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneSignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A required field was blank; nothing was sent.
    MissingFields,
    Accepted {
        message: Option<String>,
        identity: Option<String>,
    },
    /// `None` means the backend gave no reason.
    Refused { detail: Option<String> },
    Unreachable,
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Accepted { .. })
    }
}

fn required<const N: usize>(fields: [&str; N]) -> Option<[String; N]> {
    let trimmed = fields.map(|f| f.trim().to_string());
    trimmed.iter().all(|f| !f.is_empty()).then_some(trimmed)
}

enum Expect {
    Message,
    Identity,
}

fn interpret(flow: &str, reply: ApiResult<Value>, expect: Expect) -> AuthOutcome {
    let body = match reply {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(flow, "Auth request failed: {}", e);
            return AuthOutcome::Unreachable;
        }
    };
    let reply = Reply::new(&body);
    let accepted = match expect {
        Expect::Message => reply.message().is_some(),
        Expect::Identity => reply.id().is_some(),
    };
    if accepted {
        tracing::info!(flow, "Auth flow succeeded");
        AuthOutcome::Accepted {
            message: reply.message().map(str::to_string),
            identity: reply.id(),
        }
    } else {
        let detail = reply.detail();
        tracing::debug!(flow, ?detail, "Auth flow refused");
        AuthOutcome::Refused { detail }
    }
}

pub async fn send_otp(api: &ApiClient, form: &PhoneForm) -> AuthOutcome {
    let Some([phone_number]) = required([form.phone_number.as_str()]) else {
        return AuthOutcome::MissingFields;
    };
    let reply = api.send_otp(&OtpRequest { phone_number }).await;
    interpret("send-otp", reply, Expect::Message)
}

pub async fn verify_otp(api: &ApiClient, form: &OtpForm) -> AuthOutcome {
    let Some([phone_number, otp_code]) =
        required([form.phone_number.as_str(), form.otp_code.as_str()])
    else {
        return AuthOutcome::MissingFields;
    };
    let reply = api
        .verify_otp(&OtpVerification {
            phone_number,
            otp_code,
        })
        .await;
    interpret("verify-otp", reply, Expect::Identity)
}

pub async fn signup_email(api: &ApiClient, form: &EmailSignupForm) -> AuthOutcome {
    let Some([name, email]) = required([form.name.as_str(), form.email.as_str()]) else {
        return AuthOutcome::MissingFields;
    };
    // Passwords are sent exactly as typed.
    if form.password.is_empty() {
        return AuthOutcome::MissingFields;
    }
    let reply = api
        .signup_email(&EmailSignup {
            name,
            email,
            password: form.password.clone(),
        })
        .await;
    interpret("signup-email", reply, Expect::Identity)
}

pub async fn signup_phone(api: &ApiClient, form: &PhoneSignupForm) -> AuthOutcome {
    let Some([name, phone_number]) =
        required([form.name.as_str(), form.phone_number.as_str()])
    else {
        return AuthOutcome::MissingFields;
    };
    let reply = api.signup_phone(&PhoneSignup { name, phone_number }).await;
    interpret("signup-phone", reply, Expect::Identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_trims_and_rejects_blanks() {
        assert_eq!(
            required([" Asha ", "9876543210"]),
            Some(["Asha".to_string(), "9876543210".to_string()])
        );
        assert_eq!(required(["Asha", "  "]), None);
    }

    #[test]
    fn otp_delivery_reads_message() {
        let outcome = interpret(
            "send-otp",
            Ok(json!({"message": "OTP sent successfully"})),
            Expect::Message,
        );
        assert_eq!(
            outcome,
            AuthOutcome::Accepted {
                message: Some("OTP sent successfully".into()),
                identity: None
            }
        );
    }

    #[test]
    fn verification_reads_identity() {
        let outcome = interpret(
            "verify-otp",
            Ok(json!({"id": 12, "phone_number": "9876543210", "is_active": true})),
            Expect::Identity,
        );
        assert!(outcome.is_success());
        assert!(matches!(
            outcome,
            AuthOutcome::Accepted { identity: Some(ref id), .. } if id == "12"
        ));
    }

    #[test]
    fn detail_is_a_refusal() {
        let outcome = interpret(
            "verify-otp",
            Ok(json!({"detail": "OTP expired"})),
            Expect::Identity,
        );
        assert_eq!(
            outcome,
            AuthOutcome::Refused {
                detail: Some("OTP expired".into())
            }
        );
    }

    #[test]
    fn body_without_marker_is_a_refusal_without_reason() {
        let outcome = interpret("send-otp", Ok(json!({})), Expect::Message);
        assert_eq!(outcome, AuthOutcome::Refused { detail: None });
    }
}
