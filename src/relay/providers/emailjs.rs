//! EmailJS relay (`POST /api/v1.0/email/send`).
//!
//! The form fields are sent as the template parameters `name`, `email` and
//! `message`. Any 2xx response is a delivery; everything else is a failure.
//! Wire types are private to this module. Non-browser calls must be enabled
//! in the EmailJS account security settings.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use crate::relay::{ContactForm, RelayError};

/// Response bodies longer than this are cut before they reach an error.
const MAX_ERROR_BODY: usize = 256;

/// Constructed once at startup and cheaply cloned: `reqwest::Client` is an
/// `Arc` internally.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    client: Client,
    api_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    access_token: Option<String>,
}

impl EmailJsRelay {
    pub fn new(
        api_url: String,
        service_id: String,
        template_id: String,
        public_key: String,
        access_token: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| RelayError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_url, service_id, template_id, public_key, access_token })
    }

    pub async fn deliver(&self, form: &ContactForm) -> Result<(), RelayError> {
        let payload = self.request_for(form);

        debug!(
            url = %self.api_url,
            service_id = %self.service_id,
            template_id = %self.template_id,
            message_len = form.message.len(),
            "sending contact message"
        );

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.api_url, error = %e, "relay HTTP request failed (transport)");
                RelayError::Request(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "relay accepted message");
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
            body.truncate(cut);
        }
        error!(status = status.as_u16(), body = %body, "relay rejected message");
        Err(RelayError::Rejected { status: status.as_u16(), body })
    }

    fn request_for<'a>(&'a self, form: &'a ContactForm) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: form,
            access_token: self.access_token.as_deref(),
        }
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    /// EmailJS calls the public key `user_id`.
    user_id: &'a str,
    template_params: &'a ContactForm,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn relay(access_token: Option<&str>) -> EmailJsRelay {
        EmailJsRelay::new(
            "http://127.0.0.1:9/api/v1.0/email/send".into(),
            "service_abc".into(),
            "template_def".into(),
            "public_key".into(),
            access_token.map(str::to_string),
            1,
        )
        .unwrap()
    }

    #[test]
    fn request_body_matches_emailjs_shape() {
        let r = relay(None);
        let form = ContactForm::new("Ada", "ada@example.com", "Hello there");
        let body = serde_json::to_value(r.request_for(&form)).unwrap();
        assert_eq!(
            body,
            json!({
                "service_id": "service_abc",
                "template_id": "template_def",
                "user_id": "public_key",
                "template_params": {
                    "name": "Ada",
                    "email": "ada@example.com",
                    "message": "Hello there",
                },
            })
        );
    }

    #[test]
    fn access_token_is_sent_when_configured() {
        let r = relay(Some("secret"));
        let form = ContactForm::new("Ada", "ada@example.com", "Hi");
        let body = serde_json::to_value(r.request_for(&form)).unwrap();
        assert_eq!(body["accessToken"], "secret");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let r = relay(None);
        let form = ContactForm::new("Ada", "ada@example.com", "Hi");
        let err = r.deliver(&form).await.unwrap_err();
        assert!(matches!(err, RelayError::Request(_)), "{err:?}");
    }
}
