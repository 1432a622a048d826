//! Contact-form message relay.
//!
//! `MessageRelay` is an enum over concrete providers. Adding a provider =
//! new module in `providers/` + new variant + new `deliver` arm.
//!
//! Delivery is a single attempt with a binary outcome. [`MessageRelay::submit`]
//! clears the form on success and leaves it intact on failure so the caller
//! can offer a retry.

pub mod providers;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("unknown relay provider: {0}")]
    UnknownProvider(String),
    #[error("missing relay setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid contact form: {0}")]
    InvalidForm(String),
    #[error("relay request failed: {0}")]
    Request(String),
    #[error("relay rejected the message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

// ── Contact form ──────────────────────────────────────────────────────────────

/// The three contact fields. Serialises as the relay's template parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), email: email.into(), message: message.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// All fields are required; the email must look like `local@domain.tld`.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.name.trim().is_empty() {
            return Err(RelayError::InvalidForm("name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(RelayError::InvalidForm("email is required".into()));
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(RelayError::InvalidForm(format!("'{}' is not an email address", self.email.trim())));
        }
        if self.message.trim().is_empty() {
            return Err(RelayError::InvalidForm("message is required".into()));
        }
        Ok(())
    }
}

/// Shape check only: one `@`, non-empty local part, dotted domain, no spaces.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !domain.starts_with('.'),
        None => false,
    }
}

// ── Relay enum ────────────────────────────────────────────────────────────────

/// All available relay backends. Cheap to clone.
#[derive(Debug, Clone)]
pub enum MessageRelay {
    Dummy(providers::dummy::DummyRelay),
    EmailJs(providers::emailjs::EmailJsRelay),
}

impl MessageRelay {
    pub fn provider_name(&self) -> &'static str {
        match self {
            MessageRelay::Dummy(_) => "dummy",
            MessageRelay::EmailJs(_) => "emailjs",
        }
    }

    /// Hand `form` to the provider. One attempt, no retries.
    pub async fn deliver(&self, form: &ContactForm) -> Result<(), RelayError> {
        match self {
            MessageRelay::Dummy(p) => p.deliver(form).await,
            MessageRelay::EmailJs(p) => p.deliver(form).await,
        }
    }

    /// Validate and deliver `form`; clear it only if delivery succeeded.
    pub async fn submit(&self, form: &mut ContactForm) -> Result<(), RelayError> {
        form.validate()?;
        match self.deliver(form).await {
            Ok(()) => {
                info!(provider = self.provider_name(), "contact message delivered");
                form.clear();
                Ok(())
            }
            Err(e) => {
                warn!(provider = self.provider_name(), error = %e, "contact message not delivered");
                Err(e)
            }
        }
    }
}
