//! Relay provider implementations.
//!
//! `build(config, public_key, access_token)` is the factory, called at
//! startup. Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod emailjs;

use crate::config::RelayConfig;
use crate::relay::{MessageRelay, RelayError};

/// Construct a `MessageRelay` from config and env-sourced credentials.
///
/// `public_key` and `access_token` come from `EMAILJS_PUBLIC_KEY` and
/// `EMAILJS_ACCESS_TOKEN`; only the EmailJS provider needs them.
pub fn build(
    config: &RelayConfig,
    public_key: Option<String>,
    access_token: Option<String>,
) -> Result<MessageRelay, RelayError> {
    match config.provider.as_str() {
        "dummy" => Ok(MessageRelay::Dummy(dummy::DummyRelay)),
        "emailjs" => {
            let ejs = &config.emailjs;
            if ejs.service_id.trim().is_empty() {
                return Err(RelayError::MissingSetting("relay.emailjs.service_id"));
            }
            if ejs.template_id.trim().is_empty() {
                return Err(RelayError::MissingSetting("relay.emailjs.template_id"));
            }
            let public_key = public_key.ok_or(RelayError::MissingSetting("EMAILJS_PUBLIC_KEY"))?;
            let relay = emailjs::EmailJsRelay::new(
                ejs.api_url.clone(),
                ejs.service_id.clone(),
                ejs.template_id.clone(),
                public_key,
                access_token,
                ejs.timeout_seconds,
            )?;
            Ok(MessageRelay::EmailJs(relay))
        }
        _ => Err(RelayError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailJsConfig;

    fn relay_config(provider: &str) -> RelayConfig {
        RelayConfig {
            provider: provider.into(),
            emailjs: EmailJsConfig {
                api_url: "http://127.0.0.1:9/api/v1.0/email/send".into(),
                service_id: "service_test".into(),
                template_id: "template_test".into(),
                timeout_seconds: 1,
            },
        }
    }

    #[test]
    fn builds_dummy_without_credentials() {
        let relay = build(&relay_config("dummy"), None, None).unwrap();
        assert_eq!(relay.provider_name(), "dummy");
    }

    #[test]
    fn emailjs_needs_public_key() {
        let err = build(&relay_config("emailjs"), None, None).unwrap_err();
        assert!(matches!(err, RelayError::MissingSetting("EMAILJS_PUBLIC_KEY")));
    }

    #[test]
    fn emailjs_needs_service_and_template() {
        let mut cfg = relay_config("emailjs");
        cfg.emailjs.service_id.clear();
        let err = build(&cfg, Some("pk".into()), None).unwrap_err();
        assert!(matches!(err, RelayError::MissingSetting("relay.emailjs.service_id")));

        let mut cfg = relay_config("emailjs");
        cfg.emailjs.template_id = " ".into();
        let err = build(&cfg, Some("pk".into()), None).unwrap_err();
        assert!(matches!(err, RelayError::MissingSetting("relay.emailjs.template_id")));
    }

    #[test]
    fn builds_emailjs_with_key() {
        let relay = build(&relay_config("emailjs"), Some("pk".into()), None).unwrap();
        assert_eq!(relay.provider_name(), "emailjs");
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&relay_config("carrier-pigeon"), None, None).unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
