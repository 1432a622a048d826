//! Configuration loading with env-var overrides.
//!
//! Reads the site TOML (explicit `-f` path, `config/default.toml`, or
//! `<config_dir>/typefolio/config.toml`, in that order), then applies the
//! `TYPEFOLIO_LOG_LEVEL` env override. Relay credentials are read from
//! `EMAILJS_PUBLIC_KEY` / `EMAILJS_ACCESS_TOKEN` and never from TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::Datelike;
use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Hero, about, contact and footer copy.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Owner name shown in the hero greeting and the footer.
    pub name: String,
    /// Navbar title.
    pub title: String,
    pub about: String,
    pub contact_blurb: String,
    /// Where the resume can be downloaded. Shown under the typed line.
    pub resume_url: Option<String>,
    /// Copyright year for the footer. Defaults to the current year.
    pub footer_year: i32,
}

/// Typed hero line settings as read. Validated by
/// [`crate::typewriter::Settings::from_config`].
#[derive(Debug, Clone)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub char_interval_ms: u64,
    pub pause_ms: u64,
    /// When set, phrases are erased one character at a time instead of
    /// being cleared at once.
    pub delete_interval_ms: Option<u64>,
    /// Glyph drawn after the typed text.
    pub caret: String,
    /// Complete phrase rotations to play before a non-interactive run
    /// moves on.
    pub rotations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// `#RRGGBB` or `#RGB`.
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Social {
    pub label: String,
    pub url: String,
}

/// EmailJS provider configuration (`[relay.emailjs]`).
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    /// Full `email/send` endpoint URL.
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// Message relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Which provider is active (`"dummy"` or `"emailjs"`).
    /// Maps to `default` in `[relay]`.
    pub provider: String,
    pub emailjs: EmailJsConfig,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub site: SiteConfig,
    pub typewriter: TypewriterConfig,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub socials: Vec<Social>,
    pub relay: RelayConfig,
    /// EmailJS public key from `EMAILJS_PUBLIC_KEY`.
    pub relay_public_key: Option<String>,
    /// Optional EmailJS private key from `EMAILJS_ACCESS_TOKEN`.
    pub relay_access_token: Option<String>,
    /// File the config was read from.
    pub source: PathBuf,
}

// ── Raw TOML shape ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawConfig {
    site: RawSite,
    typewriter: RawTypewriter,
    #[serde(default)]
    skills: Vec<RawSkill>,
    #[serde(default)]
    projects: Vec<RawProject>,
    #[serde(default)]
    socials: Vec<RawSocial>,
    #[serde(default)]
    relay: RawRelay,
}

#[derive(Deserialize)]
struct RawSite {
    name: String,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    about: String,
    #[serde(default = "default_contact_blurb")]
    contact_blurb: String,
    #[serde(default)]
    resume_url: Option<String>,
    #[serde(default)]
    footer_year: Option<i32>,
}

#[derive(Deserialize)]
struct RawTypewriter {
    phrases: Vec<String>,
    #[serde(default = "default_char_interval_ms")]
    char_interval_ms: u64,
    #[serde(default = "default_pause_ms")]
    pause_ms: u64,
    #[serde(default)]
    delete_interval_ms: Option<u64>,
    #[serde(default = "default_caret")]
    caret: String,
    #[serde(default = "default_rotations")]
    rotations: u32,
}

#[derive(Deserialize)]
struct RawSkill {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Deserialize)]
struct RawProject {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_link")]
    link: String,
}

#[derive(Deserialize)]
struct RawSocial {
    label: String,
    url: String,
}

#[derive(Deserialize)]
struct RawRelay {
    #[serde(rename = "default", default = "default_relay_provider")]
    provider: String,
    #[serde(default)]
    emailjs: RawEmailJs,
}

impl Default for RawRelay {
    fn default() -> Self {
        Self { provider: default_relay_provider(), emailjs: RawEmailJs::default() }
    }
}

#[derive(Deserialize)]
struct RawEmailJs {
    #[serde(default = "default_emailjs_api_url")]
    api_url: String,
    #[serde(default)]
    service_id: String,
    #[serde(default)]
    template_id: String,
    #[serde(default = "default_emailjs_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawEmailJs {
    fn default() -> Self {
        Self {
            api_url: default_emailjs_api_url(),
            service_id: String::new(),
            template_id: String::new(),
            timeout_seconds: default_emailjs_timeout_seconds(),
        }
    }
}

fn default_title() -> String { "My Portfolio".to_string() }
fn default_log_level() -> String { "warn".to_string() }
fn default_contact_blurb() -> String { "Have a project in mind? Send me a message!".to_string() }
fn default_char_interval_ms() -> u64 { 100 }
fn default_pause_ms() -> u64 { 1500 }
fn default_caret() -> String { "|".to_string() }
fn default_rotations() -> u32 { 1 }
fn default_link() -> String { "#".to_string() }
fn default_relay_provider() -> String { "emailjs".to_string() }
fn default_emailjs_api_url() -> String { "https://api.emailjs.com/api/v1.0/email/send".to_string() }
fn default_emailjs_timeout_seconds() -> u64 { 15 }

// ── Loading ──────────────────────────────────────────────────────────────────

/// Locate and load the config, then apply env-var overrides.
///
/// `explicit` is the `-f/--config` argument; when absent the default
/// locations are tried in order.
pub fn load(explicit: Option<&str>) -> Result<Config, AppError> {
    let path = resolve_path(explicit)?;
    let log_level_override = env::var("TYPEFOLIO_LOG_LEVEL").ok();
    load_from(&path, log_level_override.as_deref())
}

/// Internal loader. Accepts an explicit path and optional override.
/// Tests pass the override directly instead of mutating env vars.
pub fn load_from(path: &Path, log_level_override: Option<&str>) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let site = parsed.site;
    let log_level = log_level_override.unwrap_or(&site.log_level).to_string();
    let footer_year = site.footer_year.unwrap_or_else(|| chrono::Local::now().year());

    Ok(Config {
        log_level,
        site: SiteConfig {
            name: site.name,
            title: site.title,
            about: site.about,
            contact_blurb: site.contact_blurb,
            resume_url: site.resume_url.filter(|u| !u.trim().is_empty()),
            footer_year,
        },
        typewriter: TypewriterConfig {
            phrases: parsed.typewriter.phrases,
            char_interval_ms: parsed.typewriter.char_interval_ms,
            pause_ms: parsed.typewriter.pause_ms,
            delete_interval_ms: parsed.typewriter.delete_interval_ms,
            caret: parsed.typewriter.caret,
            rotations: parsed.typewriter.rotations,
        },
        skills: parsed
            .skills
            .into_iter()
            .map(|s| Skill { name: s.name, color: s.color })
            .collect(),
        projects: parsed
            .projects
            .into_iter()
            .map(|p| Project { name: p.name, description: p.description, link: p.link })
            .collect(),
        socials: parsed
            .socials
            .into_iter()
            .map(|s| Social { label: s.label, url: s.url })
            .collect(),
        relay: RelayConfig {
            provider: parsed.relay.provider,
            emailjs: EmailJsConfig {
                api_url: parsed.relay.emailjs.api_url,
                service_id: parsed.relay.emailjs.service_id,
                template_id: parsed.relay.emailjs.template_id,
                timeout_seconds: parsed.relay.emailjs.timeout_seconds,
            },
        },
        relay_public_key: non_empty_env("EMAILJS_PUBLIC_KEY"),
        relay_access_token: non_empty_env("EMAILJS_ACCESS_TOKEN"),
        source: path.to_path_buf(),
    })
}

fn resolve_path(explicit: Option<&str>) -> Result<PathBuf, AppError> {
    if let Some(p) = explicit {
        return Ok(PathBuf::from(p));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_PATH);
    if local.is_file() {
        return Ok(local);
    }
    if let Some(user) = user_config_path() {
        if user.is_file() {
            return Ok(user);
        }
    }
    Err(AppError::Config(format!(
        "no config found (tried {DEFAULT_CONFIG_PATH} and the user config dir); pass -f <PATH>"
    )))
}

/// `<config_dir>/typefolio/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("typefolio").join("config.toml"))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests: dummy relay and no keys.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            log_level: "info".into(),
            site: SiteConfig {
                name: "Test Person".into(),
                title: default_title(),
                about: "I build things.".into(),
                contact_blurb: default_contact_blurb(),
                resume_url: Some("https://example.com/resume.pdf".into()),
                footer_year: 2025,
            },
            typewriter: TypewriterConfig {
                phrases: vec!["AB".into(), "C".into()],
                char_interval_ms: 100,
                pause_ms: 1500,
                delete_interval_ms: None,
                caret: default_caret(),
                rotations: 1,
            },
            skills: vec![Skill { name: "Rust".into(), color: Some("#DEA584".into()) }],
            projects: vec![Project {
                name: "Portfolio Website".into(),
                description: "This very page.".into(),
                link: default_link(),
            }],
            socials: vec![Social { label: "GitHub".into(), url: "https://github.com/example".into() }],
            relay: RelayConfig {
                provider: "dummy".into(),
                emailjs: EmailJsConfig {
                    api_url: "http://localhost:0/api/v1.0/email/send".into(),
                    service_id: "service_test".into(),
                    template_id: "template_test".into(),
                    timeout_seconds: 1,
                },
            },
            relay_public_key: None,
            relay_access_token: None,
            source: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[site]
name = "Test Person"

[typewriter]
phrases = ["Full Stack Developer", "Rustacean"]
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_minimal_config_applies_defaults() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None).unwrap();
        assert_eq!(cfg.site.name, "Test Person");
        assert_eq!(cfg.site.title, "My Portfolio");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.typewriter.phrases.len(), 2);
        assert_eq!(cfg.typewriter.char_interval_ms, 100);
        assert_eq!(cfg.typewriter.pause_ms, 1500);
        assert_eq!(cfg.typewriter.delete_interval_ms, None);
        assert_eq!(cfg.typewriter.caret, "|");
        assert_eq!(cfg.typewriter.rotations, 1);
        assert_eq!(cfg.relay.provider, "emailjs");
        assert!(cfg.relay.emailjs.api_url.starts_with("https://api.emailjs.com/"));
        assert!(cfg.skills.is_empty());
        assert_eq!(cfg.site.resume_url, None);
        assert_eq!(cfg.source.as_path(), f.path());
    }

    #[test]
    fn footer_year_defaults_to_current_year() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None).unwrap();
        assert_eq!(cfg.site.footer_year, chrono::Local::now().year());
    }

    #[test]
    fn parse_full_content() {
        let f = write_toml(
            r##"
[site]
name = "Test Person"
about = "Hello."
resume_url = "/resume.pdf"
footer_year = 2025

[typewriter]
phrases = ["A"]
char_interval_ms = 40
pause_ms = 900
delete_interval_ms = 20
caret = "_"
rotations = 3

[[skills]]
name = "React"
color = "#61DBFB"

[[skills]]
name = "Git"

[[projects]]
name = "Blog Platform"
description = "Full-stack blog."

[[socials]]
label = "GitHub"
url = "https://github.com/example"

[relay]
default = "dummy"

[relay.emailjs]
service_id = "service_x"
template_id = "template_y"
timeout_seconds = 5
"##,
        );
        let cfg = load_from(f.path(), None).unwrap();
        assert_eq!(cfg.site.footer_year, 2025);
        assert_eq!(cfg.site.resume_url.as_deref(), Some("/resume.pdf"));
        assert_eq!(cfg.typewriter.delete_interval_ms, Some(20));
        assert_eq!(cfg.typewriter.caret, "_");
        assert_eq!(cfg.typewriter.rotations, 3);
        assert_eq!(
            cfg.skills,
            vec![
                Skill { name: "React".into(), color: Some("#61DBFB".into()) },
                Skill { name: "Git".into(), color: None },
            ]
        );
        assert_eq!(cfg.projects[0].link, "#");
        assert_eq!(cfg.socials[0].label, "GitHub");
        assert_eq!(cfg.relay.provider, "dummy");
        assert_eq!(cfg.relay.emailjs.service_id, "service_x");
        assert_eq!(cfg.relay.emailjs.timeout_seconds, 5);
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), None);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn missing_typewriter_section_errors() {
        let f = write_toml("[site]\nname = \"x\"\n");
        let msg = load_from(f.path(), None).unwrap_err().to_string();
        assert!(msg.contains("parse error"));
    }

    #[test]
    fn log_level_override() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("debug")).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn explicit_path_wins() {
        let p = resolve_path(Some("/somewhere/site.toml")).unwrap();
        assert_eq!(p, PathBuf::from("/somewhere/site.toml"));
    }

    #[test]
    fn user_config_path_is_namespaced() {
        if let Some(p) = user_config_path() {
            assert!(p.ends_with("typefolio/config.toml"));
        }
    }
}
