//! The shipped site config must load and produce valid typewriter settings.

use std::path::Path;

use typefolio::config;
use typefolio::relay::providers;
use typefolio::typewriter::Settings;

#[test]
fn default_config_loads() {
    let cfg = config::load_from(Path::new("config/default.toml"), None).unwrap();
    assert_eq!(cfg.site.name, "Sufian Mahmood");
    assert_eq!(cfg.typewriter.phrases.len(), 3);
    assert_eq!(cfg.skills.len(), 9);
    assert_eq!(cfg.projects.len(), 2);
    assert_eq!(cfg.site.resume_url.as_deref(), Some("/resume.pdf"));
    assert_eq!(cfg.relay.provider, "emailjs");

    let settings = Settings::from_config(&cfg.typewriter).unwrap();
    assert_eq!(settings.phrase(0), "Full Stack Developer 💻");
    assert_eq!(settings.delete_interval(), None);
}

#[test]
fn default_config_relay_needs_a_public_key() {
    let cfg = config::load_from(Path::new("config/default.toml"), None).unwrap();
    assert!(providers::build(&cfg.relay, None, None).is_err());
    assert!(providers::build(&cfg.relay, Some("pk".into()), None).is_ok());
}

#[test]
fn empty_phrase_list_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    std::fs::write(&path, "[site]\nname = \"x\"\n\n[typewriter]\nphrases = []\n").unwrap();

    let cfg = config::load_from(&path, None).unwrap();
    let err = Settings::from_config(&cfg.typewriter).unwrap_err();
    assert!(err.to_string().contains("at least one phrase"));
}
