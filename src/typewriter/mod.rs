//! Typed hero line: the animator state machine.
//!
//! [`Animator`] is a plain value: it never sleeps and never spawns. Each
//! transition returns the delay before the next one, and the single timer
//! task in [`service`] is the only thing that calls it.
//!
//! ```text
//!   Typing ──(phrase fully revealed)──▶ Paused ──(pause elapsed)──▶ Typing (next phrase)
//!                                          │
//!                                          └──(erase mode)──▶ Deleting ──(empty)──▶ Typing (next phrase)
//! ```

pub mod service;

pub use service::{MountedTypewriter, mount, with_mounted};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::TypewriterConfig;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypewriterError {
    #[error("typewriter needs at least one phrase")]
    EmptyPhrases,
    #[error("typewriter {0} must be greater than zero")]
    ZeroInterval(&'static str),
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Validated, immutable animator configuration. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Settings {
    phrases: Arc<[String]>,
    char_interval: Duration,
    pause: Duration,
    delete_interval: Option<Duration>,
}

impl Settings {
    /// Build settings for a reset-style animator (no erase phase).
    pub fn new(
        phrases: Vec<String>,
        char_interval_ms: u64,
        pause_ms: u64,
    ) -> Result<Self, TypewriterError> {
        if phrases.is_empty() {
            return Err(TypewriterError::EmptyPhrases);
        }
        if char_interval_ms == 0 {
            return Err(TypewriterError::ZeroInterval("char_interval_ms"));
        }
        Ok(Self {
            phrases: phrases.into(),
            char_interval: Duration::from_millis(char_interval_ms),
            pause: Duration::from_millis(pause_ms),
            delete_interval: None,
        })
    }

    /// Erase phrases one character per `delete_interval_ms` after the pause.
    pub fn with_delete_interval(mut self, delete_interval_ms: u64) -> Result<Self, TypewriterError> {
        if delete_interval_ms == 0 {
            return Err(TypewriterError::ZeroInterval("delete_interval_ms"));
        }
        self.delete_interval = Some(Duration::from_millis(delete_interval_ms));
        Ok(self)
    }

    pub fn from_config(config: &TypewriterConfig) -> Result<Self, TypewriterError> {
        let settings = Self::new(config.phrases.clone(), config.char_interval_ms, config.pause_ms)?;
        match config.delete_interval_ms {
            Some(ms) => settings.with_delete_interval(ms),
            None => Ok(settings),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn phrase(&self, index: usize) -> &str {
        &self.phrases[index % self.phrases.len()]
    }

    pub fn char_interval(&self) -> Duration {
        self.char_interval
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    pub fn delete_interval(&self) -> Option<Duration> {
        self.delete_interval
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Revealing the current phrase one character at a time.
    Typing,
    /// Phrase fully revealed; waiting for the pause to elapse.
    Paused,
    /// Erasing the current phrase one character at a time.
    Deleting,
}

/// Snapshot of the animator published to renderers after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub phrase_index: usize,
    pub mode: Mode,
    /// Phrase transitions performed so far. A full rotation is `N` of them.
    pub phrases_completed: u64,
}

// ── Animator ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Animator {
    settings: Settings,
    phrase_index: usize,
    /// Characters of the current phrase present in `display`.
    char_index: usize,
    display: String,
    mode: Mode,
    phrases_completed: u64,
}

impl Animator {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            phrase_index: 0,
            char_index: 0,
            display: String::new(),
            mode: Mode::Typing,
            phrases_completed: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn frame(&self) -> Frame {
        Frame {
            text: self.display.clone(),
            phrase_index: self.phrase_index,
            mode: self.mode,
            phrases_completed: self.phrases_completed,
        }
    }

    /// Delay before the first transition after mount.
    pub fn initial_delay(&self) -> Duration {
        self.settings.char_interval
    }

    /// Run whichever transition the current mode calls for and return the
    /// delay until the next one. This is the timer callback.
    pub fn step(&mut self) -> Duration {
        match self.mode {
            Mode::Typing => self.type_next(),
            Mode::Paused => self.end_pause(),
            Mode::Deleting => self.erase_next(),
        }
    }

    /// Reveal one character. No-op outside `Typing`.
    pub fn tick(&mut self) -> Option<Duration> {
        (self.mode == Mode::Typing).then(|| self.type_next())
    }

    /// Leave the pause: reset to the next phrase, or start erasing when an
    /// erase interval is configured. No-op outside `Paused`.
    pub fn resume(&mut self) -> Option<Duration> {
        (self.mode == Mode::Paused).then(|| self.end_pause())
    }

    /// Remove one character. No-op outside `Deleting`.
    pub fn erase(&mut self) -> Option<Duration> {
        (self.mode == Mode::Deleting).then(|| self.erase_next())
    }

    /// Reveals one Unicode scalar. A variation selector or combining mark
    /// appears one tick after its base character.
    fn type_next(&mut self) -> Duration {
        let phrase = &self.settings.phrases[self.phrase_index];
        if let Some(ch) = phrase.chars().nth(self.char_index) {
            self.display.push(ch);
            self.char_index += 1;
        }
        if self.char_index >= phrase.chars().count() {
            self.mode = Mode::Paused;
            self.settings.pause
        } else {
            self.settings.char_interval
        }
    }

    fn end_pause(&mut self) -> Duration {
        match self.settings.delete_interval {
            Some(_) if !self.display.is_empty() => {
                self.mode = Mode::Deleting;
                self.erase_next()
            }
            _ => self.advance_phrase(),
        }
    }

    fn erase_next(&mut self) -> Duration {
        if self.display.pop().is_some() {
            self.char_index -= 1;
        }
        match self.settings.delete_interval {
            Some(interval) if !self.display.is_empty() => interval,
            _ => self.advance_phrase(),
        }
    }

    fn advance_phrase(&mut self) -> Duration {
        self.display.clear();
        self.char_index = 0;
        self.phrase_index = (self.phrase_index + 1) % self.settings.phrases.len();
        self.phrases_completed += 1;
        self.mode = Mode::Typing;
        self.settings.char_interval
    }
}
