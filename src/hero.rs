//! Hero view: redraws the typed line on every frame.
//!
//! Mounts a typewriter for as long as the view is on screen and always
//! unmounts it before returning, whichever way the view exits.
//!
//! The line is redrawn in place, so a frame must fit on one terminal row.
//! Given a width, frames are cut to it and the last column stays free.

use std::io::Write;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::io::{AsyncBufRead, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::AppError;
use crate::typewriter::{self, Frame, Settings};

/// How long the hero keeps animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroMode {
    /// Print the first phrase once, no animation (piped output).
    Static,
    /// Animate until Enter is pressed.
    UntilDismissed,
    /// Animate for this many full phrase rotations.
    Rotations(u32),
}

/// Why the hero view returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroExit {
    Shutdown,
    Dismissed,
    InputClosed,
    RotationsComplete,
    Static,
}

pub struct HeroView<'a> {
    settings: &'a Settings,
    caret: &'a str,
    mode: HeroMode,
    columns: Option<u16>,
}

impl<'a> HeroView<'a> {
    pub fn new(settings: &'a Settings, caret: &'a str, mode: HeroMode) -> Self {
        Self { settings, caret, mode, columns: None }
    }

    /// Terminal width in columns. Frames wider than this are cut.
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Drive the view until one of its exit conditions is met.
    ///
    /// `input` is only read in [`HeroMode::UntilDismissed`].
    pub async fn run<W, R>(
        &self,
        out: &mut W,
        input: &mut Lines<R>,
        shutdown: &CancellationToken,
    ) -> Result<HeroExit, AppError>
    where
        W: Write,
        R: AsyncBufRead + Unpin,
    {
        let limit = match self.mode {
            HeroMode::Static | HeroMode::Rotations(0) => {
                queue!(out, Print(self.settings.phrase(0)), Print("\n"))?;
                out.flush()?;
                return Ok(HeroExit::Static);
            }
            HeroMode::Rotations(n) => Some(u64::from(n) * self.settings.phrases().len() as u64),
            HeroMode::UntilDismissed => None,
        };
        let listen = self.mode == HeroMode::UntilDismissed;

        let mounted = typewriter::mount(self.settings.clone(), shutdown);
        let mut frames = mounted.frames();
        let mut last = mounted.current();
        self.draw(out, &last, true)?;

        let exit = loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break HeroExit::Shutdown,

                line = input.next_line(), if listen => match line {
                    Ok(Some(_)) => break HeroExit::Dismissed,
                    Ok(None) => break HeroExit::InputClosed,
                    Err(e) => {
                        warn!("hero input read error: {e}");
                        break HeroExit::InputClosed;
                    }
                },

                changed = frames.changed() => {
                    if changed.is_err() {
                        break HeroExit::Shutdown;
                    }
                    last = frames.borrow_and_update().clone();
                    self.draw(out, &last, true)?;
                    if limit.is_some_and(|l| last.phrases_completed >= l) {
                        break HeroExit::RotationsComplete;
                    }
                }
            }
        };

        mounted.unmount().await;
        debug!(?exit, phrase_index = last.phrase_index, "hero view closed");

        if exit != HeroExit::Shutdown {
            // Settle on a complete phrase without the caret.
            let settled = Frame {
                text: self.settings.phrase(last.phrase_index).to_string(),
                ..last
            };
            self.draw(out, &settled, false)?;
        }
        queue!(out, Print("\n"))?;
        out.flush()?;

        if exit == HeroExit::InputClosed {
            info!("stdin closed during hero animation");
        }
        Ok(exit)
    }

    fn draw<W: Write>(&self, out: &mut W, frame: &Frame, caret: bool) -> std::io::Result<()> {
        let caret = if caret { self.caret } else { "" };
        let text = match self.columns {
            Some(columns) => {
                let room = usize::from(columns).saturating_sub(1 + caret.width());
                fit_width(&frame.text, room)
            }
            None => frame.text.as_str(),
        };
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(text), Print(caret))?;
        out.flush()
    }
}

/// Longest prefix of `text` that takes at most `max` terminal columns.
fn fit_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > max {
            return &text[..i];
        }
    }
    text
}
