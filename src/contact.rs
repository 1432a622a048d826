//! Contact console. Collects the form line by line and hands it to the relay.
//!
//! Runs until the message is delivered, the user gives up after a failure,
//! stdin is closed or the `shutdown` token is cancelled.
//!
//! The message may span several lines. It ends at a blank line, a lone `.`
//! or end of input, so no part of it is left behind for the next prompt.

use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::relay::{ContactForm, MessageRelay, is_plausible_email};

pub const SENT_NOTICE: &str = "Message sent successfully!";
pub const FAILED_NOTICE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    /// User declined to retry after a failed delivery.
    Abandoned,
    /// stdin closed or shutdown requested.
    Closed,
}

/// Which value a prompt accepts.
#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    fn prompt(self) -> &'static str {
        match self {
            Field::Name => "Your Name: ",
            Field::Email => "Your Email: ",
            Field::Message => "Your Message (blank line to finish): ",
        }
    }

    fn check(self, value: &str) -> Result<(), &'static str> {
        if value.is_empty() {
            return Err("This field is required.");
        }
        if matches!(self, Field::Email) && !is_plausible_email(value) {
            return Err("Please enter a valid email address.");
        }
        Ok(())
    }
}

pub async fn run_contact<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    relay: &MessageRelay,
    shutdown: &CancellationToken,
) -> Result<ContactOutcome, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut form = ContactForm::default();
    for field in [Field::Name, Field::Email, Field::Message] {
        let Some(value) = read_field(lines, out, field, shutdown).await? else {
            return Ok(ContactOutcome::Closed);
        };
        match field {
            Field::Name => form.name = value,
            Field::Email => form.email = value,
            Field::Message => form.message = read_message_body(lines, value, shutdown).await?,
        }
    }
    debug!(provider = relay.provider_name(), "contact form complete");

    loop {
        writeln!(out, "Sending…")?;
        out.flush()?;

        let result = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return Ok(ContactOutcome::Closed),
            r = relay.submit(&mut form) => r,
        };

        match result {
            Ok(()) => {
                writeln!(out, "{SENT_NOTICE}")?;
                out.flush()?;
                info!("contact form sent");
                return Ok(ContactOutcome::Sent);
            }
            Err(e) => {
                warn!(error = %e, "contact form delivery failed");
                writeln!(out, "{FAILED_NOTICE}")?;
                write!(out, "Press Enter to retry, or type q to give up: ")?;
                out.flush()?;
                match next_line(lines, shutdown).await? {
                    None => return Ok(ContactOutcome::Closed),
                    Some(answer) if answer.eq_ignore_ascii_case("q") => {
                        return Ok(ContactOutcome::Abandoned);
                    }
                    Some(_) => continue,
                }
            }
        }
    }
}

/// Prompt until `field` gets an acceptable value. `None` means closed.
async fn read_field<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    field: Field,
    shutdown: &CancellationToken,
) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write!(out, "{}", field.prompt())?;
        out.flush()?;
        let Some(value) = next_line(lines, shutdown).await? else {
            writeln!(out)?;
            return Ok(None);
        };
        match field.check(&value) {
            Ok(()) => return Ok(Some(value)),
            Err(hint) => writeln!(out, "{hint}")?,
        }
    }
}

/// Collect the lines after `first` up to the terminator and join them.
async fn read_message_body<R>(
    lines: &mut Lines<R>,
    first: String,
    shutdown: &CancellationToken,
) -> Result<String, AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = vec![first];
    while let Some(line) = next_raw_line(lines, shutdown).await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "." {
            break;
        }
        body.push(line.trim_end().to_string());
    }
    Ok(body.join("\n"))
}

/// Next trimmed line, or `None` on EOF or shutdown.
async fn next_line<R>(lines: &mut Lines<R>, shutdown: &CancellationToken) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
{
    Ok(next_raw_line(lines, shutdown).await?.map(|l| l.trim().to_string()))
}

async fn next_raw_line<R>(lines: &mut Lines<R>, shutdown: &CancellationToken) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
{
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => Ok(None),
        line = lines.next_line() => Ok(line?),
    }
}
