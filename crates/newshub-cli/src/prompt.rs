//! Interactive prompts
//!
//! Confirmation and password input for commands run from a terminal.

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::env;
use std::io::{self, Write};

/// Environment variable checked before prompting for a password
pub const PASSWORD_ENV: &str = "NEWSHUB_PASSWORD";

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

/// Read a password from `NEWSHUB_PASSWORD`, or ask for it on a terminal
///
/// Terminal input is read in raw mode, so typed characters are not echoed.
pub fn password(prompt: &str) -> Result<String> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    if !atty::is(atty::Stream::Stdin) {
        bail!(
            "No password given. Set {} or run from a terminal.",
            PASSWORD_ENV
        );
    }

    print!("{}: ", prompt);
    io::stdout().flush()?;

    enable_raw_mode()?;
    let secret = read_secret(event::read);
    disable_raw_mode()?;
    println!();

    secret
}

/// Whether the password came from the environment (no confirmation prompt needed)
pub fn password_from_env() -> Option<String> {
    env::var(PASSWORD_ENV).ok().filter(|pw| !pw.is_empty())
}

/// Collect key presses up to Enter; Esc or Ctrl-C cancels
fn read_secret(mut next_event: impl FnMut() -> io::Result<Event>) -> Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = next_event()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => break,
            KeyCode::Esc => bail!("Cancelled"),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("Cancelled")
            }
            KeyCode::Char(c) => secret.push(c),
            KeyCode::Backspace => {
                secret.pop();
            }
            _ => {}
        }
    }

    if secret.is_empty() {
        bail!("Password cannot be empty");
    }
    Ok(secret)
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    fn keys(input: &str) -> Vec<Event> {
        input
            .chars()
            .map(|c| match c {
                '\n' => KeyCode::Enter,
                '\x08' => KeyCode::Backspace,
                c => KeyCode::Char(c),
            })
            .map(|code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .collect()
    }

    fn read_from(events: Vec<Event>) -> Result<String> {
        let mut events = events.into_iter();
        read_secret(move || events.next().ok_or_else(|| io::ErrorKind::UnexpectedEof.into()))
    }

    #[test]
    fn test_read_secret_keeps_inner_whitespace() {
        let secret = read_from(keys("  pass word \n")).unwrap();
        assert_eq!(secret, "  pass word ");
    }

    #[test]
    fn test_read_secret_backspace_edits() {
        let secret = read_from(keys("hunter3\x082\n")).unwrap();
        assert_eq!(secret, "hunter2");
    }

    #[test]
    fn test_read_secret_ignores_non_key_events() {
        let mut events = vec![Event::FocusGained, Event::Resize(80, 24)];
        events.extend(keys("pw\n"));
        assert_eq!(read_from(events).unwrap(), "pw");
    }

    #[test]
    fn test_read_secret_cancel_and_empty() {
        let mut cancelled = keys("pw");
        cancelled.push(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(read_from(cancelled).is_err());

        assert!(read_from(keys("\n")).is_err());
        assert!(read_from(keys("abc")).is_err());
    }
}
