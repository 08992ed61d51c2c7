//! Secure prompts.
//!
//! Yes/no confirmation from a single keypress and hidden line input. Both
//! hold an interrupt hook for their whole duration, so Ctrl-C mid-prompt
//! unwinds through `console`'s own terminal restoration instead of killing
//! the process with echo disabled.

use std::io::{self, IsTerminal, Read};

use console::{Key, Term};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::signal::{self, InterruptGuard};
use crate::error::{AbortError, Result};

/// Interactive input capability.
pub trait Prompter {
    /// Ask a yes/no question. Anything but an affirmative key is "no".
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Read one line without echoing it.
    fn hidden(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

/// Whether a key counts as "yes".
pub fn is_affirmative(key: char) -> bool {
    key.eq_ignore_ascii_case(&'y')
}

/// Prompts on stderr, input from the terminal.
///
/// When stdin is not a terminal (piped input), `confirm` consumes exactly
/// one byte and `hidden` one line from stdin.
#[derive(Debug)]
pub struct TerminalPrompter {
    term: Term,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn interactive(&self) -> bool {
        self.term.is_term() && io::stdin().is_terminal()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let _hook = InterruptGuard::install()?;
        self.term.write_str(&format!("{} [y/n]: ", prompt))?;

        let key = if self.interactive() {
            match checked(self.term.read_key())? {
                Key::CtrlC => return Err(AbortError::Interrupted.into()),
                Key::Char(c) => Some(c),
                _ => None,
            }
        } else {
            read_byte(&mut io::stdin().lock())?.map(char::from)
        };

        let answer = key.map(is_affirmative).unwrap_or(false);
        self.term.write_line(if answer { "y" } else { "n" })?;
        trace!(answer, "confirmation");
        Ok(answer)
    }

    fn hidden(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        let _hook = InterruptGuard::install()?;
        self.term.write_str(&format!("{}: ", prompt))?;

        if !self.interactive() {
            return read_line(&mut io::stdin().lock());
        }

        let mut line = Zeroizing::new(String::new());
        loop {
            match checked(self.term.read_key())? {
                Key::Enter => break,
                Key::CtrlC => return Err(AbortError::Interrupted.into()),
                Key::Backspace => {
                    line.pop();
                }
                Key::Char(c) if !c.is_control() => line.push(c),
                _ => {}
            }
        }
        self.term.write_line("")?;
        Ok(line)
    }
}

/// Map a read that an interrupt cut short to `AbortError::Interrupted`.
///
/// `console` raises SIGINT itself when it sees Ctrl-C in raw mode, so the
/// flag is set on both the terminal and the signal path.
fn checked<T>(result: io::Result<T>) -> Result<T> {
    match result {
        _ if signal::interrupted() => Err(AbortError::Interrupted.into()),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(AbortError::Interrupted.into()),
        Err(e) => Err(e.into()),
        Ok(value) => Ok(value),
    }
}

/// Read a single byte. Returns `None` at end of input.
///
/// A read interrupted by a signal is retried unless the interrupt hook
/// caught it, in which case the prompt aborts.
fn read_byte<R: Read + ?Sized>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                if signal::interrupted() {
                    return Err(AbortError::Interrupted.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read up to a newline (excluded), byte by byte so nothing beyond the
/// line is consumed.
fn read_line<R: Read + ?Sized>(reader: &mut R) -> Result<Zeroizing<String>> {
    let mut bytes = Zeroizing::new(Vec::new());
    while let Some(byte) = read_byte(reader)? {
        if byte == b'\n' {
            break;
        }
        bytes.push(byte);
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }

    let line = std::str::from_utf8(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("input is not UTF-8: {}", e)))?;
    Ok(Zeroizing::new(line.to_string()))
}
