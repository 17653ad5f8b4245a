//! Alerts and confirmations on the terminal.

use guestbook_core::Notifier;
use std::io::{self, BufRead, Write};

/// [`Notifier`] that prints alerts and reads y/N answers.
pub struct TerminalNotifier<R, W> {
    input: R,
    output: W,
    /// Answer every confirmation with yes (`--yes`).
    assume_yes: bool,
}

impl TerminalNotifier<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalNotifier<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }
}

impl<R: BufRead, W: Write> Notifier for TerminalNotifier<R, W> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            tracing::warn!("Failed to print alert: {}", e);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let prompt = write!(self.output, "{message} [y/N] ").and_then(|_| self.output.flush());
        if let Err(e) = prompt {
            tracing::warn!("Failed to print prompt: {}", e);
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read answer: {}", e);
                false
            }
        }
    }
}
