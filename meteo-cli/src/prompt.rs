//! Where user input comes from.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use inquire::InquireError;

pub trait Prompt {
    /// Ask for one line of input. `Ok(None)` means the user is done (EOF, Ctrl-C, Esc).
    fn ask(&mut self, message: &str) -> Result<Option<String>>;
}

/// Interactive prompt for a terminal.
#[derive(Debug, Default)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        match inquire::Text::new(message).prompt() {
            Ok(answer) => Ok(Some(answer)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err).context("Failed to read input"),
        }
    }
}

/// Line-by-line prompt for piped input.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.echo, "{message} ")?;
        self.echo.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
