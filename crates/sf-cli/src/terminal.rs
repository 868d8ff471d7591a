//! Line-based chooser reading from a terminal.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use colored::Colorize;
use sf_core::{Chooser, CoreError, CoreResult, resolve_choice};

use crate::display::{style, wrap};

/// Reads choices line by line and prints numbered menus.
///
/// A choice may be typed as its number, its label, or the start of its
/// label. Anything else is reported and the menu is shown again.
pub struct TerminalChooser<R, W> {
    input: R,
    output: W,
    width: usize,
}

impl TerminalChooser<StdinLock<'static>, Stdout> {
    /// A chooser on the process's stdin and stdout.
    pub fn stdio(width: usize) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), width)
    }
}

impl<R: BufRead, W: Write> TerminalChooser<R, W> {
    /// A chooser on arbitrary streams.
    pub fn new(input: R, output: W, width: usize) -> Self {
        Self {
            input,
            output,
            width,
        }
    }

    /// The output stream.
    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    fn show_menu(&mut self, prompt: &str, options: &[String]) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", wrap(prompt, self.width).bold())?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", (i + 1).to_string().cyan())?;
        }
        write!(self.output, "> ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Chooser for TerminalChooser<R, W> {
    fn choose(&mut self, prompt: &str, options: &[String]) -> CoreResult<usize> {
        if options.is_empty() {
            return Err(CoreError::NoOptions);
        }
        let mut line = String::new();
        loop {
            self.show_menu(prompt, options)?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CoreError::InputClosed);
            }
            let answer = line.trim();
            if answer.is_empty() {
                let message = format!("Enter a number from 1 to {}.", options.len());
                writeln!(self.output, "{}", message.yellow())?;
                continue;
            }

            match resolve_choice(answer, options) {
                Ok(index) => return Ok(index),
                Err(CoreError::InvalidChoice { input, suggestion }) => {
                    let message = match suggestion {
                        Some(label) => format!("'{input}' is not an option. Did you mean '{label}'?"),
                        None => format!(
                            "'{input}' is not an option. Enter a number from 1 to {}.",
                            options.len()
                        ),
                    };
                    writeln!(self.output, "{}", message.yellow())?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn say(&mut self, text: &str) {
        let text = style(&wrap(text, self.width));
        // a closed stdout surfaces at the next prompt
        let _ = writeln!(self.output, "{text}");
    }
}
