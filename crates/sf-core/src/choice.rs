//! Choice prompts and option resolution.
//!
//! Every interactive decision in the game goes through a [`Chooser`]. The
//! terminal front end reads lines from stdin; tests drive the engines with a
//! [`ScriptedChooser`].

use std::collections::VecDeque;

use strsim::jaro_winkler;

use crate::error::{CoreError, CoreResult};

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Source of player decisions and sink for narrative text.
pub trait Chooser {
    /// Pick one of `options` and return its index.
    fn choose(&mut self, prompt: &str, options: &[String]) -> CoreResult<usize>;

    /// Show a line of narrative text.
    fn say(&mut self, text: &str);
}

/// Match raw input against option labels.
///
/// Accepts a 1-based index, an exact case-insensitive label, or a
/// case-insensitive prefix (first matching option wins).
pub fn resolve_choice(input: &str, options: &[String]) -> CoreResult<usize> {
    if options.is_empty() {
        return Err(CoreError::NoOptions);
    }
    let input = input.trim();
    if input.is_empty() {
        return Err(invalid(input, options));
    }

    if let Ok(n) = input.parse::<usize>() {
        if (1..=options.len()).contains(&n) {
            return Ok(n - 1);
        }
        return Err(invalid(input, options));
    }

    let lower = input.to_lowercase();
    if let Some(i) = options.iter().position(|o| o.to_lowercase() == lower) {
        return Ok(i);
    }
    if let Some(i) = options
        .iter()
        .position(|o| o.to_lowercase().starts_with(&lower))
    {
        return Ok(i);
    }

    Err(invalid(input, options))
}

fn invalid(input: &str, options: &[String]) -> CoreError {
    let lower = input.to_lowercase();
    let suggestion = options
        .iter()
        .map(|o| (o, jaro_winkler(&lower, &o.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(o, _)| o.clone());

    CoreError::InvalidChoice {
        input: input.to_string(),
        suggestion,
    }
}

/// A chooser that replays pre-recorded answers.
///
/// Each answer is resolved like typed input. Invalid answers are skipped,
/// the way a terminal prompt would re-ask. Running out of answers yields
/// [`CoreError::InputClosed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    answers: VecDeque<String>,
    /// Every line passed to [`Chooser::say`].
    pub transcript: Vec<String>,
    /// Every prompt asked, in order.
    pub prompts: Vec<String>,
}

impl ScriptedChooser {
    /// Create a chooser that answers with `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Whether any line said so far contains `needle`.
    pub fn said(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&mut self, prompt: &str, options: &[String]) -> CoreResult<usize> {
        self.prompts.push(prompt.to_string());
        while let Some(answer) = self.answers.pop_front() {
            match resolve_choice(&answer, options) {
                Ok(index) => return Ok(index),
                Err(CoreError::NoOptions) => return Err(CoreError::NoOptions),
                Err(e) => self.transcript.push(e.to_string()),
            }
        }
        Err(CoreError::InputClosed)
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}
