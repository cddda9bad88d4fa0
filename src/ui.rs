//! Terminal presentation: bordered cards and the commit confirmation prompt.

use std::io::{self, BufRead, IsTerminal};

use console::{Style, Term, measure_text_width, style};
use dialoguer::Input;

use crate::error::CommitError;

/// Narrowest card that still fits a border, padding and a few characters.
pub const MIN_CARD_WIDTH: usize = 20;

const CONFIRM_PROMPT: &str = "Do you want to commit with this message? (yes/no)";

/// A titled box with a word-wrapped body.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub body: String,
    /// Total width including the border. Clamped to [`MIN_CARD_WIDTH`].
    pub width: usize,
}

impl Card {
    pub fn new(title: impl Into<String>, body: impl Into<String>, width: usize) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            width,
        }
    }

    pub fn render(&self) -> String {
        draw_box(
            &self.title,
            &self.body,
            self.width,
            Style::new().cyan(),
            Style::new().bold().cyan(),
        )
    }
}

/// A red-bordered error box.
pub fn render_error(message: &str, width: usize) -> String {
    draw_box(
        "Error",
        message,
        width,
        Style::new().red(),
        Style::new().bold().red(),
    )
}

fn draw_box(title: &str, body: &str, width: usize, border: Style, heading: Style) -> String {
    let width = width.max(MIN_CARD_WIDTH);
    let inner = width - 4;

    let mut lines = Vec::new();
    for line in textwrap::wrap(title, inner) {
        lines.push(heading.apply_to(line.into_owned()).to_string());
    }
    lines.push(String::new());
    for paragraph in body.trim_end().lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        for line in textwrap::wrap(paragraph, inner) {
            lines.push(line.into_owned());
        }
    }

    let horizontal = "─".repeat(width - 2);
    let side = border.apply_to("│");

    let mut out = String::new();
    out.push_str(&border.apply_to(format!("╭{horizontal}╮")).to_string());
    out.push('\n');
    for line in lines {
        let pad = inner.saturating_sub(measure_text_width(&line));
        out.push_str(&format!("{side} {line}{} {side}\n", " ".repeat(pad)));
    }
    out.push_str(&border.apply_to(format!("╰{horizontal}╯")).to_string());
    out
}

/// Whether `answer` means yes: `yes` or `y`, ignoring case and surrounding space.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Ask whether to commit with the generated message.
///
/// Without an interactive terminal the answer is one line read from stdin.
pub fn ask_user() -> Result<bool, CommitError> {
    if !(Term::stderr().is_term() && io::stdin().is_terminal()) {
        Term::stderr()
            .write_line(CONFIRM_PROMPT)
            .map_err(|e| CommitError::PromptFailed(e.to_string()))?;
        return read_answer(&mut io::stdin().lock());
    }

    let answer: String = Input::new()
        .with_prompt(CONFIRM_PROMPT)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CommitError::PromptFailed(e.to_string()))?;

    Ok(is_affirmative(&answer))
}

/// Read one line from `reader` and interpret it with [`is_affirmative`].
///
/// End of input counts as no.
pub fn read_answer<R: BufRead>(reader: &mut R) -> Result<bool, CommitError> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| CommitError::PromptFailed(e.to_string()))?;
    Ok(is_affirmative(&line))
}

/// Dimmed single-line notice, used for non-error outcomes.
pub fn notice(message: &str) -> String {
    style(message).dim().to_string()
}
