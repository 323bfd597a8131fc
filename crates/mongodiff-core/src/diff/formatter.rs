//! Output styling capability
//!
//! Whatever prints for the operator receives a `Formatter` instead of
//! reaching for process-wide colour state, so reports render identically
//! in tests, in pipes and on a terminal.

use owo_colors::OwoColorize;

/// Semantic role of a piece of report text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Heading,
    Collection,
    Identifier,
    Notice,
    Alert,
}

/// Styles report text
pub trait Formatter {
    fn paint(&self, style: Style, text: &str) -> String;
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn paint(&self, _style: Style, text: &str) -> String {
        text.to_string()
    }
}

/// Bold bright terminal colours: red headings and alerts, blue collections
/// and notices, green identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiFormatter;

impl Formatter for AnsiFormatter {
    fn paint(&self, style: Style, text: &str) -> String {
        match style {
            Style::Heading | Style::Alert => text.bright_red().bold().to_string(),
            Style::Collection | Style::Notice => text.bright_blue().bold().to_string(),
            Style::Identifier => text.bright_green().bold().to_string(),
        }
    }
}
