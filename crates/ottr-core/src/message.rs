//! Diagnostic messages.
//!
//! All user-facing failures (arity mismatches, missing definitions, failed
//! checks, ...) are represented as [`Message`]s collected into [`Messages`]
//! and handed back to the caller, who decides what to do with them.

use std::fmt;

/// Severity of a [`Message`], ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, e.g. a template was fetched.
    Info,
    /// Suspicious but not wrong, e.g. an unused parameter.
    Warning,
    /// The input is wrong and the affected output was not produced.
    Error,
    /// Processing cannot continue.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        };
        f.write_str(s)
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    /// How bad it is.
    pub severity: Severity,
    /// Human readable description.
    pub text: String,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn fatal(text: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, text)
    }

    /// Returns `true` for [`Severity::Error`] and [`Severity::Fatal`].
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// An ordered collection of [`Message`]s.
///
/// Tracks the most severe message seen so far so callers can cheaply ask
/// whether a run produced errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    messages: Vec<Message>,
    most_severe: Option<Severity>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message.
    pub fn push(&mut self, message: Message) {
        self.most_severe = self.most_severe.max(Some(message.severity));
        self.messages.push(message);
    }

    /// Add a message unless an identical one is already present.
    pub fn push_unique(&mut self, message: Message) {
        if !self.messages.contains(&message) {
            self.push(message);
        }
    }

    /// Append every message of `other`.
    pub fn append(&mut self, other: Messages) {
        for message in other.messages {
            self.push(message);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The highest severity seen, if any message was added.
    pub fn most_severe(&self) -> Option<Severity> {
        self.most_severe
    }

    /// Returns `true` if any message is an error or fatal.
    pub fn has_errors(&self) -> bool {
        self.most_severe >= Some(Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error) + self.count(Severity::Fatal)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Messages that are errors or fatal.
    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_error())
    }

    pub fn into_vec(self) -> Vec<Message> {
        self.messages
    }
}

impl Extend<Message> for Messages {
    fn extend<T: IntoIterator<Item = Message>>(&mut self, iter: T) {
        for message in iter {
            self.push(message);
        }
    }
}

impl FromIterator<Message> for Messages {
    fn from_iter<T: IntoIterator<Item = Message>>(iter: T) -> Self {
        let mut messages = Messages::new();
        messages.extend(iter);
        messages
    }
}

impl IntoIterator for Messages {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}
