//! Clock-driven macros.
//!
//! `%pattern%` blocks and `$name` placeholders inside code blocks resolve
//! against a single clock reading. [`MacroContext`] captures that reading once
//! so that every macro in a document agrees, and so tests can pin it with
//! [`MacroContext::fixed`].

use chrono::{Local, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{datetime, error::PatternError};

/// Prefix introducing a placeholder inside code blocks.
pub const PLACEHOLDER_PREFIX: char = '$';

/// Placeholder names and the patterns they format, longest name first so
/// `$datetime` is never read as `$date` followed by `time`.
const PLACEHOLDER_PATTERNS: [(&str, &str); 9] = [
    ("datetime", "dd/MM/yyyy hh:mm:ss a"),
    ("minute", "mm"),
    ("second", "ss"),
    ("month", "MM"),
    ("date", "dd/MM/yyyy"),
    ("hour", "hh"),
    ("time", "hh:mm:ss a"),
    ("year", "yyyy"),
    ("day", "dd"),
];

const MILLIS_PLACEHOLDER: &str = "millis";

/// Which wall clock macros read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// The host's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

/// A captured clock reading and the placeholder values derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroContext {
    now: NaiveDateTime,
    millis: i64,
    /// `(name, value)` pairs, longest name first.
    placeholders: Vec<(&'static str, String)>,
}

impl MacroContext {
    /// Reads the given clock once.
    pub fn capture(clock: Clock) -> Self {
        match clock {
            Clock::Local => {
                let now = Local::now();
                Self::fixed(now.naive_local(), now.timestamp_millis())
            }
            Clock::Utc => {
                let now = Utc::now();
                Self::fixed(now.naive_utc(), now.timestamp_millis())
            }
        }
    }

    /// Builds a context from an explicit wall-clock time and epoch milliseconds.
    pub fn fixed(now: NaiveDateTime, millis: i64) -> Self {
        let mut placeholders = Vec::with_capacity(PLACEHOLDER_PATTERNS.len() + 1);
        for (name, pattern) in PLACEHOLDER_PATTERNS {
            // The built-in patterns only use supported letters.
            let value = datetime::format(pattern, &now).unwrap_or_else(|_| pattern.to_string());
            placeholders.push((name, value));
        }
        placeholders.insert(0, (MILLIS_PLACEHOLDER, millis.to_string()));
        placeholders.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

        Self {
            now,
            millis,
            placeholders,
        }
    }

    /// Returns the captured wall-clock time.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Returns the captured time as milliseconds since the Unix epoch.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// Formats the captured time with a date-time pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is malformed.
    pub fn format(&self, pattern: &str) -> Result<String, PatternError> {
        datetime::format(pattern, &self.now)
    }

    /// Returns the value a placeholder name resolves to, if any.
    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces every `$name` placeholder in `code`.
    ///
    /// The scan runs left to right and substituted text is not rescanned.
    /// A `$` not followed by a known name is kept.
    pub fn substitute(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len());
        let mut rest = code;

        while let Some(index) = rest.find(PLACEHOLDER_PREFIX) {
            out.push_str(&rest[..index]);
            let after = &rest[index + PLACEHOLDER_PREFIX.len_utf8()..];

            match self
                .placeholders
                .iter()
                .find(|(name, _)| after.starts_with(name))
            {
                Some((name, value)) => {
                    out.push_str(value);
                    rest = &after[name.len()..];
                }
                None => {
                    out.push(PLACEHOLDER_PREFIX);
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl Default for MacroContext {
    fn default() -> Self {
        Self::capture(Clock::default())
    }
}
