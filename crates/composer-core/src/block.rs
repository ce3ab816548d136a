//! Interpretations of leaf literals that drive block rendering.
//!
//! The tree keeps raw literals for `CODE` and `DIVIDER` nodes. [`CodeBlock`]
//! and [`DividerStyle`] are the decoded views renderers dispatch on.

/// Language assumed when a code block does not name one.
pub const PLAIN_TEXT_LANGUAGE: &str = "txt";

/// A code block split into its language tag and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    language: String,
    code: &'a str,
}

impl<'a> CodeBlock<'a> {
    /// Splits a code literal into a language tag and the code that follows.
    ///
    /// A first line containing `.` names the language (`.py` → `py`), and the
    /// rest of the literal, trimmed, is the code. Anything else is plain text
    /// with the whole literal as code.
    pub fn from_literal(literal: &'a str) -> Self {
        if let Some((first_line, rest)) = literal.split_once('\n') {
            if first_line.contains('.') {
                return Self {
                    language: first_line.replace('.', ""),
                    code: rest.trim(),
                };
            }
        }

        Self {
            language: PLAIN_TEXT_LANGUAGE.to_string(),
            code: literal,
        }
    }

    /// Returns the language tag (`"txt"` when none was given).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the code body.
    pub fn code(&self) -> &'a str {
        self.code
    }
}

/// How a `=...=` divider should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerStyle {
    /// `==`: draws nothing.
    None,
    /// `=br=`: a one-pixel gap.
    Break,
    /// `=line=`: a solid rule.
    Line,
    /// `=dash=`: a dashed rule.
    Dash,
    /// `=24=`: vertical space of the given pixel count.
    Space(u32),
    /// Any other value. Renderers skip it.
    Unknown,
}

impl DividerStyle {
    /// Decodes a divider literal.
    pub fn from_literal(literal: &str) -> Self {
        match literal {
            "" => DividerStyle::None,
            "br" => DividerStyle::Break,
            "line" => DividerStyle::Line,
            "dash" => DividerStyle::Dash,
            digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse()
                .map_or(DividerStyle::Unknown, DividerStyle::Space),
            _ => DividerStyle::Unknown,
        }
    }
}
