//! # Composer Parser
//!
//! Parser for the Composer markup language. Source text goes through three
//! stages, each producing new values:
//!
//! 1. **Tokenize** - Convert source text to a flat list of tokens
//! 2. **Build** - Group delimited constructs into a structural tree
//! 3. **Type** - Wrap inline runs into paragraphs and list runs into lists
//!
//! Parsing never fails: malformed markup degrades to text, and unterminated
//! blocks run to the end of the input.
//!
//! ## Usage
//!
//! ```
//! use composer_parser::{ElementType, parse};
//!
//! let root = parse("#1 header");
//! let heading = &root.children()[0];
//! assert_eq!(heading.kind(), ElementType::H1);
//! assert_eq!(heading.children()[0].kind(), ElementType::Paragraph);
//! ```

mod builder;
pub mod datetime;
mod error;
mod lexer;
mod macros;

pub use builder::{MAX_NESTING, build, build_typed, trim_blank};
pub use error::PatternError;
pub use lexer::Lexer;
pub use macros::{Clock, MacroContext, PLACEHOLDER_PREFIX};

pub use composer_core::{element::ElementType, node::Node};

use log::{debug, info};

/// Tokenize source text, reading the local clock for macros.
pub fn tokenize(source: &str) -> Vec<Node> {
    tokenize_with(source, &MacroContext::default())
}

/// Tokenize source text against an explicit macro context.
pub fn tokenize_with(source: &str, context: &MacroContext) -> Vec<Node> {
    lexer::tokenize(source, context)
}

/// Parse source text into a document tree, reading the local clock for macros.
///
/// The returned node is always a `ROOT`; empty input yields a root without
/// children.
pub fn parse(source: &str) -> Node {
    parse_with(source, &MacroContext::default())
}

/// Parse source text against an explicit macro context.
///
/// Every `%pattern%` block and `$name` placeholder in one call resolves
/// against the same clock reading held by `context`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use composer_parser::{MacroContext, parse_with};
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 5)
///     .unwrap()
///     .and_hms_opt(14, 7, 9)
///     .unwrap();
/// let context = MacroContext::fixed(now, 0);
///
/// let root = parse_with("%yyyy%", &context);
/// assert_eq!(root.plain_text(), "2024");
/// ```
pub fn parse_with(source: &str, context: &MacroContext) -> Node {
    info!(source_len = source.len(); "Parsing document");

    let tokens = lexer::tokenize(source, context);
    let structural = build(&tokens);
    let root = build_typed(&structural);

    debug!(blocks = root.children().len(); "Document parsed");
    root
}
