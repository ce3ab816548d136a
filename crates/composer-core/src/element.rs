//! Element kinds for Composer document nodes.
//!
//! Every [`Node`](crate::node::Node) is tagged with an [`ElementType`]. The
//! same vocabulary is shared by lexer tokens (`BlockSymbol`, `ColorHex`,
//! `Whitespace`, ...) and by the nodes of the finished tree (`Bold`, `Table`,
//! `Paragraph`, ...), so a renderer can dispatch on a single `match`.

use std::fmt;

/// The closed set of element kinds produced by the lexer and tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    /// Root of a parsed document.
    #[default]
    Root,
    /// End-of-input sentinel. Never present in a finished tree.
    Eof,

    // =========================================================================
    // Lexer-level tokens
    // =========================================================================
    /// `#1`..`#6` heading marker, resolved to [`H1`](Self::H1)..[`H6`](Self::H6).
    Header,
    /// One of `& / _ " ~`, resolved to a styled block by the tree builder.
    BlockSymbol,
    /// `<`
    ColorStart,
    /// `>`
    ColorEnd,
    /// `#` followed by anything other than a heading digit.
    ColorHex,
    /// `[`
    TableStart,
    /// `]`
    TableEnd,
    /// `|`
    Pipe,
    /// `*`, `*o`, `*x` list marker, and the wrapper of a run of list items.
    Element,
    /// A run of spaces without a line break.
    Whitespace,
    /// A run of whitespace containing at least one line break.
    Newline,

    // =========================================================================
    // Leaves
    // =========================================================================
    Text,
    Link,
    HyperLink,
    Image,
    Youtube,
    Video,
    Code,
    Divider,
    DateTime,
    Escape,
    Ignore,

    // =========================================================================
    // Structural nodes
    // =========================================================================
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Bold,
    Italic,
    Underline,
    Strike,
    Quotation,
    /// Colored span. The literal carries the color value.
    Colored,
    Table,
    /// One row of a table, split on line breaks.
    TableColumn,
    ElementBullet,
    ElementUnchecked,
    ElementChecked,
    Paragraph,
}

impl ElementType {
    /// Returns the display name of this kind (e.g., `"BLOCK_SYMBOL"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Root => "ROOT",
            ElementType::Eof => "EOF",
            ElementType::Header => "HEADER",
            ElementType::BlockSymbol => "BLOCK_SYMBOL",
            ElementType::ColorStart => "COLOR_START",
            ElementType::ColorEnd => "COLOR_END",
            ElementType::ColorHex => "COLOR_HEX",
            ElementType::TableStart => "TABLE_START",
            ElementType::TableEnd => "TABLE_END",
            ElementType::Pipe => "PIPE",
            ElementType::Element => "ELEMENT",
            ElementType::Whitespace => "WHITESPACE",
            ElementType::Newline => "NEWLINE",
            ElementType::Text => "TEXT",
            ElementType::Link => "LINK",
            ElementType::HyperLink => "HYPER_LINK",
            ElementType::Image => "IMAGE",
            ElementType::Youtube => "YOUTUBE",
            ElementType::Video => "VIDEO",
            ElementType::Code => "CODE",
            ElementType::Divider => "DIVIDER",
            ElementType::DateTime => "DATETIME",
            ElementType::Escape => "ESCAPE",
            ElementType::Ignore => "IGNORE",
            ElementType::H1 => "H1",
            ElementType::H2 => "H2",
            ElementType::H3 => "H3",
            ElementType::H4 => "H4",
            ElementType::H5 => "H5",
            ElementType::H6 => "H6",
            ElementType::Bold => "BOLD",
            ElementType::Italic => "ITALIC",
            ElementType::Underline => "UNDERLINE",
            ElementType::Strike => "STRIKE",
            ElementType::Quotation => "QUOTATION",
            ElementType::Colored => "COLORED",
            ElementType::Table => "TABLE",
            ElementType::TableColumn => "TABLE_COLOMN",
            ElementType::ElementBullet => "ELEMENT_BULLET",
            ElementType::ElementUnchecked => "ELEMENT_UNCHECKED",
            ElementType::ElementChecked => "ELEMENT_CHECKED",
            ElementType::Paragraph => "PARAGRAPH",
        }
    }

    /// Returns `true` for kinds that flow inline and get grouped into paragraphs.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            ElementType::BlockSymbol
                | ElementType::ColorStart
                | ElementType::ColorEnd
                | ElementType::Bold
                | ElementType::Italic
                | ElementType::Underline
                | ElementType::Strike
                | ElementType::Text
                | ElementType::Paragraph
                | ElementType::Link
                | ElementType::HyperLink
                | ElementType::Whitespace
                | ElementType::Newline
                | ElementType::DateTime
                | ElementType::Escape
                | ElementType::Ignore
                | ElementType::Colored
        )
    }

    /// Returns `true` for list items and the list wrapper.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            ElementType::Element
                | ElementType::ElementBullet
                | ElementType::ElementUnchecked
                | ElementType::ElementChecked
        )
    }

    /// Returns `true` for whitespace and line-break tokens.
    pub fn is_blank(&self) -> bool {
        matches!(self, ElementType::Whitespace | ElementType::Newline)
    }

    /// Returns the heading level for `H1`..`H6`.
    pub fn header_level(&self) -> Option<u8> {
        match self {
            ElementType::H1 => Some(1),
            ElementType::H2 => Some(2),
            ElementType::H3 => Some(3),
            ElementType::H4 => Some(4),
            ElementType::H5 => Some(5),
            ElementType::H6 => Some(6),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(ElementType::BlockSymbol.to_string(), "BLOCK_SYMBOL");
        assert_eq!(ElementType::TableColumn.to_string(), "TABLE_COLOMN");
        assert_eq!(ElementType::H3.to_string(), "H3");
    }

    #[test]
    fn test_text_like_set() {
        assert!(ElementType::Text.is_text_like());
        assert!(ElementType::Colored.is_text_like());
        assert!(ElementType::Newline.is_text_like());
        assert!(!ElementType::Quotation.is_text_like());
        assert!(!ElementType::Code.is_text_like());
        assert!(!ElementType::Image.is_text_like());
        assert!(!ElementType::ElementBullet.is_text_like());
    }

    #[test]
    fn test_list_item_set() {
        assert!(ElementType::Element.is_list_item());
        assert!(ElementType::ElementChecked.is_list_item());
        assert!(!ElementType::Newline.is_list_item());
    }

    #[test]
    fn test_header_level() {
        assert_eq!(ElementType::H1.header_level(), Some(1));
        assert_eq!(ElementType::H6.header_level(), Some(6));
        assert_eq!(ElementType::Header.header_level(), None);
    }
}
