//! The document tree.
//!
//! A [`Node`] is a kind tag, a literal payload, and an ordered list of
//! children. Lexer tokens are childless nodes; the tree builder wraps them
//! into structural nodes. Nodes are values: every transformation builds new
//! nodes rather than editing existing ones.

use crate::{
    block::{CodeBlock, DividerStyle},
    color::Color,
    element::ElementType,
};

/// A node of a parsed Composer document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    kind: ElementType,
    literal: String,
    children: Vec<Node>,
}

impl Node {
    /// Creates a childless node.
    pub fn new(kind: ElementType, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
            children: Vec::new(),
        }
    }

    /// Creates a node holding `children`.
    pub fn with_children(kind: ElementType, literal: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind,
            literal: literal.into(),
            children,
        }
    }

    /// Creates a document root.
    pub fn root(children: Vec<Node>) -> Self {
        Self::with_children(ElementType::Root, "", children)
    }

    /// Creates the end-of-input sentinel.
    pub fn eof() -> Self {
        Self::new(ElementType::Eof, "")
    }

    /// Returns a copy of this node with its children replaced.
    pub fn replace_children(&self, children: Vec<Node>) -> Self {
        Self {
            kind: self.kind,
            literal: self.literal.clone(),
            children,
        }
    }

    /// Decomposes the node into its parts.
    pub fn into_parts(self) -> (ElementType, String, Vec<Node>) {
        (self.kind, self.literal, self.children)
    }

    pub fn kind(&self) -> ElementType {
        self.kind
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_eof(&self) -> bool {
        self.kind == ElementType::Eof
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Splits a `tag@url` hyperlink literal into `(tag, url)`.
    ///
    /// Literals without `@` yield an empty tag and the whole literal as URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use composer_core::{element::ElementType, node::Node};
    ///
    /// let link = Node::new(ElementType::HyperLink, "here@http://example.com");
    /// assert_eq!(link.hyperlink(), ("here", "http://example.com"));
    /// ```
    pub fn hyperlink(&self) -> (&str, &str) {
        self.literal
            .split_once('@')
            .unwrap_or(("", self.literal.as_str()))
    }

    /// Returns the cells of every table row, with `|` separators filtered out.
    pub fn table_rows(&self) -> Vec<Vec<&Node>> {
        self.children
            .iter()
            .map(|row| {
                row.children
                    .iter()
                    .filter(|cell| cell.kind != ElementType::Pipe)
                    .collect()
            })
            .collect()
    }

    /// Interprets the literal as a code block.
    pub fn code_block(&self) -> CodeBlock<'_> {
        CodeBlock::from_literal(&self.literal)
    }

    /// Interprets the literal as a divider style.
    pub fn divider(&self) -> DividerStyle {
        DividerStyle::from_literal(&self.literal)
    }

    /// Parses the literal of a colored span or hex reference as a [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error message if the literal is not a valid CSS color.
    pub fn color(&self) -> Result<Color, String> {
        Color::new(&self.literal)
    }

    /// Returns the literals of all leaves in depth-first order.
    pub fn leaf_literals(&self) -> Vec<&str> {
        let mut literals = Vec::new();
        self.collect_leaf_literals(&mut literals);
        literals
    }

    /// Concatenates all leaf literals.
    pub fn plain_text(&self) -> String {
        self.leaf_literals().concat()
    }

    fn collect_leaf_literals<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.children.is_empty() {
            out.push(&self.literal);
        } else {
            for child in &self.children {
                child.collect_leaf_literals(out);
            }
        }
    }
}
