//! Tree construction from lexer tokens.
//!
//! The tree is built in two passes:
//!
//! 1. [`build`] groups delimited constructs (headings, styled blocks, tables,
//!    colored spans, list items) into nested nodes.
//! 2. [`build_typed`] wraps runs of inline nodes into paragraphs and runs of
//!    list items into a single list node.
//!
//! Both passes read their input by reference and return fresh nodes.
//!
//! Pass 1 stops nesting at [`MAX_NESTING`] levels, so the tree depth, the
//! recursion depth of both passes and the number of rescans of any token are
//! all bounded regardless of the input.

use log::{debug, trace};

use composer_core::{color::DEFAULT_SPAN_COLOR, element::ElementType, node::Node};

/// Deepest block nesting built by pass 1.
///
/// A block opened at this depth keeps its span flat: the tokens, openers
/// included, become its children unchanged.
pub const MAX_NESTING: usize = 64;

// ============================================================================
// Pass 1: structural grouping
// ============================================================================

/// Groups a flat token list into a structural tree under a `ROOT` node.
///
/// An opening delimiter without a matching close swallows every remaining
/// token. Scanning stops at an end-of-input sentinel, if one is present.
pub fn build(tokens: &[Node]) -> Node {
    let root = Node::root(group_blocks(tokens, 0));
    trace!(children = root.children().len(); "Built structural tree");
    root
}

fn group_blocks(nodes: &[Node], depth: usize) -> Vec<Node> {
    if depth >= MAX_NESTING {
        debug!(depth = depth, tokens = nodes.len(); "Nesting limit reached, keeping span flat");
        return nodes.iter().take_while(|n| !n.is_eof()).cloned().collect();
    }

    let mut grouped = Vec::with_capacity(nodes.len());
    let mut index = 0;

    while let Some(current) = nodes.get(index) {
        if current.is_eof() {
            break;
        }
        index += 1;

        let node = match current.kind() {
            ElementType::Header => {
                let span = take_until(nodes, &mut index, |n| n.kind() == ElementType::Newline);
                block(header_kind(current.literal()), "", span, depth)
            }
            ElementType::BlockSymbol => {
                let span = take_until(nodes, &mut index, |n| {
                    n.kind() == ElementType::BlockSymbol && n.literal() == current.literal()
                });
                skip_closing(nodes, &mut index);
                block(block_kind(current.literal()), "", span, depth)
            }
            ElementType::TableStart => {
                let span = take_until(nodes, &mut index, |n| n.kind() == ElementType::TableEnd);
                skip_closing(nodes, &mut index);
                table(span, depth)
            }
            ElementType::ColorStart => {
                let span = take_until(nodes, &mut index, |n| n.kind() == ElementType::ColorEnd);
                skip_closing(nodes, &mut index);
                colored(span, depth)
            }
            ElementType::Element => {
                let span = take_until(nodes, &mut index, |n| n.kind() == ElementType::Newline);
                block(element_kind(current.literal()), "", span, depth)
            }
            _ => current.clone(),
        };
        grouped.push(node);
    }

    grouped
}

/// Advances `index` up to the first node matching `closes` (or the sentinel)
/// and returns the nodes passed over.
fn take_until<'a>(nodes: &'a [Node], index: &mut usize, closes: impl Fn(&Node) -> bool) -> &'a [Node] {
    let start = *index;
    let end = nodes[start..]
        .iter()
        .position(|n| n.is_eof() || closes(n))
        .map_or(nodes.len(), |offset| start + offset);
    *index = end;
    &nodes[start..end]
}

/// Steps over a closing delimiter. The sentinel is never consumed.
fn skip_closing(nodes: &[Node], index: &mut usize) {
    if nodes.get(*index).is_some_and(|n| !n.is_eof()) {
        *index += 1;
    }
}

fn block(kind: ElementType, literal: &str, span: &[Node], depth: usize) -> Node {
    let children = group_blocks(trim_blank(span), depth + 1);
    trace!(kind:% = kind, children = children.len(); "Grouped block");
    Node::with_children(kind, literal, children)
}

fn header_kind(marker: &str) -> ElementType {
    match marker {
        "#1" => ElementType::H1,
        "#2" => ElementType::H2,
        "#3" => ElementType::H3,
        "#4" => ElementType::H4,
        "#5" => ElementType::H5,
        "#6" => ElementType::H6,
        _ => ElementType::Text,
    }
}

fn block_kind(symbol: &str) -> ElementType {
    match symbol {
        "&" => ElementType::Bold,
        "/" => ElementType::Italic,
        "_" => ElementType::Underline,
        "~" => ElementType::Strike,
        "\"" => ElementType::Quotation,
        _ => ElementType::Text,
    }
}

fn element_kind(marker: &str) -> ElementType {
    match marker {
        "*" => ElementType::ElementBullet,
        "*o" => ElementType::ElementUnchecked,
        "*x" => ElementType::ElementChecked,
        _ => ElementType::Element,
    }
}

/// One `TABLE_COLOMN` per line of the span. Lines with no content are dropped.
fn table(span: &[Node], depth: usize) -> Node {
    let rows: Vec<Node> = trim_blank(span)
        .split(|n| n.kind() == ElementType::Newline)
        .map(trim_blank)
        .filter(|row| !row.is_empty())
        .map(|row| block(ElementType::TableColumn, "", row, depth + 1))
        .collect();
    trace!(rows = rows.len(); "Grouped table");
    Node::with_children(ElementType::Table, "", rows)
}

/// A trailing `COLOR_HEX` token sets the span color; it defaults to `#222222`.
fn colored(span: &[Node], depth: usize) -> Node {
    let span = trim_blank(span);
    let (color, content) = match span.split_last() {
        Some((last, rest)) if last.kind() == ElementType::ColorHex => (last.literal(), rest),
        _ => (DEFAULT_SPAN_COLOR, span),
    };
    block(ElementType::Colored, color, content, depth)
}

// ============================================================================
// Pass 2: paragraphs and lists
// ============================================================================

/// Wraps inline runs into `PARAGRAPH` nodes and list-item runs into one
/// `ELEMENT` node, recursing into every other node that has children.
///
/// Inline nodes are wrapped as they are: a `BOLD` inside a paragraph keeps
/// its raw children.
pub fn build_typed(node: &Node) -> Node {
    if node.is_leaf() {
        return node.clone();
    }
    node.replace_children(type_children(node.children()))
}

fn type_children(children: &[Node]) -> Vec<Node> {
    let mut typed = Vec::new();
    let mut index = 0;

    while let Some(current) = children.get(index) {
        if current.is_eof() {
            break;
        }

        let kind = current.kind();
        if kind.is_text_like() {
            let run = take_until(children, &mut index, |n| !n.kind().is_text_like());
            let run = trim_blank(run);
            if !run.is_empty() {
                typed.push(Node::with_children(ElementType::Paragraph, "", run.to_vec()));
            }
        } else if kind.is_list_item() {
            let run = take_until(children, &mut index, |n| {
                !n.kind().is_list_item() && n.kind() != ElementType::Newline
            });
            let items: Vec<Node> = run
                .iter()
                .filter(|n| n.kind() != ElementType::Newline)
                .map(build_typed)
                .collect();
            trace!(items = items.len(); "Grouped list");
            typed.push(Node::with_children(ElementType::Element, "", items));
        } else {
            typed.push(build_typed(current));
            index += 1;
        }
    }

    typed
}

// ============================================================================
// Helpers
// ============================================================================

/// Drops leading and trailing `WHITESPACE` and `NEWLINE` nodes.
///
/// # Examples
///
/// ```
/// use composer_core::{element::ElementType, node::Node};
/// use composer_parser::trim_blank;
///
/// let nodes = vec![
///     Node::new(ElementType::Newline, "\n"),
///     Node::new(ElementType::Text, "kept"),
///     Node::new(ElementType::Whitespace, " "),
/// ];
/// assert_eq!(trim_blank(&nodes), &nodes[1..2]);
/// ```
pub fn trim_blank(nodes: &[Node]) -> &[Node] {
    let start = nodes
        .iter()
        .position(|n| !n.kind().is_blank())
        .unwrap_or(nodes.len());
    let end = nodes
        .iter()
        .rposition(|n| !n.kind().is_blank())
        .map_or(start, |last| last + 1);
    &nodes[start..end]
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for a short list of blank and non-blank nodes.
    fn nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
        proptest::collection::vec(
            prop_oneof![
                Just(Node::new(ElementType::Whitespace, " ")),
                Just(Node::new(ElementType::Newline, "\n")),
                "[a-z]{1,4}".prop_map(|s| Node::new(ElementType::Text, s)),
                Just(Node::new(ElementType::Pipe, "|")),
            ],
            0..16,
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Trimming twice is the same as trimming once.
    fn check_trim_idempotent(nodes: &[Node]) -> Result<(), TestCaseError> {
        let once = trim_blank(nodes);
        prop_assert_eq!(trim_blank(once), once);
        Ok(())
    }

    /// A trimmed list never starts or ends with a blank node.
    fn check_trim_edges(nodes: &[Node]) -> Result<(), TestCaseError> {
        let trimmed = trim_blank(nodes);
        if let (Some(first), Some(last)) = (trimmed.first(), trimmed.last()) {
            prop_assert!(!first.kind().is_blank());
            prop_assert!(!last.kind().is_blank());
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn trim_is_idempotent(nodes in nodes_strategy()) {
            check_trim_idempotent(&nodes)?;
        }

        #[test]
        fn trim_leaves_no_blank_edges(nodes in nodes_strategy()) {
            check_trim_edges(&nodes)?;
        }
    }
}
