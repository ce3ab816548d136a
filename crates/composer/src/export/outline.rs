//! Outline of a document's headings and blocks.

use std::fmt::Write as _;

use composer_core::{element::ElementType, node::Node};

use super::{Error, Exporter};

/// Prints headings with their text and summarizes block-level nodes.
///
/// Blocks are indented under the most recent heading; paragraphs are left out.
#[derive(Debug, Clone)]
pub struct OutlineExporter {
    indent: String,
}

impl OutlineExporter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    fn summary(node: &Node) -> Option<String> {
        let kind = node.kind();
        let summary = match kind {
            ElementType::Code => format!("{kind} {}", node.code_block().language()),
            ElementType::Table => format!("{kind} {} rows", node.children().len()),
            ElementType::Element => format!("{kind} {} items", node.children().len()),
            ElementType::Quotation => format!("{kind} {}", node.plain_text()),
            ElementType::Divider => format!("{kind} {:?}", node.divider()),
            ElementType::Image | ElementType::Youtube | ElementType::Video => {
                format!("{kind} {}", node.literal())
            }
            _ => return None,
        };
        Some(summary)
    }
}

impl Exporter for OutlineExporter {
    fn export(&self, root: &Node) -> Result<String, Error> {
        let mut out = String::new();
        let mut depth = 0;

        for node in root.children() {
            if let Some(level) = node.kind().header_level() {
                let level = usize::from(level);
                writeln!(
                    out,
                    "{}{} {}",
                    self.indent.repeat(level - 1),
                    node.kind(),
                    node.plain_text()
                )?;
                depth = level;
            } else if let Some(summary) = Self::summary(node) {
                writeln!(out, "{}{summary}", self.indent.repeat(depth))?;
            }
        }

        Ok(out)
    }
}
