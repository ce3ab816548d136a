//! Indented tree dump of a document.

use std::fmt::Write as _;

use composer_core::node::Node;

use super::{Error, Exporter};

/// Prints one line per node: its kind, then its literal when non-empty.
///
/// Literals are escaped so every node stays on one line.
///
/// ```text
/// ROOT
/// |    H1
/// |    |    PARAGRAPH
/// |    |    |    TEXT "header"
/// ```
#[derive(Debug, Clone)]
pub struct TreeExporter {
    indent: String,
}

impl TreeExporter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    fn write_node(&self, out: &mut String, node: &Node, depth: usize) -> Result<(), Error> {
        out.push_str(&self.indent.repeat(depth));
        write!(out, "{}", node.kind())?;
        if !node.literal().is_empty() {
            write!(out, " \"{}\"", node.literal().escape_debug())?;
        }
        out.push('\n');

        for child in node.children() {
            self.write_node(out, child, depth + 1)?;
        }
        Ok(())
    }
}

impl Exporter for TreeExporter {
    fn export(&self, root: &Node) -> Result<String, Error> {
        let mut out = String::new();
        self.write_node(&mut out, root, 0)?;
        Ok(out)
    }
}
