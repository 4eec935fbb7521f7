/*!
 * Single-slot clipboard for copy, cut and paste
 *
 * The clipboard only ever stages a detached copy of a node. It never touches
 * the tree: removing the original after a cut is a separate step owned by the
 * caller, so a declined or failed delete still leaves a usable entry behind.
 */

use std::fmt;

use crate::types::Node;

/// How the staged entry was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    Copy,
    Cut,
}

impl fmt::Display for ClipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipMode::Copy => write!(f, "Copied"),
            ClipMode::Cut => write!(f, "Cut"),
        }
    }
}

/// A staged node and the mode it was staged with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    node: Node,
    mode: ClipMode,
}

impl ClipboardEntry {
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn mode(&self) -> ClipMode {
        self.mode
    }
}

/// Holder for at most one staged node
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is staged with `node`
    ///
    /// `node` must be a detached copy, never something still in a tree.
    pub fn stage(&mut self, node: Node, mode: ClipMode) {
        self.entry = Some(ClipboardEntry { node, mode });
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// A new independent copy of the staged node
    ///
    /// Reading does not consume the entry, so every call hands out a separate
    /// copy.
    pub fn fresh_copy(&self) -> Option<Node> {
        self.entry.as_ref().map(|entry| entry.node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileNode;

    #[test]
    fn test_stage_replaces_previous_entry() {
        let mut clipboard = Clipboard::new();
        assert!(clipboard.is_empty());

        clipboard.stage(FileNode::new("a", "root", ".txt").into(), ClipMode::Copy);
        clipboard.stage(FileNode::new("b", "root", ".txt").into(), ClipMode::Cut);

        let entry = clipboard.entry().unwrap();
        assert_eq!(entry.node().name(), "b");
        assert_eq!(entry.mode(), ClipMode::Cut);
    }

    #[test]
    fn test_fresh_copy_is_independent() {
        let mut clipboard = Clipboard::new();
        let original: Node = FileNode::new("a", "root", ".txt").with_content("hi").into();
        clipboard.stage(original.clone(), ClipMode::Copy);

        let mut first = clipboard.fresh_copy().unwrap();
        first.as_file_mut().unwrap().content.push('!');
        let second = clipboard.fresh_copy().unwrap();

        assert_eq!(second.as_file().unwrap().content, "hi");
        assert_eq!(clipboard.entry().unwrap().node(), &original);
    }
}
