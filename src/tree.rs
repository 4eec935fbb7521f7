/*!
 * The virtual tree: root ownership, cursor resolution and traversal
 */

use log::debug;

use crate::types::{DirectoryNode, FileNode, Node};

/// Name given to the root directory
pub const ROOT_NAME: &str = "root";

/// A node reached during traversal
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    Directory(&'a DirectoryNode),
    File(&'a FileNode),
}

impl<'a> Visit<'a> {
    fn of(node: &'a Node) -> Self {
        match node {
            Node::Directory(dir) => Visit::Directory(dir),
            Node::File(file) => Visit::File(file),
        }
    }
}

/// Owner of the root directory
///
/// Directories are addressed by a cursor: the names of the directories to
/// descend through, starting below the root. An empty cursor is the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: DirectoryNode,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree with an empty root
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::new(ROOT_NAME, ""),
        }
    }

    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut DirectoryNode {
        &mut self.root
    }

    /// Resolve a cursor to the directory it names
    pub fn resolve<S: AsRef<str>>(&self, cursor: &[S]) -> Option<&DirectoryNode> {
        let mut dir = &self.root;
        for name in cursor {
            dir = dir.find_directory(name.as_ref())?;
        }
        Some(dir)
    }

    /// Mutable variant of [`Tree::resolve`]
    pub fn resolve_mut<S: AsRef<str>>(&mut self, cursor: &[S]) -> Option<&mut DirectoryNode> {
        let mut dir = &mut self.root;
        for name in cursor {
            dir = dir.find_directory_mut(name.as_ref())?;
        }
        Some(dir)
    }

    /// Attach `node` under the directory named by `cursor`
    ///
    /// Returns the node back when the cursor does not resolve.
    pub fn insert<S: AsRef<str>>(&mut self, cursor: &[S], node: Node) -> Result<(), Node> {
        match self.resolve_mut(cursor) {
            Some(dir) => {
                debug!("attaching '{}' under {}", node.name(), dir.full_path());
                dir.add_item(node);
                Ok(())
            }
            None => Err(node),
        }
    }

    /// Remove the child `name` of the directory named by `cursor`
    pub fn remove<S: AsRef<str>>(&mut self, cursor: &[S], name: &str) -> bool {
        let removed = self
            .resolve_mut(cursor)
            .map(|dir| dir.remove_item(name))
            .unwrap_or(false);
        if removed {
            debug!("removed '{}'", name);
        }
        removed
    }

    /// Deep copy of a node, detached from any tree
    ///
    /// Paths inside the copy are derived from the copy's own structure and are
    /// re-derived again when it is attached somewhere.
    pub fn clone_node(node: &Node) -> Node {
        node.clone()
    }

    /// Depth-first pre-order traversal starting at the root (depth 0)
    pub fn walk(&self) -> Vec<(usize, Visit<'_>)> {
        let mut visits = Vec::new();
        let mut stack: Vec<(usize, Visit<'_>)> = vec![(0, Visit::Directory(&self.root))];

        while let Some((depth, visit)) = stack.pop() {
            if let Visit::Directory(dir) = visit {
                for child in dir.children().iter().rev() {
                    stack.push((depth + 1, Visit::of(child)));
                }
            }
            visits.push((depth, visit));
        }

        visits
    }

    /// Every file in pre-order
    pub fn files(&self) -> impl Iterator<Item = &FileNode> + '_ {
        self.walk().into_iter().filter_map(|(_, visit)| match visit {
            Visit::File(file) => Some(file),
            Visit::Directory(_) => None,
        })
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        1 + self.root.children().iter().map(Node::count).sum::<usize>()
    }
}
