/*!
 * Core types and data structures for the vfsh tree
 */

use crate::utils::{join_path, split_extension};

/// Marker shown in front of directories
pub const DIRECTORY_MARKER: &str = "📁";

/// Marker shown in front of files
pub const FILE_MARKER: &str = "📄";

/// Represents a file in the virtual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Base name, without extension
    pub name: String,
    /// Full path of the owning directory
    pub path: String,
    /// Extension including the dot, may be empty
    pub extension: String,
    /// File content
    pub content: String,
}

impl FileNode {
    /// Create an empty file
    pub fn new(name: impl Into<String>, path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            extension: extension.into(),
            content: String::new(),
        }
    }

    /// Build a file from a possibly dotted name
    ///
    /// The text after the last dot becomes the extension; a name without one
    /// gets `default_extension`.
    pub fn from_file_name(file_name: &str, default_extension: &str) -> Self {
        let (base, ext) = split_extension(file_name);
        Self::new(base, "", ext.unwrap_or(default_extension))
    }

    /// Replace the content, builder style
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Name including the extension
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    /// Full path of this file, without the extension
    pub fn full_path(&self) -> String {
        join_path(&self.path, &self.name)
    }

    /// Content size in bytes
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Represents a directory in the virtual tree
///
/// Children are kept in insertion order and are only attached through
/// [`DirectoryNode::add_item`], which keeps their `path` in sync.
#[derive(Debug, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Full path of the owning directory, empty for the root
    pub path: String,
    children: Vec<Node>,
}

impl DirectoryNode {
    /// Create an empty directory
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Full path of this directory
    pub fn full_path(&self) -> String {
        join_path(&self.path, &self.name)
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether a direct child has exactly this name
    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name() == name)
    }

    fn position(&self, token: &str) -> Option<usize> {
        if let Some(pos) = self.children.iter().position(|c| c.name() == token) {
            return Some(pos);
        }

        // Stripped-extension retry only ever matches files
        match split_extension(token) {
            (base, Some(_)) => self
                .children
                .iter()
                .position(|c| !c.is_directory() && c.name() == base),
            _ => None,
        }
    }

    /// Look up a direct child by name
    ///
    /// An exact name match wins. Otherwise a dotted token has its extension
    /// stripped and is matched against file children only, so `report.txt`
    /// and `report` both find the file `report`.
    pub fn find_item(&self, token: &str) -> Option<&Node> {
        self.position(token).map(|pos| &self.children[pos])
    }

    /// Mutable variant of [`DirectoryNode::find_item`]
    pub fn find_item_mut(&mut self, token: &str) -> Option<&mut Node> {
        self.position(token).map(move |pos| &mut self.children[pos])
    }

    /// Look up a child directory by exact name
    pub fn find_directory(&self, name: &str) -> Option<&DirectoryNode> {
        self.children.iter().find_map(|c| match c {
            Node::Directory(dir) if dir.name == name => Some(dir),
            _ => None,
        })
    }

    /// Mutable variant of [`DirectoryNode::find_directory`]
    pub fn find_directory_mut(&mut self, name: &str) -> Option<&mut DirectoryNode> {
        self.children.iter_mut().find_map(|c| match c {
            Node::Directory(dir) if dir.name == name => Some(dir),
            _ => None,
        })
    }

    /// Attach a node as the last child
    ///
    /// The node's path (and the paths of its whole subtree) are re-derived from
    /// this directory. Collisions are not checked here.
    pub fn add_item(&mut self, mut node: Node) {
        node.set_path(self.full_path());
        self.children.push(node);
    }

    /// Detach the child with exactly this name and hand it back
    pub fn take_item(&mut self, name: &str) -> Option<Node> {
        let pos = self.children.iter().position(|c| c.name() == name)?;
        Some(self.children.remove(pos))
    }

    /// Remove and drop the child with exactly this name
    ///
    /// Returns whether a child was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.take_item(name).is_some()
    }

    fn set_path(&mut self, path: String) {
        self.path = path;
        let full = self.full_path();
        for child in &mut self.children {
            child.set_path(full.clone());
        }
    }
}

impl Clone for DirectoryNode {
    fn clone(&self) -> Self {
        let mut copy = DirectoryNode::new(self.name.clone(), self.path.clone());
        for child in &self.children {
            copy.add_item(child.clone());
        }
        copy
    }
}

/// A node of the virtual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Directory node
    Directory(DirectoryNode),
    /// File node
    File(FileNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(file) => &file.path,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            Node::Directory(dir) => {
                dir.name = name;
                let path = dir.path.clone();
                dir.set_path(path);
            }
            Node::File(file) => file.name = name,
        }
    }

    /// Re-home this node (and its subtree) under `path`
    pub fn set_path(&mut self, path: String) {
        match self {
            Node::Directory(dir) => dir.set_path(path),
            Node::File(file) => file.path = path,
        }
    }

    pub fn full_path(&self) -> String {
        join_path(self.path(), self.name())
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Name as shown to users: files carry their extension
    pub fn display_name(&self) -> String {
        match self {
            Node::Directory(dir) => dir.name.clone(),
            Node::File(file) => file.file_name(),
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Node::Directory(_) => DIRECTORY_MARKER,
            Node::File(_) => FILE_MARKER,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    /// Number of nodes in this subtree, itself included
    pub fn count(&self) -> usize {
        match self {
            Node::Directory(dir) => 1 + dir.children.iter().map(Node::count).sum::<usize>(),
            Node::File(_) => 1,
        }
    }
}

impl From<FileNode> for Node {
    fn from(file: FileNode) -> Self {
        Node::File(file)
    }
}

impl From<DirectoryNode> for Node {
    fn from(dir: DirectoryNode) -> Self {
        Node::Directory(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectoryNode {
        let mut root = DirectoryNode::new("root", "");
        root.add_item(DirectoryNode::new("report.d", "").into());
        root.add_item(FileNode::new("report", "", ".txt").with_content("q3").into());
        root.add_item(DirectoryNode::new("docs", "").into());
        root
    }

    #[test]
    fn test_add_item_derives_path() {
        let mut root = sample();
        assert_eq!(root.children()[1].path(), "root");
        assert_eq!(root.children()[1].full_path(), "root\\report");

        let mut inner = DirectoryNode::new("inner", "somewhere\\else");
        inner.add_item(FileNode::new("a", "stale", ".txt").into());
        root.find_directory_mut("docs").unwrap().add_item(inner.into());

        let docs = root.find_directory("docs").unwrap();
        let inner = docs.find_directory("inner").unwrap();
        assert_eq!(inner.full_path(), "root\\docs\\inner");
        assert_eq!(inner.children()[0].path(), "root\\docs\\inner");
    }

    #[test]
    fn test_find_item_exact_and_stripped() {
        let root = sample();
        assert_eq!(root.find_item("report").unwrap().display_name(), "report.txt");
        assert_eq!(root.find_item("report.txt").unwrap().display_name(), "report.txt");
        // Exact match wins over the stripped retry
        assert!(root.find_item("report.d").unwrap().is_directory());
        assert!(root.find_item("docs.txt").is_none());
        assert!(root.find_item("missing").is_none());
    }

    #[test]
    fn test_stripped_token_never_matches_directory() {
        let mut dir = DirectoryNode::new("root", "");
        dir.add_item(DirectoryNode::new("report", "").into());
        assert!(dir.find_item("report.txt").is_none());
        assert!(dir.find_item("report").is_some());
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut root = sample();
        assert!(root.remove_item("report"));
        assert!(!root.remove_item("report"));
        let names: Vec<_> = root.children().iter().map(Node::name).collect();
        assert_eq!(names, vec!["report.d", "docs"]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut root = sample();
        let mut copy = root.clone();
        copy.find_item_mut("report").unwrap().as_file_mut().unwrap().content = "changed".into();
        assert_eq!(root.find_item("report").unwrap().as_file().unwrap().content, "q3");
        root.remove_item("docs");
        assert!(copy.contains("docs"));
    }

    #[test]
    fn test_set_name_rederives_subtree() {
        let mut dir = DirectoryNode::new("old", "root");
        dir.add_item(FileNode::new("a", "", ".txt").into());
        let mut node = Node::from(dir);
        node.set_name("new");
        let dir = node.as_directory().unwrap();
        assert_eq!(dir.children()[0].full_path(), "root\\new\\a");
    }

    #[test]
    fn test_from_file_name() {
        let file = FileNode::from_file_name("notes", ".txt");
        assert_eq!((file.name.as_str(), file.extension.as_str()), ("notes", ".txt"));
        let file = FileNode::from_file_name("main.cpp", ".txt");
        assert_eq!((file.name.as_str(), file.extension.as_str()), ("main", ".cpp"));
    }

    #[test]
    fn test_count() {
        assert_eq!(Node::from(sample()).count(), 4);
    }
}
