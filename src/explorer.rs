/*!
 * Explorer session over a virtual tree
 *
 * The explorer owns the tree, a cursor naming the current directory and the
 * clipboard. Every operation resolves names against the current directory.
 */

use std::path::MAIN_SEPARATOR;

use log::{debug, info};

use crate::clipboard::{ClipMode, Clipboard};
use crate::config::Config;
use crate::editor::{EditOutcome, FileEditor, LineSource};
use crate::error::{Result, VfshError};
use crate::prompt::{ConflictChoice, Prompter};
use crate::tree::Tree;
use crate::types::{DirectoryNode, FileNode, Node};
use crate::utils::{split_extension, PATH_SEPARATOR};
use crate::writer::{ContentSink, HierarchySink, SaveReport, TreeWriter};
use crate::{bail, ensure};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The named item was removed
    Deleted(String),
    /// The user declined
    Cancelled,
}

/// Result of a paste request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Pasted under the given name
    Pasted(String),
    /// Pasted after removing an existing item of the same name
    Replaced(String),
    /// The user cancelled on a name collision
    Cancelled,
}

/// Interactive file explorer state
#[derive(Debug, Clone)]
pub struct Explorer {
    tree: Tree,
    /// Directory names from the root down to the current directory
    cursor: Vec<String>,
    clipboard: Clipboard,
    default_extension: String,
}

fn check_name(name: &str) -> Result<()> {
    ensure!(!name.is_empty(), InvalidArgument, "name must not be empty");
    ensure!(
        name != "." && name != "..",
        InvalidArgument,
        "'{}' is reserved",
        name
    );
    ensure!(
        !name.contains([PATH_SEPARATOR, '/', MAIN_SEPARATOR]) && !name.contains(char::is_whitespace),
        InvalidArgument,
        "'{}' contains a separator or whitespace",
        name
    );
    Ok(())
}

/// Whether a child already saves to `<dir>/<stored>` on disk
fn stored_as(dir: &DirectoryNode, stored: &str) -> bool {
    dir.children().iter().any(|c| c.display_name() == stored)
}

impl Explorer {
    /// Create an explorer over an empty tree
    pub fn new(config: &Config) -> Self {
        Self::with_tree(Tree::new(), config)
    }

    /// Create an explorer over an existing tree, positioned at the root
    pub fn with_tree(tree: Tree, config: &Config) -> Self {
        Self {
            tree,
            cursor: Vec::new(),
            clipboard: Clipboard::new(),
            default_extension: config.default_extension.clone(),
        }
    }

    /// Populate the root with the sample directories and files
    pub fn initialize(&mut self) {
        let root = self.tree.root_mut();

        let mut desktop = DirectoryNode::new("Desktop", "");
        desktop.add_item(
            FileNode::new("name", "", ".txt")
                .with_content("This is a sample text file.")
                .into(),
        );

        let mut documents = DirectoryNode::new("Documents", "");
        documents.add_item(
            FileNode::new("hello", "", ".cpp")
                .with_content(
                    "#include <iostream>\nusing namespace std;\nint main() \n{\n    cout << \"Hello, World!\" << endl;\n    return 0;\n}",
                )
                .into(),
        );

        let mut downloads = DirectoryNode::new("Downloads", "");
        downloads.add_item(
            FileNode::new("numbers", "", ".txt")
                .with_content("0321-4567483\n0342-4563452\n0322-1345321\n0321-2233445\n0323-2345543")
                .into(),
        );

        let mut pictures = DirectoryNode::new("Pictures", "");
        pictures.add_item(
            FileNode::new("vacation", "", ".txt")
                .with_content("Beach photos from summer vacation")
                .into(),
        );

        for dir in [desktop, documents, downloads, pictures] {
            root.add_item(dir.into());
        }
        debug!("seeded sample tree with {} nodes", self.tree.node_count());
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Names of the directories between the root and the cursor
    pub fn cursor(&self) -> &[String] {
        &self.cursor
    }

    /// The directory the cursor points at
    ///
    /// Falls back to the root if the cursor no longer resolves.
    pub fn current_directory(&self) -> &DirectoryNode {
        self.tree.resolve(&self.cursor).unwrap_or_else(|| self.tree.root())
    }

    /// Children of the current directory, in insertion order
    pub fn list(&self) -> &[Node] {
        self.current_directory().children()
    }

    /// Full path of the current directory
    pub fn current_path(&self) -> String {
        self.current_directory().full_path()
    }

    pub fn is_at_root(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Mutable access to the current directory, repairing a stale cursor
    fn current_mut(&mut self) -> Result<&mut DirectoryNode> {
        if self.tree.resolve(&self.cursor).is_none() {
            debug!("cursor {:?} no longer resolves, resetting to root", self.cursor);
            self.cursor.clear();
        }
        self.tree
            .resolve_mut(&self.cursor)
            .ok_or_else(|| VfshError::Unexpected("current directory is unreachable".to_string()))
    }

    /// Move the cursor
    ///
    /// `..` goes to the parent and fails at the root. Any other target must
    /// be the exact name of a child directory.
    pub fn navigate(&mut self, target: &str) -> Result<()> {
        if target == ".." {
            ensure!(
                !self.is_at_root(),
                InvalidOperation,
                "already at the root directory"
            );
            self.cursor.pop();
            if self.tree.resolve(&self.cursor).is_none() {
                self.cursor.clear();
            }
            debug!("navigated up to {}", self.current_path());
            return Ok(());
        }

        if self.tree.resolve(&self.cursor).is_none() {
            self.cursor.clear();
        }
        if self.current_directory().find_directory(target).is_none() {
            bail!(NotFound, "{}", target);
        }
        self.cursor.push(target.to_string());
        debug!("navigated into {}", self.current_path());
        Ok(())
    }

    /// Look up a file in the current directory
    pub fn view_file(&self, name: &str) -> Result<&FileNode> {
        match self.current_directory().find_item(name) {
            Some(Node::File(file)) => Ok(file),
            Some(Node::Directory(_)) => bail!(InvalidOperation, "'{}' is a directory", name),
            None => bail!(NotFound, "{}", name),
        }
    }

    fn file_mut(&mut self, name: &str) -> Result<&mut FileNode> {
        match self.current_mut()?.find_item_mut(name) {
            Some(Node::File(file)) => Ok(file),
            Some(Node::Directory(_)) => bail!(InvalidOperation, "'{}' is a directory", name),
            None => bail!(NotFound, "{}", name),
        }
    }

    /// Replace a file's content
    pub fn write_file(&mut self, name: &str, content: impl Into<String>) -> Result<()> {
        self.file_mut(name)?.content = content.into();
        Ok(())
    }

    /// Run an editing session on a file
    pub fn edit_file<L, P>(&mut self, name: &str, input: &mut L, prompter: &mut P) -> Result<EditOutcome>
    where
        L: LineSource + ?Sized,
        P: Prompter + ?Sized,
    {
        let file = self.file_mut(name)?;
        FileEditor::new(file).edit(input, prompter)
    }

    /// Create an empty directory under the cursor
    pub fn create_directory(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        let dir = self.current_mut()?;
        ensure!(
            !dir.contains(name) && !stored_as(dir, name),
            AlreadyExists,
            "{}",
            name
        );
        dir.add_item(DirectoryNode::new(name, "").into());
        info!("Directory created: {}", name);
        Ok(())
    }

    /// Create an empty file under the cursor
    ///
    /// The last dot splits base name and extension; without one the default
    /// extension applies. Fails if anything already answers to the base name
    /// or a directory already carries the full file name.
    /// Returns the created file's name with extension.
    pub fn create_file(&mut self, name: &str) -> Result<String> {
        check_name(name)?;
        let file = FileNode::from_file_name(name, &self.default_extension);
        let dir = self.current_mut()?;
        let created = file.file_name();
        ensure!(
            dir.find_item(&file.name).is_none() && !stored_as(dir, &created),
            AlreadyExists,
            "{}",
            file.name
        );
        dir.add_item(file.into());
        info!("File created: {}", created);
        Ok(created)
    }

    /// Delete an item after confirmation
    pub fn delete_item<P: Prompter + ?Sized>(&mut self, name: &str, prompter: &mut P) -> Result<DeleteOutcome> {
        let Some(item) = self.current_directory().find_item(name) else {
            bail!(NotFound, "{}", name);
        };
        let exact = item.name().to_string();

        if !prompter.confirm(&format!("Are you sure you want to delete '{}'?", name))? {
            return Ok(DeleteOutcome::Cancelled);
        }

        ensure!(self.current_mut()?.remove_item(&exact), NotFound, "{}", name);
        info!("Deleted: {}", exact);
        Ok(DeleteOutcome::Deleted(exact))
    }

    fn stage(&mut self, name: &str, mode: ClipMode) -> Result<()> {
        let Some(item) = self.current_directory().find_item(name) else {
            bail!(NotFound, "{}", name);
        };
        let node = Tree::clone_node(item);
        self.clipboard.stage(node, mode);
        info!("{}: {}", mode, name);
        Ok(())
    }

    /// Stage a copy of an item
    pub fn copy_item(&mut self, name: &str) -> Result<()> {
        self.stage(name, ClipMode::Copy)
    }

    /// Stage a copy of an item for a move
    ///
    /// The original stays in place; removing it is a separate
    /// [`Explorer::delete_item`] call.
    pub fn cut_item(&mut self, name: &str) -> Result<()> {
        self.stage(name, ClipMode::Cut)
    }

    /// Paste a fresh copy of the clipboard into the current directory
    ///
    /// A name collision is resolved through the prompter: overwrite removes
    /// the existing item, rename retries with the new name, cancel leaves
    /// everything as it was. The clipboard keeps its entry either way.
    pub fn paste_item<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<PasteOutcome> {
        let Some(mut node) = self.clipboard.fresh_copy() else {
            bail!(InvalidOperation, "nothing to paste");
        };
        let mut replaced = false;

        loop {
            let name = node.name().to_string();
            if !self.current_directory().contains(&name) {
                break;
            }

            let prompt = format!("'{}' already exists. Overwrite, rename or cancel?", name);
            match prompter.choose_on_conflict(&prompt)? {
                ConflictChoice::Overwrite => {
                    self.current_mut()?.remove_item(&name);
                    replaced = true;
                }
                ConflictChoice::Rename(new_name) => {
                    check_name(&new_name)?;
                    rename(&mut node, &new_name);
                }
                ConflictChoice::Cancel => return Ok(PasteOutcome::Cancelled),
            }
        }

        let name = node.display_name();
        self.current_mut()?.add_item(node);
        info!("Pasted: {} into {}", name, self.current_path());

        Ok(if replaced {
            PasteOutcome::Replaced(name)
        } else {
            PasteOutcome::Pasted(name)
        })
    }

    /// Write the hierarchy listing to `sink`
    pub fn save_hierarchy<S: HierarchySink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        TreeWriter::write_hierarchy(&self.tree, sink)
    }

    /// Write every file's content to `sink`, best effort
    pub fn save_all_files<S: ContentSink + ?Sized>(&self, sink: &mut S) -> SaveReport {
        TreeWriter::write_files(&self.tree, sink)
    }
}

/// Rename a pasted node; a dotted name also changes a file's extension
fn rename(node: &mut Node, new_name: &str) {
    if let Node::File(file) = node {
        let (base, ext) = split_extension(new_name);
        file.name = base.to_string();
        if let Some(ext) = ext {
            file.extension = ext.to_string();
        }
        return;
    }
    node.set_name(new_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::prompt::ScriptedPrompter;

    fn explorer() -> Explorer {
        let mut explorer = Explorer::new(&Config::default());
        explorer.initialize();
        explorer
    }

    #[test]
    fn test_initialize_layout() {
        let explorer = explorer();
        let names: Vec<_> = explorer.list().iter().map(Node::name).collect();
        assert_eq!(names, vec!["Desktop", "Documents", "Downloads", "Pictures"]);
        assert_eq!(explorer.tree().node_count(), 9);
        let file = explorer.tree().resolve(&["Documents"]).unwrap().find_item("hello.cpp").unwrap();
        assert_eq!(file.full_path(), "root\\Documents\\hello");
    }

    #[test]
    fn test_navigate() {
        let mut explorer = explorer();
        let err = explorer.navigate("..").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(explorer.is_at_root());

        explorer.navigate("Desktop").unwrap();
        assert_eq!(explorer.current_path(), "root\\Desktop");

        // Files are never navigation targets
        assert_eq!(explorer.navigate("name.txt").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(explorer.navigate("name").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(explorer.current_path(), "root\\Desktop");

        explorer.navigate("..").unwrap();
        assert_eq!(explorer.current_path(), "root");
    }

    #[test]
    fn test_stale_cursor_falls_back_to_root() {
        let mut explorer = explorer();
        explorer.cursor = vec!["Gone".to_string(), "Deeper".to_string()];
        assert_eq!(explorer.current_path(), "root");

        explorer.navigate("..").unwrap();
        assert!(explorer.is_at_root());
    }

    #[test]
    fn test_create_directory_rejects_any_existing_name() {
        let mut explorer = explorer();
        explorer.create_directory("Reports").unwrap();
        assert_eq!(explorer.create_directory("Reports").unwrap_err().kind(), ErrorKind::AlreadyExists);

        explorer.create_file("plan.txt").unwrap();
        assert_eq!(explorer.create_directory("plan").unwrap_err().kind(), ErrorKind::AlreadyExists);
        assert!(explorer.create_directory("").is_err());
        assert!(explorer.create_directory("..").is_err());
    }

    #[test]
    fn test_create_file_extension_rules() {
        let mut explorer = explorer();
        assert_eq!(explorer.create_file("notes").unwrap(), "notes.txt");
        assert_eq!(explorer.create_file("main.rs").unwrap(), "main.rs");

        let err = explorer.create_file("notes.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        // A directory with the base name also blocks the file
        assert!(explorer.create_file("Desktop.txt").is_err());
    }

    #[test]
    fn test_names_with_os_separators_are_rejected() {
        let mut explorer = explorer();
        for name in ["/tmp/escaped", "../up", "a/b", "Desktop/"] {
            assert_eq!(explorer.create_file(name).unwrap_err().kind(), ErrorKind::Other, "{}", name);
            assert_eq!(explorer.create_directory(name).unwrap_err().kind(), ErrorKind::Other, "{}", name);
        }
        assert_eq!(explorer.list().len(), 4);

        explorer.copy_item("Desktop").unwrap();
        let mut prompter = ScriptedPrompter::new().choose(ConflictChoice::Rename("../Desktop".to_string()));
        let err = explorer.paste_item(&mut prompter).unwrap_err();
        assert!(err.to_string().contains("separator"));
        assert_eq!(explorer.list().len(), 4);
    }

    #[test]
    fn test_directory_and_file_cannot_share_a_disk_name() {
        let mut explorer = explorer();
        explorer.create_file("a.txt").unwrap();
        assert_eq!(explorer.create_directory("a.txt").unwrap_err().kind(), ErrorKind::AlreadyExists);

        explorer.create_directory("b.md").unwrap();
        assert_eq!(explorer.create_file("b.md").unwrap_err().kind(), ErrorKind::AlreadyExists);
        // A different extension stores elsewhere
        assert_eq!(explorer.create_file("b.txt").unwrap(), "b.txt");
    }

    #[test]
    fn test_view_and_write_file() {
        let mut explorer = explorer();
        explorer.navigate("Desktop").unwrap();
        assert_eq!(explorer.view_file("name").unwrap().content, "This is a sample text file.");

        explorer.write_file("name.txt", "rewritten").unwrap();
        assert_eq!(explorer.view_file("name.txt").unwrap().content, "rewritten");

        explorer.navigate("..").unwrap();
        assert_eq!(explorer.view_file("Desktop").unwrap_err().kind(), ErrorKind::InvalidOperation);
        assert_eq!(explorer.view_file("nope").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut explorer = explorer();
        let mut prompter = ScriptedPrompter::new().confirm_with(false).confirm_with(true);

        assert_eq!(
            explorer.delete_item("Pictures", &mut prompter).unwrap(),
            DeleteOutcome::Cancelled
        );
        assert!(explorer.current_directory().contains("Pictures"));

        assert_eq!(
            explorer.delete_item("Pictures", &mut prompter).unwrap(),
            DeleteOutcome::Deleted("Pictures".to_string())
        );
        assert!(!explorer.current_directory().contains("Pictures"));
        assert_eq!(explorer.tree().node_count(), 7);

        let err = explorer.delete_item("Pictures", &mut prompter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let mut explorer = explorer();
        let err = explorer.paste_item(&mut ScriptedPrompter::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_paste_directory_rederives_paths() {
        let mut explorer = explorer();
        explorer.copy_item("Desktop").unwrap();
        explorer.navigate("Documents").unwrap();

        let outcome = explorer.paste_item(&mut ScriptedPrompter::new()).unwrap();
        assert_eq!(outcome, PasteOutcome::Pasted("Desktop".to_string()));

        let pasted = explorer.tree().resolve(&["Documents", "Desktop"]).unwrap();
        assert_eq!(pasted.full_path(), "root\\Documents\\Desktop");
        assert_eq!(pasted.children()[0].full_path(), "root\\Documents\\Desktop\\name");
    }

    #[test]
    fn test_paste_collision_choices() {
        let mut explorer = explorer();
        explorer.navigate("Desktop").unwrap();
        explorer.copy_item("name").unwrap();
        explorer.write_file("name", "edited").unwrap();

        let mut prompter = ScriptedPrompter::new()
            .choose(ConflictChoice::Cancel)
            .choose(ConflictChoice::Rename("name".into()))
            .choose(ConflictChoice::Rename("other.md".into()))
            .choose(ConflictChoice::Overwrite);

        assert_eq!(explorer.paste_item(&mut prompter).unwrap(), PasteOutcome::Cancelled);
        assert_eq!(explorer.current_directory().len(), 1);
        assert!(!explorer.clipboard().is_empty());

        // Renaming to a taken name asks again
        assert_eq!(
            explorer.paste_item(&mut prompter).unwrap(),
            PasteOutcome::Pasted("other.md".to_string())
        );
        assert_eq!(explorer.view_file("other").unwrap().content, "This is a sample text file.");

        assert_eq!(
            explorer.paste_item(&mut prompter).unwrap(),
            PasteOutcome::Replaced("name.txt".to_string())
        );
        assert_eq!(explorer.view_file("name").unwrap().content, "This is a sample text file.");
        assert_eq!(explorer.current_directory().len(), 2);
    }

    #[test]
    fn test_paste_collision_across_types() {
        let mut explorer = explorer();
        explorer.navigate("Desktop").unwrap();
        explorer.create_directory("Pictures").unwrap();
        explorer.navigate("..").unwrap();
        explorer.copy_item("Pictures").unwrap();
        explorer.navigate("Desktop").unwrap();

        let mut prompter = ScriptedPrompter::new().choose(ConflictChoice::Overwrite);
        assert_eq!(
            explorer.paste_item(&mut prompter).unwrap(),
            PasteOutcome::Replaced("Pictures".to_string())
        );
        let pictures = explorer.current_directory().find_directory("Pictures").unwrap();
        assert_eq!(pictures.len(), 1);
    }

    #[test]
    fn test_edit_file() {
        let mut explorer = explorer();
        explorer.navigate("Downloads").unwrap();
        let mut input = std::io::Cursor::new("0300-0000000\n:w\n");
        let outcome = explorer
            .edit_file("numbers", &mut input, &mut ScriptedPrompter::new())
            .unwrap();
        assert_eq!(outcome, EditOutcome::Saved);
        assert_eq!(explorer.view_file("numbers").unwrap().content, "0300-0000000\n");
    }
}
