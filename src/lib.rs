/*!
 * vfsh - Virtual file-system shell
 *
 * This library models an in-memory tree of directories and files with a
 * cursor, a single-slot clipboard and persistence to a hierarchy listing
 * plus per-file contents.
 */

pub mod clipboard;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod explorer;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod shell;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use clipboard::{ClipMode, Clipboard};
pub use config::Config;
pub use error::{ErrorKind, Result, VfshError};
pub use explorer::{DeleteOutcome, Explorer, PasteOutcome};
pub use prompt::{ConflictChoice, DialoguerPrompter, Prompter, ScriptedPrompter, UnattendedPrompter};
pub use report::Reporter;
pub use scanner::{load_tree, Scanner};
pub use shell::Shell;
pub use tree::Tree;
pub use types::{DirectoryNode, FileNode, Node};
pub use writer::{ContentSink, DiskContentSink, HierarchySink, SaveReport, TreeWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
