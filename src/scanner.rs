/*!
 * Loading a tree from a real directory
 */

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, ResultExt, VfshError};
use crate::tree::Tree;
use crate::types::{DirectoryNode, FileNode, Node};
use crate::utils::PATH_SEPARATOR;

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerStatistics {
    /// Directories added to the tree
    pub directories: usize,
    /// Files added to the tree
    pub files: usize,
    /// Entries left out (symlinks, binary files, name clashes)
    pub skipped: usize,
}

/// Builds a [`Tree`] from the contents of a directory
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Scanner statistics
    statistics: ScannerStatistics,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self {
            config,
            statistics: ScannerStatistics::default(),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> &ScannerStatistics {
        &self.statistics
    }

    /// Scan `dir` and return a tree whose root holds its contents
    ///
    /// Entries are visited in name order. Symbolic links, non-UTF-8 files and
    /// entries whose names would clash inside the tree are skipped.
    pub fn scan(&mut self, dir: &Path) -> Result<Tree> {
        if !dir.is_dir() {
            return Err(VfshError::NotFound(dir.display().to_string()));
        }

        let mut tree = Tree::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error reading entry: {}", e);
                    self.statistics.skipped += 1;
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            let Some(cursor) = components(relative) else {
                warn!("Skipping {}: unsupported name", entry.path().display());
                self.statistics.skipped += 1;
                continue;
            };
            let Some((name, parent)) = cursor.split_last() else {
                continue;
            };

            let node = if entry.file_type().is_dir() {
                Node::Directory(DirectoryNode::new(name.as_str(), ""))
            } else if entry.file_type().is_file() {
                match self.read_file(entry.path(), name) {
                    Ok(file) => Node::File(file),
                    Err(e) => {
                        warn!("Skipping: {}", e);
                        self.statistics.skipped += 1;
                        continue;
                    }
                }
            } else {
                debug!("Skipping {}: not a regular file", entry.path().display());
                self.statistics.skipped += 1;
                continue;
            };

            self.attach(&mut tree, parent, node, entry.path());
        }

        Ok(tree)
    }

    fn read_file(&self, path: &Path, file_name: &str) -> Result<FileNode> {
        let content = fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        Ok(FileNode::from_file_name(file_name, &self.config.default_extension).with_content(content))
    }

    fn attach(&mut self, tree: &mut Tree, parent: &[String], node: Node, source: &Path) {
        let Some(dir) = tree.resolve_mut(parent) else {
            // The parent itself was skipped
            self.statistics.skipped += 1;
            return;
        };

        if dir.find_item(node.name()).is_some() {
            warn!(
                "Skipping {}: an item named '{}' already exists in {}",
                source.display(),
                node.name(),
                dir.full_path()
            );
            self.statistics.skipped += 1;
            return;
        }

        if node.is_directory() {
            self.statistics.directories += 1;
        } else {
            self.statistics.files += 1;
        }
        dir.add_item(node);
    }
}

/// Path components as tree names, `None` if one cannot be represented
fn components(relative: &Path) -> Option<Vec<String>> {
    relative
        .components()
        .map(|c| {
            let name = c.as_os_str().to_str()?;
            if name.is_empty() || name.contains(PATH_SEPARATOR) {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Scan a directory and log a summary of what was loaded
pub fn load_tree(config: &Config, dir: &Path) -> Result<Tree> {
    let mut scanner = Scanner::new(config.clone());
    let tree = scanner.scan(dir)?;
    let stats = scanner.get_statistics();
    info!(
        "Loaded {} directories and {} files from {} ({} skipped)",
        stats.directories,
        stats.files,
        dir.display(),
        stats.skipped
    );
    Ok(tree)
}
