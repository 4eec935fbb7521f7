/*!
 * Persistence for the vfsh tree
 *
 * Two outputs: a human-readable hierarchy listing and the content of every
 * file. Both go through small sink traits so the destination can be swapped.
 */

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::tree::{Tree, Visit};
use crate::types::{DIRECTORY_MARKER, FILE_MARKER};
use crate::utils::split_path;

/// Destination for hierarchy lines
pub trait HierarchySink {
    /// Write a single line, without terminator
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Called once after the last line
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl HierarchySink for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Hierarchy sink over any writer, one line per entry
pub struct LineWriterSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> LineWriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }
}

impl LineWriterSink<File> {
    /// Create (or truncate) a hierarchy file
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> HierarchySink for LineWriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Destination for file contents
pub trait ContentSink {
    /// Store `content` for the file at `full_path` (extension included)
    fn write_file(&mut self, full_path: &str, content: &str) -> io::Result<()>;
}

impl ContentSink for BTreeMap<String, String> {
    fn write_file(&mut self, full_path: &str, content: &str) -> io::Result<()> {
        self.insert(full_path.to_string(), content.to_string());
        Ok(())
    }
}

/// Content sink writing real files below a base directory
///
/// `root\Desktop\name.txt` lands in `<base>/root/Desktop/name.txt`.
#[derive(Debug, Clone)]
pub struct DiskContentSink {
    base_dir: PathBuf,
}

impl DiskContentSink {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// On-disk location for a full tree path
    ///
    /// Every segment must be a single plain file name, so the result always
    /// stays below the base directory.
    pub fn target_path(&self, full_path: &str) -> io::Result<PathBuf> {
        let mut path = self.base_dir.clone();
        for segment in split_path(full_path) {
            if !is_plain_name(&segment) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' cannot be stored as a file name", segment),
                ));
            }
            path.push(segment);
        }
        Ok(path)
    }
}

fn is_plain_name(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == segment
    )
}

impl ContentSink for DiskContentSink {
    fn write_file(&mut self, full_path: &str, content: &str) -> io::Result<()> {
        let target = self.target_path(full_path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)
    }
}

/// Result of a best-effort content save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Files written, by full path with extension
    pub saved: Vec<String>,
    /// Files that failed, with the reason
    pub failed: Vec<(String, String)>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Format one hierarchy line
pub fn hierarchy_line(depth: usize, visit: &Visit<'_>) -> String {
    let indent = " ".repeat(depth * 2);
    match visit {
        Visit::Directory(dir) => format!("{}{} {}", indent, DIRECTORY_MARKER, dir.name),
        Visit::File(file) => format!("{}{} {}", indent, FILE_MARKER, file.file_name()),
    }
}

/// Writer for the tree's persistent outputs
pub struct TreeWriter {
    /// Writer configuration
    config: Config,
}

impl TreeWriter {
    /// Create a new tree writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the pre-order hierarchy listing
    ///
    /// Stops at the first sink error. Returns the number of lines written.
    pub fn write_hierarchy<S: HierarchySink + ?Sized>(tree: &Tree, sink: &mut S) -> Result<usize> {
        let mut lines = 0;
        for (depth, visit) in tree.walk() {
            sink.write_line(&hierarchy_line(depth, &visit))?;
            lines += 1;
        }
        sink.finish()?;
        debug!("wrote {} hierarchy lines", lines);
        Ok(lines)
    }

    /// Write every file's content
    ///
    /// A failing file is recorded in the report and the traversal carries on.
    pub fn write_files<S: ContentSink + ?Sized>(tree: &Tree, sink: &mut S) -> SaveReport {
        let mut report = SaveReport::default();
        for file in tree.files() {
            let target = format!("{}{}", file.full_path(), file.extension);
            match sink.write_file(&target, &file.content) {
                Ok(()) => report.saved.push(target),
                Err(e) => {
                    warn!("Error: Could not save file {}: {}", target, e);
                    report.failed.push((target, e.to_string()));
                }
            }
        }
        report
    }

    /// Hierarchy sink for the configured hierarchy file
    pub fn hierarchy_sink(&self) -> io::Result<LineWriterSink<File>> {
        let path = self.config.hierarchy_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        LineWriterSink::create(&path)
    }

    /// Content sink rooted at the configured data directory
    pub fn content_sink(&self) -> DiskContentSink {
        DiskContentSink::new(&self.config.data_dir)
    }
}
