/*!
 * Utility functions for vfsh
 *
 * Name and path helpers shared by the tree, the explorer and command parsing.
 */

/// Separator used between the segments of a full path
pub const PATH_SEPARATOR: char = '\\';

/// Join a parent location and a name into a full path
///
/// An empty parent (or one that is just the separator) yields the bare name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() || parent == PATH_SEPARATOR.to_string() {
        return name.to_string();
    }
    format!("{}{}{}", parent, PATH_SEPARATOR, name)
}

/// Split a full path into its non-empty segments
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Byte offset of the dot that starts a name's extension
///
/// A leading dot (`.profile`) or a trailing dot (`notes.`) does not start an
/// extension.
fn extension_dot(name: &str) -> Option<usize> {
    match name.rfind('.') {
        Some(0) => None,
        Some(pos) if pos + 1 == name.len() => None,
        other => other,
    }
}

/// Split a name into base name and extension using the last dot
///
/// The returned extension includes the dot, or is `None` when the name has none.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match extension_dot(name) {
        Some(pos) => (&name[..pos], Some(&name[pos..])),
        None => (name, None),
    }
}

/// Normalize a configured extension so it always starts with a dot
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Trim surrounding whitespace from command text
pub fn trim(text: &str) -> &str {
    text.trim()
}

/// Split command text on a delimiter, trimming tokens and dropping empty ones
pub fn split_tokens(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a human-readable content size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
