/*!
 * Reporting functionality for vfsh
 *
 * Renders directory listings, file views and save summaries as text using
 * the tabled library for clean, consistent table rendering.
 */

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{DirectoryNode, FileNode, Node};
use crate::utils::format_file_size;
use crate::writer::SaveReport;

/// Renderer for explorer output
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    fn style(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    /// Numbered listing of a directory's children
    pub fn render_listing(&self, dir: &DirectoryNode) -> String {
        #[derive(Tabled)]
        struct EntryRow {
            #[tabled(rename = "#")]
            index: usize,

            #[tabled(rename = "Type")]
            marker: &'static str,

            #[tabled(rename = "Name")]
            name: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let header = format!("Current path: {}", dir.full_path());
        if dir.is_empty() {
            return format!("{}\n\n(empty)", header);
        }

        let rows: Vec<EntryRow> = dir
            .children()
            .iter()
            .enumerate()
            .map(|(i, node)| EntryRow {
                index: i + 1,
                marker: node.marker(),
                name: node.display_name(),
                size: match node {
                    Node::File(file) => format_file_size(file.size()),
                    Node::Directory(sub) => format!("{} items", sub.len()),
                },
            })
            .collect();

        format!("{}\n\nFiles and folders are:\n{}", header, Self::style(Table::new(rows)))
    }

    /// Framed view of a file's content
    pub fn render_file(&self, file: &FileNode) -> String {
        format!(
            "===== Content of {} =====\n{}\n=========== End of file ===========",
            file.file_name(),
            file.content.trim_end_matches('\n')
        )
    }

    /// Summary of a save: hierarchy lines plus per-file results
    pub fn render_save_report(&self, hierarchy_lines: usize, report: &SaveReport) -> String {
        #[derive(Tabled)]
        struct SaveRow {
            #[tabled(rename = "File")]
            path: String,

            #[tabled(rename = "Status")]
            status: String,
        }

        let mut rows: Vec<SaveRow> = report
            .saved
            .iter()
            .map(|path| SaveRow {
                path: path.clone(),
                status: "saved".to_string(),
            })
            .collect();
        rows.extend(report.failed.iter().map(|(path, reason)| SaveRow {
            path: path.clone(),
            status: format!("failed: {}", reason),
        }));

        let summary = format!(
            "Hierarchy: {} entries | Files saved: {} | Failed: {}",
            hierarchy_lines,
            report.saved.len(),
            report.failed.len()
        );

        if rows.is_empty() {
            return summary;
        }
        format!("{}\n{}", Self::style(Table::new(rows)), summary)
    }
}
