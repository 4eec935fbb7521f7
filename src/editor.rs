/*!
 * Line-oriented file editor
 *
 * Lines are collected into a buffer until one of the editor commands:
 * `:w` / `:save` keeps the buffer, `:q` / `:quit` asks whether to keep it and
 * `:q!` / `:quit!` throws it away. Running out of input discards the buffer.
 */

use std::io::BufRead;

use log::debug;

use crate::error::Result;
use crate::prompt::Prompter;
use crate::types::FileNode;

/// Something that yields lines of text one at a time
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of input
    fn next_line(&mut self) -> Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// How an editing session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer replaced the file content
    Saved,
    /// The file content was left untouched
    Discarded,
}

enum EditorCommand {
    Save,
    Quit,
    ForceQuit,
}

impl EditorCommand {
    fn parse(line: &str) -> Option<Self> {
        match line {
            ":w" | ":save" => Some(Self::Save),
            ":q" | ":quit" => Some(Self::Quit),
            ":q!" | ":quit!" => Some(Self::ForceQuit),
            _ => None,
        }
    }
}

/// Editing session over a single file
pub struct FileEditor<'a> {
    file: &'a mut FileNode,
}

impl<'a> FileEditor<'a> {
    pub fn new(file: &'a mut FileNode) -> Self {
        Self { file }
    }

    /// Read lines from `input` until an editor command ends the session
    pub fn edit<L, P>(&mut self, input: &mut L, prompter: &mut P) -> Result<EditOutcome>
    where
        L: LineSource + ?Sized,
        P: Prompter + ?Sized,
    {
        let mut buffer = String::new();

        while let Some(line) = input.next_line()? {
            let keep = match EditorCommand::parse(line.trim()) {
                Some(EditorCommand::Save) => true,
                Some(EditorCommand::Quit) => prompter.confirm("Save changes?")?,
                Some(EditorCommand::ForceQuit) => false,
                None => {
                    buffer.push_str(&line);
                    buffer.push('\n');
                    continue;
                }
            };
            return Ok(self.finish(buffer, keep));
        }

        Ok(self.finish(buffer, false))
    }

    fn finish(&mut self, buffer: String, keep: bool) -> EditOutcome {
        if keep {
            debug!("saving {} bytes into {}", buffer.len(), self.file.file_name());
            self.file.content = buffer;
            EditOutcome::Saved
        } else {
            EditOutcome::Discarded
        }
    }
}
