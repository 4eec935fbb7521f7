/*!
 * Read-eval loop binding shell commands to the explorer
 *
 * The shell owns its input, output and prompter so it can run against the
 * terminal or against in-memory buffers. Command input doubles as the
 * editor's line source while `edit` is running.
 */

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::command::{help_text, Command, Verb};
use crate::config::Config;
use crate::editor::{EditOutcome, LineSource};
use crate::error::{ErrorKind, Result};
use crate::explorer::{DeleteOutcome, Explorer, PasteOutcome};
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::writer::TreeWriter;
use crate::bail;

/// Interactive shell over an [`Explorer`]
pub struct Shell<R: BufRead, W: Write, P: Prompter> {
    explorer: Explorer,
    config: Config,
    input: R,
    output: W,
    prompter: P,
    reporter: Reporter,
    running: bool,
}

impl<R: BufRead, W: Write, P: Prompter> Shell<R, W, P> {
    pub fn new(explorer: Explorer, config: Config, input: R, output: W, prompter: P) -> Self {
        Self {
            explorer,
            config,
            input,
            output,
            prompter,
            reporter: Reporter::new(),
            running: true,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hand back the output, mostly for inspecting captured buffers
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "===== Virtual File Explorer =====")?;
        writeln!(self.output, "Type 'help' for a list of commands.")?;
        self.show_listing()?;

        while self.running {
            write!(self.output, "\n{}> ", self.explorer.current_path())?;
            self.output.flush()?;

            let Some(line) = self.input.next_line()? else {
                debug!("end of input, leaving the shell");
                break;
            };
            self.process_line(&line)?;
        }
        Ok(())
    }

    /// Execute one command line
    ///
    /// Command failures are reported on the output. Only a failure to write
    /// that output is returned.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                writeln!(self.output, "Type 'help' for a list of commands.")?;
                return Ok(());
            }
        };

        debug!("executing {:?}", command);
        if let Err(e) = self.execute(&command) {
            if e.kind() == ErrorKind::Io {
                warn!("{} failed: {}", command.verb, e);
            }
            writeln!(self.output, "Error: {}", e)?;
        }

        if self.running && command.verb != Verb::Ls {
            self.show_listing()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: &Command) -> Result<()> {
        let arg = command.argument().unwrap_or_default();
        match command.verb {
            Verb::Cd => self.change_directory(arg),
            Verb::View => self.view(arg),
            Verb::Edit => self.edit(arg),
            Verb::Delete => self.delete(arg),
            Verb::Copy => {
                self.explorer.copy_item(arg)?;
                writeln!(self.output, "Copied: {}", arg)?;
                Ok(())
            }
            Verb::Cut => self.cut(arg),
            Verb::Paste => self.paste(),
            Verb::Mkdir => {
                self.explorer.create_directory(arg)?;
                writeln!(self.output, "Directory created: {}", arg)?;
                Ok(())
            }
            Verb::Touch => {
                let created = self.explorer.create_file(arg)?;
                writeln!(self.output, "File created: {}", created)?;
                Ok(())
            }
            Verb::Ls => self.show_listing(),
            Verb::Pwd => {
                writeln!(self.output, "{}", self.explorer.current_path())?;
                Ok(())
            }
            Verb::Save => self.save(),
            Verb::Help => {
                writeln!(self.output, "{}", help_text(command.argument()))?;
                Ok(())
            }
            Verb::Exit => self.exit(),
        }
    }

    fn show_listing(&mut self) -> Result<()> {
        let listing = self.reporter.render_listing(self.explorer.current_directory());
        writeln!(self.output, "\n{}", listing)?;
        Ok(())
    }

    fn change_directory(&mut self, target: &str) -> Result<()> {
        if target == ".." {
            return self.explorer.navigate(target);
        }
        if self.explorer.navigate(target).is_ok() {
            return Ok(());
        }
        match self.explorer.view_file(target) {
            Ok(file) => {
                writeln!(self.output, "{}", self.reporter.render_file(file))?;
                Ok(())
            }
            Err(_) => bail!(InvalidArgument, "'{}' is not a valid directory or file", target),
        }
    }

    fn view(&mut self, name: &str) -> Result<()> {
        let file = self.explorer.view_file(name)?;
        writeln!(self.output, "{}", self.reporter.render_file(file))?;
        Ok(())
    }

    fn edit(&mut self, name: &str) -> Result<()> {
        // Fail before printing instructions for a missing file
        self.explorer.view_file(name)?;
        writeln!(
            self.output,
            "Editing {} (:w or :save to save, :q or :quit to quit, :q! to discard)",
            name
        )?;
        self.output.flush()?;

        match self.explorer.edit_file(name, &mut self.input, &mut self.prompter)? {
            EditOutcome::Saved => writeln!(self.output, "File saved.")?,
            EditOutcome::Discarded => writeln!(self.output, "Changes discarded.")?,
        }
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        match self.explorer.delete_item(name, &mut self.prompter)? {
            DeleteOutcome::Deleted(deleted) => writeln!(self.output, "Deleted: {}", deleted)?,
            DeleteOutcome::Cancelled => writeln!(self.output, "Delete cancelled.")?,
        }
        Ok(())
    }

    fn cut(&mut self, name: &str) -> Result<()> {
        self.explorer.cut_item(name)?;
        writeln!(self.output, "Cut: {}", name)?;

        match self.explorer.delete_item(name, &mut self.prompter)? {
            DeleteOutcome::Deleted(deleted) => writeln!(self.output, "Deleted: {}", deleted)?,
            DeleteOutcome::Cancelled => writeln!(
                self.output,
                "Delete cancelled. '{}' stays in place and is still on the clipboard.",
                name
            )?,
        }
        Ok(())
    }

    fn paste(&mut self) -> Result<()> {
        match self.explorer.paste_item(&mut self.prompter)? {
            PasteOutcome::Pasted(name) => writeln!(self.output, "Pasted: {}", name)?,
            PasteOutcome::Replaced(name) => writeln!(self.output, "Replaced: {}", name)?,
            PasteOutcome::Cancelled => writeln!(self.output, "Paste cancelled.")?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let writer = TreeWriter::new(self.config.clone());
        let lines = self.explorer.save_hierarchy(&mut writer.hierarchy_sink()?)?;
        let report = self.explorer.save_all_files(&mut writer.content_sink());
        info!(
            "saved {} hierarchy lines and {} files to {}",
            lines,
            report.saved.len(),
            self.config.data_dir.display()
        );

        writeln!(self.output, "{}", self.reporter.render_save_report(lines, &report))?;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.running = false;
        if self.config.save_on_exit {
            self.save()?;
        }
        writeln!(self.output, "Exiting file explorer...")?;
        Ok(())
    }
}
