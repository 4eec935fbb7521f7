//! Shell command definitions and parsing

use std::str::FromStr;

use strum::{Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

use crate::error::{Result, VfshError};
use crate::utils::{split_tokens, trim};

/// Verbs understood by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display, EnumProperty)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    #[strum(props(
        usage = "cd <directory> | cd ..",
        help = "Navigate to a directory or its parent; a file name views the file"
    ))]
    Cd,

    #[strum(props(usage = "view <file_name>", help = "Display file content"))]
    View,

    #[strum(props(
        usage = "edit <file_name>",
        help = "Edit file content (:w or :save saves, :q or :quit asks, :q! discards)"
    ))]
    Edit,

    #[strum(props(usage = "delete <name>", help = "Delete a file or directory"))]
    Delete,

    #[strum(props(usage = "copy <name>", help = "Copy a file or directory"))]
    Copy,

    #[strum(props(
        usage = "cut <name>",
        help = "Copy a file or directory, then delete the original"
    ))]
    Cut,

    #[strum(props(usage = "paste", help = "Paste the clipboard into the current directory"))]
    Paste,

    #[strum(props(usage = "mkdir <directory_name>", help = "Create a new directory"))]
    Mkdir,

    #[strum(props(
        usage = "touch <file_name.extension>",
        help = "Create a new file with an optional extension"
    ))]
    Touch,

    #[strum(props(usage = "ls", help = "List the current directory"))]
    Ls,

    #[strum(props(usage = "pwd", help = "Print the current path"))]
    Pwd,

    #[strum(props(usage = "save", help = "Save the hierarchy and all files"))]
    Save,

    #[strum(props(usage = "help [command]", help = "Display available commands"))]
    Help,

    #[strum(props(usage = "exit", help = "Save and exit the file explorer"))]
    Exit,
}

impl Verb {
    pub fn usage(&self) -> &'static str {
        self.get_str("usage").unwrap_or("")
    }

    pub fn help(&self) -> &'static str {
        self.get_str("help").unwrap_or("")
    }

    /// Whether the verb needs a name argument
    pub fn takes_argument(&self) -> bool {
        matches!(
            self,
            Verb::Cd | Verb::View | Verb::Edit | Verb::Delete | Verb::Copy | Verb::Cut | Verb::Mkdir | Verb::Touch
        )
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
}

impl Command {
    /// Parse a raw command line; blank input yields `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = split_tokens(trim(line), ' ').into_iter();
        let Some(word) = tokens.next() else {
            return Ok(None);
        };

        let verb = Verb::from_str(&word)
            .map_err(|_| VfshError::InvalidArgument(format!("Unknown command: {}", word)))?;
        let command = Self {
            verb,
            args: tokens.collect(),
        };

        if verb.takes_argument() && command.args.is_empty() {
            return Err(VfshError::InvalidArgument(format!(
                "{} command requires an argument: {}",
                verb,
                verb.usage()
            )));
        }

        Ok(Some(command))
    }

    /// First argument, if any
    pub fn argument(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Help text for all commands or for one
pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        Some(name) => match Verb::from_str(name) {
            Ok(verb) => format!("{} - {}", verb.usage(), verb.help()),
            Err(_) => format!("No help available for '{}'", name),
        },
        None => {
            let mut text = String::from("Available commands:\n");
            for verb in Verb::iter() {
                text.push_str(&format!("  {}\n", verb.usage()));
            }
            text.push_str("\nType 'help <command>' for more details on a specific command.");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let cmd = Command::parse("  cd   Desktop ").unwrap().unwrap();
        assert_eq!(cmd.verb, Verb::Cd);
        assert_eq!(cmd.argument(), Some("Desktop"));

        let cmd = Command::parse("paste").unwrap().unwrap();
        assert_eq!(cmd.verb, Verb::Paste);
        assert!(cmd.args.is_empty());

        assert!(Command::parse("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_errors() {
        let err = Command::parse("rmdir x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: Unknown command: rmdir");

        let err = Command::parse("mkdir").unwrap_err();
        assert!(err.to_string().contains("mkdir <directory_name>"));
    }

    #[test]
    fn test_help_text() {
        let all = help_text(None);
        for verb in Verb::iter() {
            assert!(all.contains(verb.usage()));
        }
        assert_eq!(help_text(Some("paste")), "paste - Paste the clipboard into the current directory");
        assert_eq!(help_text(Some("ftp")), "No help available for 'ftp'");
    }
}
