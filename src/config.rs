/*!
 * Configuration handling for vfsh
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::{Result, VfshError};
use crate::utils::normalize_extension;

/// Extension given to files created without one
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Command-line arguments for vfsh
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "vfsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive shell over a virtual file-system tree",
    long_about = "Browse and edit an in-memory tree of directories and files with cd, view, edit, mkdir, touch, copy, cut and paste, then persist it as a hierarchy listing plus real files."
)]
pub struct Args {
    /// Directory that receives file contents on save
    #[clap(long, default_value = ".")]
    pub data_dir: String,

    /// Hierarchy listing file (relative paths are resolved against --data-dir)
    #[clap(long, default_value = "hierarchy.txt")]
    pub hierarchy_file: String,

    /// Extension for files created without one
    #[clap(long, default_value = DEFAULT_EXTENSION)]
    pub default_extension: String,

    /// Load the tree from an existing directory instead of the sample data
    #[clap(long, value_name = "DIR")]
    pub load: Option<String>,

    /// Start with an empty root
    #[clap(long, conflicts_with = "load")]
    pub empty: bool,

    /// Do not save hierarchy and files on exit
    #[clap(long)]
    pub no_save_on_exit: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory that receives file contents
    pub data_dir: PathBuf,

    /// Hierarchy listing file as given
    pub hierarchy_file: PathBuf,

    /// Extension for files created without one
    pub default_extension: String,

    /// Directory to load the tree from
    pub load_dir: Option<PathBuf>,

    /// Whether to populate the sample tree
    pub seed: bool,

    /// Whether `exit` saves everything
    pub save_on_exit: bool,

    /// Debug logging
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            hierarchy_file: PathBuf::from("hierarchy.txt"),
            default_extension: DEFAULT_EXTENSION.to_string(),
            load_dir: None,
            seed: true,
            save_on_exit: true,
            verbose: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            data_dir: PathBuf::from(args.data_dir),
            hierarchy_file: PathBuf::from(args.hierarchy_file),
            default_extension: normalize_extension(&args.default_extension),
            load_dir: args.load.map(PathBuf::from),
            seed: !args.empty,
            save_on_exit: !args.no_save_on_exit,
            verbose: args.verbose,
        }
    }

    /// Location of the hierarchy listing
    pub fn hierarchy_path(&self) -> PathBuf {
        if self.hierarchy_file.is_absolute() {
            self.hierarchy_file.clone()
        } else {
            self.data_dir.join(&self.hierarchy_file)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.load_dir {
            if !dir.is_dir() {
                return Err(VfshError::Config(format!(
                    "Load directory not found: {}",
                    dir.display()
                )));
            }
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(VfshError::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        let ext = &self.default_extension;
        if ext.len() < 2 || !ext.starts_with('.') || ext[1..].contains(['.', '\\', '/']) {
            return Err(VfshError::Config(format!(
                "Invalid default extension: '{}'",
                ext
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_args() {
        let args = Args::parse_from([
            "vfsh",
            "--data-dir",
            "/tmp/out",
            "--default-extension",
            "md",
            "--empty",
            "--no-save-on-exit",
        ]);
        let config = Config::from_args(args);
        assert_eq!(config.default_extension, ".md");
        assert!(!config.seed);
        assert!(!config.save_on_exit);
        assert_eq!(config.hierarchy_path(), PathBuf::from("/tmp/out/hierarchy.txt"));
    }

    #[test]
    fn test_load_conflicts_with_empty() {
        assert!(Args::try_parse_from(["vfsh", "--load", "x", "--empty"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        let mut config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.default_extension = ".".to_string();
        assert!(config.validate().is_err());

        config.default_extension = ".txt".to_string();
        config.load_dir = Some(dir.path().join("missing"));
        assert!(matches!(config.validate(), Err(VfshError::Config(_))));
    }
}
