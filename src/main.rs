/*!
 * Command-line interface for vfsh
 */

use std::io::{self, IsTerminal};

use clap::{CommandFactory, Parser};
use log::{debug, warn, LevelFilter};

use vfsh::config::{Args, Config};
use vfsh::explorer::Explorer;
use vfsh::prompt::{DialoguerPrompter, Prompter, UnattendedPrompter};
use vfsh::scanner::load_tree;
use vfsh::shell::Shell;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_shell<P: Prompter>(explorer: Explorer, config: Config, prompter: P) -> io::Result<()> {
    let mut shell = Shell::new(explorer, config, io::stdin().lock(), io::stdout(), prompter);
    shell.run()?;
    Ok(())
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "vfsh", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;
    debug!("configuration: {:?}", config);

    let explorer = match &config.load_dir {
        Some(dir) => Explorer::with_tree(load_tree(&config, dir)?, &config),
        None => {
            let mut explorer = Explorer::new(&config);
            if config.seed {
                explorer.initialize();
            }
            explorer
        }
    };

    // dialoguer needs a terminal; piped sessions get automatic answers
    if io::stdin().is_terminal() {
        run_shell(explorer, config, DialoguerPrompter::new())?;
    } else {
        warn!("stdin is not a terminal, confirmations will be declined");
        run_shell(explorer, config, UnattendedPrompter::new())?;
    }

    Ok(())
}
