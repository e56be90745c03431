//! # jmd - Jira export to Markdown
//!
//! Command-line front end of the `jira_md` library.
//!
//! ## Key Commands
//!
//! - `jmd convert [FILE]` - Markdown report of the main task with its sub-tasks
//! - `jmd issue [FILE]` - same, for a bare issue record
//! - `jmd batch [FILE]` - one report per issue, joined into a single document
//! - `jmd completions <SHELL>` - shell completion script
//!
//! `--part meta|key|all` selects the metadata record, the issue key, or everything as JSON.
//! Input is read from stdin when no file is given. Logs go to stderr (`-v`, `-vv`, `RUST_LOG`).

use clap::Parser;

pub mod cli;
pub mod cmd;

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();
    jira_md::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Convert { input, without_sub_tasks, meta, output } =>
            cmd_convert(input, without_sub_tasks, meta, output),

        Commands::Issue { input, meta, output } => cmd_issue(input, meta, output),

        Commands::Batch { input, since, meta, output } => cmd_batch(input, since, meta, output),

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
