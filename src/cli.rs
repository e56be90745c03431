use clap::Parser;

use crate::cmd::Commands;

/// Jira export to Markdown converter.
/// Reads a search export from a file or stdin and prints the generated outputs.
#[derive(Parser)]
#[command(name = "jmd", version, about = "Convert Jira exports into Markdown reports")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}
