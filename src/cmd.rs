//! Command implementations for the CLI interface.
//!
//! Every command reads one JSON document, runs it through the library and prints the
//! requested output to stdout. Nothing is written to disk.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use clap_complete::{generate, Shell};
use serde_json::{json, Value};
use tracing::debug;

use jira_md::dates::parse_since_input;
use jira_md::fields::format_part;
use jira_md::process::DEFAULT_SOURCE;
use jira_md::{
    process_batch, process_document, process_issue, BatchReport, Issue, MetaFormat, OutputPart, ProcessOptions,
    ProcessedTask, Result, SearchResult,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the main task of a search export; other issues become its sub-tasks.
    Convert {
        /// Search export JSON file. Reads stdin when omitted or "-".
        input: Option<PathBuf>,
        /// Leave the "Sub Tasks" section out of the report.
        #[arg(long)]
        without_sub_tasks: bool,
        #[command(flatten)]
        meta: MetaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert a single issue record (not wrapped in a search export).
    Issue {
        /// Issue JSON file. Reads stdin when omitted or "-".
        input: Option<PathBuf>,
        #[command(flatten)]
        meta: MetaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Convert every issue of a search export on its own.
    Batch {
        /// Search export JSON file. Reads stdin when omitted or "-".
        input: Option<PathBuf>,
        /// Only issues updated on or after: YYYY-MM-DD, "today", "yesterday", "Nd" or "Nw".
        #[arg(long, value_parser = parse_since_arg)]
        since: Option<NaiveDate>,
        #[command(flatten)]
        meta: MetaArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Values written into the metadata record.
#[derive(Args, Clone, Debug)]
pub struct MetaArgs {
    /// Provenance tag.
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,
    /// Owner of the generated record.
    #[arg(long)]
    pub owner: Option<String>,
    /// Value stream classification.
    #[arg(long)]
    pub value_stream: Option<String>,
    /// Category classification.
    #[arg(long)]
    pub categories: Option<String>,
}

/// What to print and how.
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output to print: report | meta | key | all.
    #[arg(long, value_enum, default_value_t = OutputPart::Report)]
    pub part: OutputPart,
    /// Indent JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl MetaArgs {
    /// Build library options from the command line values.
    pub fn to_options(&self, include_sub_tasks: bool, pretty: bool) -> ProcessOptions {
        ProcessOptions {
            include_sub_tasks,
            source: self.source.clone(),
            value_stream: self.value_stream.clone().unwrap_or_default(),
            categories: self.categories.clone().unwrap_or_default(),
            owner: self.owner.clone().unwrap_or_default(),
            meta_format: if pretty { MetaFormat::Pretty } else { MetaFormat::Compact },
        }
    }
}

fn parse_since_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    parse_since_input(s, today).ok_or_else(|| format!("unrecognised date '{s}'"))
}

/// Read the whole input document from a file, or from stdin for `None` and `-`.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text)
}

/// Convert a search export and print the requested output.
pub fn cmd_convert(input: Option<PathBuf>, without_sub_tasks: bool, meta: MetaArgs, output: OutputArgs) -> Result<()> {
    let doc = SearchResult::from_json(&read_input(input.as_deref())?)?;
    let options = meta.to_options(!without_sub_tasks, output.pretty);
    let task = process_document(&doc, &options)?;
    print_task(&task, &output)
}

/// Convert a bare issue record and print the requested output.
pub fn cmd_issue(input: Option<PathBuf>, meta: MetaArgs, output: OutputArgs) -> Result<()> {
    let issue = Issue::from_json(&read_input(input.as_deref())?)?;
    let options = meta.to_options(false, output.pretty);
    let task = process_issue(&issue, &options)?;
    print_task(&task, &output)
}

/// Convert every issue of a search export and print the requested output.
pub fn cmd_batch(input: Option<PathBuf>, since: Option<NaiveDate>, meta: MetaArgs, output: OutputArgs) -> Result<()> {
    let doc = SearchResult::from_json(&read_input(input.as_deref())?)?;
    let options = meta.to_options(false, output.pretty);
    let batch = process_batch(&doc, &options, since)?;
    print_batch(&batch, &output)
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn print_task(task: &ProcessedTask, output: &OutputArgs) -> Result<()> {
    debug!(part = format_part(output.part), key = %task.key, "printing");
    match output.part {
        OutputPart::Report => print!("{}", task.report),
        OutputPart::Meta => println!("{}", task.metadata),
        OutputPart::Key => println!("{}", task.key),
        OutputPart::All => println!("{}", to_json(&task_envelope(task)?, output.pretty)?),
    }
    Ok(())
}

fn print_batch(batch: &BatchReport, output: &OutputArgs) -> Result<()> {
    debug!(part = format_part(output.part), tasks = batch.tasks.len(), "printing");
    match output.part {
        OutputPart::Report => print!("{}", batch.report),
        OutputPart::Meta => batch.tasks.iter().for_each(|t| println!("{}", t.metadata)),
        OutputPart::Key => batch.tasks.iter().for_each(|t| println!("{}", t.key)),
        OutputPart::All => {
            let tasks = batch.tasks.iter().map(task_envelope).collect::<Result<Vec<_>>>()?;
            let failures: Vec<Value> = batch
                .failures
                .iter()
                .map(|f| json!({ "index": f.index, "key": f.key, "message": f.message }))
                .collect();
            let value = json!({ "tasks": tasks, "failures": failures, "skipped": batch.skipped });
            println!("{}", to_json(&value, output.pretty)?);
        }
    }
    Ok(())
}

/// All outputs of one task as a single JSON object.
fn task_envelope(task: &ProcessedTask) -> Result<Value> {
    let metadata: Value = serde_json::from_str(&task.metadata)?;
    Ok(json!({
        "key": task.key,
        "file_name": task.file_name,
        "record_id": task.record_id.to_string(),
        "report": task.report,
        "metadata": metadata,
    }))
}

fn to_json(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(text)
}
