//! # jira_md - Jira export to Markdown
//!
//! Converts a Jira search export (one main task, optional sub-tasks and attachments) into a
//! human-readable Markdown report plus a JSON metadata record used for downstream indexing.
//!
//! ## Key Features
//!
//! - **Typed Input**: issues are validated against strongly-typed records; a missing field
//!   fails with the issue index and field path instead of a silent default
//! - **Fixed Report Template**: summary, description, task info, labels, custom fields,
//!   then optional attachment and sub-task sections
//! - **Metadata Records**: one fresh UUID per run names the report (`<uuid>.md`) and
//!   identifies its metadata record
//! - **Batch Mode**: convert every issue of an export on its own, with per-issue error
//!   isolation and an optional `--since` filter
//!
//! ## Quick Start
//!
//! ```bash
//! # Markdown report of the main task
//! jmd convert search.json
//!
//! # Metadata record only, pretty printed
//! curl -s "$JIRA/rest/api/2/search?jql=..." | jmd convert --part meta --pretty
//!
//! # Every issue, updated in the last week
//! jmd batch search.json --since 7d
//! ```
//!
//! ## Library
//!
//! ```no_run
//! use jira_md::{run, SearchResult};
//!
//! let doc = SearchResult::from_json(&std::fs::read_to_string("search.json")?)?;
//! let task = run(&doc)?;
//! println!("{} -> {}", task.key, task.file_name);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Nothing is written to disk: the report, the metadata and the issue key are returned to
//! the caller.

pub mod dates;
pub mod error;
pub mod extract;
pub mod fields;
pub mod issue;
pub mod logging;
pub mod process;
pub mod render;

pub use error::{Error, Result};
pub use extract::{extract_document, extract_issue, AttachmentInfo, Extraction, SubTaskInfo, TaskInfo};
pub use fields::{MetaFormat, OutputPart};
pub use issue::{Issue, SearchResult};
pub use process::{
    process_batch, process_document, process_issue, run, BatchFailure, BatchReport, ProcessOptions,
    ProcessedTask,
};
pub use render::{render_batch_entry, render_metadata, render_report, MetaRecord};
