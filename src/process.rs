//! Orchestration: extract, render and describe one task, or every task of an export.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dates::updated_on_or_after;
use crate::error::{Error, Result};
use crate::extract::{extract_document, extract_issue, Extraction, SubTaskInfo};
use crate::fields::MetaFormat;
use crate::issue::{Issue, SearchResult};
use crate::render::{render_batch_entry, render_metadata, render_report, MetaRecord};

/// Provenance tag written into every metadata record unless overridden.
pub const DEFAULT_SOURCE: &str = "jira-iwpb";

/// Attachment type of a generated report.
pub const ATTACHMENT_TYPE_FILE: &str = "file";

/// Placed between task reports in a batch.
pub const BATCH_SEPARATOR: &str = "\n\n---\n\n";

/// Settings that shape the report and the metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Render the "Sub Tasks" section.
    pub include_sub_tasks: bool,
    pub source: String,
    pub value_stream: String,
    pub categories: String,
    pub owner: String,
    pub meta_format: MetaFormat,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            include_sub_tasks: true,
            source: DEFAULT_SOURCE.to_string(),
            value_stream: String::new(),
            categories: String::new(),
            owner: String::new(),
            meta_format: MetaFormat::Compact,
        }
    }
}

/// The outputs generated for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedTask {
    /// Markdown report.
    pub report: String,
    /// Encoded metadata record.
    pub metadata: String,
    /// Key of the issue the report was built from.
    pub key: String,
    pub record_id: Uuid,
    /// `<record_id>.md`
    pub file_name: String,
}

/// Convert a search export with default options.
pub fn run(doc: &SearchResult) -> Result<ProcessedTask> {
    process_document(doc, &ProcessOptions::default())
}

/// Convert the main task of a search export, listing the other issues as sub-tasks.
pub fn process_document(doc: &SearchResult, options: &ProcessOptions) -> Result<ProcessedTask> {
    let extraction = extract_document(doc)?;
    assemble(extraction, Uuid::new_v4(), 0, options)
}

/// Convert a bare issue record.
pub fn process_issue(issue: &Issue, options: &ProcessOptions) -> Result<ProcessedTask> {
    assemble(extract_issue(issue), Uuid::new_v4(), 0, options)
}

/// Build the metadata record for an extracted task.
pub fn meta_record(extraction: &Extraction, record_id: Uuid, level: u32, options: &ProcessOptions) -> MetaRecord {
    let file_name = md_file_name(record_id);
    MetaRecord {
        level,
        title: Some(extraction.info.summary.clone()),
        file_original_path: Some(format!("{}/{}", extraction.self_url, file_name)),
        file_name: Some(file_name),
        file_record_id: Some(record_id.to_string()),
        file_original_name: Some(extraction.info.summary.clone()),
        source: Some(options.source.clone()),
        value_stream: Some(options.value_stream.clone()),
        categories: Some(options.categories.clone()),
        parent_file_name: None,
        attachment_type: Some(ATTACHMENT_TYPE_FILE.to_string()),
        owner: Some(options.owner.clone()),
    }
}

fn md_file_name(record_id: Uuid) -> String {
    format!("{record_id}.md")
}

fn assemble(extraction: Extraction, record_id: Uuid, level: u32, options: &ProcessOptions) -> Result<ProcessedTask> {
    let sub_tasks: &[SubTaskInfo] = if options.include_sub_tasks { extraction.sub_tasks.as_slice() } else { &[] };
    // Level-1 tasks only come from batches.
    let report = match level {
        0 => render_report(&extraction.info, &extraction.attachments, sub_tasks),
        _ => render_batch_entry(&extraction.info, &extraction.attachments),
    };
    let meta = meta_record(&extraction, record_id, level, options);
    let metadata = render_metadata(&meta, options.meta_format)?;
    debug!(
        key = %extraction.key,
        attachments = extraction.attachments.len(),
        sub_tasks = sub_tasks.len(),
        "rendered task"
    );
    info!(key = %extraction.key, file = %md_file_name(record_id), "converted task");

    Ok(ProcessedTask {
        report,
        metadata,
        key: extraction.key,
        record_id,
        file_name: md_file_name(record_id),
    })
}

/// An issue a batch could not convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub key: String,
    pub message: String,
}

/// Result of converting every issue of an export on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// All task reports and error blocks, in input order.
    pub report: String,
    pub tasks: Vec<ProcessedTask>,
    pub failures: Vec<BatchFailure>,
    /// Issues left out by the `since` filter.
    pub skipped: usize,
}

/// Convert every issue of an export as an independent level-1 task.
///
/// An issue that fails validation becomes an error block in the combined report and does
/// not stop the batch. With `since`, issues last updated before that date are skipped;
/// issues whose timestamp cannot be read are kept.
pub fn process_batch(doc: &SearchResult, options: &ProcessOptions, since: Option<NaiveDate>) -> Result<BatchReport> {
    if doc.issues.is_empty() {
        return Err(Error::NoIssues);
    }

    let mut batch = BatchReport::default();
    for index in 0..doc.issues.len() {
        let issue = match doc.issue_at(index) {
            Ok(issue) => issue,
            Err(e) => {
                let key = doc.raw_key(index).to_string();
                warn!(index, key = %key, error = %e, "skipping invalid issue");
                push_block(&mut batch.report, &error_block(&key, &e.to_string()));
                batch.failures.push(BatchFailure { index, key, message: e.to_string() });
                continue;
            }
        };

        if let Some(since) = since {
            match updated_on_or_after(&issue.fields.updated, since) {
                Some(false) => {
                    debug!(key = %issue.key, updated = %issue.fields.updated, "older than --since, skipped");
                    batch.skipped += 1;
                    continue;
                }
                Some(true) => {}
                None => warn!(key = %issue.key, updated = %issue.fields.updated, "unreadable updated timestamp, keeping issue"),
            }
        }

        let task = assemble(extract_issue(&issue), Uuid::new_v4(), 1, options)?;
        push_block(&mut batch.report, &task.report);
        batch.tasks.push(task);
    }

    info!(
        converted = batch.tasks.len(),
        failed = batch.failures.len(),
        skipped = batch.skipped,
        "batch finished"
    );
    Ok(batch)
}

fn push_block(report: &mut String, block: &str) {
    if !report.is_empty() {
        report.push_str(BATCH_SEPARATOR);
    }
    report.push_str(block);
}

fn error_block(key: &str, message: &str) -> String {
    format!("# Error\nException occurred while processing task {key}: {message}\n")
}
