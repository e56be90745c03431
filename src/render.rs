//! Markdown report and metadata rendering.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::{AttachmentInfo, SubTaskInfo, TaskInfo};
use crate::fields::MetaFormat;

/// Closes every block of the report.
pub const SEPARATOR: &str = "---";

/// Render the Markdown report for one task.
///
/// The attachment and sub-task sections are left out entirely when their lists are empty.
pub fn render_report(info: &TaskInfo, attachments: &[AttachmentInfo], sub_tasks: &[SubTaskInfo]) -> String {
    render_blocks(info, attachments, sub_tasks, true)
}

/// Render one task of a batch report.
///
/// Same blocks as [`render_report`] without sub-tasks, and the header block is not closed
/// by a rule: tasks in a batch are already divided by the batch separator.
pub fn render_batch_entry(info: &TaskInfo, attachments: &[AttachmentInfo]) -> String {
    render_blocks(info, attachments, &[], false)
}

fn render_blocks(
    info: &TaskInfo,
    attachments: &[AttachmentInfo],
    sub_tasks: &[SubTaskInfo],
    header_rule: bool,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Summary\n{}\n", info.summary));
    md.push_str(&format!("## Description\n{}\n", info.description));
    md.push_str("## Task Info\n");
    md.push_str(&format!("* Status: {}\n", info.status));
    md.push_str(&format!("* Updated: {}\n", info.updated));
    md.push_str(&format!("* Issuetype: {}\n", info.issuetype));
    md.push_str(&format!("## Labels\n{}\n", info.labels));
    md.push_str(&format!("## Market Affected Field Name\n{}\n", info.market_affected_field_name));
    md.push_str(&format!("## Acceptance Criteria Field Name\n{}\n", info.acceptance_criteria_field_name));
    if header_rule {
        md.push_str(SEPARATOR);
        md.push('\n');
    }

    if !attachments.is_empty() {
        md.push_str("## Attachment\n");
        for a in attachments {
            md.push_str(&format!(
                "{}\n* ID: {}\n* Created: {}\n* File Size: {}\n* Download URL: {}\n{SEPARATOR}\n",
                a.file_name, a.file_id, a.created, a.size, a.url
            ));
        }
    }

    if !sub_tasks.is_empty() {
        md.push_str("## Sub Tasks\n");
        for s in sub_tasks {
            md.push_str(&format!("{}\n* Key: {}\n* URL: {}\n{SEPARATOR}\n", s.summary, s.key, s.url));
        }
    }

    md
}

/// Descriptor stored next to a rendered report for downstream indexing.
///
/// Field order is the key order of the encoded record. Unset values encode as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    pub level: u32,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub file_record_id: Option<String>,
    pub file_original_name: Option<String>,
    pub file_original_path: Option<String>,
    pub source: Option<String>,
    pub value_stream: Option<String>,
    pub categories: Option<String>,
    pub parent_file_name: Option<String>,
    pub attachment_type: Option<String>,
    pub owner: Option<String>,
}

impl Default for MetaRecord {
    fn default() -> Self {
        MetaRecord {
            level: 0,
            title: None,
            file_name: None,
            file_record_id: None,
            file_original_name: None,
            file_original_path: None,
            source: None,
            value_stream: None,
            categories: None,
            parent_file_name: None,
            attachment_type: Some("file".to_string()),
            owner: None,
        }
    }
}

/// Encode a metadata record as JSON. Non-ASCII text is written as-is.
pub fn render_metadata(meta: &MetaRecord, format: MetaFormat) -> Result<String> {
    let text = match format {
        MetaFormat::Compact => serde_json::to_string(meta)?,
        MetaFormat::Pretty => serde_json::to_string_pretty(meta)?,
    };
    Ok(text)
}
