//! Field extraction and normalisation.
//!
//! Turns validated [`Issue`] records into the flat values the report template is filled
//! with: multi-line text is folded, label lists are joined and the two custom fields are
//! resolved to plain text.

use crate::error::Result;
use crate::issue::{Issue, IssueFields, SearchResult, SubIssue};

/// Flat, render-ready view of the main task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInfo {
    pub summary: String,
    pub description: String,
    pub status: String,
    pub updated: String,
    pub issuetype: String,
    pub labels: String,
    pub market_affected_field_name: String,
    pub acceptance_criteria_field_name: String,
}

/// One attachment block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentInfo {
    pub file_id: String,
    pub file_name: String,
    pub created: String,
    pub size: u64,
    pub url: String,
}

/// One sub-task block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTaskInfo {
    pub summary: String,
    pub key: String,
    pub url: String,
}

/// Everything extracted from one task, plus the identity of the issue it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub key: String,
    pub self_url: String,
    pub info: TaskInfo,
    pub attachments: Vec<AttachmentInfo>,
    pub sub_tasks: Vec<SubTaskInfo>,
}

/// Extract the main task of a search export together with its sub-tasks.
pub fn extract_document(doc: &SearchResult) -> Result<Extraction> {
    let main = doc.main_issue()?;
    let sub_tasks = doc.sub_issues()?.iter().map(sub_task_info).collect();
    let mut extraction = extract_issue(&main);
    extraction.sub_tasks = sub_tasks;
    Ok(extraction)
}

/// Extract a single issue record. The result never has sub-tasks.
pub fn extract_issue(issue: &Issue) -> Extraction {
    Extraction {
        key: issue.key.clone(),
        self_url: issue.self_url.clone(),
        info: task_info(&issue.fields),
        attachments: attachments(&issue.fields),
        sub_tasks: Vec::new(),
    }
}

/// Build the flat task view from an issue's fields.
pub fn task_info(fields: &IssueFields) -> TaskInfo {
    let acceptance_criteria_field_name = match fields.acceptance_criteria.as_deref() {
        Some(text) if !text.is_empty() => join_non_blank_lines(text, "\n"),
        _ => String::new(),
    };
    let market_affected_field_name = fields.first_market().unwrap_or_default().to_string();

    TaskInfo {
        summary: fields.summary.clone(),
        description: join_non_blank_lines(&fields.description, " "),
        status: fields.status.name.clone(),
        updated: fields.updated.clone(),
        issuetype: fields.issuetype.name.clone(),
        labels: fields.labels.join(", "),
        market_affected_field_name,
        acceptance_criteria_field_name,
    }
}

/// Map an issue's attachments to report blocks, keeping their order.
pub fn attachments(fields: &IssueFields) -> Vec<AttachmentInfo> {
    fields
        .attachment
        .iter()
        .flatten()
        .map(|a| AttachmentInfo {
            file_id: a.id.clone(),
            file_name: a.filename.clone(),
            created: a.created.clone(),
            size: a.size,
            url: a.content.clone(),
        })
        .collect()
}

/// Map a sub-issue to its report block.
pub fn sub_task_info(sub: &SubIssue) -> SubTaskInfo {
    SubTaskInfo {
        summary: sub.fields.summary.clone(),
        key: sub.key.clone(),
        url: sub.self_url.clone(),
    }
}

/// Split `text` into lines, drop blank ones and join the rest with `sep`.
///
/// A line is blank when it holds only whitespace or unit separators (`\x1f`).
pub fn join_non_blank_lines(text: &str, sep: &str) -> String {
    text.split(is_line_boundary)
        .filter(|line| !line.trim_matches(|c: char| c.is_whitespace() || c == '\x1f').is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

// `\r\n` splits twice; the empty piece between is blank and gets filtered.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Attachment, Named};
    use serde_json::json;

    fn fields() -> IssueFields {
        IssueFields {
            summary: "Checkout button".into(),
            description: "line1\n\nline2\n ".into(),
            status: Named { name: "In Progress".into() },
            updated: "2024-01-01T10:00:00.000+0800".into(),
            issuetype: Named { name: "Story".into() },
            labels: vec!["a".into(), "b".into()],
            acceptance_criteria: None,
            market_affected: None,
            attachment: None,
        }
    }

    #[test]
    fn test_labels_are_comma_joined() {
        assert_eq!(task_info(&fields()).labels, "a, b");
    }

    #[test]
    fn test_no_labels_is_empty() {
        let mut f = fields();
        f.labels.clear();
        assert_eq!(task_info(&f).labels, "");
    }

    #[test]
    fn test_description_folds_to_one_line() {
        assert_eq!(task_info(&fields()).description, "line1 line2");
    }

    #[test]
    fn test_description_handles_crlf_and_unicode_breaks() {
        assert_eq!(join_non_blank_lines("a\r\nb\rc\u{2028}d\x0c\te", " "), "a b c d \te");
    }

    #[test]
    fn test_unit_separator_only_lines_are_blank() {
        assert_eq!(join_non_blank_lines("a\n\x1f\n \x1f \nb\x1f", " "), "a b\x1f");
    }

    #[test]
    fn test_acceptance_criteria_keeps_line_breaks() {
        let mut f = fields();
        f.acceptance_criteria = Some("Given x\n\n  \nWhen y\r\nThen z\n".into());
        assert_eq!(task_info(&f).acceptance_criteria_field_name, "Given x\nWhen y\nThen z");
    }

    #[test]
    fn test_empty_acceptance_criteria() {
        let mut f = fields();
        f.acceptance_criteria = Some(String::new());
        assert_eq!(task_info(&f).acceptance_criteria_field_name, "");
        f.acceptance_criteria = None;
        assert_eq!(task_info(&f).acceptance_criteria_field_name, "");
    }

    #[test]
    fn test_market_affected_takes_first_value() {
        let mut f = fields();
        f.market_affected = Some(vec![json!({ "value": "HK" }), json!({ "value": "SG" })]);
        assert_eq!(task_info(&f).market_affected_field_name, "HK");
        f.market_affected = Some(Vec::new());
        assert_eq!(task_info(&f).market_affected_field_name, "");
    }

    #[test]
    fn test_attachments_keep_order() {
        let mut f = fields();
        f.attachment = Some(vec![
            Attachment {
                id: "1".into(),
                filename: "f.png".into(),
                created: "2024-01-01".into(),
                size: 100,
                content: "http://x".into(),
            },
            Attachment {
                id: "2".into(),
                filename: "g.pdf".into(),
                created: "2024-01-02".into(),
                size: 2048,
                content: "http://y".into(),
            },
        ]);
        let list = attachments(&f);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].file_id, "1");
        assert_eq!(list[0].url, "http://x");
        assert_eq!(list[1].file_name, "g.pdf");
        assert_eq!(list[1].size, 2048);
    }

    #[test]
    fn test_no_attachments() {
        assert!(attachments(&fields()).is_empty());
    }
}
