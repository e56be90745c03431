//! Jira issue records as they appear in a search export.
//!
//! A search export has the shape `{"issues": [main, sub, ...]}`. The first issue is the
//! main task, every following issue is one of its sub-tasks. Issues are kept as raw JSON
//! values inside [`SearchResult`] and validated one at a time, so that an error can name
//! the offending issue and batch processing can keep going past a malformed entry.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The root document of a Jira search export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub issues: Vec<Value>,
}

impl SearchResult {
    /// Parse a search export from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidInput)
    }

    /// Validate and return the main task (the first issue).
    pub fn main_issue(&self) -> Result<Issue> {
        let first = self.issues.first().ok_or(Error::NoIssues)?;
        parse_at(first, 0)
    }

    /// Validate and return every issue after the first as a sub-task.
    pub fn sub_issues(&self) -> Result<Vec<SubIssue>> {
        self.issues
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, value)| parse_at(value, index))
            .collect()
    }

    /// Validate the issue at `index` as a full task record.
    pub fn issue_at(&self, index: usize) -> Result<Issue> {
        let value = self.issues.get(index).ok_or(Error::NoIssues)?;
        parse_at(value, index)
    }

    /// Best-effort key lookup for an issue that may not validate.
    pub fn raw_key(&self, index: usize) -> &str {
        self.issues
            .get(index)
            .and_then(|v| v.get("key"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

fn parse_at<T: DeserializeOwned>(value: &Value, index: usize) -> Result<T> {
    T::deserialize(value).map_err(|source| Error::InvalidIssue { index, source })
}

/// A single Jira issue with the fields the report needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: IssueFields,
}

impl Issue {
    /// Parse a bare issue record from a JSON string.
    ///
    /// Text that is not JSON is [`Error::InvalidInput`]; JSON that is not an issue is
    /// [`Error::InvalidIssue`] at index 0.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(Error::InvalidInput)?;
        parse_at(&value, 0)
    }
}

/// The `fields` object of an issue.
///
/// Everything is required except the two custom fields and the attachment list, which
/// Jira omits or sends as `null` when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    pub summary: String,
    pub description: String,
    pub status: Named,
    pub updated: String,
    pub issuetype: Named,
    pub labels: Vec<String>,
    /// Acceptance criteria, free text.
    #[serde(rename = "customfield_27708", default)]
    pub acceptance_criteria: Option<String>,
    /// Markets affected, a multi-select custom field. Only the first option is read, so
    /// only the first option has to carry a string `value`.
    #[serde(rename = "customfield_26615", default, deserialize_with = "first_option_checked")]
    pub market_affected: Option<Vec<Value>>,
    #[serde(default)]
    pub attachment: Option<Vec<Attachment>>,
}

/// Nested objects such as `status` and `issuetype` that carry a display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

/// One selected option of a select-list custom field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomOption {
    pub value: String,
}

impl IssueFields {
    /// `value` of the first selected market, if any.
    pub fn first_market(&self) -> Option<&str> {
        self.market_affected
            .as_deref()
            .and_then(<[Value]>::first)
            .and_then(|option| option.get("value"))
            .and_then(Value::as_str)
    }
}

fn first_option_checked<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Option::<Vec<Value>>::deserialize(deserializer)?;
    if let Some(first) = options.as_deref().and_then(<[Value]>::first) {
        CustomOption::deserialize(first).map_err(de::Error::custom)?;
    }
    Ok(options)
}

/// File metadata attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub created: String,
    pub size: u64,
    /// Download URL.
    pub content: String,
}

/// The subset of an issue read when it appears as a sub-task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubIssue {
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    pub fields: SubIssueFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubIssueFields {
    pub summary: String,
}
