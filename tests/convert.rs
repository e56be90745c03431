use jira_md::{process_batch, process_document, run, MetaRecord, ProcessOptions, SearchResult};
use pretty_assertions::assert_eq;

const EXPORT: &str = r#"{
  "expand": "schema,names",
  "startAt": 0,
  "maxResults": 50,
  "total": 2,
  "issues": [
    {
      "id": "10001",
      "key": "SHOP-12",
      "self": "https://jira.example.com/rest/api/2/issue/10001",
      "fields": {
        "summary": "Redesign checkout",
        "description": "Make the button bigger.\r\n\r\n  \r\nKeep the brand colour.",
        "status": { "name": "In Progress", "id": "3" },
        "updated": "2024-06-23T16:00:00.000+0800",
        "issuetype": { "name": "Story", "subtask": false },
        "labels": ["a", "b"],
        "customfield_27708": "Given a cart\n\nWhen I pay\nThen I see a receipt",
        "customfield_26615": [{ "value": "Hong Kong", "id": "1" }, { "value": "Singapore", "id": "2" }],
        "attachment": [
          {
            "id": "1",
            "filename": "f.png",
            "created": "2024-01-01",
            "size": 100,
            "content": "http://x"
          }
        ]
      }
    },
    {
      "id": "10002",
      "key": "SHOP-13",
      "self": "https://jira.example.com/rest/api/2/issue/10002",
      "fields": {
        "summary": "Pick the new colour",
        "description": "Ask design.",
        "status": { "name": "Open" },
        "updated": "2024-05-02T09:00:00.000+0800",
        "issuetype": { "name": "Sub-task" },
        "labels": []
      }
    }
  ]
}"#;

#[test]
fn test_full_report() {
    let doc = SearchResult::from_json(EXPORT).unwrap();
    let task = run(&doc).unwrap();

    let expected = "\
# Summary
Redesign checkout
## Description
Make the button bigger. Keep the brand colour.
## Task Info
* Status: In Progress
* Updated: 2024-06-23T16:00:00.000+0800
* Issuetype: Story
## Labels
a, b
## Market Affected Field Name
Hong Kong
## Acceptance Criteria Field Name
Given a cart
When I pay
Then I see a receipt
---
## Attachment
f.png
* ID: 1
* Created: 2024-01-01
* File Size: 100
* Download URL: http://x
---
## Sub Tasks
Pick the new colour
* Key: SHOP-13
* URL: https://jira.example.com/rest/api/2/issue/10002
---
";
    assert_eq!(task.report, expected);
    assert_eq!(task.key, "SHOP-12");
}

#[test]
fn test_metadata_record() {
    let doc = SearchResult::from_json(EXPORT).unwrap();
    let task = run(&doc).unwrap();
    let id = task.record_id.to_string();

    let meta: MetaRecord = serde_json::from_str(&task.metadata).unwrap();
    let expected = MetaRecord {
        level: 0,
        title: Some("Redesign checkout".into()),
        file_name: Some(format!("{id}.md")),
        file_record_id: Some(id.clone()),
        file_original_name: Some("Redesign checkout".into()),
        file_original_path: Some(format!("https://jira.example.com/rest/api/2/issue/10001/{id}.md")),
        source: Some("jira-iwpb".into()),
        value_stream: Some(String::new()),
        categories: Some(String::new()),
        parent_file_name: None,
        attachment_type: Some("file".into()),
        owner: Some(String::new()),
    };
    assert_eq!(meta, expected);
}

#[test]
fn test_single_issue_has_no_sub_task_section() {
    let mut doc = SearchResult::from_json(EXPORT).unwrap();
    doc.issues.truncate(1);
    let task = process_document(&doc, &ProcessOptions::default()).unwrap();
    assert!(!task.report.contains("## Sub Tasks"));
    assert!(task.report.ends_with("* Download URL: http://x\n---\n"));
}

#[test]
fn test_unicode_summary_survives_metadata() {
    let doc = SearchResult::from_json(&EXPORT.replace("Redesign checkout", "重新设计结账")).unwrap();
    let task = run(&doc).unwrap();
    assert!(task.metadata.contains("\"title\":\"重新设计结账\""));
    assert!(task.report.starts_with("# Summary\n重新设计结账\n"));
}

#[test]
fn test_batch_matches_input_order() {
    let doc = SearchResult::from_json(EXPORT).unwrap();
    let batch = process_batch(&doc, &ProcessOptions::default(), None).unwrap();
    let keys: Vec<&str> = batch.tasks.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["SHOP-12", "SHOP-13"]);
    let (first, second) = batch.report.split_once("\n\n---\n\n").unwrap();
    assert!(first.starts_with("# Summary\nRedesign checkout\n"));
    assert!(second.starts_with("# Summary\nPick the new colour\n"));
}

#[test]
fn test_malformed_document() {
    assert!(matches!(SearchResult::from_json("{\"issue\": []}"), Err(jira_md::Error::InvalidInput(_))));
    assert!(matches!(SearchResult::from_json("not json"), Err(jira_md::Error::InvalidInput(_))));
}
