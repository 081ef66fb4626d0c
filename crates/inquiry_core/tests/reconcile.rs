use inquiry_core::{merge, Category, HistoryRecord, InquiryRecord, JobStatus, Merge, ProgressSnapshot, RemoteStatus};
use pretty_assertions::assert_eq;

fn records(count: usize) -> Vec<InquiryRecord> {
    (0..count)
        .map(|i| InquiryRecord::new(format!("u{i}@x.com"), "Pricing", format!("r{i}")))
        .collect()
}

#[test]
fn growing_snapshot_replaces_current() {
    let current = records(2);
    let incoming = records(4);

    assert_eq!(
        merge(&current, incoming.clone(), JobStatus::Processing),
        Merge::Replaced(incoming)
    );
}

#[test]
fn equal_length_snapshot_replaces_current() {
    let current = records(3);
    let mut incoming = records(3);
    incoming[2].response = "revised".to_string();

    assert_eq!(
        merge(&current, incoming.clone(), JobStatus::Processing),
        Merge::Replaced(incoming)
    );
}

#[test]
fn shorter_snapshot_is_rejected_while_processing() {
    let current = records(5);

    assert_eq!(
        merge(&current, records(2), JobStatus::Processing),
        Merge::Rejected {
            current_len: 5,
            incoming_len: 2
        }
    );
    assert!(matches!(
        merge(&current, records(2), JobStatus::Pending),
        Merge::Rejected { .. }
    ));
}

#[test]
fn shorter_snapshot_is_accepted_once_completed() {
    let current = records(5);
    assert_eq!(
        merge(&current, records(4), JobStatus::Completed),
        Merge::Replaced(records(4))
    );
}

#[test]
fn progress_payload_decodes_with_optional_fields() {
    let raw = r#"{
        "progress": 1,
        "total": 3,
        "status": "processing",
        "results": [
            {"email": "a@x.com", "category": "Support", "response": "ok",
             "inquiryId": "42", "inquirerName": "Ann"}
        ]
    }"#;

    let snapshot: ProgressSnapshot = serde_json::from_str(raw).unwrap();
    assert_eq!(snapshot.processed, 1);
    assert_eq!(snapshot.status, RemoteStatus::Processing);
    assert_eq!(snapshot.results[0].inquiry_id.as_deref(), Some("42"));
    assert_eq!(snapshot.results[0].inquirer_name.as_deref(), Some("Ann"));
    assert_eq!(snapshot.error, None);
}

#[test]
fn history_accepts_numeric_ids_and_batch_shape() {
    let raw = r#"[
        {"id": 7, "filename": "march.csv", "totalInquiries": 12, "createdAt": "2024-03-01"},
        {"id": "x1", "email": "a@x.com", "category": "Pricing", "response": "r", "processedAt": "2024-02-01"}
    ]"#;

    let history: Vec<HistoryRecord> = serde_json::from_str(raw).unwrap();
    assert_eq!(history[0].id, "7");
    assert_eq!(history[0].label(), "march.csv");
    assert_eq!(history[0].timestamp(), Some("2024-03-01"));
    assert_eq!(history[1].label(), "a@x.com");
}

#[test]
fn unknown_categories_fall_back_to_general() {
    assert_eq!(Category::from_label("Property Info"), Category::PropertyInfo);
    assert_eq!(Category::from_label("Spam"), Category::General);
    for category in Category::ALL {
        assert_eq!(Category::from_label(category.label()), category);
    }
}
