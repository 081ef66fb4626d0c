use std::fs;

use chrono::NaiveDate;
use inquiry_client::ExportWriter;
use inquiry_core::{results_to_csv, InquiryRecord};
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn writes_dated_csv_and_creates_missing_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");
    let writer = ExportWriter::new(&dir);
    let csv = results_to_csv(&[InquiryRecord::new("a@x.com", "General", "hi")]);

    let path = writer.write_csv(day(), &csv).unwrap();

    assert_eq!(path, dir.join("inquiry-results-2024-06-01.csv"));
    assert_eq!(fs::read_to_string(&path).unwrap(), csv);
}

#[test]
fn same_day_export_replaces_previous_file() {
    let temp = TempDir::new().unwrap();
    let writer = ExportWriter::new(temp.path());

    let first = writer.write_csv(day(), "Email,Category,Response").unwrap();
    let second = writer
        .write_csv(day(), "Email,Category,Response\n\"b@x.com\",\"Pricing\",\"ok\"")
        .unwrap();

    assert_eq!(first, second);
    assert!(fs::read_to_string(&second).unwrap().contains("b@x.com"));
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let writer = ExportWriter::new(&blocker);
    assert!(writer.write_csv(day(), "Email,Category,Response").is_err());
}

#[test]
fn existing_file_is_overwritten_in_place() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("inquiry-results-2024-06-01.csv");
    fs::write(&target, "stale contents from an earlier run").unwrap();

    let writer = ExportWriter::new(temp.path());
    let path = writer.write_csv(day(), "Email,Category,Response").unwrap();

    assert_eq!(path, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "Email,Category,Response");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
