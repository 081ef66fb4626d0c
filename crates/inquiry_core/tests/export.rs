use chrono::NaiveDate;
use inquiry_core::{export_filename, results_to_csv, InquiryRecord};
use pretty_assertions::assert_eq;

#[test]
fn quotes_are_doubled_inside_quoted_fields() {
    let records = vec![InquiryRecord::new("a@x.com", "General", "He said \"hi\"")];

    assert_eq!(
        results_to_csv(&records),
        "Email,Category,Response\n\"a@x.com\",\"General\",\"He said \"\"hi\"\"\""
    );
}

#[test]
fn commas_and_newlines_stay_inside_the_field() {
    let records = vec![InquiryRecord::new(
        "b@x.com",
        "Property Info",
        "Yes, it is.\nCall us.",
    )];

    assert_eq!(
        results_to_csv(&records),
        "Email,Category,Response\n\"b@x.com\",\"Property Info\",\"Yes, it is.\nCall us.\""
    );
}

#[test]
fn empty_results_yield_header_only() {
    assert_eq!(results_to_csv(&[]), "Email,Category,Response");
}

#[test]
fn filename_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(export_filename(date), "inquiry-results-2024-03-07.csv");
}
