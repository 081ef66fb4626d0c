use inquiry_core::{validate, SelectedFile, ValidationError, MAX_UPLOAD_BYTES};
use proptest::prelude::*;

fn file(name: &str, size: u64) -> SelectedFile {
    SelectedFile::new(name, size, format!("/data/{name}"))
}

#[test]
fn accepts_csv_and_json_in_any_case() {
    for name in ["a.csv", "b.JSON", "c.Csv", "archive.tar.json"] {
        assert_eq!(validate(&file(name, 100)), Ok(()), "{name}");
    }
}

#[test]
fn only_the_last_extension_counts() {
    assert_eq!(
        validate(&file("report.csv.exe", 100)),
        Err(ValidationError::UnsupportedType {
            extension: "exe".to_string()
        })
    );
}

#[test]
fn name_without_dot_uses_whole_name() {
    assert_eq!(validate(&file("csv", 1)), Ok(()));
    assert_eq!(
        validate(&file("README", 1)),
        Err(ValidationError::UnsupportedType {
            extension: "readme".to_string()
        })
    );
}

#[test]
fn size_limit_is_inclusive() {
    assert_eq!(validate(&file("big.csv", MAX_UPLOAD_BYTES)), Ok(()));
    assert_eq!(
        validate(&file("big.csv", MAX_UPLOAD_BYTES + 1)),
        Err(ValidationError::TooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            max_bytes: 5_242_880,
        })
    );
}

#[test]
fn type_is_checked_before_size() {
    assert!(matches!(
        validate(&file("huge.xlsx", MAX_UPLOAD_BYTES * 2)),
        Err(ValidationError::UnsupportedType { .. })
    ));
}

proptest! {
    #[test]
    fn unknown_extensions_are_unsupported(
        stem in "[a-z]{1,8}",
        ext in "[a-z]{1,5}",
        size in 0u64..=MAX_UPLOAD_BYTES,
    ) {
        prop_assume!(ext != "csv" && ext != "json");
        let name = format!("{stem}.{ext}");
        let is_unsupported = matches!(
            validate(&file(&name, size)),
            Err(ValidationError::UnsupportedType { .. })
        );
        prop_assert!(is_unsupported);
    }

    #[test]
    fn oversized_files_are_too_large(
        ext in prop::sample::select(vec!["csv", "json", "CSV", "Json"]),
        excess in 1u64..10_000_000,
    ) {
        let size = MAX_UPLOAD_BYTES + excess;
        let is_too_large = matches!(
            validate(&file(&format!("batch.{ext}"), size)),
            Err(ValidationError::TooLarge { .. })
        );
        prop_assert!(is_too_large);
    }
}
