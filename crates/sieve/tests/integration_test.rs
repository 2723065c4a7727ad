//! Integration tests for sieve.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::{NamedTempFile, TempDir};

use sieve::{
    ensure_complete, ErrorPolicy, FillConfig, FillPipeline, FormatCheck, IdentifierFormat, Imputer,
    Loader, MissingValueReport, ReportFormat, Reporter, SieveError, Strategy, Value,
    IMPROPER_TITLE, MISSING_TITLE,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Helper to write a named file inside a directory.
fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write test file");
}

// =============================================================================
// Missing-Value Pipeline
// =============================================================================

#[test]
fn test_fill_single_file_with_mean() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "quality.csv", "a,b\n1,10\n,20\n5,\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["quality.csv"]);
    let summary = FillPipeline::new(config).run().expect("Pipeline failed");

    assert!(summary.is_success());
    let outcome = &summary.succeeded[0];
    assert_eq!(outcome.report.get("a"), Some(1));
    assert_eq!(outcome.report.get("b"), Some(1));
    assert_eq!(outcome.output, dir.path().join("filled_quality.csv"));

    let written = fs::read_to_string(&outcome.output).unwrap();
    assert_eq!(written, "a,b\n1,10\n3,20\n5,15\n");
}

#[test]
fn test_fill_writes_to_output_dir_and_keeps_column_order() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    write_file(data_dir.path(), "in.csv", "zeta,alpha,mid\n1,2,3\n,4,\n3,NA,9\n");

    let config = FillConfig::default()
        .with_base_dir(data_dir.path())
        .with_output_dir(out_dir.path())
        .with_files(["in.csv"])
        .with_strategy(Strategy::Median);
    let summary = FillPipeline::new(config).run().unwrap();
    assert!(summary.is_success());

    let (filled, _) = Loader::new()
        .load(out_dir.path().join("filled_in.csv"))
        .unwrap();
    assert_eq!(filled.headers, vec!["zeta", "alpha", "mid"]);
    assert_eq!(filled.get(1, 0), Some(&Value::number(2.0)));
    assert_eq!(filled.get(2, 1), Some(&Value::number(3.0)));
    assert_eq!(filled.get(1, 2), Some(&Value::number(6.0)));
    assert!(!filled.has_absent());
}

#[test]
fn test_fill_keeps_recorded_text_of_untouched_cells() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "codes.csv", "code,v\n007,1\nabc,\n1.50,3\n1e3,NA\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["codes.csv"]);
    let summary = FillPipeline::new(config).run().unwrap();
    assert!(summary.is_success());

    assert_eq!(
        fs::read_to_string(dir.path().join("filled_codes.csv")).unwrap(),
        "code,v\n007,1\nabc,2\n1.50,3\n1e3,2\n"
    );
}

#[test]
fn test_fill_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "d.csv", "x\n1\n\"\"\n3\n");
    write_file(dir.path(), "filled_d.csv", "old contents\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["d.csv"]);
    FillPipeline::new(config).run().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("filled_d.csv")).unwrap(),
        "x\n1\n2\n3\n"
    );
}

#[test]
fn test_continue_policy_records_failures_and_processes_rest() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "good1.csv", "v\n1\nNA\n3\n");
    write_file(dir.path(), "text.csv", "name\nalice\nNA\n");
    write_file(dir.path(), "good2.csv", "v\n2\nNA\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["good1.csv", "missing.csv", "text.csv", "good2.csv"]);
    let summary = FillPipeline::new(config).run().unwrap();

    assert_eq!(summary.succeeded.len(), 2);
    assert_eq!(summary.failed.len(), 2);
    assert!(summary.skipped.is_empty());
    assert!(!summary.is_success());

    assert!(matches!(summary.failed[0].error, SieveError::FileNotFound { .. }));
    assert!(matches!(summary.failed[1].error, SieveError::TypeConflict { .. }));
    assert!(summary.failed[1].to_string().contains("text.csv"));
    assert!(summary.failed[1].to_string().contains("'name'"));

    assert!(dir.path().join("filled_good2.csv").exists());
    assert!(!dir.path().join("filled_text.csv").exists());
}

#[test]
fn test_fail_fast_policy_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "good.csv", "v\n1\nNA\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["absent.csv", "good.csv"])
        .with_error_policy(ErrorPolicy::FailFast);
    let summary = FillPipeline::new(config).run().unwrap();

    assert!(summary.succeeded.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.skipped, vec![dir.path().join("good.csv")]);
    assert!(!dir.path().join("filled_good.csv").exists());
}

#[test]
fn test_all_absent_column_fails_validation() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "empty_col.csv", "a,b\n1,\n2,\n");

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["empty_col.csv"]);
    let summary = FillPipeline::new(config).run().unwrap();

    match &summary.failed[0].error {
        SieveError::ResidualMissingValue { columns, count } => {
            assert_eq!(columns, &vec!["b".to_string()]);
            assert_eq!(*count, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_preview_is_limited() {
    let dir = TempDir::new().unwrap();
    let mut content = String::from("n\n");
    for i in 0..30 {
        content.push_str(&format!("{}\n", i));
    }
    write_file(dir.path(), "long.csv", &content);

    let config = FillConfig::default()
        .with_base_dir(dir.path())
        .with_files(["long.csv"])
        .with_preview_rows(5);
    let summary = FillPipeline::new(config).run().unwrap();

    assert_eq!(summary.succeeded[0].preview.row_count(), 5);
    assert_eq!(summary.succeeded[0].source.row_count, 30);
}

#[test]
fn test_mode_fills_text_columns() {
    let file = create_test_file("city,zip\nLA,90001\nNYC,NA\nLA,\nNYC,10001\nSF,90001\n\"\",90001\n");
    let (data, _) = Loader::new().load(file.path()).unwrap();

    let filled = Imputer::new(Strategy::Mode).impute(&data).unwrap().dataset;
    // LA and NYC tie; "LA" sorts first
    assert_eq!(filled.get(5, 0), Some(&Value::Text("LA".to_string())));
    assert_eq!(filled.get(1, 1), Some(&Value::number(90001.0)));
    assert!(ensure_complete(&filled).is_ok());
}

#[test]
fn test_missing_value_report_counts_zero_columns() {
    let file = create_test_file("id,score,comment\n1,,ok\n2,3,\n3,,fine\n");
    let (data, source) = Loader::new().load(file.path()).unwrap();
    let report = MissingValueReport::analyze(&data);

    assert_eq!(source.row_count, 3);
    assert!(source.hash.starts_with("sha256:"));
    assert_eq!(
        report.lines(),
        vec![
            "id: 0 missing values",
            "score: 2 missing values",
            "comment: 1 missing value",
        ]
    );
}

// =============================================================================
// Format-Validation Pipeline
// =============================================================================

#[test]
fn test_three_row_serial_example() {
    let file = create_test_file("Serial Number\n12AB\n\"\"\n9Z9Z\n");
    let result = FormatCheck::new().run(file.path()).unwrap();

    assert_eq!(result.partition.missing, vec![1]);
    assert_eq!(result.partition.improper, vec![2]);
    assert_eq!(
        result.improper_rows().rows,
        vec![vec![Value::Text("9Z9Z".to_string())]]
    );
}

#[test]
fn test_text_report_lists_original_fields_only() {
    let file = create_test_file(
        "Serial Number,Product,Qty\n12AB,Bolt,4\n,Nut,2\n1A2B,Washer,9\n34cd,Screw,1\n",
    );
    let result = FormatCheck::new().run(file.path()).unwrap();
    let text = Reporter::new(ReportFormat::Text)
        .render(&result.sections())
        .unwrap();

    assert!(text.contains(MISSING_TITLE));
    assert!(text.contains(IMPROPER_TITLE));
    assert!(text.contains("Washer"));
    assert!(text.contains("Nut"));
    assert!(!text.contains("Screw"));
    assert!(!text.contains("Improper Data Structure |"));
    assert!(!text.contains("true"));
}

#[test]
fn test_clean_file_renders_empty_sections() {
    let file = create_test_file("Serial Number\n12AB\n99zz\n");
    let result = FormatCheck::new().run(file.path()).unwrap();
    assert_eq!(result.partition.flagged(), 0);

    let html = Reporter::new(ReportFormat::Html)
        .render(&result.sections())
        .unwrap();
    assert!(html.contains(&format!("<h2>{}</h2>", MISSING_TITLE)));
    assert!(html.contains(&format!("<h2>{}</h2>", IMPROPER_TITLE)));
    assert_eq!(html.matches("<tbody>\n</tbody>").count(), 2);
}

#[test]
fn test_custom_column_and_pattern() {
    let file = create_test_file("sku,name\nABC-1,a\nabc-2,b\n,c\n");
    let result = FormatCheck::new()
        .with_column("sku")
        .with_format(IdentifierFormat::new("[A-Z]{3}-[0-9]+").unwrap())
        .run(file.path())
        .unwrap();

    assert_eq!(result.partition.improper, vec![1]);
    assert_eq!(result.partition.missing, vec![2]);
}

#[test]
fn test_numeric_identifiers_are_checked_as_written() {
    let file = create_test_file("id,qty\n007,1\n7,2\n0.70,3\n");
    let result = FormatCheck::new()
        .with_column("id")
        .with_format(IdentifierFormat::new("[0-9]{3}").unwrap())
        .run(file.path())
        .unwrap();

    assert!(result.partition.missing.is_empty());
    assert_eq!(result.partition.improper, vec![1, 2]);

    let text = Reporter::new(ReportFormat::Text)
        .render(&result.sections())
        .unwrap();
    assert!(text.contains("0.70"));
    assert!(!text.contains("007"));
}

#[test]
fn test_missing_identifier_column() {
    let file = create_test_file("id\n12AB\n");
    let err = FormatCheck::new().run(file.path()).unwrap_err();
    assert!(err.to_string().contains("Serial Number"));
}
