// End-to-end tests for the report command
use std::fs;
use std::path::Path;
use studentkit::error::{ReportError, ReportWarning};
use studentkit::{CoercionPolicy, ReportConfig, report_command};

fn write_input(dir: &Path, json: &str) -> ReportConfig {
    let input = dir.join("students.json");
    fs::write(&input, json).unwrap();
    ReportConfig::new(input, dir.join("report.csv"))
}

#[test]
fn test_example_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        r#"[{"id":"S1","name":"Ann","scores":[70,80]},{"id":"S2","name":"Bo","scores":[]}]"#,
    );

    let outcome = report_command(&config).unwrap();
    assert_eq!(outcome.rows_written, 2);
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "id,name,average\nS1,Ann,75.0\nS2,Bo,0.0\n"
    );
}

#[test]
fn test_line_count_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        r#"[
            {"id": "A", "name": "Low", "scores": [10, 20]},
            {"id": "B", "name": "High", "scores": [80, 90, 100]},
            {"id": "C", "name": "Broken", "scores": ["n/a"]},
            {"id": "D", "name": "Mid", "scores": ["55", 65]},
            {"name": "Anonymous"}
        ]"#,
    );

    report_command(&config).unwrap();
    let content = fs::read_to_string(&config.output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "id,name,average");
    assert_eq!(lines[1], "B,High,90.0");
    assert_eq!(lines[2], "D,Mid,60.0");
    assert_eq!(lines[3], "A,Low,15.0");
    // Equal averages keep their input order
    assert_eq!(lines[4], "C,Broken,0.0");
    assert_eq!(lines[5], ",Anonymous,0.0");

    let averages: Vec<f64> = lines[1..]
        .iter()
        .map(|line| line.rsplit(',').next().unwrap().parse().unwrap())
        .collect();
    assert!(averages.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_skip_policy_drops_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        r#"[{"id":"S1","name":"Ann","scores":[80,"x",100]}]"#,
    )
    .with_policy(CoercionPolicy::Skip);

    report_command(&config).unwrap();
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "id,name,average\nS1,Ann,90.0\n"
    );
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        r#"[{"id":"S1","name":"Ann","scores":[91.5, 88]},{"id":"S2","name":"Bo","scores":[100]}]"#,
    );

    report_command(&config).unwrap();
    let first = fs::read(&config.output).unwrap();
    report_command(&config).unwrap();
    let second = fs::read(&config.output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_input_leaves_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig::new(dir.path().join("absent.json"), dir.path().join("report.csv"));

    let err = report_command(&config).unwrap_err();
    assert!(matches!(err, ReportError::InputMissing { .. }));
    assert!(!config.output.exists());

    fs::write(&config.output, "previous\n").unwrap();
    report_command(&config).unwrap_err();
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "previous\n");
}

#[test]
fn test_unparsable_input_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), "[{\"id\": ");

    let err = report_command(&config).unwrap_err();
    assert!(matches!(err, ReportError::InputParse { .. }));
    assert!(!config.output.exists());
}

#[test]
fn test_object_input_gives_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), r#"{"id":"S1","scores":[1]}"#);

    let outcome = report_command(&config).unwrap();
    assert_eq!(outcome.rows_written, 0);
    assert_eq!(
        outcome.warnings,
        vec![ReportWarning::UnexpectedShape { found: "an object" }]
    );
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "id,name,average\n");
}

#[test]
fn test_unwritable_output_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_input(dir.path(), "[]");
    config.output = dir.path().join("missing-dir").join("report.csv");

    let err = report_command(&config).unwrap_err();
    assert!(matches!(err, ReportError::OutputWrite { .. }));
}

#[test]
fn test_averages_round_like_decimal_text() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        r#"[
            {"id": "S1", "name": "Ann", "scores": [90.105]},
            {"id": "S2", "name": "Bo", "scores": [91.245]},
            {"id": "S3", "name": "Cy", "scores": [true, 90]}
        ]"#,
    );

    report_command(&config).unwrap();
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "id,name,average\nS2,Bo,91.25\nS1,Ann,90.11\nS3,Cy,45.5\n"
    );
}
