//! End-to-end tests for the check and import commands.

use std::fs;
use std::path::PathBuf;

use adimport_cli::cli::{CheckArgs, ImportArgs, KindArg};
use adimport_cli::commands::{run_check, run_import};
use adimport_model::IssueKind;

fn check_args(kind: KindArg, input: PathBuf) -> CheckArgs {
    CheckArgs {
        kind,
        input,
        mapping: None,
        schema: None,
        report: None,
    }
}

fn import_args(check: CheckArgs, output: PathBuf, force: bool) -> ImportArgs {
    ImportArgs {
        check,
        output: Some(output),
        force,
        dry_run: false,
    }
}

/// A sheet exercising the usual trouble: headers that need fuzzy matching,
/// headers nothing matches, a renamed budget column, and a bid over limit.
fn write_messy_campaigns(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("campaigns.csv");
    fs::write(
        &path,
        "campaign_name,platform,daily budget,max_bid,launch,notes_internal\n\
         Summer Sale,meta,5000,2.5,2024-06-01,check with legal\n\
         Brand Push,google,12000,150,2024-07-01,\n",
    )
    .expect("write csv");
    path
}

fn write_clean_campaigns(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("clean.csv");
    fs::write(
        &path,
        "name,platform,budget\nSpring Sale,meta,100\nFall Push,tiktok,2500\n",
    )
    .expect("write csv");
    path
}

#[test]
fn check_reports_mapping_and_validation_together() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_messy_campaigns(&dir);

    let report = run_check(&check_args(KindArg::Campaigns, input)).expect("check");

    assert_eq!(report.rows, 2);
    // platform matches exactly, "daily budget" fuzzily; the rest miss.
    assert_eq!(report.suggestions.suggestions.len(), 2);
    assert_eq!(report.suggestions.suggestions[0].source_header, "platform");
    assert_eq!(report.suggestions.suggestions[1].source_header, "daily budget");
    assert_eq!(report.suggestions.suggestions[1].target_field, "budget");
    assert_eq!(
        report.suggestions.unmapped,
        vec!["campaign_name", "max_bid", "launch", "notes_internal"]
    );
    assert_eq!(report.mapping.len(), 2);
    assert_eq!(report.mapping.target_for("daily budget"), Some("budget"));

    // Required columns are matched against raw headers, so the renamed
    // name and budget columns still count as missing.
    assert!(!report.validation.is_valid());
    let errors: Vec<(usize, &str, IssueKind)> = report
        .validation
        .errors
        .iter()
        .map(|issue| (issue.row, issue.column.as_str(), issue.kind))
        .collect();
    assert_eq!(
        errors,
        vec![
            (0, "name", IssueKind::Required),
            (0, "budget", IssueKind::Required),
        ]
    );
    // "max_bid" is inferred numeric with the bid bounds; 150 is out of range.
    assert_eq!(report.validation.warnings.len(), 1);
    let warning = &report.validation.warnings[0];
    assert_eq!(warning.row, 2);
    assert_eq!(warning.column, "max_bid");
    assert_eq!(warning.kind, IssueKind::Range);

    assert_eq!(report.validation.summary.invalid_rows, 2);
    assert_eq!(report.validation.summary.valid_rows, 0);
}

#[test]
fn check_passes_a_clean_sheet() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_clean_campaigns(&dir);

    let report = run_check(&check_args(KindArg::Campaigns, input)).expect("check");

    assert!(report.validation.is_valid());
    assert_eq!(report.validation.warnings.len(), 0);
    assert!(report.suggestions.unmapped.is_empty());
    assert_eq!(report.mapping.len(), 3);
    assert_eq!(report.validation.summary.valid_rows, 2);
}

#[test]
fn check_writes_a_json_report_when_asked() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_messy_campaigns(&dir);
    let report_path = dir.path().join("report.json");

    let mut args = check_args(KindArg::Campaigns, input);
    args.report = Some(report_path.clone());
    run_check(&args).expect("check");

    let contents = fs::read_to_string(&report_path).expect("read report");
    let json: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(json["kind"].as_str(), Some("campaigns"));
    assert_eq!(json["validation"]["summary"]["total_rows"].as_u64(), Some(2));
    assert_eq!(json["validation"]["summary"]["error_count"].as_u64(), Some(2));
}

#[test]
fn import_is_gated_by_validation_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_messy_campaigns(&dir);
    let output = dir.path().join("out.jsonl");

    let args = import_args(check_args(KindArg::Campaigns, input), output.clone(), false);
    let report = run_import(&args).expect("import");

    assert!(report.gated);
    assert!(report.import.is_none());
    assert!(report.output.is_none());
    assert!(!output.exists(), "gated import must not touch the output");
}

#[test]
fn forced_import_writes_only_mapped_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_messy_campaigns(&dir);
    let output = dir.path().join("out.jsonl");

    let args = import_args(check_args(KindArg::Campaigns, input), output.clone(), true);
    let report = run_import(&args).expect("import");

    assert!(!report.gated);
    let result = report.import.expect("import result");
    assert_eq!(result.imported, 2);
    assert_eq!(result.failed, 0);
    assert_eq!(result.skipped, 0);
    assert!(result.success());

    let contents = fs::read_to_string(&output).expect("read output");
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    assert_eq!(lines.len(), 2);
    // Unmapped headers are dropped from the records.
    assert_eq!(lines[0]["fields"]["platform"].as_str(), Some("meta"));
    assert_eq!(lines[0]["fields"]["budget"].as_str(), Some("5000"));
    assert!(lines[0]["fields"].get("campaign_name").is_none());
    assert!(lines[0]["fields"].get("notes_internal").is_none());
    assert_eq!(lines[1]["fields"]["platform"].as_str(), Some("google"));
    for (line, id) in lines.iter().zip(&result.created_ids) {
        assert_eq!(line["id"].as_str(), Some(id.as_str()));
    }
}

#[test]
fn mapping_file_replaces_suggestions_and_drops_unknown_targets() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_messy_campaigns(&dir);
    let mapping_path = dir.path().join("mapping.json");
    fs::write(
        &mapping_path,
        r#"{"campaign_name":"name","daily budget":"budget","max_bid":"bogus_field"}"#,
    )
    .expect("write mapping");
    let output = dir.path().join("out.jsonl");

    let mut check = check_args(KindArg::Campaigns, input);
    check.mapping = Some(mapping_path);
    let report = run_import(&import_args(check, output.clone(), true)).expect("import");

    assert_eq!(report.check.dropped_targets, vec!["bogus_field"]);
    assert_eq!(report.check.mapping.len(), 2);
    assert_eq!(report.check.mapping.target_for("campaign_name"), Some("name"));
    // The raw-header validation verdict does not change with the mapping.
    assert!(!report.check.validation.is_valid());

    let contents = fs::read_to_string(&output).expect("read output");
    let first: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("one line")).expect("valid json");
    assert_eq!(first["fields"]["name"].as_str(), Some("Summer Sale"));
    assert_eq!(first["fields"]["budget"].as_str(), Some("5000"));
    assert!(first["fields"].get("platform").is_none());
}

#[test]
fn dry_run_checks_but_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_clean_campaigns(&dir);
    let output = dir.path().join("out.jsonl");

    let args = ImportArgs {
        check: check_args(KindArg::Campaigns, input),
        output: Some(output.clone()),
        force: false,
        dry_run: true,
    };
    let report = run_import(&args).expect("import");

    assert!(!report.gated);
    assert!(report.import.is_none());
    assert!(!output.exists());
    assert!(report.check.validation.is_valid());
}

#[test]
fn schema_override_changes_the_rules() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema_path = dir.path().join("schema.toml");
    fs::write(
        &schema_path,
        r#"
[kinds.campaigns]
fields = [
    { name = "name", required = true },
    { name = "spend_cap", required = true, type = "number", min = 0.0, max = 500.0 },
]
"#,
    )
    .expect("write schema");
    let input = dir.path().join("capped.csv");
    fs::write(&input, "name,spend_cap\nSpring Sale,900\n").expect("write csv");

    let mut args = check_args(KindArg::Campaigns, input);
    args.schema = Some(schema_path);
    let report = run_check(&args).expect("check");

    // Both required columns are present; the built-in campaign fields no
    // longer apply.
    assert!(report.validation.is_valid());
    assert_eq!(report.validation.warnings.len(), 1);
    let warning = &report.validation.warnings[0];
    assert_eq!(warning.column, "spend_cap");
    assert_eq!(warning.kind, IssueKind::Range);
}
