use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, warn};

use adimport_engine::{Importer, JsonlSink};
use adimport_ingest::read_table;
use adimport_map::MappingEngine;
use adimport_model::{
    FieldMapping, ImportKind, ImportResult, TabularData, TargetSchema, load_schema_overrides,
};
use adimport_validate::Validator;

use crate::cli::{CheckArgs, ImportArgs};
use crate::summary::apply_table_style;
use crate::types::{CheckReport, ImportReport};

/// Print the supported import kinds and their built-in schemas.
pub fn run_kinds() {
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Description", "Required fields"]);
    apply_table_style(&mut table);
    for kind in ImportKind::ALL {
        let schema = TargetSchema::builtin(kind);
        let required: Vec<&str> = schema
            .required_fields()
            .map(|field| field.name.as_str())
            .collect();
        table.add_row(vec![
            kind.as_str().to_string(),
            kind.description().to_string(),
            required.join(", "),
        ]);
    }
    println!("{table}");
}

/// Map and validate one input file without importing it.
pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let checked = check_input(args)?;
    if let Some(path) = &args.report {
        write_report(path, &checked.report)?;
    }
    Ok(checked.report)
}

/// Map, validate, and import one input file.
///
/// Validation errors block the import unless `--force` is given; warnings
/// never block. A blocked or dry run still yields the full check report.
pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let CheckedInput { report, data } = check_input(&args.check)?;

    let report = if !report.validation.is_valid() && !args.force {
        warn!(
            errors = report.validation.summary.error_count,
            "import blocked by validation errors"
        );
        ImportReport {
            check: report,
            gated: true,
            output: None,
            import: None,
        }
    } else if args.dry_run {
        info!("dry run, skipping import");
        ImportReport {
            check: report,
            gated: false,
            output: None,
            import: None,
        }
    } else {
        let (output, result) = import_rows(args, &data, &report.mapping)?;
        ImportReport {
            check: report,
            gated: false,
            output: Some(output),
            import: Some(result),
        }
    };

    if let Some(path) = &args.check.report {
        write_report(path, &report)?;
    }
    Ok(report)
}

struct CheckedInput {
    report: CheckReport,
    data: TabularData,
}

fn check_input(args: &CheckArgs) -> Result<CheckedInput> {
    let kind = ImportKind::from(args.kind);
    let span = info_span!("check", kind = %kind, input = %args.input.display());
    let _guard = span.enter();

    let schema = effective_schema(kind, args.schema.as_deref())?;

    let started = Instant::now();
    let data =
        read_table(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    info!(
        rows = data.total_rows,
        columns = data.headers.len(),
        duration_ms = started.elapsed().as_millis(),
        "input loaded"
    );

    let suggestions = MappingEngine::new(&schema).suggest(&data.headers);
    if !suggestions.unmapped.is_empty() {
        debug!(
            unmapped = suggestions.unmapped.len(),
            "headers without a suggestion"
        );
    }
    let (mapping, dropped_targets) = match args.mapping.as_deref() {
        Some(path) => load_mapping(path, &schema)?,
        None => (suggestions.to_mapping(), Vec::new()),
    };

    let validation = Validator::new(&schema).validate(&data);
    info!(
        errors = validation.summary.error_count,
        warnings = validation.summary.warning_count,
        valid_rows = validation.summary.valid_rows,
        "validation complete"
    );

    Ok(CheckedInput {
        report: CheckReport {
            kind,
            source: args.input.clone(),
            rows: data.total_rows,
            suggestions,
            mapping,
            dropped_targets,
            validation,
        },
        data,
    })
}

fn effective_schema(kind: ImportKind, override_path: Option<&Path>) -> Result<TargetSchema> {
    match override_path {
        Some(path) => {
            let overrides = load_schema_overrides(path)
                .with_context(|| format!("load schema overrides from {}", path.display()))?;
            Ok(overrides.schema_for(kind))
        }
        None => Ok(TargetSchema::builtin(kind)),
    }
}

/// Load a reviewer-edited mapping file. Entries whose target names no
/// schema field are dropped; surviving targets are rewritten to the
/// schema's canonical spelling.
fn load_mapping(path: &Path, schema: &TargetSchema) -> Result<(FieldMapping, Vec<String>)> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read mapping file {}", path.display()))?;
    let raw: FieldMapping = serde_json::from_str(&contents)
        .with_context(|| format!("parse mapping file {}", path.display()))?;

    let mut mapping = FieldMapping::new();
    let mut dropped = Vec::new();
    for (source, target) in raw.iter() {
        match schema.field(target) {
            Some(field) => mapping.insert(source, field.name.clone()),
            None => dropped.push(target.to_string()),
        }
    }
    dropped.sort();
    dropped.dedup();
    if !dropped.is_empty() {
        warn!(
            dropped = dropped.len(),
            "mapping entries name no schema field"
        );
    }
    Ok((mapping, dropped))
}

fn import_rows(
    args: &ImportArgs,
    data: &TabularData,
    mapping: &FieldMapping,
) -> Result<(PathBuf, ImportResult)> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.check.input));
    let mut sink = JsonlSink::create(&output)?;

    let bar = progress_bar(data.total_rows);
    let mut importer = Importer::new();
    if let Some(bar) = bar.clone() {
        importer = importer.with_progress(move |update| bar.set_position(update.row as u64));
    }
    let result = importer.run(data, mapping, &mut sink);
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    sink.finish()?;

    Ok((output, result))
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("imported.jsonl")
}

fn progress_bar(total_rows: usize) -> Option<ProgressBar> {
    if !io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new(total_rows as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} rows ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    Some(bar)
}

fn write_report<T: serde::Serialize>(path: &Path, report: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, payload).with_context(|| format!("write report to {}", path.display()))?;
    info!(report = %path.display(), "report written");
    Ok(())
}
