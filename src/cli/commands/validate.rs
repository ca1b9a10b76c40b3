//! Validate one EDAM document and report its findings.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, json_ok};
use crate::error::{Result, ValidatorError};
use crate::lint::{Finding, Reporter, Verdict};
use crate::ontology::{ConceptGraph, NumericId, load_graph};

/// Machine-readable form of a validation run.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub document: String,
    pub next_id: NumericId,
    pub concepts: usize,
    pub verdict: Verdict,
    pub errors: usize,
    pub warnings: usize,
    pub truncated: bool,
    pub findings: &'a [Finding],
}

impl<'a> ValidationReport<'a> {
    #[must_use]
    pub fn new(path: &Path, graph: &ConceptGraph, reporter: &'a Reporter) -> Self {
        Self {
            document: path.display().to_string(),
            next_id: graph.next_id(),
            concepts: graph.len(),
            verdict: reporter.verdict(),
            errors: reporter.error_count(),
            warnings: reporter.warning_count(),
            truncated: reporter.is_truncated(),
            findings: reporter.findings(),
        }
    }
}

pub fn run(ctx: &AppContext, path: &Path) -> Result<()> {
    let graph = load_graph(path)?;
    let engine = ctx.engine()?;
    let reporter = engine.validate(&graph);

    info!(
        document = %path.display(),
        concepts = graph.len(),
        errors = reporter.error_count(),
        warnings = reporter.warning_count(),
        "validation finished"
    );

    match ctx.output_format {
        OutputFormat::Json => emit_json(&json_ok(ValidationReport::new(path, &graph, &reporter)))?,
        OutputFormat::Human => output_human(ctx, &graph, &reporter),
    }

    if reporter.verdict().is_pass() {
        Ok(())
    } else {
        Err(ValidatorError::ValidationFailed(format!(
            "{} error(s) found",
            reporter.error_count()
        )))
    }
}

fn output_human(ctx: &AppContext, graph: &ConceptGraph, reporter: &Reporter) {
    for line in reporter.render_all(ctx.color) {
        println!("{line}");
    }

    if !ctx.config.output.summary {
        return;
    }

    let mut layout = HumanLayout::new();
    if reporter.total_count() > 0 {
        layout.blank();
    }
    layout.section("Summary");
    layout.kv("Concepts", &graph.len().to_string());
    layout.kv("Errors", &reporter.error_count().to_string());
    layout.kv("Warnings", &reporter.warning_count().to_string());
    if reporter.is_truncated() {
        layout.kv("Truncated", "yes");
    }
    layout.kv("Verdict", &reporter.verdict().to_string());
    emit_human(layout);
}
