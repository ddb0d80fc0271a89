//! Batch Driver
//!
//! Parses, optionally normalizes, renders and evaluates a list of
//! expressions, then reports the outcome of each as text or JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use expr_grid::samples::samples;
use expr_grid::{parse, Expr, ExprNode, ParseError, Value};

use crate::config::{DriverConfig, OutputFormat};

/// One input: the text (or sample name) it came from and its parsed tree
#[derive(Debug, Clone)]
pub struct Job {
    pub source: String,
    pub tree: Result<Expr, ParseError>,
}

impl Job {
    pub fn from_text(text: impl Into<String>) -> Self {
        let source = text.into();
        let tree = parse(&source);
        Job { source, tree }
    }

    pub fn from_tree(source: impl Into<String>, expr: Expr) -> Self {
        Job {
            source: source.into(),
            tree: Ok(expr),
        }
    }
}

/// Outcome for one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Rendered tree, or the raw source when it failed to parse
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_text_line(&self) -> String {
        match (&self.result, &self.error) {
            (Some(value), _) => format!("{} => {}", self.expression, value.to_text()),
            (None, Some(error)) => format!("{} => error: {}", self.expression, error),
            (None, None) => self.expression.clone(),
        }
    }
}

/// Reports for a whole batch, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub reports: Vec<Report>,
}

impl RunResult {
    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.failed()).count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed_count() > 0 {
            1
        } else {
            0
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => Ok(self
                .reports
                .iter()
                .map(Report::to_text_line)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(&self.reports)
                .context("failed to serialize reports"),
        }
    }
}

/// Built-in sample trees as jobs.
pub fn sample_jobs() -> expr_grid::Result<Vec<Job>> {
    Ok(samples()?
        .into_iter()
        .map(|sample| Job::from_tree(sample.name, sample.expr))
        .collect())
}

/// One expression per line; blank lines and `#` comments are skipped.
pub fn read_expressions(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read expressions from {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

pub fn run_job(job: &Job, normalize: bool) -> Report {
    let expr = match &job.tree {
        Ok(expr) => expr,
        Err(err) => {
            debug!("{:?} failed to parse: {}", job.source, err);
            return Report {
                expression: job.source.clone(),
                has_zero: None,
                result: None,
                error: Some(format!("parse error: {}", err)),
            };
        }
    };

    let normalized;
    let tree = if normalize {
        normalized = expr.normalize_negative_constants();
        &normalized
    } else {
        expr
    };

    let expression = tree.render();
    let has_zero = Some(tree.contains_zero_literal());
    match tree.evaluate() {
        Ok(value) => Report {
            expression,
            has_zero,
            result: Some(value),
            error: None,
        },
        Err(err) => {
            debug!("{} failed to evaluate: {}", expression, err);
            Report {
                expression,
                has_zero,
                result: None,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Run every job, keeping input order in the reports.
pub fn perform_run(jobs: &[Job], config: &DriverConfig) -> RunResult {
    info!(
        "running {} expression(s), parallel={}, normalize={}",
        jobs.len(),
        config.parallel,
        config.normalize
    );

    let reports: Vec<Report> = if config.parallel {
        jobs.par_iter()
            .map(|job| run_job(job, config.normalize))
            .collect()
    } else {
        jobs.iter().map(|job| run_job(job, config.normalize)).collect()
    };

    let result = RunResult { reports };
    if result.failed_count() > 0 {
        info!("{} of {} expression(s) failed", result.failed_count(), jobs.len());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential() -> DriverConfig {
        DriverConfig {
            parallel: false,
            ..DriverConfig::default()
        }
    }

    #[test]
    fn test_text_lines() {
        let jobs = vec![
            Job::from_text("3 + -(2)"),
            Job::from_text("2 + \"x\""),
            Job::from_text("-(\"a\")"),
        ];
        let result = perform_run(&jobs, &sequential());
        let text = result.render(OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "(3 + -(2)) => 1");
        assert_eq!(lines[1], "(2 + \"x\") => 2x");
        assert!(lines[2].starts_with("-(\"a\") => error: type mismatch"));
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let report = run_job(&Job::from_text("1 +"), false);
        assert!(report.failed());
        assert_eq!(report.expression, "1 +");
        assert_eq!(report.has_zero, None);
        assert!(report.error.unwrap().starts_with("parse error:"));
    }

    #[test]
    fn test_normalize_before_render() {
        let report = run_job(&Job::from_text("-4 * 1/2"), true);
        assert_eq!(report.expression, "(-(4) * 1/2)");
        // Int times rational stays rational even when whole
        assert_eq!(report.result, Some(Value::rational(-2, 1).unwrap()));
        assert_eq!(report.to_text_line(), "(-(4) * 1/2) => -2");
    }

    #[test]
    fn test_json_shape() {
        let result = perform_run(
            &[Job::from_text("0 + 1"), Job::from_text("-('a')")],
            &sequential(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&result.render(OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json[0]["expression"], "(0 + 1)");
        assert_eq!(json[0]["hasZero"], true);
        assert_eq!(json[0]["result"]["type"], "Int");
        assert_eq!(json[0]["result"]["data"]["i"], 1);
        assert!(json[0].get("error").is_none());

        assert_eq!(json[1]["hasZero"], false);
        assert!(json[1].get("result").is_none());
        assert!(json[1]["error"].is_string());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let jobs: Vec<Job> = (0..40)
            .map(|i| Job::from_text(format!("{} * 1/3 + 'n'", i)))
            .collect();
        let parallel = perform_run(&jobs, &DriverConfig::default());
        let sequential = perform_run(&jobs, &sequential());
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.exit_code(), 0);
    }

    #[test]
    fn test_samples_run() {
        let result = perform_run(&sample_jobs().unwrap(), &sequential());
        assert_eq!(result.failed_count(), 1);
        assert!(result
            .reports
            .iter()
            .any(|r| r.to_text_line() == "(3 + -(2)) => 1"));
        assert!(result
            .reports
            .iter()
            .any(|r| r.to_text_line() == "(1/2 * 2/3) => 1/3"));
    }

    #[test]
    fn test_deep_line_fails_alone() {
        let deep = format!("{}1{}", "-(".repeat(200_000), ")".repeat(200_000));
        let jobs = vec![Job::from_text(deep), Job::from_text("1 + 1")];
        let result = perform_run(&jobs, &sequential());

        assert!(result.reports[0].failed());
        assert!(result.reports[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("nested too deeply")));
        assert_eq!(result.reports[1].to_text_line(), "(1 + 1) => 2");
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_read_expressions_skips_blank_and_comments() {
        let path = std::env::temp_dir().join(format!("exprgrid-input-{}.txt", std::process::id()));
        fs::write(&path, "# header\n1 + 2\n\n  -(3)  \n").unwrap();
        let lines = read_expressions(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(lines, vec!["1 + 2", "-(3)"]);
    }
}
