//! `requestor check` command implementation.
//!
//! Validates the configuration, then checks what a running server would
//! depend on:
//! - AI server URL resolution
//! - Raw SQL endpoint exposure
//! - Database connectivity and the exportable catalog

use anyhow::Result;
use requestor_core::{ConfigError, RequestorConfig, SchemaSnapshot};
use requestor_runtime::collect_schema;
use std::path::Path;

// ============================================================================
// Check Result Types
// ============================================================================

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        })
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Category of the check that produced this finding.
    pub category: &'static str,
    pub message: String,
}

impl CheckFinding {
    fn error(category: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
        }
    }

    fn warning(category: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            message: message.into(),
        }
    }

    fn info(category: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            category,
            message: message.into(),
        }
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    fn add(&mut self, finding: CheckFinding) {
        self.findings.push(finding);
    }

    fn extend(&mut self, findings: impl IntoIterator<Item = CheckFinding>) {
        self.findings.extend(findings);
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Print human-readable summary, most severe first.
    pub fn print_summary(&self) {
        let mut findings: Vec<_> = self.findings.iter().collect();
        findings.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.category.cmp(b.category)));

        println!();
        for finding in &findings {
            let icon = match finding.severity {
                Severity::Error => "✗",
                Severity::Warning => "⚠",
                Severity::Info => "ℹ",
            };
            println!(
                "  {} {:<5} [{}] {}",
                icon, finding.severity, finding.category, finding.message
            );
        }

        let errors = self.count(Severity::Error);
        let warnings = self.count(Severity::Warning);
        println!();
        println!("{}", "═".repeat(60));
        if errors == 0 && warnings == 0 {
            println!("✅ All checks passed!");
        } else {
            println!("Summary: {} error(s), {} warning(s)", errors, warnings);
        }
    }
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_ai_server(config: &RequestorConfig) -> CheckFinding {
    match config.ai_server.resolve_base_url() {
        Ok(url) => CheckFinding::info("ai_server", format!("Dispatching to {}", url)),
        Err(e @ ConfigError::MissingAiServerUrl(_)) => CheckFinding::warning(
            "ai_server",
            format!("{}; only peek requests will succeed", e),
        ),
        Err(e) => CheckFinding::error("ai_server", e.to_string()),
    }
}

fn check_raw_query(config: &RequestorConfig) -> Option<CheckFinding> {
    config.raw_query.enabled.then(|| {
        CheckFinding::warning(
            "raw_query",
            "/api/run_query is enabled and executes arbitrary SQL",
        )
    })
}

fn check_catalog(schema: &SchemaSnapshot) -> CheckFinding {
    if schema.is_empty() {
        CheckFinding::warning(
            "catalog",
            "No exportable tables found; ai_suggest will send an empty schema",
        )
    } else {
        CheckFinding::info(
            "catalog",
            format!(
                "{} exportable table(s), {} column(s)",
                schema.len(),
                schema.column_count()
            ),
        )
    }
}

/// Checks that need no network access.
pub fn check_config(config: &RequestorConfig) -> Vec<CheckFinding> {
    let mut findings = vec![check_ai_server(config)];
    findings.extend(check_raw_query(config));
    findings
}

// ============================================================================
// Main Check Runner
// ============================================================================

/// Run all checks and print a report. Fails if any check produced an error.
pub async fn run(config_path: &Path) -> Result<()> {
    println!("🔍 Checking requestor configuration...");

    let mut results = CheckResults::default();

    let config = match super::load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            results.add(CheckFinding::error("config", format!("{:#}", e)));
            results.print_summary();
            anyhow::bail!("Configuration could not be loaded");
        }
    };

    println!("  ⚙️  Checking settings...");
    results.extend(check_config(&config));

    println!("  🗄️  Checking database...");
    match super::connect(&config).await {
        Ok(source) => {
            match source.server_version().await {
                Ok(version) => {
                    results.add(CheckFinding::info("database", format!("Server {}", version)))
                }
                Err(e) => results.add(CheckFinding::error("database", format!("{:#}", e))),
            }
            match collect_schema(&source, &config.catalog).await {
                Ok(schema) => results.add(check_catalog(&schema)),
                Err(e) => results.add(CheckFinding::error("catalog", format!("{:#}", e))),
            }
        }
        Err(e) => results.add(CheckFinding::error("database", format!("{:#}", e))),
    }

    results.print_summary();

    if results.has_errors() {
        anyhow::bail!("Check found {} error(s)", results.count(Severity::Error));
    }
    Ok(())
}
