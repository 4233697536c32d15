//! Output formatters for CLI commands.
//!
//! Provides table and JSON renderings of a validation report. Values are masked
//! unless the caller asks to reveal them, since env files routinely hold secrets.

use anyhow::Result;
use envgate::{Outcome, RunResult};
use serde::Serialize;

const MASK: &str = "********";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One report line.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub key: String,
    pub status: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn mask(value: &str, reveal: bool) -> String {
    if reveal || value.is_empty() {
        value.to_string()
    } else {
        MASK.to_string()
    }
}

/// Built-in validators end their failure messages with the rejected value.
fn redact_message(message: &str, value: &str, reveal: bool) -> String {
    if reveal {
        return message.to_string();
    }
    [value, value.trim()]
        .into_iter()
        .filter(|v| !v.is_empty())
        .find_map(|v| message.strip_suffix(v))
        .map(|prefix| format!("{prefix}{MASK}"))
        .unwrap_or_else(|| message.to_string())
}

/// Report rows in declaration order.
pub fn report_rows(result: &RunResult, reveal: bool) -> Vec<ReportRow> {
    result
        .iter()
        .map(|v| {
            let (status, message) = match &v.outcome {
                Outcome::Ok => ("ok", None),
                Outcome::Failed(message) => {
                    ("failed", Some(redact_message(message, &v.value, reveal)))
                }
            };
            ReportRow {
                key: v.key.clone(),
                status,
                value: mask(&v.value, reveal),
                message,
            }
        })
        .collect()
}

/// Render a validation report.
pub fn format_report(result: &RunResult, format: OutputFormat, reveal: bool) -> Result<String> {
    let rows = report_rows(result, reveal);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => Ok(format_table(&rows)),
    }
}

fn format_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return "No keys declared.".to_string();
    }

    let headers = ["KEY", "STATUS", "VALUE"];
    let key_width = rows
        .iter()
        .map(|r| r.key.len())
        .chain([headers[0].len()])
        .max()
        .unwrap_or(0);
    let status_width = rows
        .iter()
        .map(|r| r.status.len())
        .chain([headers[1].len()])
        .max()
        .unwrap_or(0);

    let mut output = format!(
        "{:<key_width$}  {:<status_width$}  {}\n",
        headers[0], headers[1], headers[2]
    );
    for row in rows {
        let detail = row.message.as_deref().unwrap_or(&row.value);
        output.push_str(&format!(
            "{:<key_width$}  {:<status_width$}  {}\n",
            row.key, row.status, detail
        ));
    }
    output
}
