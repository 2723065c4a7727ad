//! Rendering titled tables as plain text, HTML or JSON.

use std::fmt::Write as _;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, SieveError};
use crate::input::{Dataset, Value};

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            _ => Err(SieveError::Config(format!(
                "Unknown report format: {}. Use text, html, or json.",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// A titled subset of records.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub title: String,
    pub table: Dataset,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, table: Dataset) -> Self {
        Self {
            title: title.into(),
            table,
        }
    }
}

#[derive(Serialize)]
struct JsonSection<'a> {
    title: &'a str,
    columns: &'a [String],
    rows: Vec<IndexMap<&'a str, &'a Value>>,
}

/// Renders report sections. Rendering never alters the data.
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render all sections into one document.
    pub fn render(&self, sections: &[ReportSection]) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(sections
                .iter()
                .map(|s| render_text(&s.title, &s.table))
                .collect::<Vec<_>>()
                .join("\n")),
            ReportFormat::Html => Ok(render_html_document(sections)),
            ReportFormat::Json => render_json(sections),
        }
    }
}

/// Plain-text table with a title. An empty table renders as `(no rows)`.
pub fn render_text(title: &str, table: &Dataset) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out, "{}", format_row(table.headers.iter().map(String::as_str), &widths));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-")
    );

    if cells.is_empty() {
        let _ = writeln!(out, "(no rows)");
    }
    for row in &cells {
        let _ = writeln!(out, "{}", format_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn format_row<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = values
        .zip(widths)
        .map(|(v, &w)| format!("{:<w$}", v, w = w))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

/// HTML heading plus table for one section.
pub fn render_html(title: &str, table: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(title));
    out.push_str("<table border=\"1\" class=\"dataframe\">\n<thead>\n<tr>");
    for header in &table.headers {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for value in row {
            let _ = write!(out, "<td>{}</td>", escape_html(&value.to_string()));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

fn render_html_document(sections: &[ReportSection]) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Data Quality Report</title>\n</head>\n<body>\n",
    );
    for section in sections {
        out.push_str(&render_html(&section.title, &section.table));
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn render_json(sections: &[ReportSection]) -> Result<String> {
    let json: Vec<JsonSection<'_>> = sections
        .iter()
        .map(|s| JsonSection {
            title: &s.title,
            columns: &s.table.headers,
            rows: s
                .table
                .rows
                .iter()
                .map(|row| s.table.headers.iter().map(String::as_str).zip(row).collect())
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json)?)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
