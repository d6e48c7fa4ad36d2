use std::fmt::Write;

use crate::{ComparisonResult, Result};

use super::{ReportSerializer, file_sections, metric_rows, summary_rows, yes_no};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;margin:1em 0}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
th{background:#f4f4f4}\
tr.breaking td{background:#fdecea}\
.none{color:#888;font-style:italic}";

/// Standalone HTML page with inline styles.
pub struct HtmlSerializer;

impl HtmlSerializer {
    fn head(output: &mut String, result: &ComparisonResult) {
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(
            output,
            "<title>Version Comparison Report: {}</title>",
            escape(&result.project)
        );
        let _ = writeln!(output, "<style>{STYLE}</style>");
        output.push_str("</head>\n<body>\n<h1>Version Comparison Report</h1>\n");
        let _ = writeln!(
            output,
            "<p><strong>Project:</strong> {} &middot; <strong>Versions:</strong> {} &rarr; {} &middot; <strong>Generated:</strong> {}</p>",
            escape(&result.project),
            escape(&result.version_a),
            escape(&result.version_b),
            result.generated_at.to_rfc3339()
        );
    }

    fn summary(output: &mut String, result: &ComparisonResult) {
        output.push_str("<h2>Summary</h2>\n<table>\n<tr><th>Metric</th><th>Value</th></tr>\n");
        for (label, value) in summary_rows(result) {
            let _ = writeln!(output, "<tr><td>{label}</td><td>{}</td></tr>", escape(&value));
        }
        output.push_str("</table>\n");
    }

    fn file_list(output: &mut String, title: &str, files: &[String]) {
        let _ = writeln!(output, "<h2>{title}</h2>");
        if files.is_empty() {
            output.push_str("<p class=\"none\">None</p>\n");
            return;
        }
        output.push_str("<ul>\n");
        for file in files {
            let _ = writeln!(output, "<li><code>{}</code></li>", escape(file));
        }
        output.push_str("</ul>\n");
    }

    fn api_changes(output: &mut String, result: &ComparisonResult) {
        output.push_str("<h2>API Changes</h2>\n");
        if result.api_changes.is_empty() {
            output.push_str("<p class=\"none\">None</p>\n");
            return;
        }
        output.push_str(
            "<table>\n<tr><th>Name</th><th>Change</th><th>Kind</th><th>File</th><th>Breaking</th><th>Details</th></tr>\n",
        );
        for change in &result.api_changes {
            let class = if change.breaking { " class=\"breaking\"" } else { "" };
            let _ = writeln!(
                output,
                "<tr{class}><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&change.name),
                change.change_type,
                change.kind,
                escape(&change.file),
                yes_no(change.breaking),
                escape(&change.details)
            );
        }
        output.push_str("</table>\n");
    }

    fn metrics(output: &mut String, result: &ComparisonResult) {
        output.push_str(
            "<h2>Quality Metrics</h2>\n<table>\n<tr><th>Metric</th><th>Old</th><th>New</th><th>Difference</th></tr>\n",
        );
        for (label, delta) in metric_rows(result) {
            let _ = writeln!(
                output,
                "<tr><td>{label}</td><td>{:.2}</td><td>{:.2}</td><td>{:+.2}</td></tr>",
                delta.old, delta.new, delta.difference
            );
        }
        output.push_str("</table>\n");
    }

    fn recommendations(output: &mut String, result: &ComparisonResult) {
        output.push_str("<h2>Recommendations</h2>\n");
        if result.recommendations.is_empty() {
            output.push_str("<p class=\"none\">None</p>\n");
            return;
        }
        output.push_str("<ul>\n");
        for line in &result.recommendations {
            let _ = writeln!(output, "<li>{}</li>", escape(line));
        }
        output.push_str("</ul>\n");
    }
}

impl ReportSerializer for HtmlSerializer {
    fn serialize(&self, result: &ComparisonResult) -> Result<String> {
        let mut output = String::new();
        Self::head(&mut output, result);
        Self::summary(&mut output, result);
        for (title, files) in file_sections(result) {
            Self::file_list(&mut output, title, files);
        }
        Self::api_changes(&mut output, result);
        Self::metrics(&mut output, result);
        Self::recommendations(&mut output, result);
        output.push_str("</body>\n</html>\n");
        Ok(output)
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
