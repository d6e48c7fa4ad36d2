use std::fmt::Write;

use crate::{ComparisonResult, Result};

use super::{ReportSerializer, file_sections, metric_rows, summary_rows, yes_no};

pub struct MarkdownSerializer;

impl MarkdownSerializer {
    fn header(output: &mut String, result: &ComparisonResult) {
        output.push_str("# Version Comparison Report\n\n");
        let _ = writeln!(output, "- **Project:** {}", result.project);
        let _ = writeln!(
            output,
            "- **Versions:** {} -> {}",
            result.version_a, result.version_b
        );
        let _ = writeln!(output, "- **Generated:** {}", result.generated_at.to_rfc3339());
    }

    fn summary(output: &mut String, result: &ComparisonResult) {
        output.push_str("\n## Summary\n\n| Metric | Value |\n| --- | --- |\n");
        for (label, value) in summary_rows(result) {
            let _ = writeln!(output, "| {label} | {} |", cell(&value));
        }
    }

    fn file_list(output: &mut String, title: &str, files: &[String]) {
        let _ = writeln!(output, "\n## {title}\n");
        if files.is_empty() {
            output.push_str("_None_\n");
            return;
        }
        for file in files {
            let _ = writeln!(output, "- `{file}`");
        }
    }

    fn api_changes(output: &mut String, result: &ComparisonResult) {
        output.push_str("\n## API Changes\n\n");
        if result.api_changes.is_empty() {
            output.push_str("_None_\n");
            return;
        }
        output.push_str("| Name | Change | Kind | File | Breaking | Details |\n");
        output.push_str("| --- | --- | --- | --- | --- | --- |\n");
        for change in &result.api_changes {
            let _ = writeln!(
                output,
                "| `{}` | {} | {} | {} | {} | {} |",
                cell(&change.name),
                change.change_type,
                change.kind,
                cell(&change.file),
                yes_no(change.breaking),
                cell(&change.details)
            );
        }
    }

    fn metrics(output: &mut String, result: &ComparisonResult) {
        output.push_str("\n## Quality Metrics\n\n");
        output.push_str("| Metric | Old | New | Difference |\n| --- | ---: | ---: | ---: |\n");
        for (label, delta) in metric_rows(result) {
            let _ = writeln!(
                output,
                "| {label} | {:.2} | {:.2} | {:+.2} |",
                delta.old, delta.new, delta.difference
            );
        }
    }

    fn recommendations(output: &mut String, result: &ComparisonResult) {
        output.push_str("\n## Recommendations\n\n");
        if result.recommendations.is_empty() {
            output.push_str("_None_\n");
            return;
        }
        for line in &result.recommendations {
            let _ = writeln!(output, "- {line}");
        }
    }
}

impl ReportSerializer for MarkdownSerializer {
    fn serialize(&self, result: &ComparisonResult) -> Result<String> {
        let mut output = String::new();
        Self::header(&mut output, result);
        Self::summary(&mut output, result);
        for (title, files) in file_sections(result) {
            Self::file_list(&mut output, title, files);
        }
        Self::api_changes(&mut output, result);
        Self::metrics(&mut output, result);
        Self::recommendations(&mut output, result);
        Ok(output)
    }
}

/// Table cells cannot contain pipes or line breaks.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::fixture;

    fn render() -> String {
        MarkdownSerializer
            .serialize(&fixture::result())
            .expect("renders")
    }

    #[test]
    fn sections_appear_in_order() {
        let text = render();
        let headings: Vec<&str> = text.lines().filter(|l| l.starts_with('#')).collect();

        assert_eq!(
            headings,
            vec![
                "# Version Comparison Report",
                "## Summary",
                "## Files Added",
                "## Files Modified",
                "## Files Deleted",
                "## API Changes",
                "## Quality Metrics",
                "## Recommendations",
            ]
        );
    }

    #[test]
    fn header_names_project_versions_and_time() {
        let text = render();

        assert!(text.contains("- **Project:** shop\n"));
        assert!(text.contains("- **Versions:** 1.2.0 -> 2.0.0\n"));
        assert!(text.contains("- **Generated:** 2023-11-14T22:13:20+00:00\n"));
    }

    #[test]
    fn file_lists_and_api_table() {
        let text = render();

        assert!(text.contains("## Files Added\n\n- `src/promo.x`\n"));
        assert!(text.contains("## Files Deleted\n\n- `src/legacy.x`\n"));
        assert!(text.contains(
            "| `legacyTotal` | Deleted | unknown | src/legacy.x | yes | unknown removed from src/legacy.x |"
        ));
        assert!(text.contains(
            "| `checkout` | Modified | unknown | src/cart.x | yes | signature changed from `(cart)` to `(cart, coupon)` |"
        ));
    }

    #[test]
    fn metrics_show_signed_differences() {
        let text = render();

        assert!(text.contains("| Cyclomatic complexity | 10.00 | 12.00 | +2.00 |"));
        assert!(text.contains("| Maintainability | 70.00 | 68.50 | -1.50 |"));
        assert!(text.contains("| Breaking changes | 2 |"));
    }

    #[test]
    fn empty_lists_render_placeholder() {
        let mut result = fixture::result();
        result.files_modified.clear();
        result.api_changes.clear();

        let text = MarkdownSerializer.serialize(&result).expect("renders");

        assert!(text.contains("## Files Modified\n\n_None_\n"));
        assert!(text.contains("## API Changes\n\n_None_\n"));
    }

    #[test]
    fn pipes_in_cells_are_escaped() {
        assert_eq!(cell("a | b\nc"), "a \\| b c");
    }
}
