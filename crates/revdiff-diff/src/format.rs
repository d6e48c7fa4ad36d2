use std::fmt::Write;

use revdiff_core::ChangeType;

use crate::options::DEFAULT_SIDE_BY_SIDE_WIDTH;
use crate::{DiffFormat, DiffOptions, DiffReport, FileDiff, Hunk, LineKind};

const NULL_PATH: &str = "/dev/null";
const MIN_COLUMN: usize = 8;

#[must_use]
pub fn render(report: &DiffReport, format: DiffFormat) -> String {
    match format {
        DiffFormat::Unified => format_unified(report),
        DiffFormat::Context => format_context(report),
        DiffFormat::SideBySide => format_side_by_side(report, DEFAULT_SIDE_BY_SIDE_WIDTH),
    }
}

/// Renders with the layout and width carried by `options`.
#[must_use]
pub fn render_with(report: &DiffReport, options: &DiffOptions) -> String {
    match options.format {
        DiffFormat::SideBySide => format_side_by_side(report, options.side_by_side_width),
        other => render(report, other),
    }
}

fn sides(file: &FileDiff) -> (String, String) {
    let old = match file.change_type {
        ChangeType::Added => NULL_PATH.to_string(),
        _ => format!("a/{}", file.path),
    };
    let new = match file.change_type {
        ChangeType::Deleted => NULL_PATH.to_string(),
        _ => format!("b/{}", file.path),
    };
    (old, new)
}

#[must_use]
pub fn format_unified(report: &DiffReport) -> String {
    let mut output = String::new();

    for file in &report.files {
        let (old, new) = sides(file);
        let _ = writeln!(output, "--- {old}");
        let _ = writeln!(output, "+++ {new}");

        for hunk in &file.hunks {
            let _ = writeln!(
                output,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
            );
            for change in &hunk.changes {
                let marker = match change.kind {
                    LineKind::Added => '+',
                    LineKind::Removed => '-',
                    LineKind::Unchanged => ' ',
                };
                let _ = writeln!(output, "{marker}{}", change.text);
            }
        }
    }

    output
}

fn context_range(start: usize, lines: usize) -> String {
    match lines {
        0 | 1 => start.to_string(),
        _ => format!("{start},{}", start + lines - 1),
    }
}

#[must_use]
pub fn format_context(report: &DiffReport) -> String {
    let mut output = String::new();

    for file in &report.files {
        let (old, new) = sides(file);
        let _ = writeln!(output, "*** {old}");
        let _ = writeln!(output, "--- {new}");

        for hunk in &file.hunks {
            output.push_str("***************\n");
            let _ = writeln!(
                output,
                "*** {} ****",
                context_range(hunk.old_start, hunk.old_lines)
            );
            write_context_side(&mut output, hunk, LineKind::Removed, "- ");
            let _ = writeln!(
                output,
                "--- {} ----",
                context_range(hunk.new_start, hunk.new_lines)
            );
            write_context_side(&mut output, hunk, LineKind::Added, "+ ");
        }
    }

    output
}

/// Writes one side of a context hunk: unchanged lines plus the lines of
/// `kind`. A side without any `kind` lines is left empty.
fn write_context_side(output: &mut String, hunk: &Hunk, kind: LineKind, marker: &str) {
    if hunk.count(kind) == 0 {
        return;
    }
    for change in &hunk.changes {
        if change.kind == kind {
            let _ = writeln!(output, "{marker}{}", change.text);
        } else if change.kind == LineKind::Unchanged {
            let _ = writeln!(output, "  {}", change.text);
        }
    }
}

/// Two fixed-width columns: `|` marks a changed pair, `<` a line only on the
/// left, `>` a line only on the right.
#[must_use]
pub fn format_side_by_side(report: &DiffReport, width: usize) -> String {
    let column = (width.saturating_sub(3) / 2).max(MIN_COLUMN);
    let mut output = String::new();

    for file in &report.files {
        let (old, new) = sides(file);
        output.push_str(&row(&old, ' ', &new, column));
        output.push_str(&"=".repeat(column * 2 + 3));
        output.push('\n');

        for hunk in &file.hunks {
            let mut removed: Vec<&str> = Vec::new();
            let mut added: Vec<&str> = Vec::new();
            for change in &hunk.changes {
                match change.kind {
                    LineKind::Removed => removed.push(&change.text),
                    LineKind::Added => added.push(&change.text),
                    LineKind::Unchanged => {
                        flush(&mut output, &mut removed, &mut added, column);
                        output.push_str(&row(&change.text, ' ', &change.text, column));
                    }
                }
            }
            flush(&mut output, &mut removed, &mut added, column);
        }
    }

    output
}

fn flush(output: &mut String, removed: &mut Vec<&str>, added: &mut Vec<&str>, column: usize) {
    let paired = removed.len().max(added.len());
    for index in 0..paired {
        let line = match (removed.get(index), added.get(index)) {
            (Some(left), Some(right)) => row(left, '|', right, column),
            (Some(left), None) => row(left, '<', "", column),
            (None, Some(right)) => row("", '>', right, column),
            (None, None) => continue,
        };
        output.push_str(&line);
    }
    removed.clear();
    added.clear();
}

fn row(left: &str, marker: char, right: &str, column: usize) -> String {
    let left: String = left.chars().take(column).collect();
    let right: String = right.chars().take(column).collect();
    let line = format!("{left:<column$} {marker} {right}");
    format!("{}\n", line.trim_end())
}
