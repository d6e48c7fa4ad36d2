mod lcs;
mod lockstep;

use crate::{DiffOptions, Hunk, HunkAlgorithm};

/// Splits the difference between two texts into hunks.
///
/// [`HunkAlgorithm::Lcs`] falls back to lockstep hunks when aligning the
/// texts would need more than [`DiffOptions::lcs_cell_limit`] table cells.
#[must_use]
pub fn hunks(old: &str, new: &str, options: &DiffOptions) -> Vec<Hunk> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let context = options.context_lines;
    match options.algorithm {
        HunkAlgorithm::Lockstep => lockstep::hunks(&old_lines, &new_lines, context),
        HunkAlgorithm::Lcs => {
            lcs::hunks(&old_lines, &new_lines, context, options.lcs_cell_limit).unwrap_or_else(
                || {
                    tracing::warn!(
                        old_lines = old_lines.len(),
                        new_lines = new_lines.len(),
                        limit = options.lcs_cell_limit,
                        "alignment table too large, falling back to lockstep hunks"
                    );
                    lockstep::hunks(&old_lines, &new_lines, context)
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineKind;

    fn numbered(prefix: &str, count: usize) -> String {
        (0..count).map(|k| format!("{prefix} {k}\n")).collect()
    }

    #[test]
    fn lcs_over_the_cell_limit_uses_lockstep() {
        let options = DiffOptions::default()
            .with_algorithm(HunkAlgorithm::Lcs)
            .with_lcs_cell_limit(10);

        let found = hunks("a\nb\nc\nd\n", "w\nx\ny\nz\n", &options);

        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|h| h.count(LineKind::Added) == 1));
    }

    #[test]
    fn large_rewrite_with_lcs_falls_back_at_the_default_limit() {
        let old = numbered("old", 5_000);
        let new = numbered("new", 5_000);
        let options = DiffOptions::default().with_algorithm(HunkAlgorithm::Lcs);

        let found = hunks(&old, &new, &options);

        let added: usize = found.iter().map(|h| h.count(LineKind::Added)).sum();
        let removed: usize = found.iter().map(|h| h.count(LineKind::Removed)).sum();
        assert_eq!((added, removed), (5_000, 5_000));
    }
}
