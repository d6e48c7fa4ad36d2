use crate::{Hunk, LineChange, LineKind};

/// Walks both texts index by index. Each differing pair becomes its own hunk
/// holding up to `context` preceding unchanged lines that no earlier hunk
/// already showed. Lines past the end of the shorter text form one final
/// pure addition or removal hunk.
pub(super) fn hunks(old: &[&str], new: &[&str], context: usize) -> Vec<Hunk> {
    let shared = old.len().min(new.len());
    let mut out = Vec::new();
    let mut shown = 0;

    for (k, (before, after)) in old.iter().zip(new).enumerate() {
        if before == after {
            continue;
        }

        let start = k.saturating_sub(context).max(shown);
        let mut changes = leading_context(old, start, k);
        changes.push(LineChange::new(LineKind::Removed, before, k + 1));
        changes.push(LineChange::new(LineKind::Added, after, k + 1));
        out.push(Hunk::from_changes(start, start, changes));
        shown = k + 1;
    }

    if old.len() != new.len() {
        let start = shared.saturating_sub(context).max(shown);
        let mut changes = leading_context(old, start, shared);
        if old.len() > shared {
            changes.extend(
                old.iter()
                    .enumerate()
                    .skip(shared)
                    .map(|(i, line)| LineChange::new(LineKind::Removed, line, i + 1)),
            );
        } else {
            changes.extend(
                new.iter()
                    .enumerate()
                    .skip(shared)
                    .map(|(j, line)| LineChange::new(LineKind::Added, line, j + 1)),
            );
        }
        out.push(Hunk::from_changes(start, start, changes));
    }

    out
}

fn leading_context(old: &[&str], from: usize, to: usize) -> Vec<LineChange> {
    (from..to)
        .map(|i| LineChange::new(LineKind::Unchanged, old[i], i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(hunk: &Hunk) -> Vec<LineKind> {
        hunk.changes.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn identical_texts_have_no_hunks() {
        assert!(hunks(&["a", "b"], &["a", "b"], 3).is_empty());
    }

    #[test]
    fn single_replacement_with_context() {
        let old = ["a", "b", "c", "d", "e"];
        let new = ["a", "b", "c", "D", "e"];

        let found = hunks(&old, &new, 2);

        assert_eq!(found.len(), 1);
        assert_eq!(
            kinds(&found[0]),
            vec![
                LineKind::Unchanged,
                LineKind::Unchanged,
                LineKind::Removed,
                LineKind::Added
            ]
        );
        assert_eq!((found[0].old_start, found[0].old_lines), (2, 3));
        assert_eq!((found[0].new_start, found[0].new_lines), (2, 3));
        assert_eq!(found[0].changes[2].text, "d");
        assert_eq!(found[0].changes[2].line_number, 4);
    }

    #[test]
    fn adjacent_differences_do_not_repeat_context() {
        let old = ["a", "b", "c"];
        let new = ["a", "X", "Y"];

        let found = hunks(&old, &new, 3);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].changes.len(), 3);
        assert_eq!(
            kinds(&found[1]),
            vec![LineKind::Removed, LineKind::Added]
        );
        assert_eq!(found[1].old_start, 3);
    }

    #[test]
    fn trailing_additions_form_one_hunk() {
        let old = ["a", "b"];
        let new = ["a", "b", "c", "d"];

        let found = hunks(&old, &new, 1);

        assert_eq!(found.len(), 1);
        assert_eq!(
            kinds(&found[0]),
            vec![LineKind::Unchanged, LineKind::Added, LineKind::Added]
        );
        assert_eq!((found[0].old_start, found[0].old_lines), (2, 1));
        assert_eq!((found[0].new_start, found[0].new_lines), (2, 3));
        assert_eq!(found[0].changes[2].line_number, 4);
    }

    #[test]
    fn trailing_removals_from_empty_new_text() {
        let found = hunks(&["a", "b"], &[], 3);

        assert_eq!(found.len(), 1);
        assert_eq!(kinds(&found[0]), vec![LineKind::Removed, LineKind::Removed]);
        assert_eq!((found[0].old_start, found[0].old_lines), (1, 2));
        assert_eq!((found[0].new_start, found[0].new_lines), (0, 0));
    }

    #[test]
    fn zero_context() {
        let found = hunks(&["a", "b"], &["a", "c"], 0);

        assert_eq!(kinds(&found[0]), vec![LineKind::Removed, LineKind::Added]);
        assert_eq!(found[0].old_start, 2);
    }
}
