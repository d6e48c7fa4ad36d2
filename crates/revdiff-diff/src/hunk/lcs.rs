use crate::{Hunk, LineChange, LineKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Keep { old: usize, new: usize },
    Remove { old: usize },
    Insert { new: usize },
}

/// Minimal line edit script by longest common subsequence. Removals are
/// listed before insertions inside each changed region. The shared prefix and
/// suffix are kept without alignment; `None` when the table for the remaining
/// middle section would exceed `max_cells`.
fn edit_script(old: &[&str], new: &[&str], max_cells: usize) -> Option<Vec<Op>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    let (n, m) = (old_mid.len(), new_mid.len());
    if (n + 1).checked_mul(m + 1)? > max_cells {
        return None;
    }

    // lcs[i][j] = LCS length of old_mid[i..] and new_mid[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old_mid[i] == new_mid[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(old.len() + new.len());
    ops.extend((0..prefix).map(|k| Op::Keep { old: k, new: k }));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old_mid[i] == new_mid[j] {
            ops.push(Op::Keep {
                old: prefix + i,
                new: prefix + j,
            });
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Remove { old: prefix + i });
            i += 1;
        } else {
            ops.push(Op::Insert { new: prefix + j });
            j += 1;
        }
    }
    ops.extend((i..n).map(|k| Op::Remove { old: prefix + k }));
    ops.extend((j..m).map(|k| Op::Insert { new: prefix + k }));
    ops.extend((0..suffix).map(|k| Op::Keep {
        old: prefix + n + k,
        new: prefix + m + k,
    }));
    Some(ops)
}

/// Groups the edit script into hunks, keeping `context` unchanged lines on
/// both sides of each change and merging hunks whose context would overlap.
/// Returns `None` when the alignment would need more than `max_cells` table
/// cells.
pub(super) fn hunks(
    old: &[&str],
    new: &[&str],
    context: usize,
    max_cells: usize,
) -> Option<Vec<Hunk>> {
    let ops = edit_script(old, new, max_cells)?;
    let changed: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| !matches!(op, Op::Keep { .. }))
        .map(|(index, _)| index)
        .collect();

    let mut windows: Vec<(usize, usize)> = Vec::new();
    for &index in &changed {
        let from = index.saturating_sub(context);
        let to = (index + context + 1).min(ops.len());
        match windows.last_mut() {
            Some((_, end)) if from <= *end => *end = to,
            _ => windows.push((from, to)),
        }
    }

    let hunks = windows
        .into_iter()
        .map(|(from, to)| {
            let (old_index, new_index) = position(&ops, from);
            let changes = ops[from..to]
                .iter()
                .map(|op| match *op {
                    Op::Keep { old: i, .. } => LineChange::new(LineKind::Unchanged, old[i], i + 1),
                    Op::Remove { old: i } => LineChange::new(LineKind::Removed, old[i], i + 1),
                    Op::Insert { new: j } => LineChange::new(LineKind::Added, new[j], j + 1),
                })
                .collect();
            Hunk::from_changes(old_index, new_index, changes)
        })
        .collect();
    Some(hunks)
}

/// 0-based old and new line positions reached before `ops[at]`.
fn position(ops: &[Op], at: usize) -> (usize, usize) {
    ops[..at].iter().fold((0, 0), |(i, j), op| match op {
        Op::Keep { .. } => (i + 1, j + 1),
        Op::Remove { .. } => (i + 1, j),
        Op::Insert { .. } => (i, j + 1),
    })
}
