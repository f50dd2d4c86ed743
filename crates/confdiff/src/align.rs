use crate::model::{AlignedRow, Cell, DiffScript, OpKind, SideBySide};

/// Pairs a script into side-by-side rows.
///
/// Every source line yields exactly one row. Additions and removals are
/// padded on the opposite column with a placeholder; a removal followed by an
/// addition is not folded into shared rows.
pub fn align(script: &DiffScript) -> Vec<AlignedRow> {
    let capacity = script.operations().iter().map(|op| op.len()).sum();
    let mut rows = Vec::with_capacity(capacity);
    let mut old_no = 0usize;
    let mut new_no = 0usize;

    for op in script.operations() {
        for text in &op.lines {
            let row = match op.kind {
                OpKind::Equal => {
                    old_no += 1;
                    new_no += 1;
                    AlignedRow {
                        left: line(old_no, text, false),
                        right: line(new_no, text, false),
                    }
                }
                OpKind::Added => {
                    new_no += 1;
                    AlignedRow {
                        left: Cell::Placeholder,
                        right: line(new_no, text, true),
                    }
                }
                OpKind::Removed => {
                    old_no += 1;
                    AlignedRow {
                        left: line(old_no, text, true),
                        right: Cell::Placeholder,
                    }
                }
            };
            rows.push(row);
        }
    }

    rows
}

pub fn side_by_side(script: &DiffScript) -> SideBySide {
    SideBySide::Aligned {
        rows: align(script),
    }
}

pub fn side_by_side_fallback(old: &str, new: &str) -> SideBySide {
    SideBySide::Verbatim {
        old: old.to_string(),
        new: new.to_string(),
    }
}

fn line(line_no: usize, text: &str, highlighted: bool) -> Cell {
    Cell::Line {
        line_no,
        text: text.to_string(),
        highlighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiffOperation;

    fn script(ops: &[(OpKind, &[&str])]) -> DiffScript {
        DiffScript::new(
            ops.iter()
                .map(|(kind, lines)| {
                    DiffOperation::new(*kind, lines.iter().map(|s| s.to_string()).collect())
                })
                .collect(),
        )
        .unwrap()
    }

    fn texts(rows: &[AlignedRow]) -> Vec<(Option<&str>, Option<&str>)> {
        rows.iter()
            .map(|row| (row.left.text(), row.right.text()))
            .collect()
    }

    #[test]
    fn equal_lines_fill_both_columns() {
        let rows = align(&script(&[(OpKind::Equal, &["a", "b"])]));
        assert_eq!(texts(&rows), vec![(Some("a"), Some("a")), (Some("b"), Some("b"))]);
        assert!(rows.iter().all(|row| !row.left.is_highlighted() && !row.right.is_highlighted()));
    }

    #[test]
    fn uneven_remove_then_add_keeps_separate_padding() {
        let rows = align(&script(&[
            (OpKind::Equal, &["head"]),
            (OpKind::Removed, &["r1", "r2", "r3"]),
            (OpKind::Added, &["a1"]),
            (OpKind::Equal, &["tail"]),
        ]));

        assert_eq!(
            texts(&rows),
            vec![
                (Some("head"), Some("head")),
                (Some("r1"), None),
                (Some("r2"), None),
                (Some("r3"), None),
                (None, Some("a1")),
                (Some("tail"), Some("tail")),
            ]
        );
        assert_eq!(rows[5].left.line_no(), Some(5));
        assert_eq!(rows[5].right.line_no(), Some(3));
    }

    #[test]
    fn highlighted_cells_sit_on_their_side() {
        let rows = align(&script(&[(OpKind::Removed, &["old"]), (OpKind::Added, &["new"])]));
        assert!(rows[0].left.is_highlighted());
        assert!(rows[0].right.is_placeholder());
        assert!(rows[1].left.is_placeholder());
        assert!(rows[1].right.is_highlighted());
        assert_eq!(rows[0].kind(), OpKind::Removed);
        assert_eq!(rows[1].kind(), OpKind::Added);
    }

    #[test]
    fn empty_script_gives_no_rows() {
        let view = side_by_side(&DiffScript::default());
        assert!(view.is_aligned());
        assert!(view.rows().is_some_and(|rows| rows.is_empty()));
    }

    #[test]
    fn fallback_is_verbatim() {
        let view = side_by_side_fallback("a\nb", "a\nc\n");
        assert!(!view.is_aligned());
        assert!(view.left_column().is_empty());
        assert_eq!(
            view,
            SideBySide::Verbatim {
                old: "a\nb".to_string(),
                new: "a\nc\n".to_string()
            }
        );
    }
}
