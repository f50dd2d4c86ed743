use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::ScriptError;
use crate::html::escape_html;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Equal,
    Added,
    Removed,
}

/// A run of consecutive lines sharing one classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOperation {
    pub kind: OpKind,
    pub lines: Vec<String>,
}

impl DiffOperation {
    pub fn new(kind: OpKind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Builds an operation from a raw bundle of text such as `"a\nb\n"`.
    ///
    /// Exactly one trailing empty line is dropped when the bundle ends with a
    /// terminator, so `"a\n"` and `"a"` both give `["a"]`.
    pub fn from_bundle(kind: OpKind, bundle: &str) -> Self {
        Self {
            kind,
            lines: Document::from_str(bundle).lines(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Ordered operations covering two texts end to end.
///
/// `Equal` + `Removed` lines give back the old text and `Equal` + `Added`
/// lines give back the new text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DiffOperation>", into = "Vec<DiffOperation>")]
pub struct DiffScript {
    ops: Vec<DiffOperation>,
}

impl DiffScript {
    pub fn new(ops: Vec<DiffOperation>) -> Result<Self, ScriptError> {
        let mut kept = Vec::with_capacity(ops.len());
        for (index, op) in ops.into_iter().enumerate() {
            if !op.is_empty() {
                kept.push(op);
                continue;
            }
            match op.kind {
                OpKind::Equal => {}
                kind => return Err(ScriptError::EmptyBundle { index, kind }),
            }
        }
        Ok(Self { ops: kept })
    }

    pub(crate) fn from_ops_unchecked(ops: Vec<DiffOperation>) -> Self {
        debug_assert!(
            ops.iter()
                .all(|op| op.kind == OpKind::Equal || !op.is_empty())
        );
        Self { ops }
    }

    pub fn operations(&self) -> &[DiffOperation] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn old_lines(&self) -> Vec<&str> {
        self.side_lines(OpKind::Removed)
    }

    pub fn new_lines(&self) -> Vec<&str> {
        self.side_lines(OpKind::Added)
    }

    pub fn old_text(&self) -> String {
        self.old_lines().join("\n")
    }

    pub fn new_text(&self) -> String {
        self.new_lines().join("\n")
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for op in &self.ops {
            match op.kind {
                OpKind::Equal => stats.unchanged += op.len(),
                OpKind::Added => stats.added += op.len(),
                OpKind::Removed => stats.removed += op.len(),
            }
        }
        stats
    }

    fn side_lines(&self, changed: OpKind) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| op.kind == OpKind::Equal || op.kind == changed)
            .flat_map(|op| op.lines.iter().map(String::as_str))
            .collect()
    }
}

impl TryFrom<Vec<DiffOperation>> for DiffScript {
    type Error = ScriptError;

    fn try_from(ops: Vec<DiffOperation>) -> Result<Self, Self::Error> {
        Self::new(ops)
    }
}

impl From<DiffScript> for Vec<DiffOperation> {
    fn from(script: DiffScript) -> Self {
        script.ops
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Added,
    Removed,
    Context,
}

impl Marker {
    pub fn as_char(self) -> char {
        match self {
            Marker::Added => '+',
            Marker::Removed => '-',
            Marker::Context => ' ',
        }
    }
}

impl From<OpKind> for Marker {
    fn from(kind: OpKind) -> Self {
        match kind {
            OpKind::Equal => Marker::Context,
            OpKind::Added => Marker::Added,
            OpKind::Removed => Marker::Removed,
        }
    }
}

/// One line of the unified view. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub marker: Marker,
    pub text: String,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
}

impl DisplayLine {
    pub fn escaped_text(&self) -> String {
        escape_html(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Placeholder,
    Line {
        line_no: usize,
        text: String,
        highlighted: bool,
    },
}

impl Cell {
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Placeholder => None,
            Cell::Line { text, .. } => Some(text),
        }
    }

    pub fn line_no(&self) -> Option<usize> {
        match self {
            Cell::Placeholder => None,
            Cell::Line { line_no, .. } => Some(*line_no),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder)
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(
            self,
            Cell::Line {
                highlighted: true,
                ..
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub left: Cell,
    pub right: Cell,
}

impl AlignedRow {
    pub fn kind(&self) -> OpKind {
        match (&self.left, &self.right) {
            (Cell::Placeholder, _) => OpKind::Added,
            (_, Cell::Placeholder) => OpKind::Removed,
            _ => OpKind::Equal,
        }
    }
}

/// Two-column rendering of a comparison.
///
/// `Verbatim` is produced when no line differ is available: both texts are
/// shown as-is with no row pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SideBySide {
    Aligned { rows: Vec<AlignedRow> },
    Verbatim { old: String, new: String },
}

impl SideBySide {
    pub fn is_aligned(&self) -> bool {
        matches!(self, SideBySide::Aligned { .. })
    }

    pub fn rows(&self) -> Option<&[AlignedRow]> {
        match self {
            SideBySide::Aligned { rows } => Some(rows),
            SideBySide::Verbatim { .. } => None,
        }
    }

    pub fn left_column(&self) -> Vec<&Cell> {
        self.rows()
            .map(|rows| rows.iter().map(|row| &row.left).collect())
            .unwrap_or_default()
    }

    pub fn right_column(&self) -> Vec<&Cell> {
        self.rows()
            .map(|rows| rows.iter().map(|row| &row.right).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_empty_added_bundle() {
        let err = DiffScript::new(vec![
            DiffOperation::new(OpKind::Equal, lines(&["a"])),
            DiffOperation::new(OpKind::Added, Vec::new()),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ScriptError::EmptyBundle {
                index: 1,
                kind: OpKind::Added
            }
        );
    }

    #[test]
    fn drops_degenerate_equal_ops() {
        let script = DiffScript::new(vec![DiffOperation::new(OpKind::Equal, Vec::new())]).unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn reconstructs_both_sides() {
        let script = DiffScript::new(vec![
            DiffOperation::new(OpKind::Equal, lines(&["keep"])),
            DiffOperation::new(OpKind::Removed, lines(&["old"])),
            DiffOperation::new(OpKind::Added, lines(&["new", "more"])),
        ])
        .unwrap();
        assert_eq!(script.old_text(), "keep\nold");
        assert_eq!(script.new_text(), "keep\nnew\nmore");
        assert_eq!(
            script.stats(),
            DiffStats {
                added: 2,
                removed: 1,
                unchanged: 1
            }
        );
    }

    #[test]
    fn bundle_drops_only_one_trailing_blank() {
        let op = DiffOperation::from_bundle(OpKind::Added, "a\n\n");
        assert_eq!(op.lines, lines(&["a", ""]));
        let op = DiffOperation::from_bundle(OpKind::Added, "a\n");
        assert_eq!(op.lines, lines(&["a"]));
    }

    #[test]
    fn script_json_is_validated() {
        let json = r#"[{"kind":"equal","lines":["a"]},{"kind":"removed","lines":[]}]"#;
        assert!(serde_json::from_str::<DiffScript>(json).is_err());

        let json = r#"[{"kind":"equal","lines":["a"]},{"kind":"added","lines":["b"]}]"#;
        let script: DiffScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.new_lines(), vec!["a", "b"]);
    }
}
