use std::time::Duration;

use serde::{Deserialize, Serialize};
use similar::{DiffOp, DiffTag, TextDiff};

use crate::document::Document;
use crate::model::{DiffOperation, DiffScript, OpKind};

/// Source of line-level diff operations.
///
/// Implementations must return a script whose `Equal` + `Removed` lines
/// reconstruct `old` and whose `Equal` + `Added` lines reconstruct `new`.
pub trait LineDiffer {
    fn diff_lines(&self, old: &str, new: &str) -> DiffScript;
}

impl<F> LineDiffer for F
where
    F: Fn(&str, &str) -> DiffScript,
{
    fn diff_lines(&self, old: &str, new: &str) -> DiffScript {
        self(old, new)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for similar::Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => similar::Algorithm::Myers,
            DiffAlgorithm::Patience => similar::Algorithm::Patience,
            DiffAlgorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    pub algorithm: DiffAlgorithm,
    /// Past this deadline the differ settles for a coarser script.
    pub timeout_ms: Option<u64>,
}

/// Line differ backed by `similar`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimilarDiffer {
    options: DiffOptions,
}

impl SimilarDiffer {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DiffOptions {
        self.options
    }
}

impl LineDiffer for SimilarDiffer {
    fn diff_lines(&self, old: &str, new: &str) -> DiffScript {
        let old_lines = Document::from_str(old).lines();
        let new_lines = Document::from_str(new).lines();

        let old_refs: Vec<&str> = old_lines.iter().map(|line| line.as_str()).collect();
        let new_refs: Vec<&str> = new_lines.iter().map(|line| line.as_str()).collect();

        let mut config = TextDiff::configure();
        config.algorithm(self.options.algorithm.into());
        if let Some(timeout_ms) = self.options.timeout_ms {
            config.timeout(Duration::from_millis(timeout_ms));
        }
        let diff = config.diff_slices(&old_refs, &new_refs);

        let mut ops = Vec::new();
        for op in diff.ops() {
            push_ops_for(op, &old_lines, &new_lines, &mut ops);
        }

        DiffScript::from_ops_unchecked(ops)
    }
}

fn push_ops_for(
    op: &DiffOp,
    old_lines: &[String],
    new_lines: &[String],
    ops: &mut Vec<DiffOperation>,
) {
    match op.tag() {
        DiffTag::Equal => push_op(ops, OpKind::Equal, &old_lines[op.old_range()]),
        DiffTag::Delete => push_op(ops, OpKind::Removed, &old_lines[op.old_range()]),
        DiffTag::Insert => push_op(ops, OpKind::Added, &new_lines[op.new_range()]),
        DiffTag::Replace => {
            push_op(ops, OpKind::Removed, &old_lines[op.old_range()]);
            push_op(ops, OpKind::Added, &new_lines[op.new_range()]);
        }
    }
}

fn push_op(ops: &mut Vec<DiffOperation>, kind: OpKind, lines: &[String]) {
    if lines.is_empty() {
        return;
    }

    if let Some(last) = ops.last_mut() {
        if last.kind == kind {
            last.lines.extend_from_slice(lines);
            return;
        }
    }

    ops.push(DiffOperation::new(kind, lines.to_vec()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(script: &DiffScript) -> Vec<OpKind> {
        script.operations().iter().map(|op| op.kind).collect()
    }

    #[test]
    fn identical_texts_give_single_equal_op() {
        let text = "a=1\nb=2\n";
        let script = SimilarDiffer::default().diff_lines(text, text);
        assert_eq!(kinds(&script), vec![OpKind::Equal]);
        assert_eq!(script.operations()[0].lines, vec!["a=1", "b=2"]);
    }

    #[test]
    fn empty_inputs_give_empty_script() {
        assert!(SimilarDiffer::default().diff_lines("", "").is_empty());
    }

    #[test]
    fn changed_line_is_removed_then_added() {
        let script = SimilarDiffer::default().diff_lines("a\nb\nc", "a\nB\nc");
        assert_eq!(
            kinds(&script),
            vec![OpKind::Equal, OpKind::Removed, OpKind::Added, OpKind::Equal]
        );
        assert_eq!(script.old_text(), "a\nb\nc");
        assert_eq!(script.new_text(), "a\nB\nc");
    }

    #[test]
    fn every_algorithm_preserves_both_texts() {
        let old = "x\ny\nz\ny\nx";
        let new = "y\nx\nz\nq\nx\ny";
        for algorithm in [DiffAlgorithm::Myers, DiffAlgorithm::Patience, DiffAlgorithm::Lcs] {
            let differ = SimilarDiffer::new(DiffOptions {
                algorithm,
                timeout_ms: None,
            });
            let script = differ.diff_lines(old, new);
            assert_eq!(script.old_text(), old, "{algorithm:?}");
            assert_eq!(script.new_text(), new, "{algorithm:?}");
        }
    }

    #[test]
    fn closures_are_differs() {
        let differ = |_: &str, new: &str| {
            DiffScript::new(vec![DiffOperation::from_bundle(OpKind::Added, new)]).unwrap()
        };
        let script = differ.diff_lines("", "a\nb");
        assert_eq!(script.new_lines(), vec!["a", "b"]);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{"algorithm":"patience"}"#).unwrap();
        assert_eq!(options.algorithm, DiffAlgorithm::Patience);
        assert_eq!(options.timeout_ms, None);
    }
}
