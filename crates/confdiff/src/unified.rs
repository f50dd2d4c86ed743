use crate::document::Document;
use crate::model::{DiffScript, DisplayLine, Marker, OpKind};

/// Flattens a script into signed display lines, one per source line.
pub fn render_unified(script: &DiffScript) -> Vec<DisplayLine> {
    let mut out = Vec::new();
    let mut old_no = 0usize;
    let mut new_no = 0usize;

    for op in script.operations() {
        for text in &op.lines {
            let (old_line, new_line) = match op.kind {
                OpKind::Equal => {
                    old_no += 1;
                    new_no += 1;
                    (Some(old_no), Some(new_no))
                }
                OpKind::Added => {
                    new_no += 1;
                    (None, Some(new_no))
                }
                OpKind::Removed => {
                    old_no += 1;
                    (Some(old_no), None)
                }
            };
            out.push(DisplayLine {
                marker: op.kind.into(),
                text: text.clone(),
                old_line,
                new_line,
            });
        }
    }

    out
}

/// Unified view used when no differ is available: the new text alone.
pub fn render_unified_fallback(new: &str) -> Vec<DisplayLine> {
    Document::from_str(new)
        .lines()
        .into_iter()
        .enumerate()
        .map(|(index, text)| DisplayLine {
            marker: Marker::Context,
            text,
            old_line: None,
            new_line: Some(index + 1),
        })
        .collect()
}
