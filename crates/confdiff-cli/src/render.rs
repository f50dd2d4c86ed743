use std::fmt::Write as _;

use confdiff::{Cell, DiffStats, DisplayLine, SideBySide};

pub fn unified_text(lines: &[DisplayLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let old_no = line_no(line.old_line);
        let new_no = line_no(line.new_line);
        let _ = writeln!(
            out,
            "{} {old_no:>4} {new_no:>4} | {}",
            line.marker.as_char(),
            line.text
        );
    }
    out
}

pub fn side_by_side_text(view: &SideBySide, width: usize) -> String {
    let mut out = String::new();
    match view {
        SideBySide::Aligned { rows } => {
            for row in rows {
                let left = fit(&cell_text(&row.left, '-'), width);
                let right = cell_text(&row.right, '+');
                let _ = writeln!(out, "{left} | {right}");
            }
        }
        SideBySide::Verbatim { old, new } => {
            out.push_str("--- old\n");
            push_block(&mut out, old);
            out.push_str("+++ new\n");
            push_block(&mut out, new);
        }
    }
    out
}

pub fn stats_line(stats: &DiffStats) -> String {
    if stats.is_unchanged() {
        return format!("no changes ({} lines)", stats.unchanged);
    }
    format!(
        "{} added, {} removed, {} unchanged",
        stats.added, stats.removed, stats.unchanged
    )
}

fn cell_text(cell: &Cell, change: char) -> String {
    match cell {
        Cell::Placeholder => String::new(),
        Cell::Line {
            line_no,
            text,
            highlighted,
        } => {
            let marker = if *highlighted { change } else { ' ' };
            format!("{line_no:>4}{marker} {text}")
        }
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

fn push_block(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
}

fn line_no(line: Option<usize>) -> String {
    line.map(|n| n.to_string()).unwrap_or_default()
}
