//! Markup for the console's diff modal.
//!
//! Only `&`, `<` and `>` are escaped; output is meant for element content,
//! never for attribute values.

use std::fmt::Write as _;

use crate::model::{Cell, DisplayLine, Marker, SideBySide};

const ADDED_BG: &str = "#e6ffed";
const REMOVED_BG: &str = "#ffeef0";

const SIDE_BY_SIDE_STYLE: &str = "<style>\
.diff-grid{display:grid;grid-template-columns:1fr 1fr;gap:12px}\
.diff-col{border:1px solid #e5e5e5;border-radius:4px;padding:8px;max-height:60vh;overflow:auto}\
.bg-add{background:#e6ffed}\
.bg-del{background:#ffeef0}\
.diff-line{white-space:pre-wrap;min-height:1.2em}\
</style>";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_html`].
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let entity = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')]
            .into_iter()
            .find(|(entity, _)| rest.starts_with(entity));
        match entity {
            Some((entity, ch)) => {
                out.push(ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn unified_html(lines: &[DisplayLine]) -> String {
    let mut html = String::from(r#"<pre style="white-space:pre-wrap">"#);
    for line in lines {
        let background = match line.marker {
            Marker::Added => ADDED_BG,
            Marker::Removed => REMOVED_BG,
            Marker::Context => "transparent",
        };
        let _ = write!(
            html,
            r#"<div style="background:{background}">{} {}</div>"#,
            line.marker.as_char(),
            line.escaped_text()
        );
    }
    html.push_str("</pre>");
    html
}

pub fn side_by_side_html(view: &SideBySide) -> String {
    match view {
        SideBySide::Aligned { rows } => {
            let mut html = String::from(SIDE_BY_SIDE_STYLE);
            html.push_str(r#"<div class="diff-grid"><div class="diff-col" id="diff-left">"#);
            for row in rows {
                push_cell(&mut html, &row.left, Marker::Removed);
            }
            html.push_str(r#"</div><div class="diff-col" id="diff-right">"#);
            for row in rows {
                push_cell(&mut html, &row.right, Marker::Added);
            }
            html.push_str("</div></div>");
            html
        }
        SideBySide::Verbatim { old, new } => format!(
            r#"<div style="display:flex;gap:12px"><pre style="flex:1;white-space:pre-wrap">{}</pre><pre style="flex:1;white-space:pre-wrap">{}</pre></div>"#,
            escape_html(old),
            escape_html(new)
        ),
    }
}

fn push_cell(html: &mut String, cell: &Cell, change: Marker) {
    match cell {
        Cell::Placeholder => html.push_str(r#"<div class="diff-line"></div>"#),
        Cell::Line {
            text, highlighted, ..
        } => {
            let (class, marker) = if *highlighted {
                let class = match change {
                    Marker::Added => " bg-add",
                    _ => " bg-del",
                };
                (class, change.as_char())
            } else {
                ("", Marker::Context.as_char())
            };
            let _ = write!(
                html,
                r#"<div class="diff-line{class}">{marker} {}</div>"#,
                escape_html(text)
            );
        }
    }
}
