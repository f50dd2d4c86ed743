use std::borrow::Cow;

use ropey::LineType;
use ropey::Rope;

/// A text split into lines regardless of its terminator convention.
///
/// `\n`, `\r\n` and lone `\r` all end a line. A trailing terminator does not
/// open an extra empty line.
#[derive(Clone, Debug)]
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_lone_cr(text)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn line_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut count = self.rope.len_lines(LineType::LF);
        if count == 0 {
            return 0;
        }

        if self.rope.byte(self.rope.len() - 1) == b'\n' {
            count = count.saturating_sub(1);
        }

        count
    }

    pub fn line(&self, index: usize) -> Option<String> {
        if index >= self.line_count() {
            return None;
        }
        Some(self.line_text(index))
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|index| self.line_text(index))
            .collect()
    }

    fn line_text(&self, index: usize) -> String {
        let raw: String = self.rope.line(index, LineType::LF).chunks().collect();
        trim_line_ending(&raw).to_string()
    }
}

fn normalize_lone_cr(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let has_lone_cr = bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'\r' && bytes.get(i + 1) != Some(&b'\n'));
    if !has_lone_cr {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() != Some(&'\n') {
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

fn trim_line_ending(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    let without_lf = line.strip_suffix('\n').unwrap_or(line);
    without_lf.strip_suffix('\r').unwrap_or(without_lf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        let doc = Document::from_str("");
        assert!(doc.is_empty());
        assert_eq!(doc.line_count(), 0);
        assert!(doc.lines().is_empty());
    }

    #[test]
    fn text_without_terminator_is_one_line() {
        assert_eq!(Document::from_str("server.port=8848").lines(), vec!["server.port=8848"]);
    }

    #[test]
    fn trailing_newline_does_not_add_blank_line() {
        assert_eq!(Document::from_str("a\n").lines(), Document::from_str("a").lines());
        assert_eq!(Document::from_str("a\n\n").lines(), vec!["a", ""]);
        assert_eq!(Document::from_str("\n").lines(), vec![""]);
    }

    #[test]
    fn mixed_terminators() {
        let doc = Document::from_str("one\r\ntwo\nthree\rfour");
        assert_eq!(doc.lines(), vec!["one", "two", "three", "four"]);
        assert_eq!(doc.line(2).as_deref(), Some("three"));
        assert_eq!(doc.line(4), None);
    }

    #[test]
    fn trailing_crlf_and_cr() {
        assert_eq!(Document::from_str("a\r\n").lines(), vec!["a"]);
        assert_eq!(Document::from_str("a\r").lines(), vec!["a"]);
    }
}
