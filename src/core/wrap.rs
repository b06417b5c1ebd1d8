use std::iter::Peekable;
use std::str::SplitWhitespace;

/// Greedy word wrap by character count.
///
/// Yields lines lazily. A word is appended to the current line while
/// `len + 1 + word_len <= max_width`; otherwise it starts a new line. A word
/// longer than `max_width` gets a line of its own and is never split. Empty or
/// blank input yields a single empty line.
///
/// ```
/// use gst_invoice::core::wrap_text;
///
/// let lines: Vec<_> = wrap_text("Office 12, Pancard Club Road, Baner, Pune", 20).collect();
/// assert_eq!(lines, ["Office 12, Pancard", "Club Road, Baner,", "Pune"]);
/// ```
pub fn wrap_text(text: &str, max_width: usize) -> WrapLines<'_> {
    WrapLines {
        words: text.split_whitespace().peekable(),
        max_width,
        emitted_any: false,
    }
}

/// Iterator returned by [`wrap_text`].
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    max_width: usize,
    emitted_any: bool,
}

impl Iterator for WrapLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let Some(first) = self.words.next() else {
            if self.emitted_any {
                return None;
            }
            self.emitted_any = true;
            return Some(String::new());
        };
        self.emitted_any = true;

        let mut line = String::from(first);
        let mut len = first.chars().count();
        while let Some(word) = self.words.peek() {
            let word_len = word.chars().count();
            if len + 1 + word_len > self.max_width {
                break;
            }
            line.push(' ');
            line.push_str(word);
            len += 1 + word_len;
            self.words.next();
        }
        Some(line)
    }
}

impl std::iter::FusedIterator for WrapLines<'_> {}
