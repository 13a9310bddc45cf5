//! Splitting input into math and plain-text spans.

/// One segment of the input. Concatenating a segmentation in order
/// reconstructs the delimiter-normalized input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Plain text between math spans, including any stray `$` that never
    /// found a matching closer.
    Text(String),
    /// A math span, delimiters included.
    Math { content: String, display: bool },
}

impl Span {
    /// The literal text of the span, delimiters included for math.
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(text) => text,
            Span::Math { content, .. } => content,
        }
    }
}

/// Scan left to right for `$…$` and `$$…$$` spans. An opener searches for a
/// closer of the same width; an opener with no closer falls through to the
/// plain-text case, so a stray `$` never swallows the rest of the document.
pub fn segment(input: &str) -> Vec<Span> {
    let bytes = input.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let display = bytes.get(i + 1) == Some(&b'$');
            let (closer, width) = if display { ("$$", 2) } else { ("$", 1) };
            if let Some(offset) = input[i + width..].find(closer) {
                let end = i + width + offset + width;
                spans.push(Span::Math {
                    content: input[i..end].to_string(),
                    display,
                });
                i = end;
                continue;
            }
        }
        let from = if bytes[i] == b'$' { i + 1 } else { i };
        let next = input[from..]
            .find('$')
            .map(|offset| from + offset)
            .unwrap_or(input.len());
        spans.push(Span::Text(input[i..next].to_string()));
        i = next;
    }
    spans
}
