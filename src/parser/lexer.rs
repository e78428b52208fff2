// Comment- and literal-aware scanning of C/C++ text
//
// Only the lexical structure needed to count braces is recognised: line and
// block comments, string literals and character literals. Everything else is
// ordinary text. All delimiters are ASCII, so scanning works on bytes and
// every offset returned here lands on a char boundary of the original str.

/// Classification of the text at a cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Not the start of a comment or literal
    Ordinary,
    /// A comment or literal starts here; scanning resumes at the given offset
    Skip(usize),
    /// A comment or literal starts here and runs off the end of the text
    Unterminated,
}

/// Classify the span starting at `pos` and, if it is a comment or literal,
/// report where it ends.
pub fn skip_span(text: &[u8], pos: usize) -> Span {
    match (text.get(pos), text.get(pos + 1)) {
        (Some(b'/'), Some(b'/')) => match find_byte(text, pos + 2, b'\n') {
            Some(newline) => Span::Skip(newline + 1),
            None => Span::Unterminated,
        },
        (Some(b'/'), Some(b'*')) => match find_block_end(text, pos + 2) {
            Some(end) => Span::Skip(end + 2),
            None => Span::Unterminated,
        },
        (Some(&(quote @ (b'"' | b'\''))), _) => skip_literal(text, pos + 1, quote),
        _ => Span::Ordinary,
    }
}

/// Find the `}` that closes the `{` at `open`.
///
/// Returns `None` if `open` is not a `{`, or if the text ends before the
/// nesting depth returns to zero, including when a comment or literal runs
/// off the end.
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match skip_span(bytes, i) {
            Span::Skip(next) => {
                i = next;
                continue;
            }
            Span::Unterminated => return None,
            Span::Ordinary => {}
        }

        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn skip_literal(text: &[u8], mut i: usize, quote: u8) -> Span {
    while i < text.len() {
        match text[i] {
            // An escape swallows the next byte, whatever it is
            b'\\' => i += 2,
            b if b == quote => return Span::Skip(i + 1),
            _ => i += 1,
        }
    }
    Span::Unterminated
}

fn find_byte(text: &[u8], from: usize, needle: u8) -> Option<usize> {
    text.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

fn find_block_end(text: &[u8], from: usize) -> Option<usize> {
    text.get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| from + offset)
}
