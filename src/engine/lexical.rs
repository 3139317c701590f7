//! Lexical context classification for match suppression
//!
//! Rule patterns are plain regexes with no syntactic awareness, so a file
//! that merely *mentions* `eval(` inside a string, comment, or regex literal
//! would self-trigger. This classifier decides whether a byte offset falls
//! inside such a context using a single-pass state machine, not a parser.
//!
//! Known approximations, accepted by design:
//! - template-literal `${...}` interpolation is treated as string content;
//! - regex-literal detection cannot always distinguish division from a regex
//!   delimiter (no lexer can without full grammar context). The heuristic
//!   trades recall for simplicity.

/// Classifies byte offsets of one source text.
///
/// Each query rescans from the start of the text, O(n) per call. Matches are
/// sparse in practice and files modest, so the O(n*m) total stays cheap.
pub struct LexicalClassifier<'a> {
    bytes: &'a [u8],
}

/// Forward window searched for a regex-literal closing slash
const REGEX_CLOSE_LOOKAHEAD: usize = 20;

/// Backward window searched for a regex-literal opening slash
const REGEX_OPEN_LOOKBEHIND: usize = 200;

impl<'a> LexicalClassifier<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
        }
    }

    /// True if `position` lies inside a quoted string, template literal, or
    /// comment.
    ///
    /// The scan consumes the character at `position` itself, so a closing
    /// delimiter is classified as code while everything strictly between the
    /// delimiters is classified as string/comment. Matches that terminate on
    /// their own closing quote (hardcoded-secret rules spanning a literal)
    /// therefore survive, while matches strictly inside a literal are
    /// suppressed.
    pub fn is_inside_string_or_comment(&self, position: usize) -> bool {
        if self.bytes.is_empty() {
            return false;
        }
        let position = position.min(self.bytes.len() - 1);

        let mut in_single = false;
        let mut in_double = false;
        let mut in_template = false;
        let mut in_line_comment = false;
        let mut in_block_comment = false;
        let mut escape_next = false;

        let mut i = 0;
        while i <= position {
            let b = self.bytes[i];

            if escape_next {
                escape_next = false;
                i += 1;
                continue;
            }
            if b == b'\\' {
                escape_next = true;
                i += 1;
                continue;
            }

            if in_line_comment {
                if b == b'\n' {
                    in_line_comment = false;
                }
            } else if in_block_comment {
                if b == b'*' && self.bytes.get(i + 1) == Some(&b'/') {
                    in_block_comment = false;
                    i += 2;
                    continue;
                }
            } else if in_single {
                if b == b'\'' {
                    in_single = false;
                }
            } else if in_double {
                if b == b'"' {
                    in_double = false;
                }
            } else if in_template {
                if b == b'`' {
                    in_template = false;
                }
            } else {
                match b {
                    b'/' if self.bytes.get(i + 1) == Some(&b'/') => {
                        in_line_comment = true;
                        i += 2;
                        continue;
                    }
                    b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                        in_block_comment = true;
                        i += 2;
                        continue;
                    }
                    b'\'' => in_single = true,
                    b'"' => in_double = true,
                    b'`' => in_template = true,
                    _ => {}
                }
            }

            i += 1;
        }

        in_single || in_double || in_template || in_line_comment || in_block_comment
    }

    /// True if `position` appears to lie inside a regex literal.
    ///
    /// Heuristic: look ahead a bounded window for a slash that terminates a
    /// regex (followed by end-of-input, whitespace, a delimiter, or a flag
    /// character), then look back from it for an opening slash in
    /// expression-start context. The offset must fall strictly after the
    /// opening slash and at or before the closing one.
    pub fn is_inside_regex_literal(&self, position: usize) -> bool {
        let len = self.bytes.len();
        if position >= len {
            return false;
        }

        let mut closing = None;
        for i in position..(position + REGEX_CLOSE_LOOKAHEAD).min(len) {
            if self.bytes[i] == b'/' && terminates_regex(self.bytes.get(i + 1).copied()) {
                closing = Some(i);
                break;
            }
        }
        let Some(closing) = closing else {
            return false;
        };

        let floor = closing.saturating_sub(REGEX_OPEN_LOOKBEHIND);
        let mut j = closing;
        while j > floor {
            j -= 1;
            if self.bytes[j] != b'/' || j >= position {
                continue;
            }
            // Not a comment opener
            let next = self.bytes.get(j + 1).copied();
            if next == Some(b'/') || next == Some(b'*') {
                continue;
            }
            let prev = if j == 0 { None } else { Some(self.bytes[j - 1]) };
            if starts_expression(prev) {
                return true;
            }
        }

        false
    }
}

/// Does the character after a slash mark it as a plausible regex terminator?
fn terminates_regex(next: Option<u8>) -> bool {
    match next {
        None => true,
        Some(b) => {
            b.is_ascii_whitespace()
                || matches!(b, b';' | b',' | b')' | b']' | b'}' | b'.')
                || matches!(b, b'g' | b'i' | b'm' | b's' | b'u' | b'v' | b'y')
        }
    }
}

/// Does the character before a slash suggest expression-start context
/// (a regex can begin here) rather than division?
fn starts_expression(prev: Option<u8>) -> bool {
    match prev {
        None => true,
        Some(b) => {
            b.is_ascii_whitespace()
                || matches!(b, b'=' | b':' | b'(' | b'[' | b'{' | b',' | b';')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str, needle: &str) -> (bool, bool) {
        let pos = text.find(needle).expect("needle not in text");
        let c = LexicalClassifier::new(text);
        (
            c.is_inside_string_or_comment(pos),
            c.is_inside_regex_literal(pos),
        )
    }

    #[test]
    fn test_plain_code_is_outside() {
        let (in_str, in_re) = classify("eval(x);", "eval");
        assert!(!in_str);
        assert!(!in_re);
    }

    #[test]
    fn test_double_quoted_string() {
        let (in_str, _) = classify(r#"const s = "eval(x)";"#, "eval");
        assert!(in_str);
    }

    #[test]
    fn test_single_quoted_string() {
        let (in_str, _) = classify("const s = 'eval(x)';", "eval");
        assert!(in_str);
    }

    #[test]
    fn test_template_literal() {
        let (in_str, _) = classify("const s = `eval(x)`;", "eval");
        assert!(in_str);
    }

    #[test]
    fn test_after_closed_string_is_outside() {
        let text = r#"const s = "hello"; eval(x);"#;
        let (in_str, _) = classify(text, "eval");
        assert!(!in_str);
    }

    #[test]
    fn test_escaped_quote_stays_inside() {
        // The \' does not close the string
        let text = r"const s = 'it\'s eval(x)';";
        let (in_str, _) = classify(text, "eval");
        assert!(in_str);
    }

    #[test]
    fn test_quote_kinds_are_mutually_exclusive() {
        // A double quote inside a single-quoted string is literal content
        let text = r#"const s = 'say "hi"'; eval(x);"#;
        let (in_str, _) = classify(text, "eval");
        assert!(!in_str);
    }

    #[test]
    fn test_line_comment() {
        let (in_str, _) = classify("// eval(x)\nrun();", "eval");
        assert!(in_str);
    }

    #[test]
    fn test_line_comment_ends_at_newline() {
        let (in_str, _) = classify("// note\neval(x);", "eval");
        assert!(!in_str);
    }

    #[test]
    fn test_block_comment() {
        let (in_str, _) = classify("/* eval(x) */ run();", "eval");
        assert!(in_str);
    }

    #[test]
    fn test_after_block_comment_is_outside() {
        let (in_str, _) = classify("/* note */ eval(x);", "eval");
        assert!(!in_str);
    }

    #[test]
    fn test_closing_quote_counts_as_code() {
        // Inclusive scan: the offset of the closing quote itself reports
        // outside, so literal-spanning matches are not self-suppressed.
        let text = r#"key = "abc";"#;
        let pos = text.rfind('"').unwrap();
        let c = LexicalClassifier::new(text);
        assert!(!c.is_inside_string_or_comment(pos));
        assert!(c.is_inside_string_or_comment(pos - 1));
    }

    #[test]
    fn test_regex_literal_detected() {
        let (_, in_re) = classify("const re = /eval/g;", "eval");
        assert!(in_re);
    }

    #[test]
    fn test_regex_literal_without_flags() {
        let (_, in_re) = classify("const re = /eval/;", "eval");
        assert!(in_re);
    }

    #[test]
    fn test_code_after_regex_literal_is_outside() {
        let text = "const r = /a/; eval(x);";
        let (in_str, in_re) = classify(text, "eval");
        assert!(!in_str);
        assert!(!in_re);
    }

    #[test]
    fn test_offset_past_end_is_outside() {
        let c = LexicalClassifier::new("x");
        assert!(!c.is_inside_regex_literal(10));
    }

    #[test]
    fn test_empty_text() {
        let c = LexicalClassifier::new("");
        assert!(!c.is_inside_string_or_comment(0));
        assert!(!c.is_inside_regex_literal(0));
    }
}
