//! Tokenizer for stackvm assembly text.

/// Marks a label definition when it directly follows a token.
pub const LABEL_TERMINATOR: char = ':';
/// Starts a comment running to end of line.
pub const COMMENT_MARKER: char = ';';

/// A single whitespace-free token and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text. Label definitions keep their trailing `:`.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    /// If this token defines a label, the label name.
    pub fn label_name(&self) -> Option<&str> {
        self.text.strip_suffix(LABEL_TERMINATOR)
    }
}

/// Split source text into tokens in reading order.
///
/// Everything from `;` to end of line is dropped. Whitespace separates
/// tokens. A `:` right after token characters ends that token and stays
/// attached to it; a `:` with nothing before it is discarded.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_num = idx + 1;
        let code = match line.find(COMMENT_MARKER) {
            Some(pos) => &line[..pos],
            None => line,
        };

        let mut current: Option<String> = None;
        for c in code.chars() {
            if c.is_whitespace() || c == LABEL_TERMINATOR {
                if let Some(mut text) = current.take() {
                    if c == LABEL_TERMINATOR {
                        text.push(c);
                    }
                    tokens.push(Token {
                        text,
                        line: line_num,
                    });
                }
            } else {
                current.get_or_insert_with(String::new).push(c);
            }
        }
        if let Some(text) = current {
            tokens.push(Token {
                text,
                line: line_num,
            });
        }
    }

    tokens
}
