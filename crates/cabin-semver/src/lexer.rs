#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Num(String),
    Ident(String),
    Dot,
    Hyphen,
    Plus,
    Eof,
    Unknown(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// Splits a version string into the token kinds described by the grammar:
/// runs of digits become `Num`, runs of other ASCII letters/digits become
/// `Ident`, and `.`, `-`, `+` are single-character tokens. Whitespace is
/// skipped so `VersionReq`'s comma-separated comparator list can be
/// written with spaces.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    pub(crate) fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Token {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
        let Some((start, c)) = self.peek() else {
            let end = self.input.len();
            return Token {
                kind: TokenKind::Eof,
                start: end,
                end,
            };
        };
        match c {
            '.' => {
                self.pos += 1;
                Token {
                    kind: TokenKind::Dot,
                    start,
                    end: start + 1,
                }
            }
            '-' => {
                self.pos += 1;
                Token {
                    kind: TokenKind::Hyphen,
                    start,
                    end: start + 1,
                }
            }
            '+' => {
                self.pos += 1;
                Token {
                    kind: TokenKind::Plus,
                    start,
                    end: start + 1,
                }
            }
            c if c.is_ascii_digit() => {
                let (end, text) = self.take_while(start, |c| c.is_ascii_digit());
                Token {
                    kind: TokenKind::Num(text),
                    start,
                    end,
                }
            }
            c if c.is_ascii_alphabetic() => {
                let (end, text) = self.take_while(start, |c| c.is_ascii_alphanumeric());
                Token {
                    kind: TokenKind::Ident(text),
                    start,
                    end,
                }
            }
            other => {
                self.pos += 1;
                Token {
                    kind: TokenKind::Unknown(other),
                    start,
                    end: start + other.len_utf8(),
                }
            }
        }
    }

    fn take_while(&mut self, start: usize, pred: impl Fn(char) -> bool) -> (usize, String) {
        let mut end = start;
        let mut text = String::new();
        while let Some((idx, c)) = self.peek() {
            if !pred(c) {
                break;
            }
            text.push(c);
            end = idx + c.len_utf8();
            self.pos += 1;
        }
        (end, text)
    }
}
