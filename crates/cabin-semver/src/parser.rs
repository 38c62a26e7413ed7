use crate::error::ParseError;
use crate::identifier::Identifier;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::version::{BuildMetadata, Prerelease, Version};

/// Recursive-descent parser over the token stream produced by [`Lexer`].
/// Shared by `Version::parse` and `VersionReq::parse`.
pub(crate) struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Parser {
            input,
            tokens: Lexer::new(input).tokenize(),
            pos: 0,
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn error_at(&self, start: usize, end: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(self.input, start, end, message)
    }

    fn error(&self, tok: &Token, message: impl Into<String>) -> ParseError {
        self.error_at(tok.start, tok.end, message)
    }

    pub(crate) fn expect_dot(&mut self) -> Result<(), ParseError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Dot => Ok(()),
            _ => Err(self.error(&tok, "expected '.'")),
        }
    }

    pub(crate) fn expect_eof(&mut self) -> Result<(), ParseError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Eof => Ok(()),
            _ => Err(self.error(&tok, "unexpected trailing input")),
        }
    }

    pub(crate) fn expect_num_component(&mut self, what: &str) -> Result<u64, ParseError> {
        let tok = self.advance();
        match &tok.kind {
            TokenKind::Num(raw) => {
                if raw.len() > 1 && raw.starts_with('0') {
                    return Err(self.error(&tok, format!("{what} must not have a leading zero")));
                }
                raw.parse::<u64>()
                    .map_err(|_| self.error(&tok, format!("{what} overflows a 64-bit integer")))
            }
            _ => Err(self.error(&tok, format!("expected a numeric {what}"))),
        }
    }

    /// Parses a dot-separated list of pre-release or build-metadata
    /// identifiers. Each identifier may itself contain internal hyphens
    /// (e.g. `x-y-z`), so runs of `Num`/`Ident`/`Hyphen` tokens between
    /// dots are merged back into a single raw identifier before being
    /// classified as numeric or alphanumeric.
    pub(crate) fn parse_identifier_list(&mut self, what: &str) -> Result<Vec<Identifier>, ParseError> {
        let mut identifiers = Vec::new();
        loop {
            identifiers.push(self.parse_single_identifier(what)?);
            if matches!(self.peek().kind, TokenKind::Dot) {
                self.advance();
                continue;
            }
            break;
        }
        Ok(identifiers)
    }

    fn parse_single_identifier(&mut self, what: &str) -> Result<Identifier, ParseError> {
        let start_tok = self.peek().clone();
        let mut raw = String::new();
        let mut end = start_tok.start;
        loop {
            match &self.peek().kind {
                TokenKind::Num(s) => {
                    raw.push_str(s);
                    end = self.peek().end;
                    self.advance();
                }
                TokenKind::Ident(s) => {
                    raw.push_str(s);
                    end = self.peek().end;
                    self.advance();
                }
                TokenKind::Hyphen => {
                    raw.push('-');
                    end = self.peek().end;
                    self.advance();
                }
                _ => break,
            }
        }
        if raw.is_empty() {
            return Err(self.error_at(start_tok.start, start_tok.end, format!("expected a {what}")));
        }
        let all_digits = raw.bytes().all(|b| b.is_ascii_digit());
        if all_digits {
            if raw.len() > 1 && raw.starts_with('0') {
                return Err(self.error_at(
                    start_tok.start,
                    end,
                    format!("numeric {what} must not have a leading zero"),
                ));
            }
            let n = raw
                .parse::<u64>()
                .map_err(|_| self.error_at(start_tok.start, end, format!("numeric {what} overflows a 64-bit integer")))?;
            Ok(Identifier::Numeric(n))
        } else {
            Ok(Identifier::AlphaNumeric(raw))
        }
    }

    pub(crate) fn parse_version(mut self) -> Result<Version, ParseError> {
        let major = self.expect_num_component("major version")?;
        self.expect_dot()?;
        let minor = self.expect_num_component("minor version")?;
        self.expect_dot()?;
        let patch = self.expect_num_component("patch version")?;

        let mut pre = Prerelease::default();
        if matches!(self.peek().kind, TokenKind::Hyphen) {
            self.advance();
            pre = Prerelease(self.parse_identifier_list("pre-release identifier")?);
        }

        let mut build = BuildMetadata::default();
        if matches!(self.peek().kind, TokenKind::Plus) {
            self.advance();
            build = BuildMetadata(self.parse_identifier_list("build metadata identifier")?);
        }

        self.expect_eof()?;
        Ok(Version {
            major,
            minor,
            patch,
            pre,
            build,
        })
    }
}
