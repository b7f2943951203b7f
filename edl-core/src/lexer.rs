//! Lexer for the EDL surface syntax.
//!
//! Longest-match-first over the token catalog: ident-shaped lexemes
//! are scanned maximally and resolved against the keyword table, so
//! `applicationType` is one token and never `application` plus a
//! trailing name fragment. Whitespace is skipped. Block comments are
//! captured on the side for downstream documentation use but are not
//! grammar tokens.

use crate::error::CoreError;
use crate::token::{Token, TokenKind, lookup_keyword};

use serde::Serialize;

/// A `/* ... */` comment captured during lexing.
///
/// The text is the raw body between the delimiters; the parser and
/// assembler decide how to format it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub position: usize,
}

/// Result of lexing a source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

/// Lex a source string into tokens.
///
/// The lexer holds no state across calls; each invocation owns its
/// own cursor and output buffers.
pub fn lex(source: &str) -> Result<LexOutput, CoreError> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        len: source.len(),
        index: 0,
    };
    lexer.run()
}

struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    len: usize,
    index: usize,
}

impl<'src> Lexer<'src> {
    fn run(&mut self) -> Result<LexOutput, CoreError> {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();

        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.consume_char();
                continue;
            }

            let start = self.index;
            match ch {
                b'{' => tokens.push(self.punct(TokenKind::LBrace)),
                b'}' => tokens.push(self.punct(TokenKind::RBrace)),
                b'(' => tokens.push(self.punct(TokenKind::LParen)),
                b')' => tokens.push(self.punct(TokenKind::RParen)),
                b'[' => tokens.push(self.punct(TokenKind::LBracket)),
                b']' => tokens.push(self.punct(TokenKind::RBracket)),
                b',' => tokens.push(self.punct(TokenKind::Comma)),
                b'=' => tokens.push(self.punct(TokenKind::Equals)),
                b'.' => tokens.push(self.punct(TokenKind::Dot)),
                b'*' => tokens.push(self.punct(TokenKind::Star)),
                b'"' => tokens.push(self.lex_string(start)?),
                b'/' => {
                    if self.peek_next() == Some(b'*') {
                        comments.push(self.lex_comment(start)?);
                    } else {
                        tokens.push(self.lex_regex(start)?);
                    }
                }
                b'-' | b'0'..=b'9' => tokens.push(self.lex_integer(start)?),
                _ => {
                    if is_ident_start(ch) {
                        tokens.push(self.lex_word(start));
                    } else {
                        // Step over the full character so the error
                        // text never splits a multi-byte sequence.
                        let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
                        self.index += width;
                        return Err(self.unmatched(start));
                    }
                }
            }
        }

        Ok(LexOutput { tokens, comments })
    }

    fn punct(&mut self, kind: TokenKind) -> Token {
        let start = self.index;
        self.consume_char();
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.source[start..self.index].to_string(),
            position: start,
        }
    }

    fn unmatched(&self, start: usize) -> CoreError {
        CoreError::Lex {
            position: start,
            text: self.source[start..self.index].to_string(),
        }
    }

    /// String literal: raw text between the quotes, no escape processing.
    fn lex_string(&mut self, start: usize) -> Result<Token, CoreError> {
        self.consume_char();
        let content_start = self.index;
        while let Some(ch) = self.peek_char() {
            if ch == b'"' {
                let content_end = self.index;
                self.consume_char();
                return Ok(Token {
                    kind: TokenKind::StringLiteral,
                    text: self.source[content_start..content_end].to_string(),
                    position: start,
                });
            }
            self.consume_char();
        }
        Err(self.unmatched(start))
    }

    /// Integer literal: optional leading minus, one or more digits.
    fn lex_integer(&mut self, start: usize) -> Result<Token, CoreError> {
        if self.peek_char() == Some(b'-') {
            self.consume_char();
        }
        let digits_start = self.index;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.consume_char();
            } else {
                break;
            }
        }
        if self.index == digits_start {
            return Err(self.unmatched(start));
        }
        Ok(self.token(TokenKind::IntegerLiteral, start))
    }

    /// Regex literal: `/`-delimited, body excludes line terminators
    /// and the delimiter itself.
    fn lex_regex(&mut self, start: usize) -> Result<Token, CoreError> {
        self.consume_char();
        let body_start = self.index;
        while let Some(ch) = self.peek_char() {
            match ch {
                b'/' => {
                    let body_end = self.index;
                    self.consume_char();
                    return Ok(Token {
                        kind: TokenKind::RegexLiteral,
                        text: self.source[body_start..body_end].to_string(),
                        position: start,
                    });
                }
                b'\n' | b'\r' => break,
                _ => self.consume_char(),
            }
        }
        Err(self.unmatched(start))
    }

    /// Block comment: consumed but not emitted as a grammar token.
    fn lex_comment(&mut self, start: usize) -> Result<Comment, CoreError> {
        self.consume_char(); // '/'
        self.consume_char(); // '*'
        let body_start = self.index;
        while let Some(ch) = self.peek_char() {
            if ch == b'*' && self.peek_next() == Some(b'/') {
                let body_end = self.index;
                self.consume_char();
                self.consume_char();
                return Ok(Comment {
                    text: self.source[body_start..body_end].to_string(),
                    position: start,
                });
            }
            self.consume_char();
        }
        Err(self.unmatched(start))
    }

    /// Maximal identifier run, then exact keyword lookup.
    fn lex_word(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.consume_char();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.index];
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Name);
        Token {
            kind,
            text: text.to_string(),
            position: start,
        }
    }

    fn peek_char(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.index + 1).copied()
    }

    fn consume_char(&mut self) {
        if self.index < self.len {
            self.index += 1;
        }
    }
}

fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
