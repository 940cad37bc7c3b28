//! The classifying lexer.
//!
//! Pulls raw tokens from the scanner one at a time and turns each into a
//! [`Token`]. Markup chunks that contain include directives are split into
//! several tokens; those wait in a small FIFO that is always drained before
//! the scanner is pulled again.

use std::collections::VecDeque;

use tracing::trace;
use vbs_scanner::{RawKind, RawToken, ScanMode, Scanner};

use crate::include::{self, IncludeKind, Segment};
use crate::literal::{parse_date, parse_float, parse_integer};
use crate::token::{LineEnd, Token, TokenKind};
use crate::vocab::{canonical_operator, classify};
use crate::{LexError, LexErrorKind};

/// VBScript lexer over one source file.
pub struct Lexer {
    scanner: Scanner,
    /// Tokens split out of one markup chunk, each with the number of lines
    /// it spans.
    pending: VecDeque<(Token, usize)>,
    line: usize,
}

impl Lexer {
    /// Create a lexer for `source`, starting in `mode`.
    pub fn new(source: &str, mode: ScanMode) -> Self {
        Self {
            scanner: Scanner::new(source, mode),
            pending: VecDeque::new(),
            line: 1,
        }
    }

    /// Lex the whole source. The returned vector ends with [`TokenKind::Eof`].
    pub fn tokenize(source: &str, mode: ScanMode) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source, mode);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.lex()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// The current line (1-based). After a token that ends a line has been
    /// returned, this already points at the following line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the next classified token.
    pub fn lex(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(token) = self.pop_pending() {
                return Ok(token);
            }

            let raw = self.scanner.scan().map_err(|e| self.error(e.into()))?;
            if raw.kind == RawKind::Markup {
                self.expand_markup(&raw.text);
                continue;
            }
            return self.classify(raw);
        }
    }

    fn classify(&mut self, raw: RawToken) -> Result<Token, LexError> {
        let kind = match raw.kind {
            RawKind::Eof => TokenKind::Eof,
            RawKind::Identifier => classify(&raw.text),
            RawKind::String => TokenKind::String(raw.text.clone()),
            RawKind::Integer => {
                TokenKind::Integer(parse_integer(&raw.text).map_err(|k| self.error(k))?)
            }
            RawKind::Float => TokenKind::Float(parse_float(&raw.text).map_err(|k| self.error(k))?),
            RawKind::Date => TokenKind::Date(parse_date(&raw.text)),
            RawKind::Comment => TokenKind::Comment(raw.text.trim().to_string()),
            RawKind::Punctuation => match single_char(&raw.text) {
                Some('_') if self.scanner.at_line_end() => TokenKind::LineContinuation,
                Some(c) => TokenKind::Punctuation(c),
                None => return Err(self.unexpected(&raw.text)),
            },
            RawKind::Operator => match canonical_operator(&raw.text) {
                Some(op) => TokenKind::Operator(op),
                None => return Err(self.unexpected(&raw.text)),
            },
            RawKind::Eol if raw.text == ":" => TokenKind::EndOfLine(LineEnd::Separator),
            RawKind::Eol => {
                self.line += 1;
                TokenKind::EndOfLine(LineEnd::Newline)
            }
            // split by `lex` before classification
            RawKind::Markup => TokenKind::Markup(raw.text.clone()),
        };
        Ok(Token::new(kind, raw.text))
    }

    /// Queue a markup chunk, split around any include directives.
    fn expand_markup(&mut self, text: &str) {
        for segment in include::split(text) {
            match segment {
                Segment::Markup(markup) => {
                    let token = Token::new(TokenKind::Markup(markup.to_string()), markup);
                    self.pending.push_back((token, count_lines(markup)));
                }
                Segment::Include(directive) => {
                    let source = &text[directive.start..directive.end];
                    trace!(
                        line = self.line,
                        kind = directive.kind.as_str(),
                        path = %directive.path,
                        "include directive"
                    );
                    let kind = match directive.kind {
                        IncludeKind::File => TokenKind::FileInclude(directive.path),
                        IncludeKind::Virtual => TokenKind::VirtualInclude(directive.path),
                    };
                    self.pending
                        .push_back((Token::new(kind, source), count_lines(source)));
                }
            }
        }
    }

    fn pop_pending(&mut self) -> Option<Token> {
        let (token, lines) = self.pending.pop_front()?;
        self.line += lines;
        Some(token)
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            line: self.line,
        }
    }

    fn unexpected(&self, text: &str) -> LexError {
        self.error(LexErrorKind::UnexpectedToken(text.to_string()))
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn count_lines(text: &str) -> usize {
    text.matches('\n').count()
}
