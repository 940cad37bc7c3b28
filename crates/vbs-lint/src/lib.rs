//! VBScript Lint
//!
//! Flags constructs that should not reach production pages: `Stop`,
//! dynamic code execution (`Execute`, `ExecuteGlobal`, `Eval`) and the
//! creation of external objects (`CreateObject`, `Server.CreateObject`,
//! `GetObject`, `New`). The pass only reads the token stream.

pub mod rules;

pub use rules::Rules;

use std::fmt;

use tracing::debug;
use vbs_lexer::{LexError, Lexer, TokenKind};
use vbs_scanner::ScanMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintMessage {
    pub line: usize,
    pub text: String,
}

impl fmt::Display for LintMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.text)
    }
}

/// Findings for one file. A lexical error stops the pass; the messages
/// found before it are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct LintReport {
    pub messages: Vec<LintMessage>,
    pub error: Option<LexError>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty() && self.error.is_none()
    }
}

/// Run every rule over the lexer's token stream.
pub fn lint(mut lexer: Lexer) -> LintReport {
    let mut rules = Rules::new();
    let mut tokens = 0usize;
    let error = loop {
        match lexer.lex() {
            Ok(token) if token.kind == TokenKind::Eof => break None,
            Ok(token) => {
                tokens += 1;
                rules.check(&token.kind, lexer.line());
            }
            Err(err) => break Some(err),
        }
    };

    let messages = rules.finish();
    debug!(tokens, messages = messages.len(), failed = error.is_some(), "linted");
    LintReport { messages, error }
}

/// Lint a source string.
pub fn lint_source(source: &str, mode: ScanMode) -> LintReport {
    lint(Lexer::new(source, mode))
}
