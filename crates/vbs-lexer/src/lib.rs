//! VBScript Lexer
//!
//! Classifies the scanner's raw tokens: reserved words, builtin functions
//! and named constants are recognised and re-cased, numeric and date
//! literals are converted, and server-side include directives are split out
//! of markup chunks. The lexer also owns the line counter that every error
//! is reported against.
//!
//! ```text
//! source → Scanner (raw tokens) → Lexer (classified tokens) → formatter / lint
//! ```

pub mod include;
pub mod lexer;
pub mod literal;
pub mod token;
pub mod vocab;

pub use include::IncludeKind;
pub use lexer::Lexer;
pub use literal::DateValue;
pub use token::{Category, LineEnd, Token, TokenKind};
pub use vocab::{ConstantFamily, Stmt};

use vbs_scanner::ScanError;

/// A fatal error for the current file, stamped with the line the lexer
/// had reached.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("invalid integer literal '{0}'")]
    InvalidInteger(String),
    #[error("invalid float literal '{0}'")]
    InvalidFloat(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
}
