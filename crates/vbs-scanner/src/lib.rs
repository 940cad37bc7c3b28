//! VBScript Scanner
//!
//! Reads classic ASP source and produces raw, untyped tokens. The scanner
//! alternates between markup mode (everything up to `<%`) and code mode
//! (VBScript, up to `%>`), so a page comes out as markup chunks interleaved
//! with code tokens.
//!
//! # Example
//!
//! ```
//! use vbs_scanner::{RawKind, ScanMode, Scanner};
//!
//! let mut scanner = Scanner::new("<p><%x%>", ScanMode::Markup);
//! assert_eq!(scanner.scan().unwrap().kind, RawKind::Markup);
//! assert_eq!(scanner.scan().unwrap().kind, RawKind::Identifier);
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{RawKind, RawToken, ScanMode};

/// A fatal lexical error. The scanner does not track lines; the lexer
/// stamps the error with its own line counter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("string contains %>")]
    DelimiterInString,
    #[error("unterminated date constant")]
    UnterminatedDate,
    #[error("date contains %>")]
    DelimiterInDate,
    #[error("invalid date character: '{0}'")]
    InvalidDateChar(char),
}
