/// Which side of the `<%` / `%>` delimiters the scanner is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Literal page text, up to the next `<%`.
    #[default]
    Markup,
    /// VBScript, up to the next `%>`.
    Code,
}

/// Raw token classification. Identifiers are not yet split into
/// keywords, functions or constants; that is the lexer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Eof,
    /// A newline, or the `:` statement separator.
    Eol,
    Identifier,
    String,
    Integer,
    Float,
    Date,
    Comment,
    Markup,
    Punctuation,
    Operator,
}

/// A token produced by the scanner.
///
/// `text` is the consumed source text, minus delimiters: a string literal
/// holds its contents with `""` already collapsed to `"`, a comment holds
/// everything after the `'` (or `Rem `).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: RawKind,
    pub text: String,
}

impl RawToken {
    pub fn new(kind: RawKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(RawKind::Eof, "")
    }
}

/// Single-character operators. `<`, `>` and `\` may extend to two.
pub const OPERATOR_CHARS: &[char] = &['^', '*', '/', '\\', '+', '-', '&', '=', '<', '>'];

/// Alphabetic operators, compared case-insensitively.
pub const WORD_OPERATORS: &[&str] = &["mod", "and", "not", "or", "xor", "eqv", "imp", "is"];

/// Characters allowed inside `#...#` besides digits: separators plus the
/// letters of the month abbreviations and AM/PM.
pub const DATE_CHARS: &str = "/-: \tAPMJANFEBMARAPRMAYJUNJULAUGSEPOCTNOVDEC";

pub fn is_date_char(c: char) -> bool {
    c.is_ascii_digit() || DATE_CHARS.contains(c.to_ascii_uppercase())
}

pub fn is_word_operator(word: &str) -> bool {
    WORD_OPERATORS.iter().any(|op| op.eq_ignore_ascii_case(word))
}
