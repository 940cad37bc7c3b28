use std::fmt;

use crate::literal::DateValue;
use crate::vocab::{ConstantFamily, Stmt};

/// How a logical line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// A real newline.
    Newline,
    /// The `:` statement separator.
    Separator,
}

/// Classified token.
///
/// Data-carrying variants embed their value directly. Canonical spellings
/// are `&'static str` from the vocabulary tables; identifiers keep the
/// spelling found in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // End of input
    Eof,

    // Reserved words
    Statement(Stmt),
    Function(&'static str),
    Keyword(&'static str),
    Boolean(bool),
    Constant(ConstantFamily, &'static str),

    Identifier(String),

    // Literals
    String(String),
    Integer(i64),
    Float(f64),
    Date(DateValue),

    Comment(String),
    Markup(String),
    Punctuation(char),
    EndOfLine(LineEnd),
    Operator(&'static str),
    LineContinuation,

    // Include directives split out of markup
    FileInclude(String),
    VirtualInclude(String),
}

/// The closed set of token categories, one per distinguishable kind of
/// token (each constant family is its own category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Eof,
    Statement,
    Function,
    Keyword,
    Boolean,
    ColorConstant,
    CompareConstant,
    DateConstant,
    DateFormatConstant,
    MiscConstant,
    MsgBoxConstant,
    StringConstant,
    TristateConstant,
    VarTypeConstant,
    Identifier,
    String,
    Integer,
    Float,
    Date,
    Comment,
    Markup,
    Punctuation,
    EndOfLine,
    Operator,
    LineContinuation,
    FileInclude,
    VirtualInclude,
}

impl TokenKind {
    pub fn category(&self) -> Category {
        match self {
            TokenKind::Eof => Category::Eof,
            TokenKind::Statement(_) => Category::Statement,
            TokenKind::Function(_) => Category::Function,
            TokenKind::Keyword(_) => Category::Keyword,
            TokenKind::Boolean(_) => Category::Boolean,
            TokenKind::Constant(family, _) => match family {
                ConstantFamily::Color => Category::ColorConstant,
                ConstantFamily::Compare => Category::CompareConstant,
                ConstantFamily::Date => Category::DateConstant,
                ConstantFamily::DateFormat => Category::DateFormatConstant,
                ConstantFamily::Misc => Category::MiscConstant,
                ConstantFamily::MsgBox => Category::MsgBoxConstant,
                ConstantFamily::String => Category::StringConstant,
                ConstantFamily::Tristate => Category::TristateConstant,
                ConstantFamily::VarType => Category::VarTypeConstant,
            },
            TokenKind::Identifier(_) => Category::Identifier,
            TokenKind::String(_) => Category::String,
            TokenKind::Integer(_) => Category::Integer,
            TokenKind::Float(_) => Category::Float,
            TokenKind::Date(_) => Category::Date,
            TokenKind::Comment(_) => Category::Comment,
            TokenKind::Markup(_) => Category::Markup,
            TokenKind::Punctuation(_) => Category::Punctuation,
            TokenKind::EndOfLine(_) => Category::EndOfLine,
            TokenKind::Operator(_) => Category::Operator,
            TokenKind::LineContinuation => Category::LineContinuation,
            TokenKind::FileInclude(_) => Category::FileInclude,
            TokenKind::VirtualInclude(_) => Category::VirtualInclude,
        }
    }

    /// Markup chunks and include directives: tokens that live outside `<% %>`.
    pub fn is_markup_like(&self) -> bool {
        matches!(
            self,
            TokenKind::Markup(_) | TokenKind::FileInclude(_) | TokenKind::VirtualInclude(_)
        )
    }
}

/// The token's value: canonical spelling for reserved words, the converted
/// value for literals, the text itself otherwise. String literals are shown
/// unquoted.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => Ok(()),
            TokenKind::Statement(stmt) => f.write_str(stmt.as_str()),
            TokenKind::Function(name)
            | TokenKind::Keyword(name)
            | TokenKind::Constant(_, name)
            | TokenKind::Operator(name) => f.write_str(name),
            TokenKind::Boolean(true) => f.write_str("True"),
            TokenKind::Boolean(false) => f.write_str("False"),
            TokenKind::Identifier(text)
            | TokenKind::String(text)
            | TokenKind::Comment(text)
            | TokenKind::Markup(text)
            | TokenKind::FileInclude(text)
            | TokenKind::VirtualInclude(text) => f.write_str(text),
            TokenKind::Integer(i) => write!(f, "{i}"),
            TokenKind::Float(x) => write!(f, "{x}"),
            TokenKind::Date(d) => write!(f, "{d}"),
            TokenKind::Punctuation(c) => write!(f, "{c}"),
            TokenKind::EndOfLine(LineEnd::Newline) => f.write_str("\n"),
            TokenKind::EndOfLine(LineEnd::Separator) => f.write_str(":"),
            TokenKind::LineContinuation => f.write_str("_"),
        }
    }
}

/// A token produced by the lexer. `raw` is the source spelling the
/// scanner consumed (string contents unescaped, delimiters stripped).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }
}
