//! The indenting formatter.
//!
//! Pulls classified tokens from the lexer and writes them back out with
//! canonical spacing and one tab per block level. Each token runs through
//! the same steps: reopen code after markup, indent at line start (folding
//! `End X` into one closer), space mid-line, then emit by kind.

use tracing::{debug, trace};
use vbs_lexer::include::{self, IncludeKind};
use vbs_lexer::{LexError, Lexer, LineEnd, Stmt, Token, TokenKind};

use crate::options::FormatOptions;
use crate::state::{FormatterState, Lookback};

pub struct Formatter<'a> {
    lexer: Lexer,
    options: &'a FormatOptions,
    state: FormatterState,
    /// A token pulled while looking for the statement after `End`.
    pushback: Option<Token>,
    out: String,
    tokens: usize,
}

impl<'a> Formatter<'a> {
    pub fn new(source: &str, options: &'a FormatOptions) -> Self {
        Self {
            lexer: Lexer::new(source, options.initial_mode),
            options,
            state: FormatterState::default(),
            pushback: None,
            out: String::new(),
            tokens: 0,
        }
    }

    /// Format the whole input.
    pub fn run(mut self) -> Result<String, LexError> {
        debug!(output = ?self.options.output, "formatting");

        if self.options.is_rewrite() {
            self.out.push_str("<%\n");
        }

        loop {
            let token = self.next_token()?;
            if token.kind == TokenKind::Eof {
                break;
            }
            self.step(token)?;
        }

        if self.options.is_rewrite() {
            if !self.state.at_line_start {
                self.out.push('\n');
            }
            self.out.push_str("%>\n");
        }

        debug!(
            tokens = self.tokens,
            depth = self.state.depth,
            lines = self.lexer.line(),
            "formatted"
        );
        Ok(self.out)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.pushback.take() {
            return Ok(token);
        }
        self.tokens += 1;
        self.lexer.lex()
    }

    fn step(&mut self, token: Token) -> Result<(), LexError> {
        let kind = token.kind;

        if self.state.owes_code_delimiter && !kind.is_markup_like() {
            self.out.push_str("<%");
            self.state.owes_code_delimiter = false;
        }

        let began_line = self.state.at_line_start;
        let mut leading = false;
        if began_line {
            if kind == TokenKind::Statement(Stmt::End) && self.end_compound()? {
                return Ok(());
            }
            if let TokenKind::Statement(stmt) = kind {
                if dedents(stmt) {
                    self.state.dedent();
                }
            }
            self.start_line(&kind);
        } else {
            leading = !self.state.take_paren();
        }

        if self.state.previous_is(Stmt::Then) && closes_inline_then(&kind) {
            self.state.dedent();
        }

        match &kind {
            TokenKind::Eof => {}
            TokenKind::Statement(stmt) => {
                self.word(leading, stmt.as_str());
                if self.opens_block(*stmt, began_line) {
                    self.state.indent();
                }
            }
            // `<%=` shorthand becomes a print statement once markup is rewritten
            TokenKind::Operator("=") if self.rewrites_output_shorthand() => {
                let options = self.options;
                self.word(leading, &options.print_statement);
            }
            TokenKind::Function(text)
            | TokenKind::Keyword(text)
            | TokenKind::Constant(_, text)
            | TokenKind::Operator(text) => self.word(leading, text),
            // exponent form; plain digits would re-lex as an integer
            TokenKind::Float(x) if x.abs() >= 1e15 => self.word(leading, &format!("{x:E}")),
            TokenKind::Boolean(_) | TokenKind::Integer(_) | TokenKind::Float(_) => {
                self.word(leading, &kind.to_string())
            }
            TokenKind::Identifier(name) => {
                let member_of_call =
                    name.starts_with('.') && self.state.previous == Lookback::Punctuation(')');
                self.word(leading && !member_of_call, name);
            }
            TokenKind::String(text) => self.word(leading, &quote(text)),
            TokenKind::Date(value) => self.word(leading, &format!("#{value}#")),
            TokenKind::Comment(text) if text.is_empty() => self.word(leading, "'"),
            TokenKind::Comment(text) => self.word(leading, &format!("' {text}")),
            TokenKind::Markup(text) => self.markup(leading, began_line, text),
            TokenKind::FileInclude(path) => {
                self.include(leading, began_line, IncludeKind::File, path)
            }
            TokenKind::VirtualInclude(path) => {
                self.include(leading, began_line, IncludeKind::Virtual, path)
            }
            TokenKind::Punctuation(c) => {
                self.space(leading && self.state.previous.spaces_punctuation());
                self.out.push(*c);
                if *c == '(' {
                    self.state.paren = true;
                }
            }
            TokenKind::EndOfLine(LineEnd::Separator) => {
                self.word(leading, ": ");
                self.state.no_tabs_once = true;
                self.state.end_line();
            }
            TokenKind::EndOfLine(LineEnd::Newline) => {
                // a rewritten chunk has already closed its line
                if !(self.options.is_rewrite() && self.state.previous == Lookback::Markup) {
                    self.out.push('\n');
                }
                self.state.end_line();
            }
            TokenKind::LineContinuation => {
                self.word(leading, "_");
                self.state.indent();
                self.state.continuation_owed = true;
            }
        }

        self.state.previous = Lookback::of(&kind);
        Ok(())
    }

    /// At line start on `End`: pull the next token and, if it is a
    /// statement word, emit the pair as one closer. Otherwise the pulled
    /// token is pushed back and `End` is handled as a plain statement.
    fn end_compound(&mut self) -> Result<bool, LexError> {
        let next = self.next_token()?;
        let TokenKind::Statement(closed) = next.kind else {
            self.pushback = Some(next);
            return Ok(false);
        };

        trace!(line = self.lexer.line(), closes = closed.as_str(), "end compound");
        self.state.dedent();
        self.start_line(&TokenKind::Statement(Stmt::End));
        self.out.push_str("End ");
        self.out.push_str(closed.as_str());
        self.state.previous = Lookback::EndStatement(closed);
        Ok(true)
    }

    /// Write the indentation for the first token of a line.
    fn start_line(&mut self, kind: &TokenKind) {
        let rewrite = self.options.is_rewrite();
        let skip = self.state.no_tabs_once
            || *kind == TokenKind::EndOfLine(LineEnd::Newline)
            || (rewrite && kind.is_markup_like())
            || (!rewrite && self.state.previous == Lookback::Markup);
        if !skip {
            self.tabs(self.state.depth);
        }
        self.state.begin_line();
    }

    fn rewrites_output_shorthand(&self) -> bool {
        self.options.is_rewrite() && self.state.previous == Lookback::Markup
    }

    fn opens_block(&self, stmt: Stmt, began_line: bool) -> bool {
        let after = |s| self.state.previous_is(s);
        match stmt {
            Stmt::If
            | Stmt::Function
            | Stmt::Sub
            | Stmt::Class
            | Stmt::Property
            | Stmt::For
            | Stmt::With
            | Stmt::Case
            | Stmt::Do => !after(Stmt::Exit),
            Stmt::While => !(after(Stmt::Exit) || after(Stmt::Do) || after(Stmt::Loop)),
            Stmt::ElseIf => began_line,
            Stmt::Else => began_line && !after(Stmt::Case),
            _ => false,
        }
    }

    fn markup(&mut self, leading: bool, began_line: bool, text: &str) {
        if self.options.is_rewrite() {
            self.rewrite_markup(began_line, text);
        } else {
            self.close_code(leading);
            self.out.push_str(text);
            self.state.owes_code_delimiter = true;
        }
        self.state.end_line();
    }

    /// Emit markup as a print statement, one continuation line per
    /// source line.
    fn rewrite_markup(&mut self, began_line: bool, text: &str) {
        if !began_line {
            self.out.push('\n');
        }
        let text = text.replace('\r', "");
        if text.is_empty() {
            return;
        }

        let depth = self.state.depth;
        for (i, line) in text.split('\n').enumerate() {
            if i == 0 {
                self.tabs(depth);
                self.out.push_str(&self.options.print_statement);
                self.out.push(' ');
            } else {
                self.out.push_str(" _\n");
                self.tabs(depth + 1);
                self.out.push_str("& ");
                self.out.push_str(&self.options.line_join);
                self.out.push_str(" & ");
            }
            self.out.push_str(&quote(line));
        }
        self.out.push('\n');
    }

    fn include(&mut self, leading: bool, began_line: bool, kind: IncludeKind, path: &str) {
        let directive = include::render(kind, path);
        if self.options.is_rewrite() {
            if !began_line {
                self.out.push('\n');
            }
            self.out.push_str("%>");
            self.out.push_str(&directive);
            self.out.push_str("<%\n");
        } else {
            self.close_code(leading);
            self.out.push_str(&directive);
            self.state.owes_code_delimiter = true;
        }
        self.state.end_line();
    }

    /// Write `%>` unless the code block is already closed.
    fn close_code(&mut self, leading: bool) {
        if !matches!(self.state.previous, Lookback::Start | Lookback::Markup) {
            self.space(leading);
            self.out.push_str("%>");
        }
    }

    fn word(&mut self, leading: bool, text: &str) {
        self.space(leading);
        self.out.push_str(text);
    }

    fn space(&mut self, leading: bool) {
        if leading {
            self.out.push(' ');
        }
    }

    fn tabs(&mut self, depth: usize) {
        self.out.extend(std::iter::repeat('\t').take(depth));
    }
}

/// Statement words that close the block above them when they begin a line.
fn dedents(stmt: Stmt) -> bool {
    matches!(
        stmt,
        Stmt::Else | Stmt::ElseIf | Stmt::Case | Stmt::Wend | Stmt::Next | Stmt::Loop
    )
}

/// After `Then`, any token but a line end, markup or comment is the body
/// of a single-line `If`.
fn closes_inline_then(kind: &TokenKind) -> bool {
    !matches!(kind, TokenKind::EndOfLine(_) | TokenKind::Comment(_)) && !kind.is_markup_like()
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
