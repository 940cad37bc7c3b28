use crate::token::{is_date_char, is_word_operator, RawKind, RawToken, ScanMode, OPERATOR_CHARS};
use crate::ScanError;

/// Classic ASP source scanner.
///
/// Pull-based: each call to [`Scanner::scan`] consumes just enough input for
/// one token. Markup mode collects text up to `<%`; code mode splits
/// VBScript into identifiers, literals, operators and line ends. Crossing a
/// delimiter flips the mode, and the `%>` itself is never returned as a token.
///
/// - `Vec<char>` source for index-based navigation
/// - One reusable text buffer, cleared before every token
/// - Scanner-global mode, not stored per token
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    mode: ScanMode,
    eof: bool,
    buf: String,
}

impl Scanner {
    /// Create a new scanner over `source`, starting in `mode`.
    pub fn new(source: &str, mode: ScanMode) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            mode,
            eof: false,
            buf: String::new(),
        }
    }

    /// The mode the next call to [`Scanner::scan`] starts in.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Scan the next token. Once the input is exhausted every call
    /// returns [`RawKind::Eof`].
    pub fn scan(&mut self) -> Result<RawToken, ScanError> {
        if self.eof {
            return Ok(RawToken::eof());
        }
        if self.mode == ScanMode::Markup {
            return Ok(self.scan_markup());
        }

        loop {
            let Some(ch) = self.next_char() else {
                self.eof = true;
                return Ok(RawToken::eof());
            };

            let token = match ch {
                // `%>` closes the code block; the call yields the markup after it
                '%' if self.next_is('>') => {
                    self.mode = ScanMode::Markup;
                    self.scan_markup()
                }

                // `Rem ` comments
                'r' | 'R' if self.at_rem_comment() => {
                    self.pos += 3;
                    self.scan_comment()
                }

                // Identifiers, with `.Member` inside `With` blocks
                '.' if self.peek().is_alphabetic() => self.scan_identifier(ch),
                c if c.is_alphabetic() => self.scan_identifier(c),

                // Numbers
                c if c.is_ascii_digit() => self.scan_number(c),
                '&' if self.at_radix_prefix() => self.scan_number(ch),

                // Line ends and statement separators
                '\n' => RawToken::new(RawKind::Eol, "\n"),
                ':' => RawToken::new(RawKind::Eol, ":"),
                c if c.is_whitespace() => continue,

                // Literals and comments
                '"' => self.scan_string()?,
                '\'' => self.scan_comment(),
                '#' => self.scan_date()?,

                // Operators
                '<' if self.next_is('>') => RawToken::new(RawKind::Operator, "<>"),
                '<' | '>' if self.next_is('=') => RawToken::new(RawKind::Operator, format!("{ch}=")),
                '\\' if self.next_is('\\') => RawToken::new(RawKind::Operator, "\\\\"),
                c if OPERATOR_CHARS.contains(&c) => RawToken::new(RawKind::Operator, c.to_string()),

                c => RawToken::new(RawKind::Punctuation, c.to_string()),
            };
            return Ok(token);
        }
    }

    /// True if nothing but blanks remains before the next newline. Used to
    /// tell a line-continuation `_` from a stray one.
    pub fn at_line_end(&self) -> bool {
        self.chars[self.pos.min(self.chars.len())..]
            .iter()
            .find(|c| !matches!(**c, ' ' | '\t' | '\r'))
            .map_or(true, |c| *c == '\n')
    }

    // --- Scanners ---

    /// Collect page text up to the next `<%` or end of input.
    fn scan_markup(&mut self) -> RawToken {
        self.buf.clear();
        loop {
            match self.next_char() {
                None => {
                    self.eof = true;
                    break;
                }
                Some('<') if self.next_is('%') => {
                    self.mode = ScanMode::Code;
                    break;
                }
                Some(c) => self.buf.push(c),
            }
        }
        RawToken::new(RawKind::Markup, self.buf.as_str())
    }

    /// Scan an identifier: letters, digits, `_` and `.`. The alphabetic
    /// operators (`And`, `Mod`, ...) come back as operators.
    fn scan_identifier(&mut self, first: char) -> RawToken {
        self.buf.clear();
        self.buf.push(first);
        while self.peek().is_alphanumeric() || self.peek() == '_' || self.peek() == '.' {
            self.buf.push(self.peek());
            self.advance();
        }

        let kind = if is_word_operator(&self.buf) {
            RawKind::Operator
        } else {
            RawKind::Identifier
        };
        RawToken::new(kind, self.buf.as_str())
    }

    /// Scan a numeric literal. `&H` / `&O` prefixes select hex or octal;
    /// decimals may carry one `.` and one exponent with an optional sign.
    fn scan_number(&mut self, first: char) -> RawToken {
        self.buf.clear();
        self.buf.push(first);

        let radix = first == '&';
        let mut hex = false;
        if radix {
            hex = self.peek().eq_ignore_ascii_case(&'h');
            self.buf.push(self.peek());
            self.advance();
        }

        let mut kind = RawKind::Integer;
        let mut got_dot = false;
        let mut got_exp = false;
        loop {
            let c = self.peek();
            if c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()) {
                self.buf.push(c);
                self.advance();
            } else if radix {
                break;
            } else if c == '.' && !got_dot && !got_exp {
                got_dot = true;
                kind = RawKind::Float;
                self.buf.push(c);
                self.advance();
            } else if (c == 'e' || c == 'E') && !got_exp && self.exponent_follows() {
                got_exp = true;
                kind = RawKind::Float;
                self.buf.push(c);
                self.advance();
                if self.peek() == '+' || self.peek() == '-' {
                    self.buf.push(self.peek());
                    self.advance();
                }
            } else {
                break;
            }
        }

        RawToken::new(kind, self.buf.as_str())
    }

    /// Scan a string literal after its opening quote. `""` is an escaped quote.
    fn scan_string(&mut self) -> Result<RawToken, ScanError> {
        self.buf.clear();
        loop {
            match self.next_char() {
                None | Some('\r') | Some('\n') => return Err(ScanError::UnterminatedString),
                Some('"') if self.next_is('"') => self.buf.push('"'),
                Some('"') => return Ok(RawToken::new(RawKind::String, self.buf.as_str())),
                Some('%') if self.peek() == '>' => return Err(ScanError::DelimiterInString),
                Some(c) => self.buf.push(c),
            }
        }
    }

    /// Scan a comment body up to (not including) the newline. A `%>` ends
    /// the comment early so the code block can close on the same line.
    fn scan_comment(&mut self) -> RawToken {
        self.buf.clear();
        while !self.is_at_end() {
            let c = self.peek();
            if c == '\n' || (c == '%' && self.peek_next() == '>') {
                break;
            }
            if c != '\r' {
                self.buf.push(c);
            }
            self.advance();
        }
        RawToken::new(RawKind::Comment, self.buf.as_str())
    }

    /// Scan a `#...#` date literal after its opening `#`.
    fn scan_date(&mut self) -> Result<RawToken, ScanError> {
        self.buf.clear();
        loop {
            match self.next_char() {
                None | Some('\r') | Some('\n') => return Err(ScanError::UnterminatedDate),
                Some('#') => return Ok(RawToken::new(RawKind::Date, self.buf.as_str())),
                Some('%') if self.peek() == '>' => return Err(ScanError::DelimiterInDate),
                Some(c) if is_date_char(c) => self.buf.push(c),
                Some(c) => return Err(ScanError::InvalidDateChar(c)),
            }
        }
    }

    // --- Lookahead ---

    /// After an `r`: is this `em` followed by a blank?
    fn at_rem_comment(&self) -> bool {
        match self.chars.get(self.pos..self.pos + 3) {
            Some([e, m, blank]) => {
                e.eq_ignore_ascii_case(&'e')
                    && m.eq_ignore_ascii_case(&'m')
                    && (*blank == ' ' || *blank == '\t')
            }
            _ => false,
        }
    }

    /// After an `&`: is this `H<hexdigit>` or `O<digit>`?
    fn at_radix_prefix(&self) -> bool {
        let (marker, digit) = (self.peek(), self.peek_next());
        match marker.to_ascii_lowercase() {
            'h' => digit.is_ascii_hexdigit(),
            'o' => digit.is_ascii_digit(),
            _ => false,
        }
    }

    /// At an `e`: does a valid exponent (`e5`, `e-5`) follow?
    fn exponent_follows(&self) -> bool {
        let next = self.peek_next();
        if next.is_ascii_digit() {
            return true;
        }
        (next == '+' || next == '-')
            && self.chars.get(self.pos + 2).is_some_and(|c| c.is_ascii_digit())
    }

    // --- Helpers ---

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Consume the next char if it is `c`.
    fn next_is(&mut self, c: char) -> bool {
        if self.peek() == c && !self.is_at_end() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
