use vbs_lexer::{Stmt, TokenKind};

/// The previously emitted token, reduced to what the spacing and depth
/// rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// Nothing emitted yet.
    Start,
    Statement(Stmt),
    /// A compound `End X`.
    EndStatement(Stmt),
    Operator,
    /// A markup chunk or include directive.
    Markup,
    Punctuation(char),
    Other,
}

impl Lookback {
    pub fn of(kind: &TokenKind) -> Self {
        match kind {
            TokenKind::Statement(stmt) => Lookback::Statement(*stmt),
            TokenKind::Operator(_) => Lookback::Operator,
            TokenKind::Punctuation(c) => Lookback::Punctuation(*c),
            k if k.is_markup_like() => Lookback::Markup,
            _ => Lookback::Other,
        }
    }

    /// Whether punctuation after this token takes the usual leading space.
    pub fn spaces_punctuation(self) -> bool {
        matches!(
            self,
            Lookback::Statement(_) | Lookback::EndStatement(_) | Lookback::Operator
        )
    }
}

/// Per-file formatter state. One value per file, threaded through every
/// step of the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterState {
    /// Indent depth in tabs.
    pub depth: usize,
    /// Set by line ends and markup; cleared by the first token of the next line.
    pub at_line_start: bool,
    pub previous: Lookback,
    /// Set by `(`; consumed by the next token, which then gets no leading space.
    pub paren: bool,
    /// Set by markup and includes in normal mode; cleared once `<%` is
    /// written before the next code token.
    pub owes_code_delimiter: bool,
    /// Set by the `:` separator; the next line start prints no tabs.
    pub no_tabs_once: bool,
    /// Set by a line continuation; its extra level is dropped at the next
    /// line start, after that line's tabs are written.
    pub continuation_owed: bool,
}

impl Default for FormatterState {
    fn default() -> Self {
        Self {
            depth: 0,
            at_line_start: true,
            previous: Lookback::Start,
            paren: false,
            owes_code_delimiter: false,
            no_tabs_once: false,
            continuation_owed: false,
        }
    }
}

impl FormatterState {
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease depth, never below zero.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the paren flag.
    pub fn take_paren(&mut self) -> bool {
        std::mem::take(&mut self.paren)
    }

    pub fn end_line(&mut self) {
        self.at_line_start = true;
    }

    /// Called once the first token of a line has had its tabs written.
    pub fn begin_line(&mut self) {
        self.at_line_start = false;
        self.no_tabs_once = false;
        self.paren = false;
        if std::mem::take(&mut self.continuation_owed) {
            self.dedent();
        }
    }

    pub fn previous_is(&self, stmt: Stmt) -> bool {
        self.previous == Lookback::Statement(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vbs_lexer::LineEnd;

    #[test]
    fn test_default_is_line_start_at_depth_zero() {
        let state = FormatterState::default();
        assert!(state.at_line_start);
        assert_eq!(state.depth, 0);
        assert_eq!(state.previous, Lookback::Start);
    }

    #[test]
    fn test_dedent_saturates() {
        let mut state = FormatterState::default();
        state.dedent();
        assert_eq!(state.depth, 0);
        state.indent();
        state.dedent();
        state.dedent();
        assert_eq!(state.depth, 0);
    }

    #[test]
    fn test_paren_is_one_shot() {
        let mut state = FormatterState {
            paren: true,
            ..Default::default()
        };
        assert!(state.take_paren());
        assert!(!state.take_paren());
    }

    #[test]
    fn test_begin_line_settles_continuation() {
        let mut state = FormatterState {
            depth: 2,
            paren: true,
            no_tabs_once: true,
            continuation_owed: true,
            ..Default::default()
        };
        state.begin_line();
        assert_eq!(
            state,
            FormatterState {
                depth: 1,
                at_line_start: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_lookback_of() {
        assert_eq!(
            Lookback::of(&TokenKind::Statement(Stmt::Then)),
            Lookback::Statement(Stmt::Then)
        );
        assert_eq!(Lookback::of(&TokenKind::Operator("And")), Lookback::Operator);
        assert_eq!(
            Lookback::of(&TokenKind::FileInclude("a".into())),
            Lookback::Markup
        );
        assert_eq!(
            Lookback::of(&TokenKind::EndOfLine(LineEnd::Newline)),
            Lookback::Other
        );
    }

    #[test]
    fn test_punctuation_spacing() {
        assert!(Lookback::Operator.spaces_punctuation());
        assert!(Lookback::EndStatement(Stmt::If).spaces_punctuation());
        assert!(!Lookback::Other.spaces_punctuation());
        assert!(!Lookback::Punctuation('(').spaces_punctuation());
    }
}
