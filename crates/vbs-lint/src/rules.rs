use vbs_lexer::{Stmt, TokenKind};

use crate::LintMessage;

/// Identifier spellings that create external objects, besides the
/// `CreateObject` and `GetObject` builtins.
const CREATION_IDENTIFIERS: &[&str] = &["Server.CreateObject"];

/// A construct waiting for the token that names what it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    /// A creation call; the object type comes as a string or identifier.
    Call(&'static str),
    /// `New`; the class comes as an identifier.
    New,
}

/// Token-at-a-time rule checker for one file.
#[derive(Debug, Default)]
pub struct Rules {
    pending: Option<(Pending, usize)>,
    messages: Vec<LintMessage>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one token found on `line`.
    pub fn check(&mut self, kind: &TokenKind, line: usize) {
        if let Some((pending, at)) = self.pending.take() {
            let created = match (pending, kind) {
                (_, TokenKind::Punctuation(_)) => {
                    self.pending = Some((pending, at));
                    return;
                }
                (Pending::Call(call), TokenKind::String(progid)) => {
                    Some(format!("{call} creates object \"{progid}\""))
                }
                (Pending::Call(call), TokenKind::Identifier(name)) => {
                    Some(format!("{call} creates object named by {name}"))
                }
                (Pending::New, TokenKind::Identifier(class)) => {
                    Some(format!("New creates an instance of class {class}"))
                }
                _ => None,
            };
            if let Some(text) = created {
                self.report(at, text);
                return;
            }
        }

        match kind {
            TokenKind::Statement(Stmt::Stop) => {
                self.report(line, "Stop should not be used in production code".into())
            }
            TokenKind::Statement(stmt @ (Stmt::Execute | Stmt::ExecuteGlobal)) => {
                self.report(line, format!("{} is not recommended", stmt.as_str()))
            }
            TokenKind::Statement(Stmt::New) => self.pending = Some((Pending::New, line)),
            TokenKind::Function("Eval") => self.report(line, "Eval is not recommended".into()),
            TokenKind::Function(call @ ("CreateObject" | "GetObject")) => {
                self.pending = Some((Pending::Call(*call), line))
            }
            TokenKind::Identifier(name) => {
                if let Some(call) = CREATION_IDENTIFIERS
                    .iter()
                    .find(|call| call.eq_ignore_ascii_case(name))
                {
                    self.pending = Some((Pending::Call(*call), line));
                }
            }
            _ => {}
        }
    }

    pub fn finish(self) -> Vec<LintMessage> {
        self.messages
    }

    fn report(&mut self, line: usize, text: String) {
        self.messages.push(LintMessage { line, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.into())
    }

    fn texts(tokens: &[TokenKind]) -> Vec<String> {
        let mut rules = Rules::new();
        for kind in tokens {
            rules.check(kind, 1);
        }
        rules.finish().into_iter().map(|m| m.text).collect()
    }

    #[test]
    fn test_pending_survives_punctuation() {
        assert_eq!(
            texts(&[
                TokenKind::Function("CreateObject"),
                TokenKind::Punctuation('('),
                TokenKind::String("Scripting.Dictionary".into()),
            ]),
            vec!["CreateObject creates object \"Scripting.Dictionary\""]
        );
    }

    #[test]
    fn test_pending_dropped_by_other_token() {
        assert_eq!(
            texts(&[
                TokenKind::Function("GetObject"),
                TokenKind::Operator("&"),
                TokenKind::String("x".into()),
            ]),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_new_needs_identifier() {
        assert_eq!(
            texts(&[TokenKind::Statement(Stmt::New), TokenKind::String("x".into())]),
            Vec::<String>::new()
        );
        assert_eq!(
            texts(&[TokenKind::Statement(Stmt::New), ident("Cart")]),
            vec!["New creates an instance of class Cart"]
        );
    }

    #[test]
    fn test_dropped_pending_still_checks_token() {
        assert_eq!(
            texts(&[TokenKind::Function("CreateObject"), TokenKind::Statement(Stmt::Stop)]),
            vec!["Stop should not be used in production code"]
        );
    }
}
