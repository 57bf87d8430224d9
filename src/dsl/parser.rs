use tracing::debug;

use super::error::{SyntaxError, SyntaxErrorCause};
use super::token::{Token, TokenKind};
use super::tokenizer::Tokenizer;
use crate::node::{Identifier, Node};

/// Predictive parser with two tokens of lookahead.
///
/// The parser never gives up on the first error. It records the problem,
/// skips to the next safe boundary and keeps going, so a single run reports
/// every syntax error in the input alongside a best-effort tree.
pub struct Parser<'input> {
    input: Tokenizer<'input>,
    cur: Token,
    peek: Token,
    errors: Vec<SyntaxError>,
}

impl<'input> Parser<'input> {
    pub fn new(input: &'input str) -> Self {
        let mut input = Tokenizer::new(input);
        let cur = input.next_token();
        let peek = input.next_token();
        Self {
            input,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parses the whole input into its top-level field list.
    pub fn parse(mut self) -> (Node, Vec<SyntaxError>) {
        let node = self.parse_fields();
        (node, self.errors)
    }

    fn next_token(&mut self) {
        let next = self.input.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    fn error(&mut self, cause: SyntaxErrorCause) {
        debug!(pos = self.cur.pos, token = %self.cur.kind, %cause, "selection syntax error");
        self.errors.push(SyntaxError {
            pos: self.cur.pos,
            cause,
        });
    }

    // Comma separated list of fields, up to the end of input or a `)` at the
    // top level. Groups are tracked on an explicit stack, so nesting depth is
    // bounded by memory rather than by the native stack.
    fn parse_fields(&mut self) -> Node {
        let mut open: Vec<(Vec<Identifier>, String)> = Vec::new();
        let mut identifiers = Vec::new();

        loop {
            if self.cur.is(TokenKind::Eof) || self.cur.is(TokenKind::Rparen) {
                let (mut outer, value) = match open.pop() {
                    Some(group) => group,
                    None => break,
                };
                if self.cur.is(TokenKind::Rparen) {
                    self.next_token();
                } else {
                    self.error(SyntaxErrorCause::ExpectedClosingParenthesis);
                }
                outer.push(Identifier::with_child(value, Node::Identifiers(identifiers)));
                identifiers = outer;
                self.after_field();
                continue;
            }

            if !self.cur.is(TokenKind::Ident) {
                self.error(SyntaxErrorCause::ExpectedIdentifier);
                self.synchronize();
                if self.cur.is(TokenKind::Separator) {
                    self.next_token();
                }
                continue;
            }

            let value = std::mem::take(&mut self.cur.literal);
            if self.peek.is(TokenKind::Lparen) {
                self.next_token();
                self.next_token();
                open.push((std::mem::take(&mut identifiers), value));
                continue;
            }

            self.next_token();
            identifiers.push(Identifier::new(value));
            self.after_field();
        }

        Node::Identifiers(identifiers)
    }

    // Current token is the one following a complete field.
    fn after_field(&mut self) {
        match self.cur.kind {
            TokenKind::Separator => self.next_token(),
            TokenKind::Rparen | TokenKind::Eof => (),
            // the next pass consumes at least the identifier, so the token is
            // left in place here
            TokenKind::Ident | TokenKind::Illegal | TokenKind::Lparen => {
                self.error(SyntaxErrorCause::MissingSeparatorBetweenIdentifiers)
            }
        }
    }

    fn synchronize(&mut self) {
        while !matches!(
            self.cur.kind,
            TokenKind::Separator | TokenKind::Rparen | TokenKind::Eof
        ) {
            self.next_token();
        }
    }
}
