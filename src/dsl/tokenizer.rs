use super::token::{Token, TokenKind};

/// Pull-based scanner over the bytes of a selection string.
///
/// Only the space character is skipped between tokens. Tab, carriage return and
/// line feed are not whitespace here: each one yields a single-character
/// [`TokenKind::Illegal`] token.
pub struct Tokenizer<'input> {
    input: &'input str,
    byte_idx: usize,
}

impl<'input> Tokenizer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self { input, byte_idx: 0 }
    }

    /// Returns the next token. Once the input is exhausted every call yields `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::eof(self.byte_idx),
        };

        match c {
            b',' => self.output_single_char(TokenKind::Separator),
            b'(' => self.output_single_char(TokenKind::Lparen),
            b')' => self.output_single_char(TokenKind::Rparen),
            b'\t' | b'\r' | b'\n' => self.output_single_char(TokenKind::Illegal),
            _ => self.ident(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.byte_idx).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(b' ') {
            self.byte_idx += 1;
        }
    }

    fn output_single_char(&mut self, kind: TokenKind) -> Token {
        let pos = self.byte_idx;
        self.byte_idx += 1;
        Token {
            kind,
            literal: self.input[pos..self.byte_idx].to_string(),
            pos,
        }
    }

    // Delimiters are all ASCII, so the slice always ends on a char boundary.
    fn ident(&mut self) -> Token {
        let start = self.byte_idx;
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            self.byte_idx += 1;
        }

        Token {
            kind: TokenKind::Ident,
            literal: self.input[start..self.byte_idx].to_string(),
            pos: start,
        }
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

fn is_ident_char(c: u8) -> bool {
    !SPECIAL_CHARS.contains(&c)
}

const SPECIAL_CHARS: [u8; 7] = [b',', b'(', b')', b' ', b'\t', b'\r', b'\n'];
