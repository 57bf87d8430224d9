use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Separator,
    Lparen,
    Rparen,
    Illegal,
    Eof,
}

impl Token {
    pub(crate) fn eof(pos: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            literal: String::new(),
            pos,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Ident => "Ident",
            TokenKind::Separator => ",",
            TokenKind::Lparen => "(",
            TokenKind::Rparen => ")",
            TokenKind::Illegal => "Illegal",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}
