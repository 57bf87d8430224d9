use std::fmt;
use std::error::Error;
use thiserror::Error as ThisError;

/// All syntax errors found while parsing one selection string, in the order
/// they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) errors: Vec<SyntaxError>,
}

/// A single syntax error and the byte offset of the token that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub(crate) pos: usize,
    pub(crate) cause: SyntaxErrorCause,
}

#[derive(Debug, Clone, Copy, ThisError, PartialEq, Eq)]
pub enum SyntaxErrorCause {
    #[error("expected identifier")]
    ExpectedIdentifier,
    #[error("missing separator between identifiers")]
    MissingSeparatorBetweenIdentifiers,
    #[error("expected closing parenthesis")]
    ExpectedClosingParenthesis,
}

impl ParseError {
    pub(crate) fn new(errors: Vec<SyntaxError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn causes(&self) -> impl Iterator<Item = SyntaxErrorCause> + '_ {
        self.errors.iter().map(|e| e.cause)
    }
}

impl SyntaxError {
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn cause(&self) -> SyntaxErrorCause {
        self.cause
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for ParseError {}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl Error for SyntaxError {}
