mod error;
mod parser;
mod token;
mod tokenizer;
mod deserialize;
#[cfg(test)]
mod test;

pub use error::{ParseError, SyntaxError, SyntaxErrorCause};
pub(crate) use parser::Parser;

#[cfg(feature = "fuzz")]
pub use token::{Token, TokenKind};
#[cfg(feature = "fuzz")]
pub use tokenizer::Tokenizer;
