//! Field selection language and record projection.
//!
//! A selection string such as `name,address(street,number)` lists the fields
//! to keep from a record, grouping the fields of nested records in
//! parentheses. [`parse`] turns it into a [`Node`] tree, which is then applied
//! to typed values with [`project`], or field by field with [`project_scalar`].
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let fields = fieldselect::parse("name").unwrap();
//! let user = User { name: "John".into(), age: 18 };
//!
//! assert_eq!(
//!     fieldselect::project(&fields, &user).unwrap(),
//!     User { name: "John".into(), age: 0 }
//! );
//! ```
//!
//! ### Selection language
//! ```text
//! selection := field (',' field)* | ε
//! field     := IDENT [ '(' selection ')' ]
//! ```
//! Spaces between tokens are ignored. An identifier is any run of characters
//! other than `,`, `(`, `)`, space, tab, carriage return and line feed, so
//! keys like `my-name`, `1` or `#` are valid. A field without a group keeps
//! its whole value.

mod content;
mod error;
mod node;
mod project;
mod shape;
mod zero;
pub mod dsl;

pub use content::ValueError;
pub use error::{Error, Kind, Result};
pub use node::{Identifier, Node, SelectedField};
pub use project::{project, project_scalar};
pub use dsl::{ParseError, SyntaxError, SyntaxErrorCause};

use dsl::Parser;

/// Parses a selection string. Every syntax error in the input is reported.
pub fn parse(selection: &str) -> std::result::Result<Node, ParseError> {
    let (node, errors) = parse_partial(selection);
    if errors.is_empty() {
        Ok(node)
    } else {
        Err(ParseError::new(errors))
    }
}

/// Parses a selection string, returning the best-effort tree together with any
/// syntax errors. A non-empty error list means the tree may be incomplete.
pub fn parse_partial(selection: &str) -> (Node, Vec<SyntaxError>) {
    Parser::new(selection).parse()
}
