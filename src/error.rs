use std::fmt;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::content::ValueError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Kind must be a struct or pointer to struct, got \"{kind}\"")]
    TypeNotValid { kind: Kind },
    #[error("Failed to move value through its serde representation.\n{0}")]
    Value(#[from] ValueError),
}

/// Shape of a value that cannot be projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Slice,
    Map,
    Unit,
    Enum,
    /// `Option<Option<_>>` and deeper.
    Option,
    /// A type that only describes itself through `deserialize_any`.
    Any,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Unit => "unit",
            Kind::Enum => "enum",
            Kind::Option => "option",
            Kind::Any => "any",
        };
        f.write_str(name)
    }
}

pub type Result<T> = StdResult<T, Error>;
