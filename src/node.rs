use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::dsl::ParseError;

pub(crate) static WILDCARD: Node = Node::AllIdentifiers;

/// Parsed selection tree.
///
/// A tree is immutable once built and can be shared across threads and reused
/// for any number of projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches every field name. As a child it means "keep the whole sub-record".
    AllIdentifiers,
    /// Explicit list of selected fields, in the order they were written.
    Identifiers(Vec<Identifier>),
}

/// A selected field name together with the selection applied to its value.
///
/// E.g. `name` or `address(street,number)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub value: String,
    pub child: Node,
}

/// Result of a successful [`Node::select_field`] lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedField<'a> {
    pub value: &'a str,
    pub child: &'a Node,
}

impl Node {
    pub fn wildcard() -> Self {
        Node::AllIdentifiers
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Node::AllIdentifiers)
    }

    /// Explicit entries of this node; empty for the wildcard.
    pub fn identifiers(&self) -> &[Identifier] {
        match self {
            Node::AllIdentifiers => &[],
            Node::Identifiers(identifiers) => identifiers,
        }
    }

    /// Looks up `field_name`. The first entry with that exact name wins; the
    /// wildcard matches any name and hands back itself as the child.
    pub fn select_field<'a>(&'a self, field_name: &'a str) -> Option<SelectedField<'a>> {
        match self {
            Node::AllIdentifiers => Some(SelectedField {
                value: field_name,
                child: &WILDCARD,
            }),
            Node::Identifiers(identifiers) => identifiers
                .iter()
                .find(|i| i.value == field_name)
                .map(Identifier::as_selected),
        }
    }

    pub fn is_selected(&self, field_name: &str) -> bool {
        self.select_field(field_name).is_some()
    }
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            child: Node::AllIdentifiers,
        }
    }

    pub fn with_child(value: impl Into<String>, child: Node) -> Self {
        Self {
            value: value.into(),
            child,
        }
    }

    fn as_selected(&self) -> SelectedField<'_> {
        SelectedField {
            value: &self.value,
            child: &self.child,
        }
    }
}

impl<'a> SelectedField<'a> {
    /// `true` when the matched entry had no nested group.
    pub fn keeps_everything(&self) -> bool {
        self.child.is_wildcard()
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Identifiers(Vec::new())
    }
}

// Deeply nested trees are torn down with an explicit stack instead of one
// native frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::AllIdentifiers => return,
            Node::Identifiers(identifiers) => mem::take(identifiers),
        };
        while let Some(mut identifier) = pending.pop() {
            if let Node::Identifiers(children) = &mut identifier.child {
                pending.append(children);
            }
        }
    }
}

impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

/// Renders the canonical selection string. The top-level wildcard has no
/// textual form in the language and is shown as `*`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::AllIdentifiers => f.write_str("*"),
            Node::Identifiers(identifiers) => {
                for (i, ident) in identifiers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{ident}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)?;
        if let Node::Identifiers(_) = self.child {
            write!(f, "({})", self.child)?;
        }
        Ok(())
    }
}
