use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::content::Content;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::shape::non_record_kind;
use crate::zero::Projected;

/// Returns `original` when `field_name` is selected by `node`, otherwise the
/// default value of `T` (`None` for options).
///
/// Building block for hand written projections:
///
/// ```
/// let fields = fieldselect::parse("name").unwrap();
///
/// assert_eq!(fieldselect::project_scalar(&fields, "name", "John"), "John");
/// assert_eq!(fieldselect::project_scalar(&fields, "age", 18), 0);
/// ```
pub fn project_scalar<T: Default>(node: &Node, field_name: &str, original: T) -> T {
    if node.is_selected(field_name) {
        original
    } else {
        T::default()
    }
}

/// Builds a new `T` holding only the fields of `source` reachable through `node`.
///
/// Fields are matched by their serialized name, so `#[serde(rename)]` and
/// `rename_all` decide the selection key and `#[serde(skip)]` fields are never
/// selected. Everything left out takes its zero value. Only struct values are
/// filtered: enums, maps and sequences reached through a selected field are
/// copied whole. `source` must be a struct or an optional/boxed struct; a
/// `None` source projects to `None`. The wildcard selection returns a clone of
/// `source`, so even `#[serde(skip)]` fields survive it.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Address {
///     street: String,
///     number: u32,
/// }
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
///     address: Address,
/// }
///
/// let user = User {
///     name: "John".into(),
///     age: 18,
///     address: Address { street: "Main".into(), number: 42 },
/// };
/// let fields = fieldselect::parse("name,address(street)").unwrap();
///
/// assert_eq!(
///     fieldselect::project(&fields, &user).unwrap(),
///     User {
///         name: "John".into(),
///         age: 0,
///         address: Address { street: "Main".into(), number: 0 },
///     }
/// );
/// ```
pub fn project<T>(node: &Node, source: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    if let Some(kind) = non_record_kind::<T>() {
        debug!(%kind, "value is not a projectable record");
        return Err(Error::TypeNotValid { kind });
    }

    if node.is_wildcard() {
        trace!("wildcard selection, copying record");
        return Ok(source.clone());
    }

    let content = Content::capture(source)?;
    trace!(fields = node.identifiers().len(), "projecting record");
    Ok(T::deserialize(Projected::new(content, node))?)
}
