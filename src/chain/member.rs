//! Named member access for chained values.
//!
//! [`Member`] is what `get(name)` on a chain handle reads through. Rust has no
//! runtime property lookup, so a type opts in by describing what reading a
//! member by name yields.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A value whose members can be read by name.
///
/// Reading a member never fails: a missing member yields the type's notion
/// of "absent" (`None`, or `Value::Null` for JSON).
///
/// # Examples
///
/// ```rust
/// use chainwrap::chain::Member;
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Member for Point {
///     type Output = Option<i64>;
///
///     fn member(&self, name: &str) -> Self::Output {
///         match name {
///             "x" => Some(self.x),
///             "y" => Some(self.y),
///             _ => None,
///         }
///     }
/// }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(point.member("y"), Some(2));
/// assert_eq!(point.member("z"), None);
/// ```
pub trait Member {
    /// The type produced by reading a member.
    type Output;

    /// Reads the member called `name`.
    fn member(&self, name: &str) -> Self::Output;
}

impl<T: Clone> Member for BTreeMap<String, T> {
    type Output = Option<T>;

    fn member(&self, name: &str) -> Self::Output {
        self.get(name).cloned()
    }
}

impl<T: Clone, S: BuildHasher> Member for HashMap<String, T, S> {
    type Output = Option<T>;

    fn member(&self, name: &str) -> Self::Output {
        self.get(name).cloned()
    }
}

/// Members of a vector are its indices, written in decimal.
impl<T: Clone> Member for Vec<T> {
    type Output = Option<T>;

    fn member(&self, name: &str) -> Self::Output {
        name.parse::<usize>()
            .ok()
            .and_then(|index| self.get(index))
            .cloned()
    }
}

#[cfg(feature = "json")]
mod json {
    use super::Member;
    use serde_json::Value;

    /// Objects expose their keys, arrays their indices and `length`, strings
    /// their `length` in UTF-16 code units. Everything else reads as `Null`.
    impl Member for Value {
        type Output = Self;

        fn member(&self, name: &str) -> Self::Output {
            match self {
                Self::Object(map) => map.get(name).cloned().unwrap_or(Self::Null),
                Self::Array(items) if name == "length" => Self::from(items.len()),
                Self::Array(items) => name
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index))
                    .cloned()
                    .unwrap_or(Self::Null),
                Self::String(text) if name == "length" => {
                    Self::from(text.encode_utf16().count())
                }
                _ => Self::Null,
            }
        }
    }
}
