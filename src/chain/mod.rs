//! Fluent chaining over values that are available now or later.
//!
//! A chain handle wraps a [`Payload`]: either a value known now
//! ([`Immediate`]) or a future that yields one value later ([`Deferred`]).
//! Member reads, calls and transformations on a handle return a new handle of
//! the same mode, so a long chain can be built before anything is forced.
//!
//! # Operations
//!
//! Transparent chaining keeps going:
//!
//! - `get(name)`: read a member of the value (see [`Member`])
//! - `apply(target, arguments)`: call a function-valued handle
//! - `call(method, arguments)`: call `method` with the value as receiver
//!
//! Terminal operations end or redirect a chain:
//!
//! - `map(function)`: transform the value
//! - `side_effect(effect)` / `log()`: observe the value, keep the handle
//! - `to_async()`: continue in deferred mode
//! - `raw_value()`: hand back the value (or its future)
//!
//! # Examples
//!
//! ```rust
//! use chainwrap::chain::{Deferred, Immediate};
//! use serde_json::json;
//!
//! let object = json!({"a": {"b": 42}});
//! assert_eq!(Immediate::new(object.clone()).get("a").get("b").raw_value(), json!(42));
//!
//! # futures::executor::block_on(async {
//! let later = Deferred::from_future(async move { object });
//! assert_eq!(later.get("a").get("b").await.unwrap(), json!(42));
//! # });
//! ```
//!
//! # Failures
//!
//! In immediate mode a failing callback fails the call that runs it. In
//! deferred mode a failure settles every downstream handle with the same
//! [`ChainError`]; it is observed only when the chain is forced. A deferred
//! failure that nobody forces is never reported.

mod deferred;
mod error;
mod immediate;
mod member;
mod payload;
mod traits;

pub use deferred::{Deferred, RawFuture, Shareable};
pub use error::ChainError;
pub use immediate::Immediate;
pub use member::Member;
pub use payload::Payload;
pub use traits::{Chain, DeferredMode, ImmediateMode, MemberChain, Mode, Terminal, Wrap};

use std::fmt::Display;
use std::future::Future;

/// Wraps a value known now.
///
/// ```rust
/// use chainwrap::chain::chain;
///
/// assert_eq!(chain(2).map(|value| value + 1).raw_value(), 3);
/// ```
pub const fn chain<V>(value: V) -> Immediate<V> {
    Immediate::new(value)
}

/// Wraps a future of a value.
pub fn chain_future<V, Fut>(future: Fut) -> Deferred<V>
where
    V: Shareable,
    Fut: Future<Output = V> + Send + 'static,
{
    Deferred::from_future(future)
}

pub(crate) fn join_display<I>(items: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut joined = String::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            joined.push_str(separator);
        }
        joined.push_str(&item.to_string());
    }
    joined
}
