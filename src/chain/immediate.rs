//! `Immediate` - a chain handle over a value that is available now.
//!
//! Every operation runs synchronously at the point it is called and returns a
//! new `Immediate`. A panic or an `Err` raised by a callback surfaces right
//! there, to the caller of the failing operation.
//!
//! # Examples
//!
//! ```rust
//! use chainwrap::chain::Immediate;
//!
//! let text = Immediate::new(vec!["red", "green"])
//!     .map_each(|name| format!("{name}-fn"))
//!     .join("")
//!     .raw_value();
//! assert_eq!(text, "red-fngreen-fn");
//! ```

use std::fmt::{Debug, Display};
use std::future::IntoFuture;

use super::deferred::LOG_TARGET;
use super::{ChainError, Deferred, Member, Payload, Shareable, join_display};

/// A chain handle whose value is known now.
///
/// The mode of a handle never changes implicitly: operations on an
/// `Immediate` only accept immediate inputs and always return an
/// `Immediate`. [`Immediate::to_async`] and [`Immediate::resolve`] are the
/// only ways into deferred mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Immediate<V> {
    value: V,
}

impl<V> Immediate<V> {
    /// Wraps `value`.
    #[inline]
    pub const fn new(value: V) -> Self {
        Self { value }
    }

    /// Borrows the wrapped value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the payload of this handle.
    pub fn into_payload(self) -> Payload<V> {
        Payload::Immediate(self.value)
    }
}

impl<V> From<V> for Immediate<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Transparent Chaining
// =============================================================================

impl<V> Immediate<V> {
    /// Reads the member `name` of the value.
    pub fn get(self, name: &str) -> Immediate<V::Output>
    where
        V: Member,
    {
        Immediate::new(self.value.member(name))
    }

    /// Calls the wrapped function with `target` and `arguments`.
    ///
    /// Both inputs may be given raw or as `Immediate` handles; handles are
    /// unwrapped before the call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainwrap::chain::Immediate;
    ///
    /// let repeat = Immediate::new(|text: String, count: usize| text.repeat(count));
    /// let result = repeat.apply(Immediate::new("ab".to_string()), 3);
    /// assert_eq!(result.raw_value(), "ababab");
    /// ```
    pub fn apply<T, A, R>(
        self,
        target: impl Into<Immediate<T>>,
        arguments: impl Into<Immediate<A>>,
    ) -> Immediate<R>
    where
        V: FnOnce(T, A) -> R,
    {
        let function = self.value;
        Immediate::new(function(target.into().value, arguments.into().value))
    }

    /// Calls `method` with the wrapped value as its receiver.
    pub fn call<A, R, M>(self, method: M, arguments: impl Into<Immediate<A>>) -> Immediate<R>
    where
        M: FnOnce(V, A) -> R,
    {
        Immediate::new(method).apply(self, arguments)
    }

    /// Transforms every element of the wrapped iterable value.
    pub fn map_each<U, F>(self, function: F) -> Immediate<Vec<U>>
    where
        V: IntoIterator,
        F: FnMut(V::Item) -> U,
    {
        self.map(|value| value.into_iter().map(function).collect())
    }

    /// Concatenates the elements of the wrapped iterable value, placing
    /// `separator` between them.
    pub fn join(self, separator: &str) -> Immediate<String>
    where
        V: IntoIterator,
        V::Item: Display,
    {
        self.map(|value| join_display(value, separator))
    }

    /// Collapses a handle wrapped around another handle.
    ///
    /// ```rust
    /// use chainwrap::chain::Immediate;
    ///
    /// let nested = Immediate::new(Immediate::new(42));
    /// assert_eq!(nested.flatten().raw_value(), Immediate::new(42).raw_value());
    /// ```
    pub fn flatten(self) -> V
    where
        V: super::Chain,
    {
        self.value
    }
}

// =============================================================================
// Terminal Operations
// =============================================================================

impl<V> Immediate<V> {
    /// Applies `function` to the value.
    pub fn map<U, F>(self, function: F) -> Immediate<U>
    where
        F: FnOnce(V) -> U,
    {
        Immediate::new(function(self.value))
    }

    /// Applies a fallible `function` to the value, returning its error to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns whatever error `function` returns.
    pub fn try_map<U, E, F>(self, function: F) -> Result<Immediate<U>, E>
    where
        F: FnOnce(V) -> Result<U, E>,
    {
        function(self.value).map(Immediate::new)
    }

    /// Runs `effect` on the value and returns this handle unchanged.
    pub fn side_effect<F>(self, effect: F) -> Self
    where
        F: FnOnce(&V),
    {
        effect(&self.value);
        self
    }

    /// Emits the value as a `tracing` event and returns this handle unchanged.
    pub fn log(self) -> Self
    where
        V: Debug,
    {
        tracing::info!(target: LOG_TARGET, value = ?self.value, "chain value");
        self
    }

    /// Moves the value into deferred mode over an already-resolved future.
    pub fn to_async(self) -> Deferred<V>
    where
        V: Shareable,
    {
        Deferred::ready(self.value)
    }

    /// Returns the value.
    #[inline]
    pub fn raw_value(self) -> V {
        self.value
    }

    /// Awaits the wrapped future, continuing the chain in deferred mode.
    ///
    /// ```rust
    /// use chainwrap::chain::Immediate;
    ///
    /// # futures::executor::block_on(async {
    /// let deferred = Immediate::new(async { 6 }).resolve().map(|value| value * 7);
    /// assert_eq!(deferred.await.unwrap(), 42);
    /// # });
    /// ```
    pub fn resolve(self) -> Deferred<<V as IntoFuture>::Output>
    where
        V: IntoFuture,
        V::IntoFuture: Send + 'static,
        <V as IntoFuture>::Output: Shareable,
    {
        Deferred::from_future(self.value.into_future())
    }

    /// Awaits the wrapped fallible future; its error becomes the failure
    /// cause of the resulting deferred chain.
    pub fn try_resolve<U, E>(self) -> Deferred<U>
    where
        V: IntoFuture<Output = Result<U, E>>,
        V::IntoFuture: Send + 'static,
        U: Shareable,
        E: Into<ChainError> + 'static,
    {
        Deferred::from_try_future(self.value.into_future())
    }
}

// Immediate inputs never come from a deferred handle or payload.
static_assertions::assert_not_impl_any!(Deferred<i32>: Into<Immediate<i32>>);
static_assertions::assert_not_impl_any!(Payload<i32>: Into<Immediate<i32>>);
