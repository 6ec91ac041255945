//! The raw content of a chain handle.

use std::future::IntoFuture;

use futures::future::{Either, Ready};

use super::{ChainError, Deferred, Immediate, RawFuture, Shareable};

/// What a chain handle wraps: a value known now, or a future of one.
///
/// Converting a handle into a `Payload` yields the handle's own payload, never
/// a payload that holds the handle. Raw values convert into
/// [`Payload::Immediate`].
///
/// # Examples
///
/// ```rust
/// use chainwrap::chain::{Deferred, Immediate, Payload};
///
/// let raw: Payload<i32> = 3.into();
/// let wrapped: Payload<i32> = Immediate::new(3).into();
/// assert_eq!(raw.immediate(), Some(3));
/// assert_eq!(wrapped.immediate(), Some(3));
///
/// let deferred: Payload<i32> = Deferred::ready(3).into();
/// assert!(deferred.is_deferred());
/// ```
#[derive(Debug)]
pub enum Payload<V> {
    /// A value known now.
    Immediate(V),
    /// A future that yields the value once.
    Deferred(Deferred<V>),
}

impl<V> Payload<V> {
    /// Returns `true` for an immediate payload.
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// Returns `true` for a deferred payload.
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns the value of an immediate payload.
    pub fn immediate(self) -> Option<V> {
        match self {
            Self::Immediate(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Returns the handle of a deferred payload.
    pub fn deferred(self) -> Option<Deferred<V>> {
        match self {
            Self::Immediate(_) => None,
            Self::Deferred(deferred) => Some(deferred),
        }
    }
}

impl<V: Shareable> Payload<V> {
    /// Lifts the payload into deferred mode.
    pub fn into_deferred(self) -> Deferred<V> {
        match self {
            Self::Immediate(value) => Deferred::ready(value),
            Self::Deferred(deferred) => deferred,
        }
    }
}

impl<V: Shareable> Clone for Payload<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Immediate(value) => Self::Immediate(value.clone()),
            Self::Deferred(deferred) => Self::Deferred(deferred.clone()),
        }
    }
}

impl<V> From<V> for Payload<V> {
    fn from(value: V) -> Self {
        Self::Immediate(value)
    }
}

impl<V> From<Immediate<V>> for Payload<V> {
    fn from(handle: Immediate<V>) -> Self {
        Self::Immediate(handle.raw_value())
    }
}

impl<V> From<Deferred<V>> for Payload<V> {
    fn from(handle: Deferred<V>) -> Self {
        Self::Deferred(handle)
    }
}

/// Resolving an immediate payload does not allocate.
impl<V: Shareable> IntoFuture for Payload<V> {
    type Output = Result<V, ChainError>;
    type IntoFuture = Either<Ready<Result<V, ChainError>>, RawFuture<V>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Immediate(value) => Either::Left(futures::future::ready(Ok(value))),
            Self::Deferred(deferred) => Either::Right(deferred.into_future()),
        }
    }
}
