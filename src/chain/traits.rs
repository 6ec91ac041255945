//! The interface shared by both handle types.
//!
//! [`Immediate`] and [`Deferred`] each have inherent methods with the
//! tightest bounds their mode allows. [`Chain`] and [`Terminal`] expose the
//! common part, so a pipeline can be written once and run in either mode:
//!
//! ```rust
//! use chainwrap::chain::{Deferred, Immediate, Terminal, Wrap};
//!
//! fn shout<C: Terminal<Value = String>>(handle: C) -> Wrap<C, String> {
//!     handle.map(|text| text.to_uppercase()).map(|text| text + "!")
//! }
//!
//! assert_eq!(shout(Immediate::new("hi".to_string())).raw_value(), "HI!");
//!
//! # futures::executor::block_on(async {
//! let deferred = shout(Deferred::ready("hi".to_string()));
//! assert_eq!(deferred.await.unwrap(), "HI!");
//! # });
//! ```

use std::fmt::Debug;

use super::{Deferred, Immediate, Member, Payload, RawFuture, Shareable};

/// The evaluation mode of a handle, as a type.
///
/// A mode names the handle type it produces for any value, which is what
/// lets a chain keep its mode across every step.
pub trait Mode: Sized {
    /// The handle type of this mode over a value `V`.
    type Handle<V: Shareable>: Terminal<Value = V, Mode = Self>;
}

/// Values known now; handles are [`Immediate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmediateMode {}

/// Values yielded by a future; handles are [`Deferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredMode {}

impl Mode for ImmediateMode {
    type Handle<V: Shareable> = Immediate<V>;
}

impl Mode for DeferredMode {
    type Handle<V: Shareable> = Deferred<V>;
}

/// The handle of the same mode as `C`, over a value `U`.
pub type Wrap<C, U> = <<C as Chain>::Mode as Mode>::Handle<U>;

/// Transparent chaining: member reads and method calls that keep the mode
/// of the receiver.
pub trait Chain: Sized {
    /// The type of the wrapped value.
    type Value;

    /// The evaluation mode of this handle.
    type Mode: Mode;

    /// Returns the payload of this handle.
    fn into_payload(self) -> Payload<Self::Value>;

    /// Calls `method` with the value as receiver and `arguments` as its
    /// argument.
    fn call<A, R, M>(self, method: M, arguments: A) -> Wrap<Self, R>
    where
        M: FnOnce(Self::Value, A) -> R + Send + 'static,
        A: Shareable,
        R: Shareable;
}

/// Member reads that keep the mode of the receiver.
///
/// Implemented for every handle whose value is a [`Member`].
pub trait MemberChain: Chain {
    /// What reading a member of the value yields.
    type Output: Shareable;

    /// Reads the member `name` of the value.
    fn get(self, name: &str) -> Wrap<Self, Self::Output>;
}

/// Chain-ending operations.
pub trait Terminal: Chain {
    /// What [`Terminal::raw_value`] hands back: the value itself, or its
    /// future.
    type Raw;

    /// Applies `function` to the value.
    fn map<U, F>(self, function: F) -> Wrap<Self, U>
    where
        U: Shareable,
        F: FnOnce(Self::Value) -> U + Send + 'static;

    /// Runs `effect` on the value (once it settles, in deferred mode) and
    /// returns the receiver. Dropping the returned handle does not cancel
    /// the effect.
    fn side_effect<F>(self, effect: F) -> Self
    where
        F: FnOnce(&Self::Value) + Send + 'static;

    /// Emits the value as a `tracing` event and returns the receiver.
    fn log(self) -> Self
    where
        Self::Value: Debug;

    /// Continues the chain in deferred mode.
    fn to_async(self) -> Deferred<Self::Value>
    where
        Self::Value: Shareable;

    /// Ends the chain, handing back the value or its future.
    fn raw_value(self) -> Self::Raw;
}

// =============================================================================
// Immediate
// =============================================================================

impl<V> Chain for Immediate<V> {
    type Value = V;
    type Mode = ImmediateMode;

    fn into_payload(self) -> Payload<V> {
        Immediate::into_payload(self)
    }

    fn call<A, R, M>(self, method: M, arguments: A) -> Immediate<R>
    where
        M: FnOnce(V, A) -> R + Send + 'static,
        A: Shareable,
        R: Shareable,
    {
        Immediate::call(self, method, Immediate::new(arguments))
    }
}

impl<V> MemberChain for Immediate<V>
where
    V: Member,
    V::Output: Shareable,
{
    type Output = V::Output;

    fn get(self, name: &str) -> Immediate<V::Output> {
        Immediate::get(self, name)
    }
}

impl<V> Terminal for Immediate<V> {
    type Raw = V;

    fn map<U, F>(self, function: F) -> Immediate<U>
    where
        U: Shareable,
        F: FnOnce(V) -> U + Send + 'static,
    {
        Immediate::map(self, function)
    }

    fn side_effect<F>(self, effect: F) -> Self
    where
        F: FnOnce(&V) + Send + 'static,
    {
        Immediate::side_effect(self, effect)
    }

    fn log(self) -> Self
    where
        V: Debug,
    {
        Immediate::log(self)
    }

    fn to_async(self) -> Deferred<V>
    where
        V: Shareable,
    {
        Immediate::to_async(self)
    }

    fn raw_value(self) -> V {
        Immediate::raw_value(self)
    }
}

// =============================================================================
// Deferred
// =============================================================================

impl<V: Shareable> Chain for Deferred<V> {
    type Value = V;
    type Mode = DeferredMode;

    fn into_payload(self) -> Payload<V> {
        Deferred::into_payload(self)
    }

    fn call<A, R, M>(self, method: M, arguments: A) -> Deferred<R>
    where
        M: FnOnce(V, A) -> R + Send + 'static,
        A: Shareable,
        R: Shareable,
    {
        Deferred::call(self, method, Payload::Immediate(arguments))
    }
}

impl<V> MemberChain for Deferred<V>
where
    V: Member + Shareable,
    V::Output: Shareable,
{
    type Output = V::Output;

    fn get(self, name: &str) -> Deferred<V::Output> {
        Deferred::get(self, name)
    }
}

impl<V: Shareable> Terminal for Deferred<V> {
    type Raw = RawFuture<V>;

    fn map<U, F>(self, function: F) -> Deferred<U>
    where
        U: Shareable,
        F: FnOnce(V) -> U + Send + 'static,
    {
        Deferred::map(self, function)
    }

    fn side_effect<F>(self, effect: F) -> Self
    where
        F: FnOnce(&V) + Send + 'static,
    {
        Deferred::side_effect(self, effect)
    }

    fn log(self) -> Self
    where
        V: Debug,
    {
        Deferred::log(self)
    }

    fn to_async(self) -> Self {
        self
    }

    fn raw_value(self) -> RawFuture<V> {
        Deferred::raw_value(self)
    }
}
