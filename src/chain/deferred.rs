//! `Deferred` - a chain handle over a value that a future will yield later.
//!
//! Every operation on a `Deferred` returns a new `Deferred` whose future
//! starts its work only after its predecessor settles. Nothing runs until
//! the chain is forced (`.await`, [`Deferred::raw_value`] or
//! [`Deferred::spawn`]) or observed by [`Deferred::side_effect`] or
//! [`Deferred::log`], which drive the chain in the background and hand back
//! their receiver.
//!
//! # Shared settlement
//!
//! A `Deferred` wraps a [`futures::future::Shared`] future, so cloning a
//! handle is cheap and every clone observes the one settled result. The
//! underlying computation runs at most once, however many readers force it.
//!
//! ```rust
//! use chainwrap::chain::Deferred;
//!
//! # futures::executor::block_on(async {
//! let base = Deferred::from_future(async { 20 });
//! let doubled = base.clone().map(|value| value * 2);
//! let plus_one = base.map(|value| value + 1);
//!
//! assert_eq!(doubled.await.unwrap(), 40);
//! assert_eq!(plus_one.await.unwrap(), 21);
//! # });
//! ```
//!
//! # Failures
//!
//! A failed future propagates to every handle derived from it. The failure is
//! only observed when something forces the chain; a failure on a chain that is
//! never forced goes unreported.

use std::fmt::{self, Debug, Display};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use pin_project_lite::pin_project;

use super::{Chain, ChainError, Member, Payload, join_display};

/// Values that can flow through a deferred chain.
///
/// A deferred result is shared between every clone of a handle, so it must be
/// cloneable and safe to hand across threads.
pub trait Shareable: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Shareable for T {}

type Settled<V> = Shared<BoxFuture<'static, Result<V, ChainError>>>;

pub(crate) const LOG_TARGET: &str = "chainwrap::log";

/// A chain handle whose value is the eventual result of a future.
///
/// # Examples
///
/// ```rust
/// use chainwrap::chain::Deferred;
///
/// # futures::executor::block_on(async {
/// let deferred = Deferred::from_future(async { vec!["red", "green"] })
///     .map_each(|name| format!("{name}-fn"))
///     .join("");
/// assert_eq!(deferred.await.unwrap(), "red-fngreen-fn");
/// # });
/// ```
pub struct Deferred<V> {
    future: Settled<V>,
}

impl<V: Shareable> Clone for Deferred<V> {
    fn clone(&self) -> Self {
        Self {
            future: self.future.clone(),
        }
    }
}

impl<V> Debug for Deferred<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Deferred").finish_non_exhaustive()
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<V: Shareable> Deferred<V> {
    fn settle<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<V, ChainError>> + Send + 'static,
    {
        Self {
            future: future.boxed().shared(),
        }
    }

    /// Creates a handle over an already-resolved future of `value`.
    pub fn ready(value: V) -> Self {
        Self::settle(futures::future::ready(Ok(value)))
    }

    /// Creates a handle over a future that has already failed.
    pub fn failed(error: impl Into<ChainError>) -> Self {
        Self::settle(futures::future::ready(Err(error.into())))
    }

    /// Creates a handle over an infallible future.
    ///
    /// The future is not polled until the chain is forced.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = V> + Send + 'static,
    {
        Self::settle(future.map(Ok))
    }

    /// Creates a handle over a fallible future. Its error becomes the failure
    /// cause of the chain.
    pub fn from_try_future<Fut, E>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        E: Into<ChainError> + 'static,
    {
        Self::settle(future.map_err(Into::into))
    }
}

// =============================================================================
// Transparent Chaining
// =============================================================================

impl<V: Shareable> Deferred<V> {
    /// Reads the member `name` of the eventual value.
    ///
    /// The read itself happens after the future settles; this call never
    /// suspends.
    pub fn get(self, name: &str) -> Deferred<V::Output>
    where
        V: Member,
        V::Output: Shareable,
    {
        let name = name.to_owned();
        self.map(move |value| value.member(&name))
    }

    /// Invokes the eventual function value with `target` and `arguments`.
    ///
    /// Both inputs are unwrapped first: a raw value, an [`super::Immediate`]
    /// or another `Deferred` are all accepted. The target, the arguments and
    /// the function itself are awaited concurrently; the call happens once
    /// all three have settled. If any of them fails, the result fails with
    /// the same cause.
    pub fn apply<T, A, R>(
        self,
        target: impl Into<Payload<T>>,
        arguments: impl Into<Payload<A>>,
    ) -> Deferred<R>
    where
        V: FnOnce(T, A) -> R,
        T: Shareable,
        A: Shareable,
        R: Shareable,
    {
        let function = self.future;
        let target = target.into().into_future();
        let arguments = arguments.into().into_future();
        Deferred::settle(async move {
            let (function, target, arguments) = futures::try_join!(function, target, arguments)?;
            Ok::<_, ChainError>(function(target, arguments))
        })
    }

    /// Invokes `method` with the eventual value as its receiver.
    ///
    /// `arguments` is unwrapped the same way [`Deferred::apply`] unwraps its
    /// inputs, and is awaited concurrently with the receiver.
    pub fn call<A, R, M>(self, method: M, arguments: impl Into<Payload<A>>) -> Deferred<R>
    where
        M: FnOnce(V, A) -> R + Send + 'static,
        A: Shareable,
        R: Shareable,
    {
        let receiver = self.future;
        let arguments = arguments.into().into_future();
        Deferred::settle(async move {
            let (receiver, arguments) = futures::try_join!(receiver, arguments)?;
            Ok::<_, ChainError>(method(receiver, arguments))
        })
    }

    /// Transforms every element of the eventual iterable value.
    pub fn map_each<U, F>(self, function: F) -> Deferred<Vec<U>>
    where
        V: IntoIterator,
        F: FnMut(V::Item) -> U + Send + 'static,
        U: Shareable,
    {
        self.map(move |value| value.into_iter().map(function).collect())
    }

    /// Concatenates the elements of the eventual iterable value, placing
    /// `separator` between them.
    pub fn join(self, separator: &str) -> Deferred<String>
    where
        V: IntoIterator,
        V::Item: Display,
    {
        let separator = separator.to_owned();
        self.map(move |value| join_display(value, &separator))
    }

    /// Collapses a handle whose eventual value is itself a handle of either
    /// mode.
    ///
    /// ```rust
    /// use chainwrap::chain::{Deferred, Immediate};
    ///
    /// # futures::executor::block_on(async {
    /// let nested = Deferred::ready(Deferred::from_future(async { 7 }));
    /// assert_eq!(nested.flatten().await.unwrap(), 7);
    ///
    /// let nested = Deferred::ready(Immediate::new("now"));
    /// assert_eq!(nested.flatten().await.unwrap(), "now");
    /// # });
    /// ```
    pub fn flatten(self) -> Deferred<V::Value>
    where
        V: Chain,
        V::Value: Shareable,
    {
        let future = self.future;
        Deferred::settle(async move { future.await?.into_payload().await })
    }
}

// =============================================================================
// Terminal Operations
// =============================================================================

impl<V: Shareable> Deferred<V> {
    /// Applies `function` to the eventual value.
    pub fn map<U, F>(self, function: F) -> Deferred<U>
    where
        U: Shareable,
        F: FnOnce(V) -> U + Send + 'static,
    {
        let future = self.future;
        Deferred::settle(async move { future.await.map(function) })
    }

    /// Applies a fallible `function` to the eventual value; its error becomes
    /// the failure cause of the chain.
    pub fn try_map<U, E, F>(self, function: F) -> Deferred<U>
    where
        U: Shareable,
        E: Into<ChainError> + 'static,
        F: FnOnce(V) -> Result<U, E> + Send + 'static,
    {
        let future = self.future;
        Deferred::settle(async move { function(future.await?).map_err(Into::<ChainError>::into) })
    }

    /// Continues the chain with a future produced from the eventual value.
    ///
    /// The produced future is flattened into the chain rather than becoming
    /// the value of it.
    pub fn and_then<U, Fut, F>(self, function: F) -> Deferred<U>
    where
        U: Shareable,
        F: FnOnce(V) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = U>,
        Fut::IntoFuture: Send + 'static,
    {
        let future = self.future;
        Deferred::settle(async move {
            let value = future.await?;
            Ok::<_, ChainError>(function(value).await)
        })
    }

    /// Like [`Deferred::and_then`] for a fallible continuation.
    pub fn try_and_then<U, E, Fut, F>(self, function: F) -> Deferred<U>
    where
        U: Shareable,
        E: Into<ChainError> + 'static,
        F: FnOnce(V) -> Fut + Send + 'static,
        Fut: IntoFuture<Output = Result<U, E>>,
        Fut::IntoFuture: Send + 'static,
    {
        let future = self.future;
        Deferred::settle(async move {
            let value = future.await?;
            function(value).await.map_err(Into::<ChainError>::into)
        })
    }

    /// Schedules `effect` to run on the eventual value and returns this
    /// handle unchanged.
    ///
    /// The effect runs once, after the chain settles, whether or not anyone
    /// keeps or forces the returned handle; readers of the handle never wait
    /// for it. If the chain fails the effect is skipped and the failure goes
    /// unreported here.
    ///
    /// Inside a tokio runtime the effect is a spawned task. Elsewhere the
    /// chain is driven to completion on a detached thread.
    pub fn side_effect<F>(self, effect: F) -> Self
    where
        F: FnOnce(&V) + Send + 'static,
    {
        let observed = self.clone().into_future();
        detach(async move {
            if let Ok(value) = observed.await {
                effect(&value);
            }
        });
        self
    }

    /// Schedules a `tracing` event carrying the eventual value and returns
    /// this handle unchanged.
    pub fn log(self) -> Self
    where
        V: Debug,
    {
        self.side_effect(|value| tracing::info!(target: LOG_TARGET, value = ?value, "chain value"))
    }

    /// Returns the handle itself; a deferred chain is already asynchronous.
    pub fn to_async(self) -> Self {
        self
    }

    /// Returns the future of the value. The caller is responsible for
    /// awaiting it.
    pub fn raw_value(self) -> RawFuture<V> {
        self.into_future()
    }

    /// Returns `true` if both handles observe the same settlement.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.future.ptr_eq(&other.future)
    }

    /// Returns the settled result without forcing the chain, if the chain has
    /// already settled.
    pub fn peek(&self) -> Option<Result<&V, &ChainError>> {
        self.future.peek().map(Result::as_ref)
    }

    /// Drives the chain to completion on the current tokio runtime.
    ///
    /// The returned handle settles with the chain's result; it may be dropped
    /// without stopping the work. A panic inside the chain settles the handle
    /// with [`ChainError::Panicked`].
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[cfg(feature = "async")]
    pub fn spawn(self) -> Self {
        let handle = tokio::spawn(self.into_future());
        Self::settle(async move {
            handle
                .await
                .map_err(|error| ChainError::Panicked(error.to_string()))?
        })
    }

    /// Returns the payload of this handle.
    pub fn into_payload(self) -> Payload<V> {
        Payload::Deferred(self)
    }
}

// Runs `task` to completion without anyone awaiting it.
fn detach<Fut>(task: Fut)
where
    Fut: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "async")]
    {
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            drop(runtime.spawn(task));
            return;
        }
    }
    std::thread::spawn(move || futures::executor::block_on(task));
}

// =============================================================================
// Forcing
// =============================================================================

pin_project! {
    /// The future of a [`Deferred`] value.
    ///
    /// Produced by [`Deferred::raw_value`] or by awaiting a handle directly.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct RawFuture<V> {
        #[pin]
        inner: Settled<V>,
    }
}

impl<V: Clone> Future for RawFuture<V> {
    type Output = Result<V, ChainError>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll(context)
    }
}

impl<V: Clone> IntoFuture for Deferred<V> {
    type Output = Result<V, ChainError>;
    type IntoFuture = RawFuture<V>;

    fn into_future(self) -> Self::IntoFuture {
        RawFuture { inner: self.future }
    }
}

static_assertions::assert_impl_all!(Deferred<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(RawFuture<String>: Send, Unpin);
