//! # chainwrap
//!
//! Fluent chaining over a value without caring whether it is already
//! available or is the eventual result of a future.
//!
//! ## Overview
//!
//! - **Chain handles**: [`chain::Immediate`] for values known now,
//!   [`chain::Deferred`] for futures of one value, sharing the
//!   [`chain::Chain`] / [`chain::Terminal`] interface
//! - **Member access**: read members by name through [`chain::Member`]
//! - **Chalk**: the terminal colour table and the generator that renders it
//!   into C++ source through a chain
//!
//! ## Feature Flags
//!
//! - `async`: tokio integration (`Deferred::spawn`, async generation)
//! - `json`: member access on `serde_json::Value`
//! - `chalk`: colour table and source generator
//! - `cli`: the `chalkgen` binary
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use chainwrap::prelude::*;
//!
//! let text = chain(vec!["red", "green"])
//!     .map_each(|name| format!("{name}-fn"))
//!     .join("")
//!     .raw_value();
//! assert_eq!(text, "red-fngreen-fn");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use chainwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain::*;

    #[cfg(feature = "chalk")]
    pub use crate::chalk::{Color, Generator, SourceKind};
}

pub mod chain;

#[cfg(feature = "chalk")]
pub mod chalk;
