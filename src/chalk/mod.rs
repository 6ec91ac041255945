//! Terminal colours and the generator for their C++ bindings.
//!
//! [`Color`] is the fixed, ordered table of styles with their SGR codes and
//! the wrapping algorithm the generated C++ functions call. [`Generator`]
//! renders that table into a declaration or definition file by pushing the
//! colour list through a chain:
//!
//! ```rust
//! use chainwrap::chalk::{Color, SourceKind, render};
//! use chainwrap::chain::chain;
//!
//! let source = render(chain(vec![Color::Red, Color::Green]), SourceKind::Declarations)
//!     .raw_value();
//! assert_eq!(source.lines().count(), 2);
//! ```

mod codegen;
mod color;
mod error;

pub use codegen::{Generator, SourceKind, render};
pub use color::Color;
pub use error::ChalkError;
