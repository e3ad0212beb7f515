//! Command line grammar registry and token scanner.
//!
//! A grammar is built by adding [`Argument`]s to a [`Registry`]. Each `add` is
//! checked immediately, so a registry always has the shape
//! `Option* Positional(required)* Positional(optional)* Positional(repeated)?`.
//! Parsing scans the token list once and returns either a [`ValueMap`] or every
//! problem it found ([`ParseErrors`]).
//!
//! ```
//! use argscan::{OptionArg, Positional, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .add(OptionArg::flag("-v").alias("--verbose").key("verbose"))?
//!     .add(OptionArg::value("-o", "OUT").key("outfile").default("a.out"))?
//!     .add(Positional::new("infile"))?;
//!
//! let values = registry.parse(&["-v", "-o:out.txt", "in.txt"]).unwrap();
//! assert_eq!(values.last("verbose"), Some("true"));
//! assert_eq!(values.last("outfile"), Some("out.txt"));
//! assert_eq!(values.last("infile"), Some("in.txt"));
//! # Ok::<(), argscan::GrammarError>(())
//! ```

mod argument;
mod conventions;
mod error;
mod materialize;
mod parser;
mod registry;
mod usage;
mod values;

pub use argument::{Argument, OptionArg, Positional, Separator};
pub use conventions::Conventions;
pub use error::{GrammarError, OrderingViolation, ParseError, ParseErrors};
pub use materialize::{Command, CommandError, MaterializeError, Values};
pub use registry::Registry;
pub use values::ValueMap;
