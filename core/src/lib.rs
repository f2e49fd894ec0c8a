//! Getopt-style command-line flag parsing.
//!
//! This crate provides a small flag-parsing engine in the classic Unix
//! mold: a caller registers flag descriptors in a [`FlagSet`], hands the
//! raw argument vector to the parser once, and is left with only the
//! program name and the positional arguments, compacted in place and in
//! their original order. The same registry drives a column-aligned,
//! word-wrapped usage listing.
//!
//! - [`FlagSet`] — the ordered registry with typed registration helpers
//!   (`switch`, `int`, `float`, `string`, `bits`) and name lookup.
//! - [`FlagSpec`] — one flag descriptor: names, argument policy, help
//!   text, value sink, auxiliary payload.
//! - [`ValueSink`] — the conversion extension point; built-in sinks cover
//!   the common flag kinds, custom sinks implement the trait.
//! - [`FlagSet::try_parse`] / [`FlagSet::parse`] — the parsing engine.
//! - [`FlagSet::write_usage`] / [`FlagSet::print_usage`] — the usage
//!   formatter.
//! - [`FlagSet::validate`] — opt-in detection of duplicate or unnamed
//!   flags.
//!
//! Supported token forms: `--long`, `--long=value`, `--long value`, `-s`,
//! clustered `-abc`, attached `-oVALUE`, and the end-of-flags marker `--`.
//! A lone `-` and integer-shaped tokens like `-42` always pass through as
//! positionals.
//!
//! # Example
//!
//! ```
//! use cliflag_core::FlagSet;
//!
//! let mut flags = FlagSet::new("prog");
//! flags.group("Options");
//! let verbose = flags.switch(Some('v'), Some("verbose"), "Enable verbose output");
//! let output = flags.string(Some('o'), Some("output"), "<PATH>", "Output file", "-");
//! let level = flags.int(None, Some("level"), "<N>", "Compression level", 6);
//!
//! let mut args: Vec<String> = ["prog", "-v", "--level=9", "in.txt", "--", "-not-a-flag"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! let count = flags.try_parse(&mut args).unwrap();
//! assert_eq!(count, 3);
//! assert_eq!(args, ["prog", "in.txt", "-not-a-flag"]);
//! assert!(verbose.get());
//! assert_eq!(*output.borrow(), "-");
//! assert_eq!(level.get(), 9);
//! ```

mod error;
mod parse;
mod types;
mod usage;
mod validate;
mod value;

pub use error::ParseError;
pub use types::{FlagKind, FlagSet, FlagSpec, SinkPayload};
pub use validate::RegistryError;
pub use value::{
    BitSink, FlagContext, FloatSink, IntSink, SinkError, StringSink, SwitchSink, ValueSink,
};
