//! Flag descriptors and the flag registry.
//!
//! This module defines the core data model for registering command-line
//! flags. A [`FlagSpec`] describes one flag (names, argument policy, help
//! text, value sink); a [`FlagSet`] is the ordered registry the parsing
//! engine and usage formatter read from.
//!
//! Registration order is significant: it is both the display order in usage
//! output and the search order during parsing, where the first matching
//! descriptor wins.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::value::{BitSink, FloatSink, IntSink, StringSink, SwitchSink, ValueSink};

/// Argument policy for a flag.
///
/// # Examples
///
/// ```
/// use cliflag_core::FlagKind;
///
/// assert_ne!(FlagKind::NoArgument, FlagKind::RequiresArgument);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// The flag takes no argument (e.g., `-v`).
    NoArgument,
    /// The flag requires an argument, attached or as the next token.
    RequiresArgument,
    /// Not a flag at all: a section header in usage output.
    UsageGroup,
}

/// Auxiliary data attached to a descriptor, available to its sink.
///
/// Replaces an untyped per-flag payload with a small tagged variant. The
/// built-in bit-mask sink reads its OR mask from [`SinkPayload::Bits`];
/// custom sinks may use any variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SinkPayload {
    /// No auxiliary data (the default).
    #[default]
    None,
    /// A bit mask, used by [`BitSink`].
    Bits(u32),
    /// An integer constant.
    Int(i64),
    /// A floating-point constant.
    Float(f64),
    /// A string constant.
    Text(String),
}

/// Descriptor for a single command-line flag.
///
/// Immutable once registered. Every non-group descriptor carries at least
/// one of a short or long name and a boxed [`ValueSink`] invoked when the
/// flag matches; a [`FlagKind::UsageGroup`] entry carries neither and only
/// contributes a section title to usage output.
///
/// Use [`FlagSpec::new`] or [`FlagSpec::group`] followed by the builder
/// methods:
///
/// ```
/// use cliflag_core::{FlagKind, FlagSpec, SwitchSink};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let slot = Rc::new(Cell::new(false));
/// let spec = FlagSpec::new(
///     FlagKind::NoArgument,
///     Some('v'),
///     Some("verbose"),
///     Box::new(SwitchSink::new(Rc::clone(&slot))),
/// )
/// .with_description("Enable verbose output");
///
/// assert_eq!(spec.short, Some('v'));
/// assert_eq!(spec.long.as_deref(), Some("verbose"));
/// ```
pub struct FlagSpec {
    /// Argument policy.
    pub kind: FlagKind,
    /// Single-character name, matched in `-x` and clusters.
    pub short: Option<char>,
    /// Long name, matched in `--name` and `--name=value` (without dashes).
    pub long: Option<String>,
    /// Display hint for the argument in usage output (e.g., `<PATH>`).
    pub arg_hint: Option<String>,
    /// Help text; for groups, the section title.
    pub description: Option<String>,
    /// Auxiliary data forwarded to the sink.
    pub payload: SinkPayload,
    sink: Option<Box<dyn ValueSink>>,
}

impl FlagSpec {
    /// Creates a descriptor with the given argument policy, names, and sink.
    ///
    /// At least one of `short`/`long` should be set; [`FlagSet::validate`]
    /// reports descriptors that have neither.
    pub fn new(
        kind: FlagKind,
        short: Option<char>,
        long: Option<&str>,
        sink: Box<dyn ValueSink>,
    ) -> Self {
        Self {
            kind,
            short,
            long: long.map(String::from),
            arg_hint: None,
            description: None,
            payload: SinkPayload::None,
            sink: Some(sink),
        }
    }

    /// Creates a usage-group entry: a nameless descriptor whose description
    /// is printed as a section title.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSpec;
    ///
    /// let group = FlagSpec::group("Output options");
    /// assert!(group.is_group());
    /// assert_eq!(group.description.as_deref(), Some("Output options"));
    /// ```
    pub fn group(title: &str) -> Self {
        Self {
            kind: FlagKind::UsageGroup,
            short: None,
            long: None,
            arg_hint: None,
            description: Some(title.to_string()),
            payload: SinkPayload::None,
            sink: None,
        }
    }

    /// Sets the argument display hint.
    pub fn with_hint(mut self, hint: &str) -> Self {
        self.arg_hint = Some(hint.to_string());
        self
    }

    /// Sets the help text.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Attaches auxiliary data for the sink.
    pub fn with_payload(mut self, payload: SinkPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns `true` for usage-group entries.
    pub fn is_group(&self) -> bool {
        self.kind == FlagKind::UsageGroup
    }

    pub(crate) fn sink(&self) -> Option<&dyn ValueSink> {
        self.sink.as_deref()
    }
}

impl fmt::Debug for FlagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSpec")
            .field("kind", &self.kind)
            .field("short", &self.short)
            .field("long", &self.long)
            .field("arg_hint", &self.arg_hint)
            .field("description", &self.description)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Ordered registry of flag descriptors for one program invocation.
///
/// Populated before parsing, then read-only: the parsing engine and usage
/// formatter only ever look descriptors up. The typed registration helpers
/// return shared handles to caller-owned value slots; the registry never
/// owns a parsed value, and slots keep their defaults when a flag is never
/// seen on the command line.
///
/// # Examples
///
/// ```
/// use cliflag_core::FlagSet;
///
/// let mut flags = FlagSet::new("prog");
/// let verbose = flags.switch(Some('v'), Some("verbose"), "Enable verbose output");
/// let output = flags.string(Some('o'), Some("output"), "<PATH>", "Output file", "");
///
/// let mut args: Vec<String> = ["prog", "-vo", "out.txt", "file1"]
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// let count = flags.try_parse(&mut args).unwrap();
///
/// assert!(verbose.get());
/// assert_eq!(*output.borrow(), "out.txt");
/// assert_eq!(args, ["prog", "file1"]);
/// assert_eq!(count, 2);
/// ```
#[derive(Debug)]
pub struct FlagSet {
    program: String,
    flags: Vec<FlagSpec>,
}

impl FlagSet {
    /// Creates an empty registry for the given program name.
    ///
    /// The program name prefixes every reported error message.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            flags: Vec::new(),
        }
    }

    /// Returns the program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the registered descriptors in registration order.
    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Registers a fully custom descriptor.
    pub fn register(&mut self, spec: FlagSpec) {
        self.flags.push(spec);
    }

    /// Registers a usage-group section header.
    pub fn group(&mut self, title: &str) {
        self.register(FlagSpec::group(title));
    }

    /// Registers a boolean switch; the returned slot becomes `true` when the
    /// flag is seen.
    pub fn switch(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        description: &str,
    ) -> Rc<Cell<bool>> {
        let slot = Rc::new(Cell::new(false));
        self.register(
            FlagSpec::new(
                FlagKind::NoArgument,
                short,
                long,
                Box::new(SwitchSink::new(Rc::clone(&slot))),
            )
            .with_description(description),
        );
        slot
    }

    /// Registers a bit flag that ORs `mask` into the shared `slot` each time
    /// it is seen. Several bit flags usually share one slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSet;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let perms = Rc::new(Cell::new(0u32));
    /// let mut flags = FlagSet::new("prog");
    /// flags.bits(None, Some("read"), "read permission", &perms, 1 << 0);
    /// flags.bits(None, Some("write"), "write permission", &perms, 1 << 1);
    ///
    /// let mut args: Vec<String> = ["prog", "--read", "--write"]
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    /// flags.try_parse(&mut args).unwrap();
    /// assert_eq!(perms.get(), 0b11);
    /// ```
    pub fn bits(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        description: &str,
        slot: &Rc<Cell<u32>>,
        mask: u32,
    ) {
        self.register(
            FlagSpec::new(
                FlagKind::NoArgument,
                short,
                long,
                Box::new(BitSink::new(Rc::clone(slot))),
            )
            .with_description(description)
            .with_payload(SinkPayload::Bits(mask)),
        );
    }

    /// Registers an integer-valued flag with the given default.
    pub fn int(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        hint: &str,
        description: &str,
        default: i64,
    ) -> Rc<Cell<i64>> {
        let slot = Rc::new(Cell::new(default));
        self.register(
            FlagSpec::new(
                FlagKind::RequiresArgument,
                short,
                long,
                Box::new(IntSink::new(Rc::clone(&slot))),
            )
            .with_hint(hint)
            .with_description(description),
        );
        slot
    }

    /// Registers a floating-point-valued flag with the given default.
    pub fn float(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        hint: &str,
        description: &str,
        default: f64,
    ) -> Rc<Cell<f64>> {
        let slot = Rc::new(Cell::new(default));
        self.register(
            FlagSpec::new(
                FlagKind::RequiresArgument,
                short,
                long,
                Box::new(FloatSink::new(Rc::clone(&slot))),
            )
            .with_hint(hint)
            .with_description(description),
        );
        slot
    }

    /// Registers a string-valued flag with the given default.
    pub fn string(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        hint: &str,
        description: &str,
        default: &str,
    ) -> Rc<RefCell<String>> {
        let slot = Rc::new(RefCell::new(default.to_string()));
        self.register(
            FlagSpec::new(
                FlagKind::RequiresArgument,
                short,
                long,
                Box::new(StringSink::new(Rc::clone(&slot))),
            )
            .with_hint(hint)
            .with_description(description),
        );
        slot
    }

    /// Returns the first registered descriptor with the given short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSet;
    ///
    /// let mut flags = FlagSet::new("prog");
    /// flags.switch(Some('v'), Some("verbose"), "Enable verbose output");
    ///
    /// assert!(flags.lookup_short('v').is_some());
    /// assert!(flags.lookup_short('x').is_none());
    /// ```
    pub fn lookup_short(&self, short: char) -> Option<&FlagSpec> {
        self.flags.iter().find(|spec| spec.short == Some(short))
    }

    /// Returns the first registered descriptor whose long name matches
    /// `name` within the first `limit` bytes.
    ///
    /// With `limit == usize::MAX` this is an exact match. A finite limit
    /// bounds the comparison at the `=` of a `--name=value` token, so a
    /// registered long name is also matched by any of its prefixes given
    /// with that form.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSet;
    ///
    /// let mut flags = FlagSet::new("prog");
    /// flags.string(None, Some("output"), "<PATH>", "Output file", "");
    ///
    /// assert!(flags.lookup_long("output", usize::MAX).is_some());
    /// assert!(flags.lookup_long("out", usize::MAX).is_none());
    /// assert!(flags.lookup_long("out", 3).is_some());
    /// ```
    pub fn lookup_long(&self, name: &str, limit: usize) -> Option<&FlagSpec> {
        self.flags.iter().find(|spec| {
            spec.long
                .as_deref()
                .is_some_and(|long| bounded_eq(long, name, limit))
        })
    }
}

/// Byte-wise bounded comparison: equal when the strings agree on the first
/// `limit` bytes, where one string ending early counts as disagreement
/// unless both end together.
fn bounded_eq(a: &str, b: &str, limit: usize) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    for i in 0..limit {
        match (a.get(i), b.get(i)) {
            (None, None) => return true,
            (ca, cb) if ca != cb => return false,
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_optional_fields() {
        let mut flags = FlagSet::new("prog");
        let _slot = flags.string(Some('o'), Some("output"), "<PATH>", "Output file", "x");

        let spec = flags.lookup_short('o').unwrap();
        assert_eq!(spec.kind, FlagKind::RequiresArgument);
        assert_eq!(spec.arg_hint.as_deref(), Some("<PATH>"));
        assert_eq!(spec.description.as_deref(), Some("Output file"));
        assert_eq!(spec.payload, SinkPayload::None);
    }

    #[test]
    fn test_group_has_no_names() {
        let group = FlagSpec::group("Section");
        assert!(group.is_group());
        assert_eq!(group.short, None);
        assert_eq!(group.long, None);
        assert!(group.sink().is_none());
    }

    #[test]
    fn test_lookup_returns_first_registered_on_duplicates() {
        let mut flags = FlagSet::new("prog");
        let first = flags.switch(Some('v'), Some("verbose"), "first");
        let second = flags.switch(Some('v'), Some("verbose"), "second");

        let mut args: Vec<String> = ["prog", "-v", "--verbose"]
            .iter()
            .map(ToString::to_string)
            .collect();
        flags.try_parse(&mut args).unwrap();

        assert!(first.get());
        assert!(!second.get());
    }

    #[test]
    fn test_bounded_long_lookup_matches_prefix() {
        let mut flags = FlagSet::new("prog");
        flags.string(None, Some("name"), "<STRING>", "a name", "");

        // Exact lookups only match the full name.
        assert!(flags.lookup_long("name", usize::MAX).is_some());
        assert!(flags.lookup_long("nam", usize::MAX).is_none());
        assert!(flags.lookup_long("names", usize::MAX).is_none());

        // Bounded lookups stop at the limit, as for `--nam=value`.
        assert!(flags.lookup_long("nam", 3).is_some());
        // A registered name shorter than the limit does not match.
        assert!(flags.lookup_long("names", 5).is_none());
    }

    #[test]
    fn test_bounded_eq_edges() {
        assert!(bounded_eq("verbose", "verbose", usize::MAX));
        assert!(bounded_eq("verbose", "verb", 4));
        assert!(!bounded_eq("verb", "verbose", usize::MAX));
        assert!(!bounded_eq("", "x", 1));
        assert!(bounded_eq("", "", usize::MAX));
    }
}
