//! Value sinks: typed conversion of raw flag arguments into caller-owned
//! slots.
//!
//! Every non-group [`FlagSpec`](crate::FlagSpec) holds a boxed [`ValueSink`]
//! that the parsing engine invokes once per matched occurrence. Built-in
//! sinks cover the common flag kinds (integer, float, string, boolean
//! switch, bit mask); custom sinks implement the trait directly and may use
//! [`FlagContext::report`] for diagnostics of their own.
//!
//! Sinks write through shared `Rc` handles into slots the caller keeps for
//! the whole parse; a slot keeps its default value when its flag never
//! appears on the command line.

use std::cell::{Cell, RefCell};
use std::num::IntErrorKind;
use std::rc::Rc;

use thiserror::Error;

use crate::types::{FlagSpec, SinkPayload};

/// Conversion failure inside a value sink.
///
/// The parsing engine folds any sink error into the generic
/// [`ParseError::Callback`](crate::ParseError::Callback); the specific
/// reason survives only in the reported message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The argument is not a decimal integer.
    #[error("expected decimal integer value")]
    InvalidInteger,
    /// The argument is a decimal integer outside the representable range.
    #[error("argument too large")]
    IntegerOutOfRange,
    /// The argument is not a floating-point literal.
    #[error("invalid floating point value")]
    InvalidFloat,
    /// The argument parsed to a non-finite floating-point value.
    #[error("floating point value out of range")]
    FloatOutOfRange,
    /// Custom sink failure with its own reason text.
    #[error("{0}")]
    Custom(String),
}

/// Context handed to a sink for one matched flag occurrence.
///
/// Carries the matched descriptor, the flag token exactly as it appeared on
/// the command line (`-o`, `--output`), and the extracted argument, which is
/// `Some` — possibly the empty string, as in `--name=` — whenever the
/// descriptor requires an argument.
pub struct FlagContext<'a> {
    /// Program name, used as the message prefix by [`report`](Self::report).
    pub program: &'a str,
    /// The matched descriptor.
    pub spec: &'a FlagSpec,
    /// The flag token as typed, without any attached `=value`.
    pub name: String,
    /// The extracted argument, if the flag takes one.
    pub argument: Option<&'a str>,
}

impl FlagContext<'_> {
    /// Writes `<program>: option <name>: <reason>` to standard error.
    ///
    /// Custom sinks can use this for diagnostics beyond the message carried
    /// by their returned [`SinkError`].
    pub fn report(&self, reason: &str) {
        eprintln!("{}: option {}: {reason}", self.program, self.name);
    }
}

/// Converts the raw argument of one flag occurrence into a typed value.
pub trait ValueSink {
    /// Consumes one matched occurrence.
    ///
    /// Well-behaved sinks write to their slot only after successful
    /// conversion, so defaults survive a failed parse.
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError>;
}

/// Sink for decimal integer arguments.
#[derive(Debug, Clone)]
pub struct IntSink {
    slot: Rc<Cell<i64>>,
}

impl IntSink {
    /// Creates a sink writing into `slot`.
    pub fn new(slot: Rc<Cell<i64>>) -> Self {
        Self { slot }
    }
}

impl ValueSink for IntSink {
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        let raw = ctx.argument.unwrap_or_default();
        match raw.parse::<i64>() {
            Ok(value) => {
                self.slot.set(value);
                Ok(())
            }
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(SinkError::IntegerOutOfRange)
                }
                _ => Err(SinkError::InvalidInteger),
            },
        }
    }
}

/// Sink for floating-point arguments.
///
/// Arguments that parse to a non-finite value (overflow, explicit `inf` or
/// `nan`) are rejected as out of range.
#[derive(Debug, Clone)]
pub struct FloatSink {
    slot: Rc<Cell<f64>>,
}

impl FloatSink {
    /// Creates a sink writing into `slot`.
    pub fn new(slot: Rc<Cell<f64>>) -> Self {
        Self { slot }
    }
}

impl ValueSink for FloatSink {
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        let raw = ctx.argument.unwrap_or_default();
        let value: f64 = raw.parse().map_err(|_| SinkError::InvalidFloat)?;
        if !value.is_finite() {
            return Err(SinkError::FloatOutOfRange);
        }
        self.slot.set(value);
        Ok(())
    }
}

/// Sink storing the raw argument string.
#[derive(Debug, Clone)]
pub struct StringSink {
    slot: Rc<RefCell<String>>,
}

impl StringSink {
    /// Creates a sink writing into `slot`.
    pub fn new(slot: Rc<RefCell<String>>) -> Self {
        Self { slot }
    }
}

impl ValueSink for StringSink {
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        *self.slot.borrow_mut() = ctx.argument.unwrap_or_default().to_string();
        Ok(())
    }
}

/// Sink for argument-less boolean switches; sets its slot to `true`.
#[derive(Debug, Clone)]
pub struct SwitchSink {
    slot: Rc<Cell<bool>>,
}

impl SwitchSink {
    /// Creates a sink writing into `slot`.
    pub fn new(slot: Rc<Cell<bool>>) -> Self {
        Self { slot }
    }
}

impl ValueSink for SwitchSink {
    fn accept(&self, _ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        self.slot.set(true);
        Ok(())
    }
}

/// Sink for bit-mask flags; ORs the descriptor's [`SinkPayload::Bits`] mask
/// into a slot usually shared between several flags.
#[derive(Debug, Clone)]
pub struct BitSink {
    slot: Rc<Cell<u32>>,
}

impl BitSink {
    /// Creates a sink writing into `slot`.
    pub fn new(slot: Rc<Cell<u32>>) -> Self {
        Self { slot }
    }
}

impl ValueSink for BitSink {
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        let SinkPayload::Bits(mask) = ctx.spec.payload else {
            return Err(SinkError::Custom(
                "bit flag registered without a bit-mask payload".to_string(),
            ));
        };
        self.slot.set(self.slot.get() | mask);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlagKind, FlagSpec};

    fn context<'a>(spec: &'a FlagSpec, argument: Option<&'a str>) -> FlagContext<'a> {
        FlagContext {
            program: "prog",
            spec,
            name: "--flag".to_string(),
            argument,
        }
    }

    fn int_spec(sink: IntSink) -> FlagSpec {
        FlagSpec::new(
            FlagKind::RequiresArgument,
            None,
            Some("flag"),
            Box::new(sink),
        )
    }

    #[test]
    fn test_int_sink_stores_value() {
        let slot = Rc::new(Cell::new(0));
        let sink = IntSink::new(Rc::clone(&slot));
        let spec = int_spec(sink.clone());

        sink.accept(&context(&spec, Some("-42"))).unwrap();
        assert_eq!(slot.get(), -42);
    }

    #[test]
    fn test_int_sink_rejects_garbage_and_keeps_default() {
        let slot = Rc::new(Cell::new(7));
        let sink = IntSink::new(Rc::clone(&slot));
        let spec = int_spec(sink.clone());

        let err = sink.accept(&context(&spec, Some("12x"))).unwrap_err();
        assert_eq!(err, SinkError::InvalidInteger);
        assert_eq!(slot.get(), 7);
    }

    #[test]
    fn test_int_sink_distinguishes_overflow() {
        let slot = Rc::new(Cell::new(0));
        let sink = IntSink::new(Rc::clone(&slot));
        let spec = int_spec(sink.clone());

        let err = sink
            .accept(&context(&spec, Some("99999999999999999999")))
            .unwrap_err();
        assert_eq!(err, SinkError::IntegerOutOfRange);
    }

    #[test]
    fn test_float_sink_rejects_non_finite() {
        let slot = Rc::new(Cell::new(1.5));
        let sink = FloatSink::new(Rc::clone(&slot));
        let spec = FlagSpec::new(
            FlagKind::RequiresArgument,
            None,
            Some("flag"),
            Box::new(sink.clone()),
        );

        sink.accept(&context(&spec, Some("2.25"))).unwrap();
        assert_eq!(slot.get(), 2.25);

        let err = sink.accept(&context(&spec, Some("1e999"))).unwrap_err();
        assert_eq!(err, SinkError::FloatOutOfRange);
        let err = sink.accept(&context(&spec, Some("abc"))).unwrap_err();
        assert_eq!(err, SinkError::InvalidFloat);
        assert_eq!(slot.get(), 2.25);
    }

    #[test]
    fn test_string_sink_accepts_empty_argument() {
        let slot = Rc::new(RefCell::new("default".to_string()));
        let sink = StringSink::new(Rc::clone(&slot));
        let spec = FlagSpec::new(
            FlagKind::RequiresArgument,
            None,
            Some("flag"),
            Box::new(sink.clone()),
        );

        sink.accept(&context(&spec, Some(""))).unwrap();
        assert_eq!(*slot.borrow(), "");
    }

    #[test]
    fn test_bit_sink_ors_payload_mask() {
        let slot = Rc::new(Cell::new(0b001u32));
        let sink = BitSink::new(Rc::clone(&slot));
        let spec = FlagSpec::new(FlagKind::NoArgument, None, Some("write"), Box::new(sink.clone()))
            .with_payload(SinkPayload::Bits(0b010));

        sink.accept(&context(&spec, None)).unwrap();
        assert_eq!(slot.get(), 0b011);
    }

    #[test]
    fn test_bit_sink_requires_bits_payload() {
        let slot = Rc::new(Cell::new(0u32));
        let sink = BitSink::new(Rc::clone(&slot));
        let spec = FlagSpec::new(FlagKind::NoArgument, None, Some("write"), Box::new(sink.clone()));

        let err = sink.accept(&context(&spec, None)).unwrap_err();
        assert!(matches!(err, SinkError::Custom(_)));
    }
}
