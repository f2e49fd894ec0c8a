//! `flag-filter`: demonstration binary for the cliflag library.
//!
//! Echoes its positional arguments, skipping any that were named with
//! `--exclude`, and reports the permission mask accumulated from the bit
//! flags. Exercises custom sinks, usage groups, bit flags, and usage
//! rendering end to end.

use std::cell::{Cell, RefCell};
use std::process::ExitCode;
use std::rc::Rc;

use cliflag_core::{FlagContext, FlagKind, FlagSet, FlagSpec, SinkError, ValueSink};

const READ: u32 = 1 << 0;
const WRITE: u32 = 1 << 1;
const EXEC: u32 = 1 << 2;

/// Collects every `--exclude` argument into a shared list.
struct ExcludeSink {
    excluded: Rc<RefCell<Vec<String>>>,
}

impl ValueSink for ExcludeSink {
    fn accept(&self, ctx: &FlagContext<'_>) -> Result<(), SinkError> {
        self.excluded
            .borrow_mut()
            .push(ctx.argument.unwrap_or_default().to_string());
        Ok(())
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "flag-filter".to_string());

    let excluded = Rc::new(RefCell::new(Vec::new()));
    let perms = Rc::new(Cell::new(0u32));

    let mut flags = FlagSet::new(&program);
    flags.group("Basic options");
    flags.register(
        FlagSpec::new(
            FlagKind::RequiresArgument,
            None,
            Some("exclude"),
            Box::new(ExcludeSink {
                excluded: Rc::clone(&excluded),
            }),
        )
        .with_hint("<STRING>")
        .with_description("string to exclude, may be given multiple times"),
    );
    let help = flags.switch(Some('h'), Some("help"), "print this message");
    flags.group("Bit flags");
    flags.bits(None, Some("read"), "read permission", &perms, READ);
    flags.bits(None, Some("write"), "write permission", &perms, WRITE);
    flags.bits(None, Some("exec"), "exec permission", &perms, EXEC);

    let count = flags.parse(&mut args);
    if count < 0 {
        return ExitCode::from(u8::try_from(-count).unwrap_or(1));
    }
    if help.get() {
        flags.print_usage(
            Some("Usage: flag-filter [OPTIONS] [ARGS...]"),
            Some("End of usage"),
        );
        return ExitCode::SUCCESS;
    }

    for arg in args.iter().skip(1) {
        if !excluded.borrow().iter().any(|skip| skip == arg) {
            println!("{arg}");
        }
    }
    if perms.get() != 0 {
        println!("perms: {}", perms.get());
    }
    ExitCode::SUCCESS
}
