//! The parsing engine: token classification and in-place compaction.
//!
//! One linear left-to-right pass over the argument vector. Each token is
//! classified as a positional argument, the end-of-flags marker `--`, a
//! long flag, or a short flag cluster. Positionals are compacted to the
//! front of the vector with a two-cursor rewrite (the write cursor never
//! outruns the read cursor), so on success the vector holds `args[0]` plus
//! the positionals in their original relative order and nothing else.
//!
//! Classification policy worth calling out:
//!
//! - Tokens shorter than two bytes are positional, including a lone `-`.
//! - A token that parses entirely as a signed decimal integer (`-42`) is
//!   positional even when a digit is also a registered short name.
//! - After a lone `--`, every remaining token is positional regardless of
//!   shape; the marker itself is dropped.
//! - `--=...` has flag shape but an empty name and is rejected outright.

use tracing::debug;

use crate::error::ParseError;
use crate::types::{FlagKind, FlagSet, FlagSpec};
use crate::value::FlagContext;

const NO_LIMIT: usize = usize::MAX;

/// Scan cursors for one parse call.
struct Cursors {
    /// Next token to classify.
    read: usize,
    /// Next free slot in the compacted positional prefix.
    write: usize,
    /// Byte offset of the next name inside a short-flag cluster.
    cluster: usize,
    end_of_flags: bool,
}

/// One matched flag occurrence, before its sink runs.
struct Matched<'a> {
    spec: &'a FlagSpec,
    /// The flag token as typed, `=value` stripped (`-o`, `--output`).
    name: String,
    argument: Option<String>,
}

impl FlagSet {
    /// Parses `args` in place against the registered flags.
    ///
    /// On success the vector is reduced to `args[0]` plus the positional
    /// arguments in their original relative order, and the new length is
    /// returned. On error the vector is compacted only up to the failing
    /// token; nothing is rolled back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSet;
    ///
    /// let mut flags = FlagSet::new("prog");
    /// let verbose = flags.switch(Some('v'), Some("verbose"), "verbose output");
    ///
    /// let mut args: Vec<String> = ["prog", "a", "-v", "b"]
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    /// let count = flags.try_parse(&mut args).unwrap();
    ///
    /// assert_eq!(count, 3);
    /// assert_eq!(args, ["prog", "a", "b"]);
    /// assert!(verbose.get());
    /// ```
    pub fn try_parse(&self, args: &mut Vec<String>) -> Result<usize, ParseError> {
        let mut cur = Cursors {
            read: 1,
            write: 1,
            cluster: 1,
            end_of_flags: false,
        };

        while cur.read < args.len() {
            let token = args[cur.read].clone();

            if cur.end_of_flags
                || token.len() < 2
                || is_decimal(&token)
                || !token.starts_with('-')
            {
                args.swap(cur.write, cur.read);
                cur.write += 1;
                cur.read += 1;
                continue;
            }
            if token == "--" {
                cur.end_of_flags = true;
                cur.read += 1;
                continue;
            }
            if token.starts_with("--=") {
                return Err(ParseError::InvalidFlagSyntax { token });
            }

            let matched = if token.starts_with("--") {
                self.match_long(&token, args, &mut cur)?
            } else {
                self.match_short(&token, args, &mut cur)?
            };
            debug!(flag = %matched.name, argument = ?matched.argument, "matched flag");

            if let Some(sink) = matched.spec.sink() {
                let ctx = FlagContext {
                    program: self.program(),
                    spec: matched.spec,
                    name: matched.name,
                    argument: matched.argument.as_deref(),
                };
                if let Err(err) = sink.accept(&ctx) {
                    return Err(ParseError::Callback {
                        name: ctx.name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        args.truncate(cur.write);
        debug!(count = cur.write, "argument vector compacted");
        Ok(cur.write)
    }

    /// C-compatible entry point: reports any error to standard error as
    /// `<program>: <message>` and folds the result into one signed integer —
    /// the new argument count on success, a negative code on failure
    /// (unknown flag −1, redundant argument −2, missing argument −3,
    /// invalid flag syntax −4, callback failure −5).
    pub fn parse(&self, args: &mut Vec<String>) -> i32 {
        match self.try_parse(args) {
            Ok(count) => i32::try_from(count).unwrap_or(i32::MAX),
            Err(err) => {
                eprintln!("{}: {err}", self.program());
                err.code()
            }
        }
    }

    fn match_long<'s>(
        &'s self,
        token: &str,
        args: &[String],
        cur: &mut Cursors,
    ) -> Result<Matched<'s>, ParseError> {
        let eq = token.find('=');
        let name_end = eq.unwrap_or(token.len());
        let name = &token[2..name_end];
        let limit = if eq.is_some() { name.len() } else { NO_LIMIT };

        let Some(spec) = self.lookup_long(name, limit) else {
            return Err(ParseError::UnknownFlag {
                token: token[..name_end].to_string(),
            });
        };
        let display = token[..name_end].to_string();

        let argument = if let Some(pos) = eq {
            if spec.kind == FlagKind::NoArgument {
                return Err(ParseError::RedundantArgument { token: display });
            }
            cur.read += 1;
            // `--name=` attaches the empty string; that is not "missing".
            Some(token[pos + 1..].to_string())
        } else if spec.kind == FlagKind::RequiresArgument {
            match args.get(cur.read + 1) {
                Some(value) => {
                    cur.read += 2;
                    Some(value.clone())
                }
                None => return Err(ParseError::MissingArgument { token: display }),
            }
        } else {
            cur.read += 1;
            None
        };

        Ok(Matched {
            spec,
            name: display,
            argument,
        })
    }

    fn match_short<'s>(
        &'s self,
        token: &str,
        args: &[String],
        cur: &mut Cursors,
    ) -> Result<Matched<'s>, ParseError> {
        let rest = &token[cur.cluster..];
        let Some(short) = rest.chars().next() else {
            // Cluster cursor always points inside the token; kept as an
            // error rather than a panic path.
            return Err(ParseError::InvalidFlagSyntax {
                token: token.to_string(),
            });
        };
        let display = format!("-{short}");

        let Some(spec) = self.lookup_short(short) else {
            return Err(ParseError::UnknownFlag { token: display });
        };
        let tail = &rest[short.len_utf8()..];

        let argument = if spec.kind == FlagKind::RequiresArgument {
            cur.cluster = 1;
            if tail.is_empty() {
                match args.get(cur.read + 1) {
                    Some(value) => {
                        cur.read += 2;
                        Some(value.clone())
                    }
                    None => return Err(ParseError::MissingArgument { token: display }),
                }
            } else {
                // The remainder of the cluster is the attached argument,
                // as in `-oVALUE`.
                cur.read += 1;
                Some(tail.to_string())
            }
        } else {
            if tail.is_empty() {
                cur.read += 1;
                cur.cluster = 1;
            } else {
                cur.cluster += short.len_utf8();
            }
            None
        };

        Ok(Matched {
            spec,
            name: display,
            argument,
        })
    }
}

/// Returns `true` when the token is an optional leading `-` followed by one
/// or more ASCII digits. Such tokens are always positional.
fn is_decimal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
