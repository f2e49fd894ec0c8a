//! Usage rendering: column alignment and word-wrapped descriptions.
//!
//! The formatter reads only the registry. Flag-name columns are padded to a
//! shared description column — the widest name column that still fits in
//! the first third of the line — and description text is word-wrapped so
//! that words are never split across lines. An entry whose name column
//! overflows the description column starts its description on a fresh
//! indented line instead of overlapping.

use std::io::{self, Write};

use crate::types::{FlagKind, FlagSet, FlagSpec};

const INDENT: usize = 2;
const MAX_LINE_WIDTH: usize = 79;
const MAX_DESCR_OFFSET: usize = MAX_LINE_WIDTH / 3;

impl FlagSet {
    /// Computes the shared description column for this registry.
    ///
    /// The column is the widest flag-name column (indent, `-x`, `, `,
    /// `--long`, ` <HINT>`, trailing indent) over all non-group entries
    /// that does not exceed a third of the line width; when every entry
    /// exceeds it, the bound itself is used.
    pub fn description_column(&self) -> usize {
        let mut column = 0;
        for spec in self.flags() {
            if spec.is_group() {
                continue;
            }
            let width = name_column_width(spec);
            if width <= MAX_DESCR_OFFSET && width > column {
                column = width;
            }
        }
        if column == 0 { MAX_DESCR_OFFSET } else { column }
    }

    /// Renders the usage listing to standard output.
    ///
    /// I/O errors on standard output are ignored, matching the fire-and-
    /// forget nature of help text.
    pub fn print_usage(&self, header: Option<&str>, footer: Option<&str>) {
        let stdout = io::stdout();
        let _ = self.write_usage(&mut stdout.lock(), header, footer);
    }

    /// Renders the usage listing into `out`.
    ///
    /// Prints the optional header line first, then one entry per
    /// descriptor in registration order — group entries become section
    /// titles on their own line — and the optional footer line last.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliflag_core::FlagSet;
    ///
    /// let mut flags = FlagSet::new("prog");
    /// flags.group("Options");
    /// flags.switch(Some('h'), Some("help"), "print this message");
    ///
    /// let mut out = Vec::new();
    /// flags.write_usage(&mut out, Some("Usage: prog [OPTIONS]"), None).unwrap();
    /// let text = String::from_utf8(out).unwrap();
    ///
    /// assert!(text.starts_with("Usage: prog [OPTIONS]\n"));
    /// assert!(text.contains("\nOptions\n"));
    /// assert!(text.contains("-h, --help"));
    /// ```
    pub fn write_usage<W: Write>(
        &self,
        out: &mut W,
        header: Option<&str>,
        footer: Option<&str>,
    ) -> io::Result<()> {
        let column = self.description_column();

        if let Some(text) = header {
            writeln!(out, "{text}")?;
        }
        for spec in self.flags() {
            if spec.is_group() {
                writeln!(out, "\n{}", spec.description.as_deref().unwrap_or_default())?;
                continue;
            }

            let mut pos = 0;
            write!(out, "{:INDENT$}", "")?;
            pos += INDENT;
            if let Some(short) = spec.short {
                write!(out, "-{short}")?;
                pos += 2;
            }
            if spec.short.is_some() && spec.long.is_some() {
                write!(out, ", ")?;
                pos += 2;
            }
            if let Some(long) = &spec.long {
                write!(out, "--{long}")?;
                pos += 2 + long.chars().count();
            }
            if let Some(hint) = &spec.arg_hint {
                write!(out, " {hint}")?;
                pos += 1 + hint.chars().count();
            }

            if let Some(text) = &spec.description {
                if pos <= column {
                    write!(out, "{:width$}", "", width = column - pos)?;
                } else {
                    write!(out, "\n{:column$}", "")?;
                }
                write_wrapped(out, text, column)?;
            }
            writeln!(out)?;
        }
        if let Some(text) = footer {
            writeln!(out, "\n{text}")?;
        }
        Ok(())
    }
}

/// Printed width of a descriptor's flag-name column, trailing indent
/// included.
fn name_column_width(spec: &FlagSpec) -> usize {
    let mut width = INDENT;
    if spec.short.is_some() {
        width += 2;
    }
    if spec.short.is_some() && spec.long.is_some() {
        width += 2;
    }
    if let Some(long) = &spec.long {
        width += 2 + long.chars().count();
    }
    if let Some(hint) = &spec.arg_hint {
        width += 1 + hint.chars().count();
    }
    width + INDENT
}

/// Word-wraps `text` starting at column `text_offset`.
///
/// Words (runs of non-whitespace) are flushed whole: inline while they fit
/// before [`MAX_LINE_WIDTH`], otherwise after a line break plus re-indent
/// to `text_offset`. A literal newline in the text forces a break plus
/// re-indent regardless of fit.
fn write_wrapped<W: Write>(out: &mut W, text: &str, text_offset: usize) -> io::Result<()> {
    let mut pos = text_offset;
    let mut word = String::new();

    for ch in text.chars() {
        if !ch.is_whitespace() {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            pos = flush_word(out, &word, pos, text_offset)?;
            word.clear();
        }
        if ch == '\n' {
            write!(out, "\n{:text_offset$}", "")?;
            pos = text_offset;
        } else {
            write!(out, "{ch}")?;
            pos += 1;
        }
    }
    if !word.is_empty() {
        flush_word(out, &word, pos, text_offset)?;
    }
    Ok(())
}

fn flush_word<W: Write>(
    out: &mut W,
    word: &str,
    pos: usize,
    text_offset: usize,
) -> io::Result<usize> {
    let len = word.chars().count();
    if pos + len > MAX_LINE_WIDTH {
        write!(out, "\n{:text_offset$}{word}", "")?;
        Ok(text_offset + len)
    } else {
        write!(out, "{word}")?;
        Ok(pos + len)
    }
}
