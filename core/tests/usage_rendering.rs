//! Usage listing rendered through the public API.

use cliflag_core::FlagSet;

fn render(flags: &FlagSet, header: Option<&str>, footer: Option<&str>) -> String {
    let mut out = Vec::new();
    flags.write_usage(&mut out, header, footer).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn full_listing_layout() {
    let mut flags = FlagSet::new("prog");
    flags.group("Basic options");
    flags.string(
        None,
        Some("exclude"),
        "<STRING>",
        "string to exclude, may be given multiple times",
        "",
    );
    flags.switch(Some('h'), Some("help"), "print this message");
    flags.group("Bit flags");
    let perms = std::rc::Rc::new(std::cell::Cell::new(0u32));
    flags.bits(None, Some("read"), "read permission", &perms, 1);
    flags.bits(None, Some("write"), "write permission", &perms, 2);

    let text = render(&flags, Some("Start of usage"), Some("End of usage"));

    // Widest fitting name column: "  --exclude <STRING>  " = 22.
    assert_eq!(flags.description_column(), 22);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Start of usage");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Basic options");
    assert!(lines[3].starts_with("  --exclude <STRING>  string to exclude"));
    assert_eq!(
        lines[4],
        format!("{:<22}print this message", "  -h, --help")
    );
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "Bit flags");
    assert_eq!(lines[7], format!("{:<22}read permission", "  --read"));
    assert_eq!(lines[8], format!("{:<22}write permission", "  --write"));
    assert_eq!(lines[9], "");
    assert_eq!(lines[10], "End of usage");
}

#[test]
fn wide_name_column_pushes_description_to_next_line() {
    let mut flags = FlagSet::new("prog");
    flags.switch(Some('q'), None, "quiet");
    flags.string(
        Some('c'),
        Some("configuration-directory"),
        "<DIR>",
        "where configuration lives",
        "",
    );

    let column = flags.description_column();
    let text = render(&flags, None, None);
    let indent = " ".repeat(column);

    // The oversized entry must not overlap the description column.
    assert!(
        text.contains(&format!(
            "  -c, --configuration-directory <DIR>\n{indent}where configuration lives\n"
        )),
        "unexpected layout: {text:?}"
    );
}

#[test]
fn descriptions_wrap_inside_the_line_width() {
    let mut flags = FlagSet::new("prog");
    flags.switch(
        Some('l'),
        Some("long-story"),
        "this description goes on and on and on, far past the width of a single \
         terminal line, to make sure that wrapping kicks in and re-indents \
         continuation lines at the description column",
    );

    let column = flags.description_column();
    let text = render(&flags, None, None);
    let continuation: Vec<&str> = text
        .lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .collect();

    assert!(!continuation.is_empty(), "expected wrapped lines: {text:?}");
    for line in text.lines() {
        assert!(line.chars().count() <= 79, "overlong line: {line:?}");
    }
    for line in &continuation {
        assert!(
            line.starts_with(&" ".repeat(column)),
            "continuation not indented to column {column}: {line:?}"
        );
    }
}
