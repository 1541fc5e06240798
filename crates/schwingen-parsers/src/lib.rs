pub mod name;
pub mod roster;
pub mod standing;

pub use name::split_decoration;
pub use roster::parse_roster_text;
pub use standing::parse_standing_text;

/// Non-blank lines of a pasted list, trimmed.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Splits `"<head>, <rest>"` at the first comma. The rest may contain commas.
fn split_head(line: &str) -> Option<(&str, &str)> {
    let (head, rest) = line.split_once(',')?;
    Some((head.trim(), rest.trim()))
}
