use models::{FestivalError, RosterEntry};

use crate::{content_lines, split_decoration, split_head};

/// Parses roster lines of the form `"<id>, <name>[ <decoration>]"`.
/// Blank lines are skipped.
pub fn parse_roster_text(text: &str) -> Result<Vec<RosterEntry>, FestivalError> {
    let mut entries = Vec::new();
    for line in content_lines(text) {
        let Some((id, raw_name)) = split_head(line) else {
            return Err(FestivalError::validation(format!(
                "invalid roster line: \"{line}\""
            )));
        };
        if id.is_empty() {
            return Err(FestivalError::validation(format!(
                "missing start number in roster line: \"{line}\""
            )));
        }

        let (name, decoration) = split_decoration(raw_name);
        if name.is_empty() {
            return Err(FestivalError::validation(format!(
                "missing name in roster line: \"{line}\""
            )));
        }

        entries.push(RosterEntry {
            id: id.to_string(),
            name,
            decoration,
        });
    }
    Ok(entries)
}
