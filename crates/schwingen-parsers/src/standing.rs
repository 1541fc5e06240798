use models::{FestivalError, StandingEntry};

use crate::{content_lines, split_decoration, split_head};

/// Parses standing lines of the form `"<total>, <name>[ <decoration>]"`.
pub fn parse_standing_text(text: &str) -> Result<Vec<StandingEntry>, FestivalError> {
    let mut entries = Vec::new();
    for line in content_lines(text) {
        let Some((total_text, raw_name)) = split_head(line) else {
            return Err(FestivalError::validation(format!(
                "invalid standing line: \"{line}\""
            )));
        };

        let (name, decoration) = split_decoration(raw_name);
        if name.is_empty() {
            return Err(FestivalError::validation(format!(
                "missing name in standing line: \"{line}\""
            )));
        }

        let total = parse_total(total_text).ok_or_else(|| {
            FestivalError::validation(format!("invalid total for {name}: \"{line}\""))
        })?;

        entries.push(StandingEntry {
            total,
            name,
            decoration,
        });
    }
    Ok(entries)
}

fn parse_total(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
