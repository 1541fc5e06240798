pub const DECORATION_MARKER: char = '*';

/// Splits a raw name like `"Giger Samuel ***"` into the name and its trailing
/// marker run. Names without markers get an empty decoration.
pub fn split_decoration(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    let name = trimmed.trim_end_matches(DECORATION_MARKER);
    let decoration = &trimmed[name.len()..];
    (name.trim_end().to_string(), decoration.to_string())
}
