use {bevy::prelude::*, item_components::ItemId, std::fmt::Write};

/// Encodes items as one decimal id per line.
pub fn encode_record(items: &[ItemId]) -> String {
    let mut text = String::with_capacity(items.len() * 6);
    for item in items {
        // Writing into a String cannot fail.
        let _ = writeln!(text, "{}", item.0);
    }
    text
}

/// Decodes a record written by [`encode_record`].
///
/// Blank lines are ignored and lines that are not an integer are skipped with a warning, so one
/// corrupt line never loses the rest of the record.
pub fn decode_record(text: &str) -> Vec<ItemId> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match line.parse::<i32>() {
                Ok(id) => Some(ItemId(id)),
                Err(e) => {
                    warn!(line = index + 1, content = %line, "skipping malformed unlock record line: {e}");
                    None
                }
            }
        })
        .collect()
}
