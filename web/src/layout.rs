use shared::session::{Judgment, Slot, SEPARATOR};

/// Split slots into words, each keeping its trailing separator, so line wraps
/// only happen between words.
pub fn group_words(slots: &[Slot]) -> Vec<Vec<(usize, Slot)>> {
    let mut words = Vec::new();
    let mut word = Vec::new();
    for (i, slot) in slots.iter().copied().enumerate() {
        word.push((i, slot));
        if slot.expected == SEPARATOR {
            words.push(std::mem::take(&mut word));
        }
    }
    if !word.is_empty() {
        words.push(word);
    }
    words
}

pub fn slot_class(slot: &Slot, is_cursor: bool) -> &'static str {
    match (slot.judgment, is_cursor) {
        (Judgment::Pending, false) => "letter",
        (Judgment::Pending, true) => "letter caret",
        (Judgment::Correct, _) => "letter correct",
        (Judgment::Incorrect, _) => "letter incorrect",
    }
}

/// Separators render as a non-breaking space so they keep their width.
pub fn slot_text(slot: &Slot) -> char {
    if slot.expected == SEPARATOR {
        '\u{00A0}'
    } else {
        slot.expected
    }
}
