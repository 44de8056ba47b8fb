//! Deterministic character-level canonicalization.
//!
//! Steps, applied in one pass per character:
//! 1. Eastern Arabic-Indic digits (U+0660..U+0669) become ASCII digits.
//! 2. Arabic diacritics (U+064B..U+065F) and tatweel (U+0640) are deleted.
//! 3. Tabs and carriage returns become spaces; space runs collapse to one.
//! 4. ASCII `A-Z` are lower-cased. Every other script is left untouched.
//! 5. Leading and trailing whitespace is trimmed.
//!
//! Digits are translated before any pattern sees the text, so skeleton rules
//! only ever match ASCII digits.

const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Normalize message text. Pure, total, and idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;

    for ch in text.chars() {
        let ch = match ch {
            '\u{0660}'..='\u{0669}' => arabic_indic_to_ascii(ch),
            '\u{064B}'..='\u{065F}' | '\u{0640}' => continue,
            '\t' | '\r' => ' ',
            c => c.to_ascii_lowercase(),
        };

        if ch == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(ch);
    }

    out.trim().to_string()
}

fn arabic_indic_to_ascii(ch: char) -> char {
    let offset = ch as u32 - ARABIC_INDIC_ZERO;
    char::from_digit(offset, 10).unwrap_or(ch)
}
