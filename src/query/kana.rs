//! Kana collation
//!
//! Readings in the catalog are kana. Hiragana code points already sit
//! in gojūon order, so folding katakana onto the hiragana block gives a
//! comparison that matches how the catalog's language sorts, without a
//! full collation library.

use std::cmp::Ordering;

/// Katakana block that maps 1:1 onto hiragana (ァ..=ヶ)
const KATAKANA_START: char = '\u{30A1}';
const KATAKANA_END: char = '\u{30F6}';
/// Distance between the katakana and hiragana blocks
const KANA_OFFSET: u32 = 0x60;

/// Fold katakana characters to their hiragana equivalents
pub fn fold_kana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if (KATAKANA_START..=KATAKANA_END).contains(&c) {
                char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Compare two readings in gojūon order
pub fn compare_readings(a: &str, b: &str) -> Ordering {
    fold_kana(a).cmp(&fold_kana(b))
}
