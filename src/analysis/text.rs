/// Split raw text into words on whitespace
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// A valid word carries no control characters (code points below 0x20)
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}
