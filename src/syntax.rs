//! Byte alphabet of the rule language.
//!
//! Identifiers are plain ascii, so scanning works on bytes; every split
//! point lands on an ascii byte or a char start, which keeps utf-8
//! literals intact.

/// header lines start with this character
pub const MARKER: char = '#';

/// variable references inside content lines start with this byte
pub const PREFIX: u8 = b'_';

/// content line standing for the empty string; in header position it is
/// treated as a comment
pub const EMPTY_SENTINEL: &str = "##empty";

pub fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

pub fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_start_is_letters_only() {
        assert!(is_name_start(b'a'));
        assert!(is_name_start(b'Z'));
        assert!(!is_name_start(b'7'));
        assert!(!is_name_start(b'_'));
        assert!(!is_name_start(0xc3));
    }

    #[test]
    fn name_chars_include_digits() {
        assert!(is_name_char(b'x'));
        assert!(is_name_char(b'0'));
        assert!(!is_name_char(b'_'));
        assert!(!is_name_char(b' '));
    }
}
