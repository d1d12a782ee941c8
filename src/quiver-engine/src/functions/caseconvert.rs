//! Case-conversion kernels.
//!
//! Two implementations exist per direction:
//!
//! - the **ASCII** kernels map each byte through a 256-entry table and never
//!   change the byte length; they are only selected when statistics prove
//!   the input is ASCII;
//! - the **Unicode** kernels decode code points and apply simple (1:1)
//!   case mapping, so the output may be shorter or longer than the input
//!   (`upper("ı")` is `"I"`, two bytes down to one).
//!
//! On ASCII input both produce identical bytes.

use std::str::Chars;

use common_error::{QuiverError, QuiverResult};

const fn build_table(upper: bool) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let byte = i as u8;
        table[i] = if upper {
            byte.to_ascii_uppercase()
        } else {
            byte.to_ascii_lowercase()
        };
        i += 1;
    }
    table
}

/// Byte-wise uppercase table. Bytes outside `a..=z` map to themselves.
pub static ASCII_TO_UPPER: [u8; 256] = build_table(true);

/// Byte-wise lowercase table. Bytes outside `A..=Z` map to themselves.
pub static ASCII_TO_LOWER: [u8; 256] = build_table(false);

fn convert_ascii(input: &str, table: &[u8; 256]) -> QuiverResult<String> {
    let bytes = input.bytes().map(|b| table[usize::from(b)]).collect();
    // Only ASCII letters move, and they stay ASCII, so UTF-8 is preserved.
    String::from_utf8(bytes).map_err(|e| QuiverError::internal(e.to_string()))
}

/// Uppercase an ASCII string.
pub fn upper_ascii(input: &str) -> QuiverResult<String> {
    convert_ascii(input, &ASCII_TO_UPPER)
}

/// Lowercase an ASCII string.
pub fn lower_ascii(input: &str) -> QuiverResult<String> {
    convert_ascii(input, &ASCII_TO_LOWER)
}

/// Simple uppercase mapping of one code point.
pub fn simple_uppercase(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        // Full mapping expands; use the single-code-point form where one exists.
        _ => match u32::from(c) {
            0x1F80..=0x1F87 | 0x1F90..=0x1F97 | 0x1FA0..=0x1FA7 => {
                char::from_u32(u32::from(c) + 8).unwrap_or(c)
            }
            0x1FB3 => '\u{1FBC}',
            0x1FC3 => '\u{1FCC}',
            0x1FF3 => '\u{1FFC}',
            _ => c,
        },
    }
}

/// Simple lowercase mapping of one code point.
pub fn simple_lowercase(c: char) -> char {
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        // U+0130 is the only code point whose full lowercase expands.
        _ if c == '\u{0130}' => 'i',
        _ => c,
    }
}

/// Iterator over the case-mapped code points of a string.
///
/// Both passes of the Unicode kernels consume this same iterator type, so
/// the sizing pass and the writing pass see exactly the same code points.
#[derive(Debug, Clone)]
pub struct CaseMapped<'a, const UPPER: bool> {
    chars: Chars<'a>,
}

impl<'a, const UPPER: bool> CaseMapped<'a, UPPER> {
    /// Start mapping `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl<const UPPER: bool> Iterator for CaseMapped<'_, UPPER> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        Some(if UPPER {
            simple_uppercase(c)
        } else {
            simple_lowercase(c)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

fn convert_unicode<const UPPER: bool>(input: &str) -> QuiverResult<String> {
    let size: usize = CaseMapped::<UPPER>::new(input).map(char::len_utf8).sum();

    // Fixed length: encoding past `size` panics instead of reallocating.
    let mut buffer = vec![0u8; size];
    let mut written = 0;
    for c in CaseMapped::<UPPER>::new(input) {
        written += c.encode_utf8(&mut buffer[written..]).len();
    }

    assert_eq!(
        written, size,
        "case mapping wrote {written} bytes into a buffer sized for {size}"
    );
    String::from_utf8(buffer).map_err(|e| QuiverError::internal(e.to_string()))
}

/// Uppercase any string with simple Unicode case mapping.
pub fn upper_unicode(input: &str) -> QuiverResult<String> {
    convert_unicode::<true>(input)
}

/// Lowercase any string with simple Unicode case mapping.
pub fn lower_unicode(input: &str) -> QuiverResult<String> {
    convert_unicode::<false>(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_byte() {
        assert_eq!(ASCII_TO_UPPER[usize::from(b'a')], b'A');
        assert_eq!(ASCII_TO_UPPER[usize::from(b'Z')], b'Z');
        assert_eq!(ASCII_TO_LOWER[usize::from(b'Q')], b'q');
        assert_eq!(ASCII_TO_LOWER[usize::from(b'@')], b'@');
        assert_eq!(ASCII_TO_UPPER[255], 255);
        assert_eq!(ASCII_TO_LOWER[255], 255);
        assert_eq!(ASCII_TO_UPPER[0x80], 0x80);
    }

    #[test]
    fn test_hello() {
        assert_eq!(upper_ascii("HELLO").unwrap(), "HELLO");
        assert_eq!(lower_ascii("HELLO").unwrap(), "hello");
        assert_eq!(upper_unicode("HELLO").unwrap(), "HELLO");
        assert_eq!(lower_unicode("HELLO").unwrap(), "hello");
    }

    #[test]
    fn test_ascii_kernel_leaves_multibyte_untouched() {
        assert_eq!(upper_ascii("café").unwrap(), "CAFé");
    }

    #[test]
    fn test_length_variance() {
        // U+0131 (2 bytes) uppercases to 'I' (1 byte)
        let out = upper_unicode("ı").unwrap();
        assert_eq!(out, "I");
        assert_eq!(out.len(), 1);

        // U+023F (2 bytes) uppercases to U+2C7E (3 bytes)
        let out = upper_unicode("ȿ").unwrap();
        assert_eq!(out, "\u{2C7E}");
        assert_eq!(out.len(), 3);

        // and back down again
        let out = lower_unicode("\u{2C7E}").unwrap();
        assert_eq!(out, "ȿ");
        assert_eq!(out.len(), 2);

        // Kelvin sign (3 bytes) lowercases to 'k'
        assert_eq!(lower_unicode("\u{212A}").unwrap(), "k");
    }

    #[test]
    fn test_simple_casing_of_expanding_mappings() {
        assert_eq!(upper_unicode("straße").unwrap(), "STRAßE");
        assert_eq!(lower_unicode("\u{0130}").unwrap(), "i");
        assert_eq!(simple_uppercase('\u{1F80}'), '\u{1F88}');
        assert_eq!(simple_uppercase('\u{1FB3}'), '\u{1FBC}');
        assert_eq!(simple_uppercase('\u{1F88}'), '\u{1F88}');
        assert_eq!(simple_uppercase('\u{0149}'), '\u{0149}');
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(upper_unicode("héllo wörld").unwrap(), "HÉLLO WÖRLD");
        assert_eq!(lower_unicode("ΣΊΣΥΦΟΣ").unwrap(), "σίσυφοσ");
        assert_eq!(upper_unicode("").unwrap(), "");
    }

    #[test]
    fn test_output_fills_sized_buffer_exactly() {
        for input in ["ıȿ\u{2C7E}", "\u{212A}elvin", "ΣΊΣΥΦΟΣ", "ß\u{0130}"] {
            let upper = upper_unicode(input).unwrap();
            let sized: usize = CaseMapped::<true>::new(input).map(char::len_utf8).sum();
            assert_eq!(upper.len(), sized);

            let lower = lower_unicode(input).unwrap();
            let sized: usize = CaseMapped::<false>::new(input).map(char::len_utf8).sum();
            assert_eq!(lower.len(), sized);
        }
    }

    #[test]
    fn test_case_mapped_iterator() {
        let mapped: String = CaseMapped::<true>::new("aß").collect();
        assert_eq!(mapped, "Aß");
    }
}
