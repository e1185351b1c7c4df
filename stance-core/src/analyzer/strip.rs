//! URL and emoji stripping.
//!
//! The first two cleaning stages. Both write into a caller-owned buffer so a
//! batch run can reuse one allocation across every sample.
//!
//! - **URLs**: `http` followed by at least one non-whitespace character is
//!   removed through the end of that non-whitespace run. A bare `http` that
//!   ends at whitespace or end of input is ordinary text.
//! - **Emoji**: only the Emoticons block (U+1F600..=U+1F64F) is removed.
//!   Pictographs, flags and symbols outside that band pass through and are
//!   dropped later by the tokenizer as non-token characters. A stripped
//!   emoticon leaves nothing behind, so `"hi\u{1F600}there"` becomes one
//!   word while `"hi\u{1F680}there"` stays two.

use memchr::{memchr, memmem};

const URL_PREFIX: &[u8] = b"http";

/// First code point of the stripped emoji band.
pub const EMOJI_FIRST: char = '\u{1F600}';
/// Last code point of the stripped emoji band.
pub const EMOJI_LAST: char = '\u{1F64F}';

/// Whether `c` falls inside the stripped emoji band.
#[inline(always)]
pub fn is_stripped_emoji(c: char) -> bool {
    (EMOJI_FIRST..=EMOJI_LAST).contains(&c)
}

/// Removes URL-like runs from `input`, writing the rest into `out`.
///
/// Clears `out` first.
pub fn strip_urls_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let bytes = input.as_bytes();
    let finder = memmem::Finder::new(URL_PREFIX);
    let mut copied = 0usize;
    let mut from = 0usize;

    while let Some(offset) = finder.find(&bytes[from..]) {
        let start = from + offset;
        let body = start + URL_PREFIX.len();
        let end = non_whitespace_end(input, body);

        if end > body {
            out.push_str(&input[copied..start]);
            copied = end;
            from = end;
        } else {
            // `http` does not overlap itself, so resuming after it misses nothing.
            from = body;
        }
    }

    out.push_str(&input[copied..]);
}

/// Removes characters in the emoji band from `input`, writing into `out`.
///
/// Clears `out` first.
pub fn strip_emoji_into(input: &str, out: &mut String) {
    out.clear();

    // Every code point in the band encodes with a 0xF0 lead byte.
    if memchr(0xF0, input.as_bytes()).is_none() {
        out.push_str(input);
        return;
    }

    out.reserve(input.len());
    out.extend(input.chars().filter(|&c| !is_stripped_emoji(c)));
}

/// Byte index where the non-whitespace run starting at `from` ends.
#[inline]
fn non_whitespace_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| c.is_whitespace())
        .map_or(input.len(), |(i, _)| from + i)
}
