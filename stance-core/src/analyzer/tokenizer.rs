//! Streaming Tokenizer Module
//!
//! Splits stripped tweet text into tokens of three fixed classes. It is the
//! third cleaning stage: URLs and emoji are already gone, lowercasing and
//! table lookups come afterwards.
//!
//! ## Token Classes
//!
//! Classes are tried in this order at every position, and the first that
//! matches wins:
//!
//! 1. **Word**: a run of ASCII letters, `#` and `@` (`"Hello"`, `"#tcot"`, `"@user"`)
//! 2. **Punct**: one character from `, . ! ? & / \ < > = $`
//! 3. **Number**: a run of ASCII digits
//!
//! Everything else (whitespace, quotes, `-`, `:`, non-ASCII letters) is
//! skipped and splits the surrounding runs:
//!
//! ```ignore
//! "It's 2day!!"  ->  ("It", Word) ("s", Word) ("2", Number) ("day", Word) ("!", Punct) ("!", Punct)
//! ```
//!
//! ## Zero Allocation
//!
//! Tokens are slices of the input, emitted through a callback together with
//! their class and position. No intermediate collection is built.
//!
//! ## Usage
//!
//! ```rust
//! use stance_core::analyzer::tokenizer::{TokenClass, Tokenizer};
//!
//! let mut words = 0;
//! Tokenizer::new().tokenize("go #team 2015!", |_text, class, _pos| {
//!     if class == TokenClass::Word {
//!         words += 1;
//!     }
//! });
//! assert_eq!(words, 2);
//! ```

/// Lexical class of a token.
///
/// `#[repr(u8)]` lets the class table store one byte per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenClass {
    /// Run of ASCII letters, `#` and `@`.
    Word = 0,
    /// Single punctuation mark from the fixed set.
    Punct = 1,
    /// Run of ASCII digits.
    Number = 2,
}

/// Punctuation marks emitted as single-character tokens.
pub const PUNCTUATION: &[u8] = b",.!?&/\\<>=$";

const SKIP: u8 = u8::MAX;

const fn build_class_table() -> [u8; 256] {
    let mut table = [SKIP; 256];

    let mut b = 0usize;
    while b < 256 {
        let byte = b as u8;
        if byte.is_ascii_alphabetic() || byte == b'#' || byte == b'@' {
            table[b] = TokenClass::Word as u8;
        } else if byte.is_ascii_digit() {
            table[b] = TokenClass::Number as u8;
        }
        b += 1;
    }

    let mut p = 0usize;
    while p < PUNCTUATION.len() {
        table[PUNCTUATION[p] as usize] = TokenClass::Punct as u8;
        p += 1;
    }

    table
}

static CLASS_TABLE: [u8; 256] = build_class_table();

#[inline(always)]
fn class_of(b: u8) -> Option<TokenClass> {
    match CLASS_TABLE[b as usize] {
        0 => Some(TokenClass::Word),
        1 => Some(TokenClass::Punct),
        2 => Some(TokenClass::Number),
        _ => None,
    }
}

/// Fixed-class streaming tokenizer.
///
/// Stateless; one instance can be reused for any number of inputs.
///
/// ## How It Works
///
/// A single forward scan over the bytes. Each byte is looked up in a static
/// class table. Word and number runs extend while the class stays the same;
/// punctuation always ends after one byte. Every token byte is ASCII, so runs
/// start and end on character boundaries even in non-ASCII input.
///
/// ## Example
///
/// ```
/// use stance_core::analyzer::tokenizer::Tokenizer;
///
/// let mut tokens = Vec::new();
/// Tokenizer::new().tokenize("Hi @bob, 10/10", |text, _, _| tokens.push(text));
///
/// assert_eq!(tokens, ["Hi", "@bob", ",", "10", "/", "10"]);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `input` and emits `(text, class, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop (overflow protection).
    #[inline]
    pub fn tokenize<'n, F>(&self, input: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, TokenClass, u32),
    {
        let bytes = input.as_bytes();
        let mut i = 0usize;
        let mut pos = 0u32;

        while i < bytes.len() {
            let Some(class) = class_of(bytes[i]) else {
                i += 1;
                continue;
            };

            let start = i;
            i += 1;
            if class != TokenClass::Punct {
                while i < bytes.len() && class_of(bytes[i]) == Some(class) {
                    i += 1;
                }
            }

            emit(&input[start..i], class, pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
        }
    }

    /// Counts tokens without materializing them.
    pub fn count(&self, input: &str) -> usize {
        let mut n = 0usize;
        self.tokenize(input, |_, _, _| n += 1);
        n
    }
}
