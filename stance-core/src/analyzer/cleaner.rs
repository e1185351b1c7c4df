//! Tweet cleaner: the full per-string pipeline.
//!
//! Stages run in a fixed order, each on the output of the previous one:
//!
//! 1. strip URLs ([`strip_urls_into`])
//! 2. strip emoticons ([`strip_emoji_into`])
//! 3. tokenize into words, punctuation and numbers ([`Tokenizer`])
//! 4. lowercase each token
//! 5. replace tokens found in the [`NormalizationTable`] with their expansion
//!
//! The output keeps one [`TokenGroup`] per lexed token, so a table expansion
//! never changes the group count, only the size of that group.

use smallvec::smallvec;
use stance_types::{TokenGroup, TokenSequence};

use super::normalizer::NormalizationTable;
use super::strip::{strip_emoji_into, strip_urls_into};
use super::tokenizer::Tokenizer;

/// Reusable cleaner bound to one normalization table.
///
/// Holds scratch buffers for the stripping stages, so cleaning a whole
/// dataset with one `Cleaner` allocates only for the output tokens.
///
/// # Examples
///
/// ```
/// use stance_core::analyzer::{Cleaner, NormalizationTable};
///
/// let table = NormalizationTable::from_pairs([("now", "right now")]).unwrap();
/// let mut cleaner = Cleaner::new(&table);
///
/// let out = cleaner.clean("Check http://x.co NOW!! #great");
/// let flat: Vec<Vec<&str>> = out
///     .iter()
///     .map(|g| g.iter().map(String::as_str).collect())
///     .collect();
///
/// assert_eq!(
///     flat,
///     [vec!["check"], vec!["right", "now"], vec!["!"], vec!["!"], vec!["#great"]]
/// );
/// ```
#[derive(Debug)]
pub struct Cleaner<'t> {
    table: &'t NormalizationTable,
    tokenizer: Tokenizer,
    url_free: String,
    stripped: String,
    lower: String,
}

impl<'t> Cleaner<'t> {
    /// Creates a cleaner that normalizes against `table`.
    pub fn new(table: &'t NormalizationTable) -> Self {
        Self {
            table,
            tokenizer: Tokenizer::new(),
            url_free: String::new(),
            stripped: String::new(),
            lower: String::new(),
        }
    }

    /// The table this cleaner substitutes from.
    #[inline]
    pub fn table(&self) -> &'t NormalizationTable {
        self.table
    }

    /// Cleans `text` into a new token sequence.
    pub fn clean(&mut self, text: &str) -> TokenSequence {
        let mut out = TokenSequence::new();
        self.clean_into(text, &mut out);
        out
    }

    /// Cleans `text` into `out`, clearing it first.
    pub fn clean_into(&mut self, text: &str, out: &mut TokenSequence) {
        out.clear();

        strip_urls_into(text, &mut self.url_free);
        strip_emoji_into(&self.url_free, &mut self.stripped);

        let table = self.table;
        let lower = &mut self.lower;

        self.tokenizer.tokenize(&self.stripped, |token, _, _| {
            lower.clear();
            lower.push_str(token);
            lower.make_ascii_lowercase();

            let group: TokenGroup = match table.get(lower) {
                Some(replacement) => replacement.iter().cloned().collect(),
                None => smallvec![lower.clone()],
            };
            out.push(group);
        });
    }
}

/// Cleans one string against `table`.
///
/// Convenience wrapper around [`Cleaner`] for one-off calls; batch code should
/// keep a `Cleaner` around instead.
pub fn data_clean(text: &str, table: &NormalizationTable) -> TokenSequence {
    Cleaner::new(table).clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(seq: &TokenSequence) -> Vec<Vec<&str>> {
        seq.iter()
            .map(|g| g.iter().map(String::as_str).collect())
            .collect()
    }

    fn table(pairs: &[(&str, &str)]) -> NormalizationTable {
        NormalizationTable::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn url_emoji_and_expansion() {
        let t = table(&[("now", "right now")]);
        let out = data_clean("Check http://x.co NOW!! #great", &t);
        assert_eq!(
            flat(&out),
            [
                vec!["check"],
                vec!["right", "now"],
                vec!["!"],
                vec!["!"],
                vec!["#great"]
            ]
        );
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        let t = table(&[]);
        assert!(data_clean("", &t).is_empty());
        assert!(data_clean("   ", &t).is_empty());
        assert!(data_clean("http://only.a/link", &t).is_empty());
    }

    #[test]
    fn lowercases_before_lookup() {
        let t = table(&[("idk", "i do not know")]);
        let out = data_clean("IDK, @Bob", &t);
        assert_eq!(
            flat(&out),
            [vec!["i", "do", "not", "know"], vec![","], vec!["@bob"]]
        );
    }

    #[test]
    fn emoji_stripped_before_tokenizing() {
        let t = table(&[]);
        // The emoticon would otherwise split the word in two.
        let out = data_clean("hap\u{1F600}py", &t);
        assert_eq!(flat(&out), [vec!["happy"]]);

        let out = data_clean("rock\u{1F680}et", &t);
        assert_eq!(flat(&out), [vec!["rock"], vec!["et"]]);
    }

    #[test]
    fn url_stripped_before_emoji() {
        let t = table(&[]);
        let out = data_clean("a http\u{1F600}x b", &t);
        assert_eq!(flat(&out), [vec!["a"], vec!["b"]]);
    }

    #[test]
    fn numbers_and_punctuation_are_tokens() {
        let t = table(&[("2", "to")]);
        let out = data_clean("Vote 2 win $100 <3", &t);
        assert_eq!(
            flat(&out),
            [
                vec!["vote"],
                vec!["to"],
                vec!["win"],
                vec!["$"],
                vec!["100"],
                vec!["<"],
                vec!["3"]
            ]
        );
    }

    #[test]
    fn hashtag_matched_as_whole_token() {
        let t = table(&[("#scotus", "supreme court")]);
        let out = data_clean("#SCOTUS rules", &t);
        assert_eq!(flat(&out), [vec!["supreme", "court"], vec!["rules"]]);
    }

    #[test]
    fn group_count_equals_token_count() {
        let t = table(&[("u", "you are"), ("r", "are"), ("gr8", "great")]);
        let input = "u r so gr8!!! http://t.co/x 4 real & stuff";
        let out = data_clean(input, &t);

        let mut stripped = String::new();
        let mut tmp = String::new();
        strip_urls_into(input, &mut tmp);
        strip_emoji_into(&tmp, &mut stripped);
        assert_eq!(out.len(), Tokenizer::new().count(&stripped));
        assert!(out.iter().all(|g| !g.is_empty()));
    }

    #[test]
    fn stable_under_reapplication() {
        let t = table(&[]);
        let first = data_clean("Hello, World! #Vote2016 @me 42", &t);
        let rejoined = first
            .iter()
            .flat_map(|g| g.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        let second = data_clean(&rejoined, &t);
        assert_eq!(first, second);
    }

    #[test]
    fn cleaner_is_reusable() {
        let t = table(&[("u", "you")]);
        let mut cleaner = Cleaner::new(&t);
        assert!(std::ptr::eq(cleaner.table(), &t));

        let a = cleaner.clean("thank u");
        let b = cleaner.clean("U rock http://x");
        assert_eq!(flat(&a), [vec!["thank"], vec!["you"]]);
        assert_eq!(flat(&b), [vec!["you"], vec!["rock"]]);

        let mut out = a.clone();
        cleaner.clean_into("", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn latin1_text_does_not_panic() {
        let t = table(&[]);
        let out = data_clean("caf\u{e9} \u{ff}\u{80} na\u{ef}ve", &t);
        assert_eq!(flat(&out), [vec!["caf"], vec!["na"], vec!["ve"]]);
    }
}
