use once_cell::sync::Lazy;

use crate::buffer::Span;

/// djb2 seed.
const HASH_SEED: u32 = 5381;

/// Bytes that can appear inside a word: ASCII letters and the apostrophe,
/// so contractions like "don't" keep their identity. Digits and all other
/// punctuation separate words.
static WORD_CHAR: Lazy<[bool; 256]> = Lazy::new(|| {
    let mut table = [false; 256];
    for byte in 0..=255u8 {
        table[byte as usize] = byte.is_ascii_alphabetic() || byte == b'\'';
    }
    table
});

fn is_word_char(byte: u8) -> bool {
    WORD_CHAR[byte as usize]
}

/// Single forward pass over the corpus, yielding one `(span, hash)` pair
/// per word run.
///
/// Folding happens in place: every lowercase letter the scanner walks
/// over is rewritten to uppercase, so yielded spans always point at
/// folded bytes and plain byte equality doubles as case-insensitive
/// equality. The hash is djb2 (`h = h * 33 + byte`, wrapping) over the
/// folded bytes, apostrophes included.
pub struct Tokenizer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Tokenizer<'a> {
        Tokenizer { buf, pos: 0 }
    }

    /// The scanned bytes, for resolving spans mid-scan.
    pub fn bytes(&self) -> &[u8] {
        self.buf
    }

    /// Advance to the next word run, or `None` once the range is spent.
    ///
    /// Separators are any bytes outside the word alphabet; apostrophes
    /// ahead of a word's first letter count as separators too, so a word
    /// never begins with one. An apostrophe with no word byte behind it
    /// ends the run before the apostrophe.
    pub fn next_word(&mut self) -> Option<(Span, u32)> {
        let end = self.buf.len();

        while self.pos < end && (self.buf[self.pos] == b'\'' || !is_word_char(self.buf[self.pos])) {
            self.pos += 1;
        }
        if self.pos >= end {
            return None;
        }

        let start = self.pos;
        let mut hash = HASH_SEED;
        while self.pos < end && is_word_char(self.buf[self.pos]) {
            if self.buf[self.pos] == b'\''
                && (self.pos + 1 >= end || !is_word_char(self.buf[self.pos + 1]))
            {
                break;
            }
            if self.buf[self.pos].is_ascii_lowercase() {
                self.buf[self.pos] -= 32;
            }
            hash = hash.wrapping_mul(33).wrapping_add(u32::from(self.buf[self.pos]));
            self.pos += 1;
        }

        // the skip loop left us on a letter, so the run is never empty
        debug_assert!(self.pos > start);
        Some((Span { start, len: self.pos - start }, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_of(text: &str) -> Vec<String> {
        let mut buf = text.as_bytes().to_vec();
        let mut tokenizer = Tokenizer::new(&mut buf);
        let mut words = Vec::new();
        while let Some((span, _)) = tokenizer.next_word() {
            words.push(String::from_utf8(span.bytes(tokenizer.bytes()).to_vec()).unwrap());
        }
        words
    }

    fn djb2(bytes: &[u8]) -> u32 {
        bytes
            .iter()
            .fold(HASH_SEED, |hash, &byte| hash.wrapping_mul(33).wrapping_add(u32::from(byte)))
    }

    #[test]
    fn folds_to_uppercase_in_place() {
        let mut buf = b"The cat".to_vec();
        let mut tokenizer = Tokenizer::new(&mut buf);

        let (first, _) = tokenizer.next_word().unwrap();
        assert_eq!(first.bytes(tokenizer.bytes()), b"THE");
        let (second, _) = tokenizer.next_word().unwrap();
        assert_eq!(second.bytes(tokenizer.bytes()), b"CAT");
        assert!(tokenizer.next_word().is_none());

        // the separator is untouched, the letters are rewritten
        assert_eq!(&buf, b"THE CAT");
    }

    #[test]
    fn hash_is_djb2_over_folded_bytes() {
        let mut buf = b"the DON'T".to_vec();
        let mut tokenizer = Tokenizer::new(&mut buf);

        let (_, hash) = tokenizer.next_word().unwrap();
        assert_eq!(hash, djb2(b"THE"));
        let (_, hash) = tokenizer.next_word().unwrap();
        assert_eq!(hash, djb2(b"DON'T"));
    }

    #[test]
    fn leading_apostrophes_are_stripped() {
        assert_eq!(words_of("'Tis the question"), ["TIS", "THE", "QUESTION"]);
        assert_eq!(words_of("''twas"), ["TWAS"]);
    }

    #[test]
    fn interior_apostrophes_are_kept() {
        assert_eq!(words_of("don't stop"), ["DON'T", "STOP"]);
        assert_eq!(words_of("We'll know't"), ["WE'LL", "KNOW'T"]);
    }

    #[test]
    fn a_final_apostrophe_stays_outside_the_word() {
        assert_eq!(words_of("the dogs' bones"), ["THE", "DOGS", "BONES"]);
        assert_eq!(words_of("said 'hello' twice"), ["SAID", "HELLO", "TWICE"]);
        // the lookahead treats an apostrophe as a word byte, so only the
        // last one is dropped
        assert_eq!(words_of("dogs'' bones"), ["DOGS'", "BONES"]);
    }

    #[test]
    fn digits_split_words() {
        assert_eq!(words_of("top3words"), ["TOP", "WORDS"]);
        assert_eq!(words_of("route 66"), ["ROUTE"]);
    }

    #[test]
    fn separators_only_or_empty_yield_nothing() {
        assert_eq!(words_of(""), Vec::<String>::new());
        assert_eq!(words_of("  .,;:!?  123  "), Vec::<String>::new());
        assert_eq!(words_of("'''"), Vec::<String>::new());
    }

    #[test]
    fn a_word_may_end_at_the_end_of_the_range() {
        assert_eq!(words_of("last word"), ["LAST", "WORD"]);
        assert_eq!(words_of("x"), ["X"]);
        assert_eq!(words_of("end'"), ["END"]);
    }

    #[test]
    fn dashes_split_words() {
        assert_eq!(words_of("well-known"), ["WELL", "KNOWN"]);
    }
}
