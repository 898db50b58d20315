//! Character n-gram tokenizer.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{BotError, Result};

/// Marker prepended to framed text.
pub const START_MARKER: char = '\u{2}';
/// Marker appended to framed text.
pub const END_MARKER: char = '\u{3}';

/// A tokenizer that generates character n-grams.
///
/// With framing enabled the text is trimmed, inner whitespace runs collapse to
/// a single space, and the result is wrapped in [`START_MARKER`] and
/// [`END_MARKER`], so prefixes and suffixes produce their own grams.
///
/// # Examples
///
/// ```
/// use intentbot::analysis::tokenizer::ngram::NgramTokenizer;
/// use intentbot::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = NgramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, vec!["ab", "abc", "bc"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    min_gram: usize,
    max_gram: usize,
    framed: bool,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(BotError::analysis("min_gram must be at least 1"));
        }
        if max_gram < min_gram {
            return Err(BotError::analysis(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self {
            min_gram,
            max_gram,
            framed: false,
        })
    }

    /// Frame the text with start/end markers before generating grams.
    pub fn framed(mut self) -> Self {
        self.framed = true;
        self
    }

    fn frame(text: &str) -> String {
        let mut framed = String::with_capacity(text.len() + 2);
        framed.push(START_MARKER);
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                framed.push(' ');
            }
            framed.push_str(word);
        }
        framed.push(END_MARKER);
        framed
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let source = if self.framed {
            Self::frame(text)
        } else {
            text.to_string()
        };

        // (byte offset, char) pairs plus the final offset so grams can slice.
        let mut boundaries: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
        boundaries.push(source.len());
        let char_count = boundaries.len() - 1;

        let mut tokens = Vec::new();
        let mut position = 0;

        for start in 0..char_count {
            for gram_size in self.min_gram..=self.max_gram {
                let end = start + gram_size;
                if end > char_count {
                    break;
                }

                let (start_offset, end_offset) = (boundaries[start], boundaries[end]);
                tokens.push(Token::with_offsets(
                    &source[start_offset..end_offset],
                    position,
                    start_offset,
                    end_offset,
                ));
                position += 1;
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
