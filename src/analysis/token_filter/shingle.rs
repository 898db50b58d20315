//! Shingle filter: word n-grams built from adjacent tokens.
//!
//! For every token the filter emits the token itself followed by the shingles
//! that start at it, up to `max_size` tokens joined by a single space.
//!
//! ```
//! use intentbot::analysis::token_filter::Filter;
//! use intentbot::analysis::token_filter::shingle::ShingleFilter;
//! use intentbot::analysis::token::Token;
//!
//! let filter = ShingleFilter::new(2).unwrap();
//! let tokens = vec![Token::new("see", 0), Token::new("you", 1), Token::new("later", 2)];
//! let texts: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(texts, vec!["see", "see you", "you", "you later", "later"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{BotError, Result};

/// Separator placed between the words of a shingle.
pub const SHINGLE_SEPARATOR: &str = " ";

/// A filter that adds word n-grams (shingles) to the token stream.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    max_size: usize,
}

impl ShingleFilter {
    /// Create a shingle filter producing word n-grams up to `max_size` words.
    ///
    /// A `max_size` of 1 passes tokens through unchanged.
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(BotError::analysis("shingle max_size must be at least 1"));
        }
        Ok(Self { max_size })
    }

    /// Largest shingle size this filter emits.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();
        if self.max_size == 1 {
            return Ok(Box::new(words.into_iter()));
        }

        let mut output = Vec::with_capacity(words.len() * self.max_size);
        for (i, word) in words.iter().enumerate() {
            output.push(word.clone());

            for size in 2..=self.max_size {
                let end = i + size;
                if end > words.len() {
                    break;
                }
                let text = words[i..end]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(SHINGLE_SEPARATOR);
                output.push(Token::with_offsets(
                    text,
                    word.position,
                    word.start_offset,
                    words[end - 1].end_offset,
                ));
            }
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
