//! Text analysis for intent featurization.
//!
//! Raw utterances pass through an [`Analyzer`](analyzer::Analyzer): a
//! tokenizer splits the text into tokens and a chain of token filters
//! normalizes them. The featurizer in [`crate::ml::intent_classifier`] runs
//! two analyzers over every utterance, one producing word n-grams and one
//! producing character n-grams.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
