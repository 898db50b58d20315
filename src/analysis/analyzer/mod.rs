//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod char_ngram;
mod pipeline;
mod word;

pub use analyzer::Analyzer;
pub use char_ngram::CharNgramAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use word::WordAnalyzer;
