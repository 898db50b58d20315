//! Character n-gram analyzer.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::ngram::NgramTokenizer;
use crate::error::Result;

/// Lowercased character n-grams of a fixed size over the framed text.
///
/// Character grams let misspellings and inflections ("helo", "greetings")
/// share features with the training patterns.
pub struct CharNgramAnalyzer {
    inner: PipelineAnalyzer,
}

impl CharNgramAnalyzer {
    pub fn new(gram_size: usize) -> Result<Self> {
        let tokenizer = Arc::new(NgramTokenizer::new(gram_size, gram_size)?.framed());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("char_ngram");

        Ok(Self { inner: analyzer })
    }
}

impl Analyzer for CharNgramAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "char_ngram"
    }
}

impl Debug for CharNgramAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharNgramAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
