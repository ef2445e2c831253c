//! snapdict-text
//!
//! Turns raw OCR text into tagged lookup candidates: `normalize` cleans the
//! text, `WordTokenizer` splits and filters it, and a `Tagger` assigns parts
//! of speech to the survivors.
use std::sync::Arc;

use snapdict_core::traits::Tagger;
use snapdict_core::types::Token;

pub mod normalize;
pub mod tagger;
pub mod tokenize;
pub mod vocabulary;

pub use normalize::normalize;
pub use tagger::{PerceptronTagger, SuffixTagger};
pub use tokenize::{is_candidate, WordTokenizer};

/// Tokenizer and tagger bundled for the pipeline's second stage.
#[derive(Clone)]
pub struct TokenTagger {
    tokenizer: WordTokenizer,
    tagger: Arc<dyn Tagger>,
}

impl TokenTagger {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tokenizer: WordTokenizer::new(), tagger }
    }

    /// Tags only the candidate tokens of already-normalized text; words that
    /// fail the filter never reach the tagger.
    pub fn tag(&self, normalized: &str) -> Vec<Token> {
        let candidates = self.tokenizer.candidates(normalized);
        if candidates.is_empty() {
            return Vec::new();
        }
        self.tagger
            .tag(&candidates)
            .into_iter()
            .map(|(word, tag)| Token::new(word, tag))
            .collect()
    }

    /// Tags one word on its own, without the candidate filter.
    pub fn tag_word(&self, word: &str) -> Token {
        let tag = self
            .tagger
            .tag(&[word.to_string()])
            .pop()
            .map(|(_, tag)| tag)
            .unwrap_or_else(|| "NN".to_string());
        Token::new(word, tag)
    }
}

impl Default for TokenTagger {
    fn default() -> Self {
        Self::new(Arc::new(SuffixTagger))
    }
}
