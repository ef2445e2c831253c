use std::sync::Arc;

use crate::types::{PartOfSpeech, Synset, Term, TermRef};

/// Read-only lexical network, loaded once and shared by every request.
pub trait LexicalKnowledgeBase: Send + Sync {
    /// All senses of `lemma`, most frequent first. Empty when unknown.
    fn synsets_of(&self, lemma: &str) -> Vec<Arc<Synset>>;
    /// Follows a term reference (e.g. an antonym pointer).
    fn term(&self, reference: &TermRef) -> Option<&Term>;
}

/// Assigns a part-of-speech tag to each token, preserving order.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)>;
}

pub trait Lemmatizer: Send + Sync {
    /// Base form of `word`; total, unknown words come back unchanged.
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;
}
