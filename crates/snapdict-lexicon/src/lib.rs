//! snapdict-lexicon
//!
//! The lexical knowledge base (an in-memory WordNet), the morphy lemmatizer
//! that reads it, and the bounded resolver that turns a lemma into an
//! `EnrichmentRecord`.
pub mod morphy;
pub mod resolve;
pub mod wordnet;

pub use morphy::{morphy, LemmaIndex, MorphyLemmatizer};
pub use resolve::{display_name, LexicalResolver};
pub use wordnet::WordNet;
