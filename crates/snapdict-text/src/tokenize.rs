use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

use crate::vocabulary::{is_common_word, is_stopword, STOPWORDS};

pub const MIN_WORD_LEN: usize = 5;
pub const MAX_WORD_LEN: usize = 20;

pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(STOPWORDS.iter().map(|s| s.to_string())))
		.build()
}

/// Splits normalized text into words and keeps only lookup candidates.
#[derive(Clone)]
pub struct WordTokenizer {
	analyzer: TextAnalyzer,
}

impl Default for WordTokenizer {
	fn default() -> Self { Self { analyzer: build_analyzer() } }
}

impl WordTokenizer {
	pub fn new() -> Self { Self::default() }

	/// Every non-stopword token, in text order.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		// token_stream needs exclusive access; the clone keeps `self` shareable across threads
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut tokens = Vec::new();
		while stream.advance() { tokens.push(stream.token().text.clone()); }
		tokens
	}

	/// Tokens that can ever qualify as complex, in text order, duplicates kept.
	pub fn candidates(&self, text: &str) -> Vec<String> {
		self.tokenize(text).into_iter().filter(|t| is_candidate(t)).collect()
	}
}

/// Alphabetic, neither a stopword nor common vocabulary, and between 5 and 20 characters.
pub fn is_candidate(word: &str) -> bool {
	let len = word.chars().count();
	(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len)
		&& word.chars().all(char::is_alphabetic)
		&& !is_stopword(word)
		&& !is_common_word(word)
}
