//! snapdict-pipeline
//!
//! Wires the stages together: normalize, tag, lemmatize, classify, resolve.
//! A `Pipeline` is built once and shared; every method takes `&self` and is
//! safe to call from many threads at the same time.
use std::sync::Arc;
use std::time::Instant;

use snapdict_core::config::{CacheSettings, Settings};
use snapdict_core::traits::{Lemmatizer, LexicalKnowledgeBase, Tagger};
use snapdict_core::types::{ComplexWords, EnrichmentRecord, Lemma, PartOfSpeech, PipelineResult, TraversalLimits};
use snapdict_core::Result;
use snapdict_lexicon::{LexicalResolver, MorphyLemmatizer, WordNet};
use snapdict_text::{normalize, PerceptronTagger, SuffixTagger, TokenTagger};
use tracing::{debug, info};

pub mod cache;
pub mod classifier;

pub use cache::{CacheStats, Fingerprint, ResultCache, ResultCacheStats, ShardedLru};
pub use classifier::{count_syllables, is_complex};

pub struct Pipeline {
    tagger: TokenTagger,
    lemmatizer: Arc<dyn Lemmatizer>,
    resolver: LexicalResolver,
    cache: ResultCache,
}

impl Pipeline {
    pub fn new(
        kb: Arc<dyn LexicalKnowledgeBase>,
        lemmatizer: Arc<dyn Lemmatizer>,
        tagger: Arc<dyn Tagger>,
        limits: TraversalLimits,
        cache: &CacheSettings,
    ) -> Self {
        Self {
            tagger: TokenTagger::new(tagger),
            lemmatizer,
            resolver: LexicalResolver::new(kb, limits),
            cache: ResultCache::new(cache),
        }
    }

    /// WordNet plus the morphy lemmatizer over it, with the given tagger.
    pub fn with_wordnet(wordnet: Arc<WordNet>, tagger: Arc<dyn Tagger>, settings: &Settings) -> Self {
        let lemmatizer = Arc::new(MorphyLemmatizer::new(Arc::clone(&wordnet)));
        Self::new(wordnet, lemmatizer, tagger, settings.traversal, &settings.cache)
    }

    /// Loads every resource named by `settings`. Fails if the knowledge base
    /// or a configured tagger model cannot be read.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let wordnet = Arc::new(WordNet::load(&settings.lexicon.wordnet_dir)?);
        let tagger: Arc<dyn Tagger> = match &settings.tagger.model_dir {
            Some(dir) => Arc::new(PerceptronTagger::load(dir, &settings.tagger.prefix)?),
            None => {
                info!("no tagger model configured, using suffix tagger");
                Arc::new(SuffixTagger)
            }
        };
        Ok(Self::with_wordnet(wordnet, tagger, settings))
    }

    /// Lemma to enrichment record for every complex word in `raw`.
    ///
    /// The first token yielding a lemma wins; later tokens with the same
    /// lemma are skipped without being classified or resolved again. Words
    /// the knowledge base does not know are left out.
    pub fn extract_complex_words(&self, raw: &str) -> ComplexWords {
        let normalized = normalize(raw);
        let tokens = self.tagger.tag(&normalized);
        let mut words = ComplexWords::new();
        for token in &tokens {
            let lemma = self.lemmatizer.lemmatize(&token.word, token.pos);
            if words.contains_key(&lemma) || !self.is_complex(&lemma) {
                continue;
            }
            if let Some(record) = self.resolve(&lemma) {
                words.insert(lemma, record);
            }
        }
        debug!(candidates = tokens.len(), complex = words.len(), "extracted complex words");
        words
    }

    /// `extract_complex_words` with timing, memoized by the text's content hash.
    pub fn process(&self, raw: &str) -> Arc<PipelineResult> {
        self.process_keyed(Fingerprint::of_text(raw), raw)
    }

    /// Same as `process` but keyed by a caller-supplied fingerprint, such as
    /// the hash of an image the text was recognized from.
    ///
    /// A cached result keeps the `processing_time` of the run that produced it.
    pub fn process_keyed(&self, key: Fingerprint, raw: &str) -> Arc<PipelineResult> {
        if let Some(hit) = self.cache.document(&key) {
            debug!(%key, "request cache hit");
            return hit;
        }
        let started = Instant::now();
        let complex_words = self.extract_complex_words(raw);
        let result = Arc::new(PipelineResult {
            complex_words,
            original_text: raw.to_string(),
            processing_time: started.elapsed(),
        });
        debug!(%key, elapsed_ms = result.processing_time.as_millis() as u64, "request processed");
        self.cache.store_document(key, Arc::clone(&result));
        result
    }

    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> Lemma {
        self.lemmatizer.lemmatize(word, pos)
    }

    /// Lemma of a single word under the part of speech the tagger gives it.
    pub fn lemma_of(&self, word: &str) -> Lemma {
        let token = self.tagger.tag_word(word);
        self.lemmatizer.lemmatize(&token.word, token.pos)
    }

    /// Cached `classifier::is_complex`.
    pub fn is_complex(&self, lemma: &str) -> bool {
        self.cache.verdict(lemma, || is_complex(lemma))
    }

    /// Cached resolver lookup; an unknown lemma is remembered as `None`.
    pub fn resolve(&self, lemma: &str) -> Option<EnrichmentRecord> {
        self.cache.record(lemma, || self.resolver.resolve(lemma))
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}
