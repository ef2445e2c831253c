//! Domain types shared by the text, lexicon and pipeline crates.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Canonical dictionary base form. Primary key for caches and output.
pub type Lemma = String;

/// The output mapping of a pipeline run.
pub type ComplexWords = HashMap<Lemma, EnrichmentRecord>;

/// Coarse part of speech understood by the lemmatizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order used when a word is queried without a category.
    pub const ALL: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Maps a Penn Treebank tag by its initial letter. Anything unrecognized
    /// (including an empty tag) is a noun.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => Self::Adjective,
            Some('V') => Self::Verb,
            Some('R') => Self::Adverb,
            _ => Self::Noun,
        }
    }

    /// WordNet file suffix (`index.noun`, `verb.exc`, ...).
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Verb => 'v',
            Self::Adjective => 'a',
            Self::Adverb => 'r',
        }
    }
}

/// Part of speech of a synset as recorded by the knowledge base. Adjective
/// satellites live alongside head adjectives but keep their own marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynsetPos {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

impl SynsetPos {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Noun),
            'v' => Some(Self::Verb),
            'a' => Some(Self::Adjective),
            's' => Some(Self::AdjectiveSatellite),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::AdjectiveSatellite => "s",
            Self::Adverb => "r",
        }
    }

    /// Coarse category, which is also the data file the synset lives in.
    pub fn category(self) -> PartOfSpeech {
        match self {
            Self::Noun => PartOfSpeech::Noun,
            Self::Verb => PartOfSpeech::Verb,
            Self::Adjective | Self::AdjectiveSatellite => PartOfSpeech::Adjective,
            Self::Adverb => PartOfSpeech::Adverb,
        }
    }
}

impl fmt::Display for SynsetPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized word retained by the tokenizer together with its tag.
///
/// - `tag`: raw tagger output (Penn Treebank)
/// - `pos`: the coarse category derived from `tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub tag: String,
    pub pos: PartOfSpeech,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let pos = PartOfSpeech::from_treebank(&tag);
        Self { word: word.into(), tag, pos }
    }
}

/// Address of a synset inside the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SynsetId {
    pub category: PartOfSpeech,
    pub offset: u32,
}

/// Address of one member term: a synset plus the term's position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub synset: SynsetId,
    pub index: usize,
}

/// A member of a synset. `name` keeps the knowledge base spelling, with
/// underscores for multi-word terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub antonyms: Vec<TermRef>,
}

/// One sense: a set of terms sharing a meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    pub id: SynsetId,
    pub pos: SynsetPos,
    pub definition: String,
    pub examples: Vec<String>,
    pub terms: Vec<Term>,
}

/// Lexical metadata for one lemma. Built once by the resolver and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    pub definition: String,
    pub example: String,
    pub part_of_speech: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

/// Upper bounds on how much of the lexical graph the resolver explores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalLimits {
    pub synonym_senses: usize,
    pub terms_per_sense: usize,
    pub max_synonyms: usize,
    pub antonym_senses: usize,
    pub max_antonyms: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self { synonym_senses: 2, terms_per_sense: 3, max_synonyms: 3, antonym_senses: 1, max_antonyms: 2 }
    }
}

/// Everything one pipeline run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub complex_words: ComplexWords,
    pub original_text: String,
    #[serde(serialize_with = "duration_as_secs")]
    pub processing_time: Duration,
}

fn duration_as_secs<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
