//! Fixed English word tables used by the normalizer, tokenizer and classifier.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Contraction expansions, applied in this order.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("could've", "could have"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("mightn't", "might not"),
    ("might've", "might have"),
    ("mustn't", "must not"),
    ("must've", "must have"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("should've", "should have"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("would've", "would have"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// English function words.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "should",
    "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn",
    "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won",
    "wouldn", "cannot", "would", "could", "shall", "might", "must",
];

/// Frequent words that pass the length filter but are not worth looking up.
pub const COMMON_WORDS: &[&str] = &[
    "about", "above", "across", "actually", "after", "again", "against", "almost", "along", "already",
    "although", "always", "among", "another", "anything", "around", "because", "become", "before",
    "began", "begin", "behind", "being", "believe", "below", "better", "between", "beyond", "bring",
    "brought", "business", "called", "cannot", "certain", "change", "children", "different", "during",
    "early", "enough", "every", "everyone", "everything", "example", "family", "father", "first",
    "following", "found", "friend", "general", "government", "great", "group", "having", "however",
    "hundred", "important", "information", "interest", "large", "later", "learn", "little", "looked",
    "making", "minute", "moment", "money", "morning", "mother", "never", "nothing", "number", "often",
    "other", "people", "perhaps", "person", "place", "point", "possible", "problem", "program",
    "question", "really", "right", "school", "second", "seemed", "several", "should", "simple", "small",
    "something", "sometimes", "started", "still", "story", "student", "system", "there", "these",
    "thing", "things", "think", "thought", "three", "today", "together", "toward", "under", "until",
    "usually", "water", "where", "which", "while", "without", "woman", "world", "would", "years",
    "young",
];

pub fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

pub fn common_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| COMMON_WORDS.iter().copied().collect())
}

pub fn is_stopword(word: &str) -> bool {
    stopwords().contains(word)
}

pub fn is_common_word(word: &str) -> bool {
    common_words().contains(word)
}
