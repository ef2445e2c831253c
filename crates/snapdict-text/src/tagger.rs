//! Part-of-speech taggers emitting Penn Treebank tags.
//!
//! `PerceptronTagger` loads an averaged perceptron model exported as three
//! JSON files (`<prefix>.weights.json`, `<prefix>.tagdict.json`,
//! `<prefix>.classes.json`). `SuffixTagger` needs no model and is used when
//! none is configured.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use snapdict_core::traits::Tagger;
use snapdict_core::{Error, Result};
use tracing::info;

const START: [&str; 2] = ["-START-", "-START2-"];
const END: [&str; 2] = ["-END-", "-END2-"];

pub struct PerceptronTagger {
    weights: HashMap<String, HashMap<String, f64>>,
    tagdict: HashMap<String, String>,
    classes: Vec<String>,
}

impl PerceptronTagger {
    pub fn new(
        weights: HashMap<String, HashMap<String, f64>>,
        tagdict: HashMap<String, String>,
        classes: Vec<String>,
    ) -> Result<Self> {
        if classes.is_empty() {
            return Err(Error::unavailable("tagger model", "no classes"));
        }
        Ok(Self { weights, tagdict, classes })
    }

    pub fn load(dir: &Path, prefix: &str) -> Result<Self> {
        let weights = read_json(&dir.join(format!("{prefix}.weights.json")))?;
        let tagdict = read_json(&dir.join(format!("{prefix}.tagdict.json")))?;
        let classes = read_json(&dir.join(format!("{prefix}.classes.json")))?;
        let tagger = Self::new(weights, tagdict, classes)?;
        info!(
            features = tagger.weights.len(),
            tagdict = tagger.tagdict.len(),
            classes = tagger.classes.len(),
            "perceptron tagger loaded from {}",
            dir.display()
        );
        Ok(tagger)
    }

    fn predict(&self, features: &[String]) -> &str {
        let mut scores: HashMap<&str, f64> = HashMap::new();
        for feature in features {
            let Some(weights) = self.weights.get(feature) else { continue };
            for (label, weight) in weights {
                *scores.entry(label.as_str()).or_insert(0.0) += weight;
            }
        }
        let score = |label: &str| scores.get(label).copied().unwrap_or(0.0);
        self.classes
            .iter()
            .max_by(|a, b| score(a).total_cmp(&score(b)).then_with(|| a.cmp(b)))
            .map(String::as_str)
            .unwrap_or("NN")
    }
}

impl Tagger for PerceptronTagger {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        let mut context: Vec<String> = START.iter().map(|s| s.to_string()).collect();
        context.extend(tokens.iter().map(|w| normalize_word(w)));
        context.extend(END.iter().map(|s| s.to_string()));

        let mut prev = START[0].to_string();
        let mut prev2 = START[1].to_string();
        let mut out = Vec::with_capacity(tokens.len());
        for (i, word) in tokens.iter().enumerate() {
            let tag = match self.tagdict.get(word) {
                Some(tag) => tag.clone(),
                None => self.predict(&features(i + START.len(), word, &context, &prev, &prev2)).to_string(),
            };
            out.push((word.clone(), tag.clone()));
            prev2 = std::mem::replace(&mut prev, tag);
        }
        out
    }
}

fn normalize_word(word: &str) -> String {
    let first = word.chars().next();
    if word.contains('-') && first != Some('-') {
        "!HYPHEN".to_string()
    } else if word.chars().count() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        "!YEAR".to_string()
    } else if first.is_some_and(|c| c.is_ascii_digit()) {
        "!DIGITS".to_string()
    } else {
        word.to_lowercase()
    }
}

fn suffix(word: &str, n: usize) -> &str {
    match word.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

fn features(i: usize, word: &str, context: &[String], prev: &str, prev2: &str) -> Vec<String> {
    let pref1: String = word.chars().take(1).collect();
    vec![
        "bias".to_string(),
        format!("i suffix {}", suffix(word, 3)),
        format!("i pref1 {}", pref1),
        format!("i-1 tag {}", prev),
        format!("i-2 tag {}", prev2),
        format!("i tag+i-2 tag {} {}", prev, prev2),
        format!("i word {}", context[i]),
        format!("i-1 tag+i word {} {}", prev, context[i]),
        format!("i-1 word {}", context[i - 1]),
        format!("i-1 suffix {}", suffix(&context[i - 1], 3)),
        format!("i-2 word {}", context[i - 2]),
        format!("i+1 word {}", context[i + 1]),
        format!("i+1 suffix {}", suffix(&context[i + 1], 3)),
        format!("i+2 word {}", context[i + 2]),
    ]
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| Error::unavailable(format!("tagger model {}", path.display()), e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::unavailable(format!("tagger model {}", path.display()), e))
}

/// Rule-based fallback keyed on English derivational and inflectional suffixes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixTagger;

const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ness", "NN"),
    ("ment", "NN"),
    ("tion", "NN"),
    ("sion", "NN"),
    ("ity", "NN"),
    ("ism", "NN"),
    ("ist", "NN"),
    ("ship", "NN"),
    ("ous", "JJ"),
    ("ful", "JJ"),
    ("ive", "JJ"),
    ("able", "JJ"),
    ("ible", "JJ"),
    ("less", "JJ"),
    ("ary", "JJ"),
    ("ical", "JJ"),
    ("ic", "JJ"),
    ("al", "JJ"),
    ("ly", "RB"),
    ("ing", "VBG"),
    ("ed", "VBD"),
    ("ize", "VB"),
    ("ise", "VB"),
    ("ify", "VB"),
    ("ate", "VB"),
    ("ss", "NN"),
    ("us", "NN"),
    ("s", "NNS"),
];

impl SuffixTagger {
    pub fn tag_word(word: &str) -> &'static str {
        let len = word.chars().count();
        SUFFIX_RULES
            .iter()
            .find(|(suffix, _)| len > suffix.chars().count() + 2 && word.ends_with(suffix))
            .map(|(_, tag)| *tag)
            .unwrap_or("NN")
    }
}

impl Tagger for SuffixTagger {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        tokens.iter().map(|w| (w.clone(), Self::tag_word(w).to_string())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_counts_characters() {
        assert_eq!(suffix("running", 3), "ing");
        assert_eq!(suffix("ab", 3), "ab");
        assert_eq!(suffix("naïve", 3), "ïve");
        assert_eq!(suffix("", 3), "");
    }

    #[test]
    fn word_normalization_classes() {
        assert_eq!(normalize_word("well-known"), "!HYPHEN");
        assert_eq!(normalize_word("-dash"), "-dash");
        assert_eq!(normalize_word("1999"), "!YEAR");
        assert_eq!(normalize_word("42nd"), "!DIGITS");
        assert_eq!(normalize_word("Word"), "word");
    }
}
