//! WordNet's morphological base-form finder ("morphy") and the lemmatizer
//! built on it.

use std::collections::HashSet;
use std::sync::Arc;

use snapdict_core::traits::Lemmatizer;
use snapdict_core::types::PartOfSpeech;

/// What morphy needs from a lexical database.
pub trait LemmaIndex: Send + Sync {
    fn contains(&self, form: &str, pos: PartOfSpeech) -> bool;
    fn exceptions(&self, form: &str, pos: PartOfSpeech) -> Option<&[String]>;
}

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_RULES,
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective => ADJECTIVE_RULES,
        PartOfSpeech::Adverb => &[],
    }
}

fn apply_rules(forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for form in forms {
        for (old, new) in rules(pos) {
            if let Some(stem) = form.strip_suffix(old) {
                let candidate = format!("{stem}{new}");
                if seen.insert(candidate.clone()) {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

fn filter_forms<I: LemmaIndex + ?Sized>(index: &I, forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for form in forms {
        if index.contains(form, pos) && !out.contains(form) {
            out.push(form.clone());
        }
    }
    out
}

/// Every base form of `form` known to `index` for `pos`, in discovery order.
///
/// Exceptions short-circuit the rules. Otherwise the detachment rules are
/// applied once (keeping the form itself if indexed), then repeatedly to the
/// rewritten forms until a round yields something indexed.
pub fn morphy<I: LemmaIndex + ?Sized>(index: &I, form: &str, pos: PartOfSpeech) -> Vec<String> {
    if let Some(bases) = index.exceptions(form, pos) {
        let mut forms = vec![form.to_string()];
        forms.extend(bases.iter().cloned());
        return filter_forms(index, &forms, pos);
    }

    let mut forms = apply_rules(&[form.to_string()], pos);
    let mut first_round = vec![form.to_string()];
    first_round.extend(forms.iter().cloned());
    let results = filter_forms(index, &first_round, pos);
    if !results.is_empty() {
        return results;
    }

    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let results = filter_forms(index, &forms, pos);
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

/// Lemmatizer returning the shortest morphy candidate, or the word itself.
pub struct MorphyLemmatizer<I: LemmaIndex + ?Sized> {
    index: Arc<I>,
}

impl<I: LemmaIndex + ?Sized> MorphyLemmatizer<I> {
    pub fn new(index: Arc<I>) -> Self {
        Self { index }
    }
}

impl<I: LemmaIndex + ?Sized> Lemmatizer for MorphyLemmatizer<I> {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        morphy(self.index.as_ref(), word, pos)
            .into_iter()
            .reduce(|best, candidate| if candidate.chars().count() < best.chars().count() { candidate } else { best })
            .unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Toy {
        lemmas: HashSet<(String, PartOfSpeech)>,
        exceptions: HashMap<(String, PartOfSpeech), Vec<String>>,
    }

    impl LemmaIndex for Toy {
        fn contains(&self, form: &str, pos: PartOfSpeech) -> bool {
            self.lemmas.contains(&(form.to_string(), pos))
        }
        fn exceptions(&self, form: &str, pos: PartOfSpeech) -> Option<&[String]> {
            self.exceptions.get(&(form.to_string(), pos)).map(Vec::as_slice)
        }
    }

    fn toy(words: &[(&str, PartOfSpeech)]) -> Toy {
        Toy { lemmas: words.iter().map(|(w, p)| (w.to_string(), *p)).collect(), ..Toy::default() }
    }

    #[test]
    fn rules_apply_repeatedly_until_indexed() {
        // "boxes" -> "boxe"/"box" in one round; "glasses" -> "glasse"/"glass"
        let index = toy(&[("box", PartOfSpeech::Noun), ("glass", PartOfSpeech::Noun)]);
        assert_eq!(morphy(&index, "boxes", PartOfSpeech::Noun), vec!["box"]);
        assert_eq!(morphy(&index, "glasses", PartOfSpeech::Noun), vec!["glass"]);
    }

    #[test]
    fn shortest_candidate_wins() {
        let index = Arc::new(toy(&[("axes", PartOfSpeech::Noun), ("ax", PartOfSpeech::Noun)]));
        // "axes" itself is indexed, so rules output joins it in the first round
        let lemmatizer = MorphyLemmatizer::new(index);
        assert_eq!(lemmatizer.lemmatize("axes", PartOfSpeech::Noun), "ax");
    }

    #[test]
    fn unknown_words_lemmatize_to_themselves() {
        let lemmatizer = MorphyLemmatizer::new(Arc::new(Toy::default()));
        assert_eq!(lemmatizer.lemmatize("zorblaxian", PartOfSpeech::Noun), "zorblaxian");
        assert_eq!(lemmatizer.lemmatize("quickly", PartOfSpeech::Adverb), "quickly");
    }

    #[test]
    fn exceptions_bypass_rules() {
        let mut index = toy(&[("go", PartOfSpeech::Verb), ("wen", PartOfSpeech::Verb)]);
        index.exceptions.insert(("went".to_string(), PartOfSpeech::Verb), vec!["go".to_string()]);
        assert_eq!(morphy(&index, "went", PartOfSpeech::Verb), vec!["go"]);
    }
}
