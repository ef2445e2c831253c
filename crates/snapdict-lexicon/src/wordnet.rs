//! In-memory WordNet database read from the native "dict" directory layout.
//!
//! The whole database is parsed once at start: `index.<pos>` gives each
//! lemma's synset offsets in sense-frequency order, `data.<pos>` holds the
//! synsets themselves, and `<pos>.exc` lists irregular inflections.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use snapdict_core::traits::LexicalKnowledgeBase;
use snapdict_core::types::{PartOfSpeech, Synset, SynsetId, SynsetPos, Term, TermRef};
use snapdict_core::{Error, Result};
use tracing::{debug, info, warn};

use crate::morphy::{morphy, LemmaIndex};

const ANTONYM: &str = "!";

#[derive(Default)]
pub struct WordNet {
    index: HashMap<PartOfSpeech, HashMap<String, Vec<u32>>>,
    synsets: HashMap<SynsetId, Arc<Synset>>,
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
}

impl WordNet {
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::unavailable("WordNet database", format!("{} is not a directory", dir.display())));
        }
        let mut wordnet = Self::default();
        for pos in PartOfSpeech::ALL {
            let index_path = dir.join(format!("index.{}", pos.file_stem()));
            if !index_path.exists() {
                warn!("WordNet index not found: {}", index_path.display());
                continue;
            }
            wordnet.add_index(pos, &read(&index_path)?, &file_name(&index_path))?;

            let data_path = dir.join(format!("data.{}", pos.file_stem()));
            wordnet.add_data(pos, &read(&data_path)?, &file_name(&data_path))?;

            let exc_path = dir.join(format!("{}.exc", pos.file_stem()));
            if exc_path.exists() {
                wordnet.add_exceptions(pos, &read(&exc_path)?);
            } else {
                warn!("WordNet exception list not found: {}", exc_path.display());
            }
        }
        if wordnet.index.is_empty() {
            return Err(Error::unavailable("WordNet database", format!("no index files under {}", dir.display())));
        }
        info!(
            lemmas = wordnet.lemma_count(),
            synsets = wordnet.synset_count(),
            "WordNet loaded from {}",
            dir.display()
        );
        Ok(wordnet)
    }

    pub fn add_index(&mut self, pos: PartOfSpeech, content: &str, file: &str) -> Result<()> {
        let entries = self.index.entry(pos).or_default();
        for (n, line) in content.lines().enumerate() {
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let (lemma, offsets) = parse_index_line(line).map_err(|reason| Error::Parse {
                file: file.to_string(),
                line: n + 1,
                reason,
            })?;
            entries.insert(lemma, offsets);
        }
        Ok(())
    }

    pub fn add_data(&mut self, pos: PartOfSpeech, content: &str, file: &str) -> Result<()> {
        for (n, line) in content.lines().enumerate() {
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let synset = parse_data_line(pos, line).map_err(|reason| Error::Parse {
                file: file.to_string(),
                line: n + 1,
                reason,
            })?;
            self.synsets.insert(synset.id, Arc::new(synset));
        }
        Ok(())
    }

    pub fn add_exceptions(&mut self, pos: PartOfSpeech, content: &str) {
        let entries = self.exceptions.entry(pos).or_default();
        for line in content.lines() {
            let mut words = line.split_whitespace();
            let Some(form) = words.next() else { continue };
            let bases: Vec<String> = words.map(str::to_string).collect();
            if !bases.is_empty() {
                entries.insert(form.to_string(), bases);
            }
        }
    }

    /// Number of distinct (lemma, category) index entries.
    pub fn lemma_count(&self) -> usize {
        self.index.values().map(HashMap::len).sum()
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }
}

impl LemmaIndex for WordNet {
    fn contains(&self, form: &str, pos: PartOfSpeech) -> bool {
        self.index.get(&pos).is_some_and(|m| m.contains_key(form))
    }

    fn exceptions(&self, form: &str, pos: PartOfSpeech) -> Option<&[String]> {
        self.exceptions.get(&pos).and_then(|m| m.get(form)).map(Vec::as_slice)
    }
}

impl LexicalKnowledgeBase for WordNet {
    fn synsets_of(&self, lemma: &str) -> Vec<Arc<Synset>> {
        let lemma = lemma.to_lowercase().replace(' ', "_");
        let mut out = Vec::new();
        for pos in PartOfSpeech::ALL {
            let Some(entries) = self.index.get(&pos) else { continue };
            for form in morphy(self, &lemma, pos) {
                for &offset in entries.get(&form).into_iter().flatten() {
                    match self.synsets.get(&SynsetId { category: pos, offset }) {
                        Some(synset) => out.push(Arc::clone(synset)),
                        None => debug!(offset, pos = ?pos, "index points at a missing synset"),
                    }
                }
            }
        }
        out
    }

    fn term(&self, reference: &TermRef) -> Option<&Term> {
        self.synsets.get(&reference.synset).and_then(|s| s.terms.get(reference.index))
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::unavailable(format!("WordNet file {}", path.display()), e))
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...`
fn parse_index_line(line: &str) -> std::result::Result<(String, Vec<u32>), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let field = |i: usize| fields.get(i).copied().ok_or_else(|| format!("missing field {i}"));
    let lemma = field(0)?.to_string();
    let synset_cnt: usize = parse_num(field(2)?)?;
    let p_cnt: usize = parse_num(field(3)?)?;
    let first_offset = 4 + p_cnt + 2;
    let offsets = (first_offset..first_offset + synset_cnt)
        .map(|i| field(i).and_then(|f| parse_num::<u32>(f)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((lemma, offsets))
}

/// `offset lex_filenum ss_type w_cnt {word lex_id} p_cnt {ptr offset pos st} [frames] | gloss`
fn parse_data_line(category: PartOfSpeech, line: &str) -> std::result::Result<Synset, String> {
    let (columns, gloss) = line.split_once('|').ok_or("missing gloss separator")?;
    let fields: Vec<&str> = columns.split_whitespace().collect();
    let field = |i: usize| fields.get(i).copied().ok_or_else(|| format!("missing field {i}"));

    let offset: u32 = parse_num(field(0)?)?;
    let ss_type = field(2)?.chars().next().and_then(SynsetPos::from_char).ok_or("bad synset type")?;
    let w_cnt = usize::from_str_radix(field(3)?, 16).map_err(|e| format!("bad word count: {e}"))?;

    let mut terms = Vec::with_capacity(w_cnt);
    for w in 0..w_cnt {
        let name = strip_marker(field(4 + 2 * w)?);
        terms.push(Term { name: name.to_string(), antonyms: Vec::new() });
    }

    let mut cursor = 4 + 2 * w_cnt;
    let p_cnt: usize = parse_num(field(cursor)?)?;
    cursor += 1;
    for _ in 0..p_cnt {
        let symbol = field(cursor)?;
        let target_offset: u32 = parse_num(field(cursor + 1)?)?;
        let target_pos = field(cursor + 2)?.chars().next().and_then(SynsetPos::from_char).ok_or("bad pointer pos")?;
        let source_target = u16::from_str_radix(field(cursor + 3)?, 16).map_err(|e| format!("bad source/target: {e}"))?;
        cursor += 4;

        let source = usize::from(source_target >> 8);
        let target = usize::from(source_target & 0xff);
        if symbol != ANTONYM || source == 0 || target == 0 {
            continue;
        }
        if let Some(term) = terms.get_mut(source - 1) {
            term.antonyms.push(TermRef {
                synset: SynsetId { category: target_pos.category(), offset: target_offset },
                index: target - 1,
            });
        }
    }

    let (definition, examples) = split_gloss(gloss);
    Ok(Synset { id: SynsetId { category, offset }, pos: ss_type, definition, examples, terms })
}

fn parse_num<T: std::str::FromStr>(s: &str) -> std::result::Result<T, String>
where
    T::Err: std::fmt::Display,
{
    s.parse().map_err(|e| format!("bad number '{s}': {e}"))
}

/// Adjective syntactic markers such as `(a)`, `(p)` and `(ip)` are not part of the word.
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}

fn quoted() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]*)""#).expect("static regex"))
}

/// Splits a gloss into its definition and its quoted usage examples.
fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let examples = quoted().captures_iter(gloss).map(|c| c[1].to_string()).collect();
    let definition = quoted()
        .replace_all(gloss, "")
        .trim()
        .trim_matches(|c: char| c == ';' || c == ' ')
        .to_string();
    (definition, examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gloss_splits_definition_and_examples() {
        let (def, ex) = split_gloss(r#" make free from confusion; make clear; "Could you clarify?"; "yes""#);
        assert_eq!(def, "make free from confusion; make clear");
        assert_eq!(ex, vec!["Could you clarify?", "yes"]);

        let (def, ex) = split_gloss(" easy to perceive");
        assert_eq!(def, "easy to perceive");
        assert!(ex.is_empty());
    }

    #[test]
    fn markers_are_stripped() {
        assert_eq!(strip_marker("galore(ip)"), "galore");
        assert_eq!(strip_marker("singular(a)"), "singular");
        assert_eq!(strip_marker("plain"), "plain");
    }

    #[test]
    fn verb_frames_do_not_confuse_the_parser() {
        let line = "00000600 38 v 01 run 0 000 02 + 01 00 + 02 00 | move fast; \"run!\"";
        let synset = parse_data_line(PartOfSpeech::Verb, line).expect("parse");
        assert_eq!(synset.terms.len(), 1);
        assert_eq!(synset.pos, SynsetPos::Verb);
        assert_eq!(synset.examples, vec!["run!"]);
    }

    #[test]
    fn index_line_offsets_follow_pointer_symbols() {
        let (lemma, offsets) = parse_index_line("illuminate v 2 2 @ ~ 2 1 00000500 00000510").expect("parse");
        assert_eq!(lemma, "illuminate");
        assert_eq!(offsets, vec![500, 510]);
        assert!(parse_index_line("broken v 3 0 3 0 00000001").is_err());
    }
}
