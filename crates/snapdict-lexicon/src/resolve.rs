use std::sync::Arc;

use snapdict_core::traits::LexicalKnowledgeBase;
use snapdict_core::types::{EnrichmentRecord, TraversalLimits};

/// Builds enrichment records with a fixed cap on graph exploration. Cost is
/// bounded by the limits, not by how connected a word is.
#[derive(Clone)]
pub struct LexicalResolver {
    kb: Arc<dyn LexicalKnowledgeBase>,
    limits: TraversalLimits,
}

impl LexicalResolver {
    pub fn new(kb: Arc<dyn LexicalKnowledgeBase>, limits: TraversalLimits) -> Self {
        Self { kb, limits }
    }

    /// `None` when the knowledge base has no sense for `lemma`.
    pub fn resolve(&self, lemma: &str) -> Option<EnrichmentRecord> {
        let senses = self.kb.synsets_of(lemma);
        let first = senses.first()?;

        let mut synonyms: Vec<String> = Vec::new();
        'senses: for sense in senses.iter().take(self.limits.synonym_senses) {
            for term in sense.terms.iter().take(self.limits.terms_per_sense) {
                if synonyms.len() >= self.limits.max_synonyms {
                    break 'senses;
                }
                let name = display_name(&term.name);
                if name.to_lowercase() == lemma.to_lowercase() || synonyms.contains(&name) {
                    continue;
                }
                synonyms.push(name);
            }
        }

        let mut antonyms: Vec<String> = Vec::new();
        'terms: for sense in senses.iter().take(self.limits.antonym_senses) {
            for term in &sense.terms {
                for reference in &term.antonyms {
                    if antonyms.len() >= self.limits.max_antonyms {
                        break 'terms;
                    }
                    let Some(antonym) = self.kb.term(reference) else { continue };
                    let name = display_name(&antonym.name);
                    if !antonyms.contains(&name) {
                        antonyms.push(name);
                    }
                }
            }
        }

        Some(EnrichmentRecord {
            definition: first.definition.clone(),
            example: first.examples.first().cloned().unwrap_or_default(),
            part_of_speech: first.pos.as_str().to_string(),
            synonyms,
            antonyms,
        })
    }
}

/// Knowledge-base spelling to reader spelling: `light_up` becomes `light up`.
pub fn display_name(name: &str) -> String {
    name.replace('_', " ")
}
