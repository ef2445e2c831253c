use std::fs;
use tempfile::TempDir;

use snapdict_core::config::{resolve_with_base, Config};
use snapdict_core::types::{PartOfSpeech, SynsetPos, Token, TraversalLimits};

#[test]
fn settings_default_when_no_files_present() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path(), "test").expect("load");
    let settings = config.settings().expect("settings");

    assert_eq!(settings.cache.lemma_capacity, 10_000);
    assert_eq!(settings.cache.shards, 16);
    assert!(settings.tagger.model_dir.is_none(), "no model configured means suffix tagger");
    assert_eq!(settings.traversal, TraversalLimits::default());
    assert_eq!(settings.lexicon.wordnet_dir, tmp.path().join("data/wordnet"));
}

#[test]
fn env_file_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[lexicon]\nwordnet_dir = \"dict\"\n\n[cache]\nlemma_capacity = 500\ndocument_capacity = 8\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[cache]\nlemma_capacity = 50\n").unwrap();

    let config = Config::load_from(tmp.path(), "test").expect("load");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.cache.lemma_capacity, 50, "test file wins over base file");
    assert_eq!(settings.cache.document_capacity, 8, "untouched keys survive the merge");
    assert_eq!(settings.lexicon.wordnet_dir, tmp.path().join("dict"));

    let capacity: usize = config.get("cache.lemma_capacity").expect("get");
    assert_eq!(capacity, 50);
}

#[test]
fn zero_capacity_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[cache]\nlemma_capacity = 0\n").unwrap();
    let config = Config::load_from(tmp.path(), "prod").expect("load");
    assert!(config.settings().is_err());
}

#[test]
fn absolute_paths_are_not_rebased() {
    let tmp = TempDir::new().unwrap();
    let abs = tmp.path().join("elsewhere");
    assert_eq!(resolve_with_base(std::path::Path::new("/base"), abs.to_string_lossy()), abs);
    assert_eq!(resolve_with_base(std::path::Path::new("/base"), "rel"), std::path::PathBuf::from("/base/rel"));
}

#[test]
fn treebank_tags_map_by_initial_letter() {
    assert_eq!(PartOfSpeech::from_treebank("JJR"), PartOfSpeech::Adjective);
    assert_eq!(PartOfSpeech::from_treebank("VBG"), PartOfSpeech::Verb);
    assert_eq!(PartOfSpeech::from_treebank("RB"), PartOfSpeech::Adverb);
    assert_eq!(PartOfSpeech::from_treebank("NNS"), PartOfSpeech::Noun);
    assert_eq!(PartOfSpeech::from_treebank("FW"), PartOfSpeech::Noun, "unrecognized tags default to noun");
    assert_eq!(PartOfSpeech::from_treebank(""), PartOfSpeech::Noun);

    let token = Token::new("running", "VBG");
    assert_eq!(token.pos, PartOfSpeech::Verb);
}

#[test]
fn satellites_share_the_adjective_file() {
    assert_eq!(SynsetPos::from_char('s'), Some(SynsetPos::AdjectiveSatellite));
    assert_eq!(SynsetPos::AdjectiveSatellite.category(), PartOfSpeech::Adjective);
    assert_eq!(SynsetPos::AdjectiveSatellite.as_str(), "s");
    assert_eq!(SynsetPos::from_char('x'), None);
}

#[test]
fn results_serialize_with_seconds_and_stable_field_names() {
    use snapdict_core::types::{ComplexWords, EnrichmentRecord, PipelineResult};
    use std::time::Duration;

    let record = EnrichmentRecord {
        definition: "a remarkable development".into(),
        example: String::new(),
        part_of_speech: "n".into(),
        synonyms: vec!["marvel".into()],
        antonyms: Vec::new(),
    };
    let mut complex_words = ComplexWords::new();
    complex_words.insert("phenomenon".into(), record.clone());
    let result = PipelineResult {
        complex_words,
        original_text: "A phenomenon.".into(),
        processing_time: Duration::from_millis(1500),
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["processing_time"], 1.5);
    assert_eq!(json["original_text"], "A phenomenon.");
    let back: EnrichmentRecord = serde_json::from_value(json["complex_words"]["phenomenon"].clone()).unwrap();
    assert_eq!(back, record);
}
