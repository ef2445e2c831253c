use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use snapdict_core::config::Config;
use snapdict_core::types::PartOfSpeech;
use snapdict_pipeline::{Fingerprint, Pipeline};
use tracing::{info, warn};
use walkdir::WalkDir;

const USAGE: &str = "Usage: snapdict <extract <file|-> | scan <dir> | lookup <word>>";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn read_input(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(arg).with_context(|| format!("reading {arg}"))
}

fn scan(pipeline: &Pipeline, dir: &Path) -> anyhow::Result<()> {
    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "txt"))
        .map(|e| e.into_path())
        .collect();
    info!("scanning {} text files under {}", files.len(), dir.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let mut results = serde_json::Map::new();
    for path in &files {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                pb.inc(1);
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let result = pipeline.process_keyed(Fingerprint::of_bytes(&bytes), &text);
        pb.set_message(format!("{} words", result.complex_words.len()));
        results.insert(path.display().to_string(), serde_json::to_value(result.as_ref())?);
        pb.inc(1);
    }
    pb.finish_with_message("done");
    let stats = pipeline.cache().stats();
    info!(
        document_hits = stats.documents.hits,
        lemma_hits = stats.records.hits,
        lemma_misses = stats.records.misses,
        "scan complete"
    );
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let (cmd, args) = parse_args();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    let pipeline = Pipeline::from_settings(&settings)?;

    match cmd.as_str() {
        "extract" => {
            let input = args.first().map(String::as_str).unwrap_or("-");
            let text = read_input(input)?;
            let result = pipeline.process(&text);
            println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        }
        "scan" => {
            let Some(dir) = args.first() else { bail!("Usage: snapdict scan <dir>") };
            scan(&pipeline, Path::new(dir))?;
        }
        "lookup" => {
            let Some(word) = args.first() else { bail!("Usage: snapdict lookup <word>") };
            let word = word.to_lowercase();
            let lemmas: serde_json::Map<String, serde_json::Value> = PartOfSpeech::ALL
                .iter()
                .map(|&pos| {
                    let lemma = pipeline.lemmatize(&word, pos);
                    let complex = pipeline.is_complex(&lemma);
                    (pos.as_char().to_string(), json!({ "lemma": lemma, "complex": complex }))
                })
                .collect();
            let lemma = pipeline.lemma_of(&word);
            let report = json!({
                "word": word,
                "lemma": lemma,
                "complex": pipeline.is_complex(&lemma),
                "lemmas": lemmas,
                "record": pipeline.resolve(&lemma),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            eprintln!("Unknown command: {cmd}\n{USAGE}");
            std::process::exit(1);
        }
    }
    Ok(())
}
