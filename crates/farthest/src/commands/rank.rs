//! Rank command: words that describe a phrase, from dictionary definitions.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use farthest_core::StopWords;
use farthest_core::config::Config;
use farthest_core::rank::{self, DefinitionFile, WordScore};

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Phrase to rank (multiple words are joined with spaces).
    #[arg(required = true, num_args = 1..)]
    pub phrase: Vec<String>,

    /// Saved dictionary responses: JSON object mapping each term to its `{"list": [...]}`.
    #[arg(short, long, value_name = "FILE")]
    pub definitions: Utf8PathBuf,

    /// Newline-separated stop-word list (overrides config and the built-in list).
    #[arg(long, value_name = "FILE", conflicts_with = "no_stop_words")]
    pub stop_words: Option<Utf8PathBuf>,

    /// Score every word, including stop words.
    #[arg(long)]
    pub no_stop_words: bool,
}

#[derive(Serialize)]
struct RankReport<'a> {
    phrase: &'a str,
    words: Vec<WordScore>,
}

/// Build the stop-word set once, from flags, then config, then the built-in list.
fn load_stop_words(args: &RankArgs, config: &Config) -> anyhow::Result<StopWords> {
    if args.no_stop_words {
        return Ok(StopWords::none());
    }
    match args.stop_words.as_ref().or(config.stop_words_file.as_ref()) {
        Some(path) => Ok(StopWords::from_file(path)?),
        None => Ok(StopWords::builtin()),
    }
}

/// Rank and print the words that describe a phrase, lowest score first.
#[instrument(name = "cmd_rank", skip_all, fields(definitions = %args.definitions))]
pub fn cmd_rank(args: RankArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let phrase = args.phrase.join(" ");
    debug!(phrase = %phrase, "executing rank command");

    let stop_words = load_stop_words(&args, config)?;
    let source = DefinitionFile::load(&args.definitions)?;
    let ranking = rank::rank(&phrase, &source, &stop_words)
        .with_context(|| format!("failed to rank {phrase:?}"))?;
    let words = ranking.sorted();

    if global_json {
        let report = RankReport {
            phrase: &phrase,
            words,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if words.is_empty() {
        println!("{} no definitions found for {phrase:?}", "SKIP:".if_supports_color(Stream::Stdout, |t| t.dimmed()));
    } else {
        for ws in &words {
            println!("{} : {}", ws.word, ws.score);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RankArgs {
        RankArgs {
            phrase: vec!["naw".into(), "son".into()],
            definitions: Utf8PathBuf::from("definitions.json"),
            stop_words: None,
            no_stop_words: false,
        }
    }

    #[test]
    fn builtin_stop_words_by_default() {
        let words = load_stop_words(&args(), &Config::default()).unwrap();
        assert!(words.contains("the"));
    }

    #[test]
    fn no_stop_words_flag_disables_filtering() {
        let mut a = args();
        a.no_stop_words = true;
        assert!(load_stop_words(&a, &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn configured_file_is_used() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("stop.txt")).unwrap();
        std::fs::write(path.as_std_path(), "homie\n").unwrap();
        let config = Config {
            stop_words_file: Some(path),
            ..Config::default()
        };

        let words = load_stop_words(&args(), &config).unwrap();
        assert!(words.contains("homie"));
        assert!(!words.contains("the"));
    }
}
