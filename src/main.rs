//! # Quire - A Modal Plain-Text Editor
//!
//! Headless host for the Quire editing engine: keys go in as Vim-style
//! notation, the document is saved to a file, and the final state can be
//! dumped as JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! # Type a line and save it
//! cargo run -- notes.txt --keys 'ihello<Esc>:wq<CR>'
//!
//! # One tick per stdin line; a mode key takes its own line
//! printf 'i\nhello\n<Esc>\n:\nw<CR>\n' | cargo run -- notes.txt --dump
//! ```

use anyhow::Context;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quire_core::{
    Config, EditorEvent, Editor, EventHandler, FileStore, KeyEvent, Lifecycle, Persistence,
    QuitSignal, parse_keys,
};

/// Quire - a small modal text editor
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to edit (defaults to `files.default_path` from the config)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keys to replay, one tick per key; stdin is read when absent
    #[arg(short, long, value_name = "KEYS")]
    keys: Option<String>,

    /// Print the final editor state as JSON
    #[arg(long)]
    dump: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    tracing::info!("Starting Quire v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };

    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.files.default_path.clone());
    let store = FileStore::new(&path);
    let buffer = store
        .load(config.buffer_config())
        .with_context(|| format!("opening {}", path.display()))?;

    let mut editor = Editor::with_config(config, buffer, store, QuitSignal::new())?;

    match &args.keys {
        Some(keys) => {
            run(&mut editor, parse_keys(keys).into_iter().map(|k| vec![k]));
        }
        None => {
            // Lines are pulled one at a time so nothing is read past `:q`
            let mut read_error = None;
            let ticks = std::io::stdin()
                .lock()
                .lines()
                .map_while(|line| line.map_err(|e| read_error = Some(e)).ok())
                .map(|line| parse_keys(&line));
            run(&mut editor, ticks);
            if let Some(e) = read_error {
                return Err(e).context("reading keys from stdin");
            }
        }
    }

    if args.dump {
        println!("{}", editor.snapshot().to_json()?);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Feeds every batch to the editor until input runs out or `:q` is dispatched.
///
/// Save failures are echoed to stderr. Returns the
/// number of ticks processed.
fn run<P: Persistence, L: Lifecycle>(
    editor: &mut Editor<P, L>,
    ticks: impl IntoIterator<Item = Vec<KeyEvent>>,
) -> usize {
    let mut events = EventHandler::new(editor.subscribe());
    let mut count = 0;

    for batch in ticks {
        editor.tick(&batch);
        count += 1;

        for event in events.drain() {
            match event {
                EditorEvent::SaveFailed(message) => eprintln!("{message}"),
                EditorEvent::UnknownCommand(name) => tracing::debug!("Ignored :{name}"),
                EditorEvent::DocumentSaved(path) => tracing::info!("Wrote {}", path.display()),
                _ => {}
            }
        }

        if editor.should_quit() {
            break;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["quire"]);
        assert!(args.file.is_none());
        assert!(args.keys.is_none());
        assert!(!args.dump);
    }

    #[test]
    fn test_args_with_file_and_keys() {
        let args = Args::parse_from(["quire", "notes.txt", "--keys", "ix<Esc>", "-vv"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.keys.as_deref(), Some("ix<Esc>"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_run_stops_at_quit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut editor = Editor::new(FileStore::new(&path), QuitSignal::new());

        let ticks = parse_keys("ihi<Esc>:wq<CR>ignored")
            .into_iter()
            .map(|k| vec![k]);
        let processed = run(&mut editor, ticks);

        assert_eq!(processed, 8);
        assert!(editor.should_quit());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\n");
    }

    #[test]
    fn test_run_pulls_no_input_after_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = Editor::new(FileStore::new(dir.path().join("x.txt")), QuitSignal::new());

        let mut pulled = 0;
        let ticks = [":", "q<CR>", "ix", "<Esc>"]
            .into_iter()
            .inspect(|_| pulled += 1)
            .map(parse_keys);
        run(&mut editor, ticks);

        assert_eq!(pulled, 2);
        assert!(editor.should_quit());
        assert!(editor.buffer().is_empty());
    }

    #[test]
    fn test_run_line_batches() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = Editor::new(FileStore::new(dir.path().join("x.txt")), QuitSignal::new());

        let ticks = ["i", "abc", "<BS>", "<Esc>"].map(parse_keys);
        run(&mut editor, ticks);

        assert_eq!(editor.snapshot().lines, vec!["ab"]);
    }
}
