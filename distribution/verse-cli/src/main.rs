//! Terminal host for VerseKit
//!
//! `lookup` resolves a reference once. `watch` treats every stdin line as a
//! clipboard change, so entering the same line twice within the gesture
//! window prints the reference URL.
//!
//! Run with: cargo run -p verse-cli -- lookup "Joh 3,16"

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use versekit::{
    usage_text, ActionSink, ClipboardReadError, ClipboardReader, Configuration, LookupOutcome,
    Notification, TriggerSettings, VersePipeline, VerseWatcher,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration (SupportedLanguages, BibleUrls, BookMappings).
    /// Defaults to the bundled German and English tables.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the first reference in TEXT and print its URL
    Lookup {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Read stdin lines as clipboard changes and print URLs of double copies
    Watch,
    /// Print the supported reference formats
    Usage,
}

/// Prints URLs to stdout and notifications to stderr
struct PrintSink;

impl ActionSink for PrintSink {
    fn open_url(&self, url: String) {
        println!("{}", url);
    }

    fn notify(&self, notification: Notification) {
        eprintln!("{}: {}", notification.title, notification.message);
    }
}

/// One stdin line standing in for the clipboard
struct LineClipboard(String);

impl ClipboardReader for LineClipboard {
    fn read_text(&self) -> Result<String, ClipboardReadError> {
        Ok(self.0.clone())
    }
}

fn bundled_configuration() -> Configuration {
    Configuration {
        supported_languages: book_tables::DEFAULT_LANGUAGES
            .iter()
            .map(|language| language.to_string())
            .collect(),
        bible_urls: book_tables::DEFAULT_BIBLE_URLS
            .iter()
            .map(|(language, url)| (language.to_string(), url.to_string()))
            .collect(),
        book_mappings: book_tables::book_mappings()
            .into_iter()
            .map(|(language, mapping)| (language, mapping.into_iter().collect()))
            .collect(),
        trigger: TriggerSettings::default(),
    }
}

fn load_configuration(path: Option<&PathBuf>) -> Result<Configuration> {
    let Some(path) = path else {
        return Ok(bundled_configuration());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Configuration::from_json(&json).with_context(|| format!("Invalid configuration in {}", path.display()))
}

async fn watch(config: Configuration) -> Result<()> {
    let watcher = VerseWatcher::new(config, Arc::new(PrintSink))?;
    eprintln!("{}", usage_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        watcher.on_clipboard_change(Arc::new(LineClipboard(line)));
    }

    watcher.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_configuration(args.config.as_ref())?;

    match args.command {
        Command::Lookup { text } => {
            let pipeline = VersePipeline::new(&config).context("Invalid configuration")?;
            match pipeline.lookup(&text.join(" ")) {
                LookupOutcome::Found { reference, url } => {
                    eprintln!("{} ({})", reference, reference.language);
                    println!("{}", url);
                }
                LookupOutcome::NoReference => {
                    eprintln!("No Bible reference found");
                    std::process::exit(1);
                }
            }
        }
        Command::Watch => watch(config).await?,
        Command::Usage => println!("{}", usage_text()),
    }

    Ok(())
}
