mod commands;

use std::fmt;
use std::sync::Arc;

use quiz_core::model::{DataSetSource, DataSetSourceDraft, FilterChange, SourceConfigError};
use services::loader::SkipReason;
use services::speech::DEFAULT_MAX_CHARS;
use services::{
    CurrentQuestion, LoadReport, SessionLoadService, SessionSnapshot, Speaker, SpeechError,
    SpeechQueue, StudySession, Utterance,
};
use storage::{FileStore, Storage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use commands::{Command, HELP, ResetScope};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidSource(SourceConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidSource(e) => write!(f, "invalid data set source: {e}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  quiz [--set <name>] [--sheet-url <url>] [--file <path>] [--store <dir>] [--shuffle] [--seed <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --set      last opened set, else \"default\"");
    eprintln!("  --store    .quiz-store");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SET, QUIZ_SHEET_URL, QUIZ_FILE, QUIZ_STORE_DIR, RUST_LOG");
}

struct Args {
    set: Option<String>,
    sheet_url: Option<String>,
    file: Option<String>,
    store_dir: String,
    shuffle: bool,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut parsed = Self {
            set: env("QUIZ_SET"),
            sheet_url: env("QUIZ_SHEET_URL"),
            file: env("QUIZ_FILE"),
            store_dir: env("QUIZ_STORE_DIR").unwrap_or_else(|| ".quiz-store".into()),
            shuffle: false,
            seed: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--set" => parsed.set = Some(require_value(args, "--set")?),
                "--sheet-url" => parsed.sheet_url = Some(require_value(args, "--sheet-url")?),
                "--file" => parsed.file = Some(require_value(args, "--file")?),
                "--store" => parsed.store_dir = require_value(args, "--store")?,
                "--shuffle" => parsed.shuffle = true,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Source for `name`, sharing the sheet and file locations given on the command line.
    fn source_for(&self, name: &str) -> Result<DataSetSource, ArgsError> {
        DataSetSourceDraft {
            name: name.to_owned(),
            sheet_url: self.sheet_url.clone(),
            local_path: self.file.clone(),
        }
        .validate()
        .map_err(ArgsError::InvalidSource)
    }
}

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

fn render(snapshot: &SessionSnapshot) {
    let progress = snapshot.progress;
    println!();
    println!(
        "[{}] {}/{} answered ({}%)",
        snapshot.set_name.as_deref().unwrap_or("-"),
        progress.answered,
        progress.total,
        progress.percent
    );
    match &snapshot.current {
        CurrentQuestion::Empty => println!("No questions match the current filters."),
        CurrentQuestion::Question {
            record,
            index,
            revealed,
            bookmarked,
        } => {
            let mut heading = format!("#{} {}", index + 1, record.category());
            if !record.sub_category().is_empty() {
                heading.push_str(" / ");
                heading.push_str(record.sub_category());
            }
            if record.has_asterisk() {
                heading.push_str(" *");
            }
            if *bookmarked {
                heading.push_str(" [bookmarked]");
            }
            println!("{heading}");
            println!("Q: {}", record.question());
            if *revealed {
                println!("A: {}", record.answer());
            }
        }
    }
}

fn report_load(report: &LoadReport) {
    for skipped in &report.skipped {
        if let SkipReason::Failed(reason) = &skipped.reason {
            eprintln!("{} unavailable ({reason}), falling back", skipped.kind);
        }
    }
    println!("Loaded questions from the {}.", report.used);
}

/// Prints utterances instead of voicing them.
struct ConsoleSpeaker;

impl Speaker for ConsoleSpeaker {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        println!("(speaking) {}", utterance.text());
        Ok(())
    }
}

//
// ─── COMMAND LOOP ──────────────────────────────────────────────────────────────
//

async fn execute(
    command: Command,
    session: &mut StudySession,
    loads: &SessionLoadService,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Next => {
            session.reveal_or_advance();
        }
        Command::Back => {
            session.go_back();
        }
        Command::Bookmark => {
            if session.toggle_bookmark().is_none() {
                println!("Nothing to bookmark.");
            }
        }
        Command::Filter { dimension, value } => session.change_filter_text(&dimension, &value)?,
        Command::Options => {
            let options = session.filter_options();
            println!("Categories: All, {}", options.categories.join(", "));
            println!("Sub-categories: All, {}", options.sub_categories.join(", "));
        }
        Command::Reset(ResetScope::All) => session.reset_all(),
        Command::Reset(ResetScope::Filters) => session.reset_filters(),
        Command::Reset(ResetScope::Progress) => session.reset_progress(),
        Command::Reset(ResetScope::Bookmarks) => session.reset_bookmarks(),
        Command::Export { path } => {
            let text = session.export_bookmarks()?;
            match path {
                Some(path) => {
                    tokio::fs::write(&path, text).await?;
                    println!("Bookmarks written to {path}.");
                }
                None => println!("{text}"),
            }
        }
        Command::Import { path } => {
            let text = tokio::fs::read_to_string(&path).await?;
            let added = session.import_bookmarks(&text)?;
            println!("Imported {added} new bookmark(s).");
        }
        Command::Speak => match session.current_question() {
            CurrentQuestion::Empty => println!("Nothing to read."),
            CurrentQuestion::Question {
                record, revealed, ..
            } => {
                let queue = SpeechQueue::for_question(&record, revealed, DEFAULT_MAX_CHARS);
                queue.play(&mut ConsoleSpeaker)?;
            }
        },
        Command::Stats => {
            let stats = session.progress_stats();
            println!(
                "{} of {} answered ({}%), {} remaining",
                stats.answered,
                stats.total,
                stats.percent,
                stats.remaining()
            );
        }
        Command::OpenSet(name) => {
            let source = args.source_for(&name)?;
            let report = loads.open(session, &source).await?;
            report_load(&report);
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let store = FileStore::open(&args.store_dir)?;
    let storage = Storage::from_store(store);
    let loads = SessionLoadService::new(reqwest::Client::new(), Arc::clone(&storage.preferences));

    let set_name = args
        .set
        .clone()
        .or_else(|| loads.remembered_set())
        .unwrap_or_else(|| "default".into());
    let source = args.source_for(&set_name)?;

    let mut session = StudySession::new(Arc::clone(&storage.bookmarks));
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    let report = loads.open(&mut session, &source).await?;
    report_load(&report);
    if args.shuffle {
        session.change_filter(FilterChange::ShuffleUnasked(true));
    }
    render(&session.snapshot());
    session.set_observer(render);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(command, &mut session, &loads, &args).await {
            warn!(error = %e, "command failed");
            eprintln!("{e}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
