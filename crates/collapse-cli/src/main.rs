use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use collapse_core::{ops, CollapseError, CollapseExt, CollapseSettings, Result};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "collapse")]
#[command(about = "Collapse runs of adjacent tokens", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("COLLAPSE_GIT_HASH"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep the first token of every run of equal tokens
    Dedup(InputArgs),
    /// Print every run of equal tokens
    Runs(InputArgs),
    /// Print every run's token with the run length
    Lengths(InputArgs),
    /// Print maximal intervals of consecutive integers
    Intervals(InputArgs),
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Whitespace-separated tokens; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drain on a thread pool regardless of the settings file
    #[arg(long)]
    parallel: bool,

    /// Emit a JSON array instead of one group per line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dedup,
    Runs,
    Lengths,
    Intervals,
}

#[derive(Serialize)]
struct RunLength {
    token: String,
    count: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let (mode, args) = match cli.command {
        Commands::Dedup(args) => (Mode::Dedup, args),
        Commands::Runs(args) => (Mode::Runs, args),
        Commands::Lengths(args) => (Mode::Lengths, args),
        Commands::Intervals(args) => (Mode::Intervals, args),
    };

    if let Err(e) = run(mode, &args) {
        eprintln!("collapse: {}", e);
        std::process::exit(1);
    }
}

fn run(mode: Mode, args: &InputArgs) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => CollapseSettings::from_file(path)?,
        None => CollapseSettings::default(),
    };
    if args.parallel {
        settings.parallel = true;
    }

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    log::debug!("{:?} over {} bytes of input", mode, text.len());

    let rendered = execute(mode, &text, &settings, args.json)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Collapses the tokens of `text` and renders the groups.
fn execute(mode: Mode, text: &str, settings: &CollapseSettings, json: bool) -> Result<String> {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();

    match mode {
        Mode::Dedup => {
            let firsts = collapse_core::collect(settings.source(tokens).collapse(ops::dedup()), settings)?;
            render(&firsts, json, |token| token.clone())
        }
        Mode::Runs => {
            let runs = collapse_core::collect(
                settings
                    .source(tokens)
                    .collapse(ops::group_runs(|a: &String, b: &String| a == b)),
                settings,
            )?;
            render(&runs, json, |run| run.join(" "))
        }
        Mode::Lengths => {
            let lengths: Vec<RunLength> =
                collapse_core::collect(settings.source(tokens).collapse(ops::run_lengths()), settings)?
                    .into_iter()
                    .map(|(token, count)| RunLength { token, count })
                    .collect();
            render(&lengths, json, |run| format!("{}\t{}", run.token, run.count))
        }
        Mode::Intervals => {
            let numbers = parse_integers(&tokens)?;
            let spans = collapse_core::collect(
                settings
                    .source(numbers)
                    .collapse(ops::intervals(|a: &i64, b: &i64| a.checked_add(1) == Some(*b))),
                settings,
            )?;
            render(&spans, json, |&(first, last)| format_interval(first, last))
        }
    }
}

fn parse_integers(tokens: &[String]) -> Result<Vec<i64>> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i64>().map_err(|e| CollapseError::Parse {
                token: token.clone(),
                position,
                message: e.to_string(),
            })
        })
        .collect()
}

fn format_interval(first: i64, last: i64) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{}-{}", first, last)
    }
}

fn render<T: Serialize>(groups: &[T], json: bool, line: impl Fn(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(groups)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(groups.iter().map(|g| line(g) + "\n").collect())
}
