//! scilex - incremental syntax highlighter
//!
//! Styles a source file with a language profile and theme and prints it
//! with ANSI colours, as a table of style runs, or offers completions for
//! a cursor position.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scilex::completion::{Autocompleter, CompletionRequest, CompletionResult, KeywordCompleter};
use scilex::config::Config;
use scilex::terminal::{write_run_table, RenderOptions, Renderer};
use scilex::{CustomLexer, LanguageProfile, LanguageRegistry, LexerError, Result, StyledDocument, Theme};

/// Incremental syntax highlighter
#[derive(Parser, Debug)]
#[command(name = "scilex")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to highlight (standard input when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Language to use instead of detecting it from the file extension
    #[arg(short, long, value_name = "LANG")]
    language: Option<String>,

    /// Theme document (JSON)
    #[arg(short, long, value_name = "THEME")]
    theme: Option<PathBuf>,

    /// Print the style runs instead of highlighted text
    #[arg(long)]
    runs: bool,

    /// Print completions for a 1-based line and 0-based column
    #[arg(long, value_name = "LINE:COL", value_parser = parse_position)]
    complete: Option<(usize, usize)>,

    /// List the known languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Show line numbers
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// Disable colours
    #[arg(long)]
    no_color: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_position(s: &str) -> std::result::Result<(usize, usize), String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{}'", s))?;
    let line: usize = line.trim().parse().map_err(|_| format!("invalid line '{}'", line))?;
    let column: usize = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{}'", column))?;
    if line == 0 {
        return Err("lines are numbered from 1".to_string());
    }
    Ok((line, column))
}

fn main() {
    let args = Args::parse();
    let config = Config::load();
    init_logging(args.verbose, &config.log_level);

    if let Err(e) = run(args, config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn run(args: Args, config: Config) -> Result<()> {
    let registry = LanguageRegistry::new();

    if args.list_languages {
        for name in registry.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let profile = resolve_language(&registry, &args, &config)?;
    let source = read_source(&args)?;
    info!(language = %profile.name, bytes = source.len(), "highlighting");

    if let Some((line, column)) = args.complete {
        return complete(profile, source, args.file.unwrap_or_default(), line, column);
    }

    let theme = load_theme(&args, &config)?;
    let lexer = CustomLexer::new(profile, theme)?;
    let mut doc = StyledDocument::new(source);
    doc.restyle_all(&lexer);

    let stdout = io::stdout().lock();
    if args.runs {
        write_run_table(stdout, &doc)
    } else {
        let options = RenderOptions {
            line_numbers: args.line_numbers || config.line_numbers,
            color: config.color && !args.no_color,
        };
        Renderer::new(stdout, lexer.theme(), options).render(&doc)
    }
}

/// Pick the language from the flag, the config file or the file extension
fn resolve_language(
    registry: &LanguageRegistry,
    args: &Args,
    config: &Config,
) -> Result<Arc<LanguageProfile>> {
    if let Some(name) = args.language.as_deref().or(config.language.as_deref()) {
        return registry.get(name);
    }
    match &args.file {
        Some(path) => registry.resolve_path(path),
        None => Err(LexerError::Message(
            "cannot detect the language of standard input; use --language".to_string(),
        )),
    }
}

fn read_source(args: &Args) -> Result<Vec<u8>> {
    match &args.file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut source = Vec::new();
            io::stdin().read_to_end(&mut source)?;
            Ok(source)
        }
    }
}

/// Load the theme from the flag or config file, falling back to One Dark
fn load_theme(args: &Args, config: &Config) -> Result<Theme> {
    match args.theme.as_ref().or(config.theme.as_ref()) {
        Some(path) => {
            let loaded = Theme::load_file(path)?;
            if !loaded.warnings.is_empty() {
                warn!(
                    "{} problem(s) in theme {}",
                    loaded.warnings.len(),
                    path.display()
                );
            }
            Ok(loaded.theme)
        }
        None => Ok(Theme::one_dark()),
    }
}

fn complete(
    profile: Arc<LanguageProfile>,
    source: Vec<u8>,
    path: PathBuf,
    line: usize,
    column: usize,
) -> Result<()> {
    let provider = Arc::new(KeywordCompleter::new(profile)?);
    let request = CompletionRequest {
        source: String::from_utf8_lossy(&source).into_owned(),
        path,
        line,
        column,
    };

    let runtime = Runtime::new()?;
    let result = runtime.block_on(async move {
        let (worker, mut results) = Autocompleter::new(Handle::current(), provider);
        let (sequence, _) = worker.request(request);
        result_for(&mut results, sequence).await
    });

    for item in result.map(|r| r.items).unwrap_or_default() {
        println!("{}", item.name);
    }
    Ok(())
}

/// Wait for the result of request `sequence`, skipping any other
async fn result_for(
    results: &mut mpsc::UnboundedReceiver<CompletionResult>,
    sequence: u64,
) -> Option<CompletionResult> {
    while let Some(result) = results.recv().await {
        if result.sequence == sequence {
            return Some(result);
        }
    }
    None
}
