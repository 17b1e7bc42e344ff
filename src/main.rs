mod cli;
mod config;
mod error;
mod report;
mod score;
mod search;
mod types;

use crate::error::DeckError;
use crate::search::{CancelToken, SearchRequest};
use crate::types::card::normalize_label;
use crate::types::config::{DeckConfig, DEFAULT_MODE};
use clap::Parser;
use std::collections::HashSet;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const NO_SOLUTION: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deckopt={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load(cli: &cli::Cli) -> Result<DeckConfig, DeckError> {
    if let Some(path) = &cli.config {
        return config::load_config_file(path);
    }
    if !cli.dir.exists() {
        return Err(DeckError::ConfigNotFound(cli.dir.display().to_string()));
    }
    match config::load_config(&cli.dir)? {
        Some(cfg) => Ok(cfg),
        None => {
            eprintln!(
                "warning: no {} found in {}; using built-in catalog",
                config::DEFAULT_CONFIG_FILE,
                cli.dir.display()
            );
            DeckConfig::builtin()
        }
    }
}

fn mode_label(cfg: &DeckConfig, mode: Option<&str>) -> String {
    mode.or(cfg.search.mode.as_deref())
        .unwrap_or(DEFAULT_MODE)
        .to_string()
}

fn dummy_traits(cfg: &DeckConfig, args: &cli::ModeArgs) -> Vec<String> {
    let labels = if args.dummy_traits.is_empty() {
        &cfg.search.dummy_traits
    } else {
        &args.dummy_traits
    };
    labels.iter().map(|label| normalize_label(label)).collect()
}

fn unique_cards(cards: &[String]) -> Result<(), DeckError> {
    let mut seen = HashSet::new();
    for name in cards {
        if !seen.insert(name.trim()) {
            return Err(DeckError::DuplicateCard(name.trim().to_string()));
        }
    }
    Ok(())
}

/// Ctrl-C stops the search at the next combination instead of killing the process.
fn cancel_on_interrupt(cancel: &CancelToken) {
    let handle = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handle.cancel()) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }
}

fn build_request(
    cfg: &DeckConfig,
    pinned: &[String],
    rules: &cli::ModeArgs,
    args: &cli::SearchArgs,
) -> Result<(SearchRequest, CancelToken), DeckError> {
    if args.max_results == Some(0) {
        return Err(DeckError::ConfigParse(
            "--max-results must be greater than 0".to_string(),
        ));
    }
    let mut request = SearchRequest::new(args.size.unwrap_or(cfg.search.deck_size));
    for name in pinned {
        request = request.pin(name);
    }
    for label in dummy_traits(cfg, rules) {
        request = request.dummy(&label);
    }
    request.max_results = args.max_results.unwrap_or(cfg.search.max_results);
    request.max_evaluations = args.max_evaluations;
    let cancel = match args.time_cap_ms {
        Some(ms) => CancelToken::with_time_cap(Duration::from_millis(ms)),
        None => CancelToken::new(),
    };
    cancel_on_interrupt(&cancel);
    Ok((request, cancel))
}

fn run() -> Result<i32, DeckError> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let cfg = load(&cli)?;
    let catalog = cfg.catalog()?;

    match &cli.command {
        cli::Commands::Catalog(cmd) => {
            let classes = cfg.classes_for(cmd.mode.as_deref())?;
            let table = cfg.trait_table(cmd.mode.as_deref())?;
            let mode = mode_label(&cfg, cmd.mode.as_deref());
            print!(
                "{}",
                report::md::catalog_text(&catalog, &mode, &cfg.mode_names(), classes, &table)
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            let table = cfg.trait_table(cmd.rules.mode.as_deref())?;
            unique_cards(&cmd.cards)?;
            let deck = cmd
                .cards
                .iter()
                .map(|name| catalog.resolve(name))
                .collect::<Result<Vec<_>, _>>()?;
            let result = score::score(&deck, &dummy_traits(&cfg, &cmd.rules), &table);
            print!("{}", report::md::score_text(&cmd.cards, &result));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Optimize(cmd) => {
            let table = cfg.trait_table(cmd.rules.mode.as_deref())?;
            let (request, cancel) =
                build_request(&cfg, &cmd.pinned, &cmd.rules, &cmd.search)?;
            let outcome = search::optimize(&catalog, &table, &request, &cancel)?;
            let complete = outcome.complete;
            let mode = mode_label(&cfg, cmd.rules.mode.as_deref());
            let optimize_report = report::OptimizeReport::new(&catalog, &mode, &request, outcome);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered =
                report::render(&optimize_report, output_format, cfg.search.display_limit)?;
            println!("{rendered}");

            if complete {
                Ok(exit_code::SUCCESS)
            } else {
                eprintln!("warning: search stopped early; results are partial");
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Narrow(cmd) => {
            let table = cfg.trait_table(cmd.rules.mode.as_deref())?;
            if let Some(second) = &cmd.second {
                catalog.resolve(second)?;
            }
            let (mut request, cancel) =
                build_request(&cfg, std::slice::from_ref(&cmd.first), &cmd.rules, &cmd.search)?;
            // co-occurrence counts need every tied deck, not just the kept ones
            request.max_results = cmd.search.max_results.unwrap_or(usize::MAX);
            let outcome = search::optimize(&catalog, &table, &request, &cancel)?;

            if let Some(max) = outcome.max_score {
                println!("Max score: {max}");
            }
            let picks = search::narrow::candidate_second_cards(&outcome.best, &cmd.first);
            print!("{}", report::md::second_picks_text(&cmd.first, &picks));

            let mut code = exit_code::SUCCESS;
            if let Some(second) = &cmd.second {
                let decks = search::narrow::decks_containing(
                    &outcome.best,
                    &[cmd.first.as_str(), second.as_str()],
                );
                if decks.is_empty() {
                    eprintln!(
                        "warning: no max-score deck contains both {} and {}",
                        cmd.first, second
                    );
                    code = exit_code::NO_SOLUTION;
                } else {
                    println!("\nBest decks with {} + {}", cmd.first, second);
                    for deck in decks {
                        print!("{}", report::md::deck_line(deck));
                    }
                }
            }

            if !outcome.complete {
                eprintln!("warning: search stopped early; results are partial");
                if code == exit_code::SUCCESS {
                    code = exit_code::PARTIAL;
                }
            }
            Ok(code)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_configuration() {
                eprintln!("hint: adjust the deck size, pinned cards or config and retry");
            }
            let code = match e {
                DeckError::NoSolution => exit_code::NO_SOLUTION,
                _ => exit_code::RUNTIME_FAILURE,
            };
            std::process::exit(code);
        }
    }
}
