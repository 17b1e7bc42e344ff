use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deckopt",
    version,
    about = "Exhaustive deck optimizer for trait-threshold card catalogs"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding deckopt.toml
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Explicit config file (skips layered lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cards and trait classes of the active mode
    Catalog(CatalogCommand),
    /// Score an explicit deck
    Score(ScoreCommand),
    /// Find the best-scoring decks
    Optimize(OptimizeCommand),
    /// Rank second cards that appear in best decks alongside a first card
    Narrow(NarrowCommand),
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ModeArgs {
    /// Trait-class assignment to use
    #[arg(long)]
    pub mode: Option<String>,

    /// Trait carried by one synthetic wildcard card (repeatable)
    #[arg(long = "dummy", value_name = "TRAIT")]
    pub dummy_traits: Vec<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Target deck size (defaults to search.deck_size)
    #[arg(long)]
    pub size: Option<usize>,

    /// Cap on materialized best decks
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Stop the search after this many milliseconds
    #[arg(long)]
    pub time_cap_ms: Option<u64>,

    /// Stop the search after this many evaluated decks
    #[arg(long)]
    pub max_evaluations: Option<u64>,
}

#[derive(Args)]
pub struct CatalogCommand {
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(required = true)]
    pub cards: Vec<String>,
    #[command(flatten)]
    pub rules: ModeArgs,
}

#[derive(Args)]
pub struct OptimizeCommand {
    /// Card forced into every deck (repeatable)
    #[arg(long = "pin", value_name = "CARD")]
    pub pinned: Vec<String>,
    #[command(flatten)]
    pub rules: ModeArgs,
    #[command(flatten)]
    pub search: SearchArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct NarrowCommand {
    #[arg(long)]
    pub first: String,
    #[arg(long)]
    pub second: Option<String>,
    #[command(flatten)]
    pub rules: ModeArgs,
    #[command(flatten)]
    pub search: SearchArgs,
}
