use clap::{Parser, Subcommand};
use eyre::Result;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use composite_swap::display::{
    display_candidates, display_quote, display_route, format_amount, price_rate_rows,
};
use composite_swap::pools::{collect_tokens, spendable_candidates, swap_to_candidates};
use composite_swap::router::parse_input_amount;
use composite_swap::{Config, NodeKey, OwnedToken, PairGraph, PairSnapshot, SwapRouter};

#[derive(Parser)]
#[command(name = "composite-swap")]
#[command(about = "Pool-pair route finder and composite swap quoter", long_about = None)]
struct Cli {
    /// Pool pair snapshot (JSON); defaults to POOL_PAIRS_FILE
    #[arg(long, global = true)]
    pairs: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tokens that can be swapped from
    Tokens {
        /// Wallet balances (JSON array of owned tokens)
        #[arg(long)]
        wallet: Option<PathBuf>,
    },

    /// List tokens reachable from a token id
    Reachable {
        /// Token id to swap from
        #[arg(long)]
        from: String,
    },

    /// Find the route between two token symbols
    Route {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Price a swap along the route between two token symbols
    Quote {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Amount of the source token (blank = 0)
        #[arg(long, default_value = "")]
        amount: String,

        /// Slippage tolerance (0.03 = 3%); defaults to SLIPPAGE_TOLERANCE
        #[arg(long)]
        slippage: Option<String>,
    },
}

fn load_snapshot(path: &Path) -> Result<PairSnapshot> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("Failed to read {}: {}", path.display(), e))?;
    let snapshot = PairSnapshot::from_json(&raw)?;
    info!(
        "Loaded {} pool pairs from {}",
        snapshot.pairs.len(),
        path.display()
    );
    Ok(snapshot)
}

fn load_wallet(path: &Path) -> Result<Vec<OwnedToken>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw)
        .map_err(|e| eyre::eyre!("Failed to parse wallet {}: {}", path.display(), e))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_tokens(config: &Config, snapshot: &PairSnapshot, wallet: Option<&Path>, json: bool) -> Result<()> {
    let tokens = collect_tokens(&snapshot.pairs);
    let owned = match wallet {
        Some(path) => load_wallet(path)?,
        None => Vec::new(),
    };

    let candidates = spendable_candidates(&tokens, &owned, config);

    if json {
        return print_json(&candidates);
    }
    display_candidates("Swap From", snapshot, &candidates);
    Ok(())
}

fn run_reachable(config: &Config, snapshot: &PairSnapshot, from: &str, json: bool) -> Result<()> {
    let graph = PairGraph::from_pairs(&snapshot.pairs, NodeKey::Id);
    let tokens = collect_tokens(&snapshot.pairs);
    let candidates = swap_to_candidates(&graph, &tokens, from, config);

    if json {
        return print_json(&candidates);
    }
    display_candidates(&format!("Swap To (from {})", from), snapshot, &candidates);
    Ok(())
}

fn run_route(snapshot: &PairSnapshot, from: &str, to: &str, json: bool) -> Result<()> {
    let graph = PairGraph::from_pairs(&snapshot.pairs, NodeKey::Symbol);
    let path = SwapRouter::new(&graph).find_path(from, to);

    if json {
        return print_json(&path);
    }
    display_route(snapshot, from, to, &path);
    Ok(())
}

fn run_quote(
    config: &Config,
    snapshot: &PairSnapshot,
    from: &str,
    to: &str,
    amount: &str,
    slippage: Option<&str>,
    json: bool,
) -> Result<()> {
    let amount = parse_input_amount(amount)?;
    let slippage_tolerance = match slippage {
        Some(raw) => Decimal::from_str(raw.trim())
            .map_err(|e| eyre::eyre!("Invalid slippage '{}': {}", raw, e))?,
        None => config.slippage_tolerance,
    };

    let graph = PairGraph::from_pairs(&snapshot.pairs, NodeKey::Symbol);
    let quote = SwapRouter::new(&graph).quote(from, to, amount)?;
    let minimum_received = quote.rates.minimum_received(slippage_tolerance)?;

    if json {
        return print_json(&serde_json::json!({
            "quote": quote,
            "slippageTolerance": slippage_tolerance,
            "minimumReceived": format_amount(minimum_received),
        }));
    }

    let tokens = collect_tokens(&snapshot.pairs);
    let display_symbol = |symbol: &str| {
        tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .map(|token| token.display_symbol.clone())
            .unwrap_or_else(|| symbol.to_string())
    };
    let rows = price_rate_rows(&quote, &display_symbol(from), &display_symbol(to));

    display_quote(snapshot, &quote, &rows, minimum_received, slippage_tolerance);
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let pairs_file = cli.pairs.clone().unwrap_or_else(|| config.pool_pairs_file.clone());
    let snapshot = load_snapshot(&pairs_file)?;

    match cli.command {
        Commands::Tokens { wallet } => run_tokens(&config, &snapshot, wallet.as_deref(), cli.json),
        Commands::Reachable { from } => run_reachable(&config, &snapshot, &from, cli.json),
        Commands::Route { from, to } => run_route(&snapshot, &from, &to, cli.json),
        Commands::Quote {
            from,
            to,
            amount,
            slippage,
        } => run_quote(
            &config,
            &snapshot,
            &from,
            &to,
            &amount,
            slippage.as_deref(),
            cli.json,
        ),
    }
}
