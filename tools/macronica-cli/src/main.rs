//! Macronica CLI - browse the catalog and manage the cart from a terminal.
//!
//! Commands:
//! - `macronica catalog` - List pack sizes, with search and sorting
//! - `macronica add` - Add a pack to the cart
//! - `macronica remove` - Remove a cart line
//! - `macronica update` - Set a cart line's quantity
//! - `macronica clear` - Empty the cart
//! - `macronica show` - Show the cart with pricing

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, CatalogArgs, LineArgs, UpdateArgs};

/// Macronica CLI - Browse packs and manage your cart
#[derive(Parser)]
#[command(name = "macronica")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog packs
    Catalog(CatalogArgs),

    /// Add a pack to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(LineArgs),

    /// Set the quantity of a cart line
    Update(UpdateArgs),

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, ctx.config.output.color);

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Update(args) => commands::cart::update(args, &ctx),
        Commands::Clear => commands::cart::clear(&ctx),
        Commands::Show => commands::cart::show(&ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, color: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(log_colors(color, console::colors_enabled_stderr()))
        .with_target(false)
        .init();
}

/// Colour log lines only when configured and stderr is a colour terminal.
fn log_colors(configured: bool, terminal: bool) -> bool {
    configured && terminal
}
