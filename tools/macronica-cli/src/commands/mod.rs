//! CLI command implementations.

pub mod cart;
pub mod catalog;

use clap::Args;
use macronica_commerce::catalog::{PriceTier, SortOption};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Filter by pack size or SKU.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: recommended, price-low or price-high.
    #[arg(long, default_value = "recommended")]
    pub sort: SortOption,

    /// Show and sort by wholesale prices.
    #[arg(short, long)]
    pub wholesale: bool,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id or SKU.
    pub product: String,

    /// Number of packs.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Buy at wholesale price.
    #[arg(short, long)]
    pub wholesale: bool,
}

/// Arguments for commands that address one cart line.
#[derive(Args)]
pub struct LineArgs {
    /// Product id or SKU.
    pub product: String,

    /// Address the wholesale line.
    #[arg(short, long)]
    pub wholesale: bool,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product id or SKU.
    pub product: String,

    /// New quantity; 0 removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,

    /// Address the wholesale line.
    #[arg(short, long)]
    pub wholesale: bool,
}

fn tier(wholesale: bool) -> PriceTier {
    PriceTier::from_wholesale(wholesale)
}
