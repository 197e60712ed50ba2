//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add {
        /// Storefront the product belongs to.
        #[arg(short, long)]
        store: String,

        /// Product ID.
        #[arg(long)]
        id: i64,

        /// Display name.
        #[arg(short, long)]
        name: String,

        /// Unit price as a decimal amount (e.g. 19.99).
        #[arg(short, long)]
        price: f64,

        /// Original price, shown struck through.
        #[arg(long)]
        compare_at: Option<f64>,

        /// Product image URL.
        #[arg(long)]
        image: Option<String>,

        /// Product slug.
        #[arg(long)]
        slug: Option<String>,
    },
    /// Remove a product from a storefront's cart.
    Remove {
        #[arg(short, long)]
        store: String,

        #[arg(long)]
        id: i64,
    },
    /// Set a line's quantity (0 or less removes it).
    Set {
        #[arg(short, long)]
        store: String,

        #[arg(long)]
        id: i64,

        /// New quantity.
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty one storefront's cart.
    Clear {
        #[arg(short, long)]
        store: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show one storefront's cart.
    Show {
        #[arg(short, long)]
        store: String,
    },
    /// List storefronts with items in the cart.
    Stores,
    /// Build the order request for one storefront.
    Checkout {
        #[arg(short, long)]
        store: String,

        /// Customer email.
        #[arg(short, long)]
        email: String,

        /// Order notes.
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
