//! ShopApp CLI - drive the checkout workflow from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! shopapp catalog
//!
//! # Look up an address
//! shopapp geocode "Musterstraße 1, 12345 Berlin, Germany"
//!
//! # Check out with a test-mode address
//! shopapp checkout -n Anna -e anna@example.com -p secret \
//!     --add Laptop --promo PROMO20 --address "Musterstraße 1, 12345 Berlin" --test-mode
//!
//! # Reviews
//! shopapp review add --product Laptop --author anna --text "Great laptop!"
//! shopapp review list --product Laptop
//!
//! # Scripted run of the whole workflow without network or disk writes
//! shopapp self-test
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPAPP_REVIEWS_PATH` - Review file (default `reviews.json`)
//! - `SHOPAPP_CATALOG_PATH` - Optional JSON catalog
//! - `SHOPAPP_GEOCODER_URL` - Nominatim-compatible service
//! - `SHOPAPP_GEOCODER_USER_AGENT` - User agent sent to the service
//! - `SHOPAPP_GEOCODER_TIMEOUT_SECS` - Lookup timeout, 1 to 120
//! - `SHOPAPP_DEFAULT_LOCATION` - Location used by `--auto-detect`
//! - `RUST_LOG` - Log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopapp")]
#[command(author, version, about = "ShopApp checkout tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products that can be ordered
    Catalog,
    /// Look up an address with the geocoding service
    Geocode {
        /// Free-form address
        query: String,
    },
    /// Register, fill the cart and place an order
    Checkout(CheckoutArgs),
    /// Read and write product reviews
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Run the scripted workflow check
    SelfTest,
}

#[derive(Args)]
struct CheckoutArgs {
    /// Customer name (letters only)
    #[arg(short, long)]
    name: String,

    /// Customer email address
    #[arg(short, long)]
    email: String,

    /// Account password
    #[arg(short, long)]
    password: String,

    /// Product to add, by name or id (repeatable)
    #[arg(long = "add", value_name = "PRODUCT")]
    add: Vec<String>,

    /// Product to remove by name (repeatable, applied after adds)
    #[arg(long = "remove", value_name = "PRODUCT")]
    remove: Vec<String>,

    /// Promo code to apply (repeatable, applied in order)
    #[arg(long = "promo", value_name = "CODE")]
    promo: Vec<String>,

    /// Delivery address
    #[arg(long, required_unless_present = "auto_detect", conflicts_with = "auto_detect")]
    address: Option<String>,

    /// Accept the address verbatim without a lookup
    #[arg(long, requires = "address")]
    test_mode: bool,

    /// Deliver to the configured default location
    #[arg(long)]
    auto_detect: bool,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Add a review
    Add {
        /// Product name
        #[arg(long)]
        product: String,

        /// Review author
        #[arg(long)]
        author: String,

        /// Review text
        #[arg(long)]
        text: String,
    },
    /// Show the reviews for a product
    List {
        /// Product name
        #[arg(long)]
        product: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopapp_cli=info,shopapp_storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &cancel).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Interrupted, cancelling");
        cancel.cancel();
    }
}

async fn run(cli: Cli, cancel: &CancellationToken) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog => commands::catalog::list().await?,
        Commands::Geocode { query } => commands::geocode::lookup(&query, cancel).await?,
        Commands::Checkout(args) => {
            let address = match args.address {
                Some(text) if !args.auto_detect => commands::checkout::AddressSource::Given {
                    text,
                    test_mode: args.test_mode,
                },
                _ => commands::checkout::AddressSource::AutoDetect,
            };
            let request = commands::checkout::CheckoutRequest {
                name: args.name,
                email: args.email,
                password: args.password.into(),
                add: args.add,
                remove: args.remove,
                promo: args.promo,
                address,
            };
            commands::checkout::run(request, cancel).await?;
        }
        Commands::Review { action } => match action {
            ReviewAction::Add {
                product,
                author,
                text,
            } => commands::review::add(&product, &author, &text).await?,
            ReviewAction::List { product } => commands::review::list(&product).await?,
        },
        Commands::SelfTest => commands::self_test::run().await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_checkout_requires_an_address_source() {
        let result = Cli::try_parse_from([
            "shopapp", "checkout", "-n", "Anna", "-e", "a@b.de", "-p", "x", "--add", "Laptop",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_address_conflicts_with_auto_detect() {
        let result = Cli::try_parse_from([
            "shopapp",
            "checkout",
            "-n",
            "Anna",
            "-e",
            "a@b.de",
            "-p",
            "x",
            "--address",
            "Somewhere 1",
            "--auto-detect",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "shopapp",
            "checkout",
            "-n",
            "Anna",
            "-e",
            "a@b.de",
            "-p",
            "x",
            "--add",
            "Laptop",
            "--add",
            "124",
            "--promo",
            "PROMO20",
            "--promo",
            "PROMO10",
            "--address",
            "X",
            "--test-mode",
        ]);
        let Ok(Cli {
            command: Commands::Checkout(args),
        }) = cli
        else {
            panic!("expected checkout command");
        };
        assert_eq!(args.add, ["Laptop", "124"]);
        assert_eq!(args.promo, ["PROMO20", "PROMO10"]);
        assert!(args.test_mode);
    }
}
