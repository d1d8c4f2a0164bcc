//! Command line and environment configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Where the cart, checkout snapshot and order history live.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory holding the persisted documents
    #[arg(long, env = "DECORNEST_DATA_DIR", default_value = ".decornest", global = true)]
    pub data_dir: PathBuf,

    /// Maximum bytes the stored documents may occupy
    #[arg(long, env = "DECORNEST_STORAGE_QUOTA", global = true)]
    pub storage_quota: Option<u64>,
}

/// Catalog and pricing settings.
#[derive(Debug, Args)]
pub(crate) struct ShopConfig {
    /// Product catalog YAML; the bundled catalog is used when unset
    #[arg(long, env = "DECORNEST_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Flat shipping fee in rupees
    #[arg(long, env = "DECORNEST_SHIPPING_FEE", default_value = "99", global = true)]
    pub shipping_fee: Decimal,
}

/// DecorNest storefront
#[derive(Debug, Parser)]
#[command(name = "decornest", about = "DecorNest storefront cart and checkout", long_about = None)]
pub(crate) struct Config {
    /// Storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Catalog and pricing settings.
    #[command(flatten)]
    pub shop: ShopConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Top-level actions.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Browse the product gallery
    Products(ProductsArgs),

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Freeze the cart into a checkout summary
    Checkout,

    /// Pay for the pending checkout and place the order
    Pay {
        /// Amount paid; defaults to the pending total
        #[arg(long)]
        amount: Option<String>,
    },

    /// List past orders, or show one
    Orders {
        /// Order to show in detail
        id: Option<u64>,
    },
}

/// Cart actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub(crate) enum CartCommand {
    /// Show cart lines and totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: u32,
    },

    /// Remove a product's line
    Remove {
        /// Product id
        id: u32,
    },

    /// Set a line's quantity; values below 1 are ignored
    Update {
        /// Product id
        id: u32,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,
}

/// Gallery filters.
#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Category slug, or "all"
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Price range such as 50-200 or 200-, or "all"
    #[arg(long, default_value = "all")]
    pub price: String,

    /// Sort order (popular, newest, price-low, price-high)
    #[arg(long, default_value = "popular")]
    pub sort: String,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_cart_update_with_negative_quantity() -> TestResult {
        let config = Config::try_parse_from(["decornest", "cart", "update", "3", "-1"])?;

        assert!(
            matches!(
                config.command,
                Command::Cart(CartCommand::Update { id: 3, quantity: -1 })
            ),
            "expected cart update, got {:?}",
            config.command
        );

        Ok(())
    }

    #[test]
    fn global_flags_follow_subcommands() -> TestResult {
        let config = Config::try_parse_from([
            "decornest",
            "pay",
            "--amount",
            "1858.98",
            "--data-dir",
            "/tmp/decornest",
            "--shipping-fee",
            "49.50",
        ])?;

        assert_eq!(config.store.data_dir, PathBuf::from("/tmp/decornest"));
        assert_eq!(config.shop.shipping_fee, Decimal::new(4_950, 2));
        assert!(
            matches!(config.command, Command::Pay { amount: Some(ref amount) } if amount == "1858.98"),
            "expected pay, got {:?}",
            config.command
        );

        Ok(())
    }

    #[test]
    fn products_defaults() -> TestResult {
        let config = Config::try_parse_from(["decornest", "products"])?;

        let Command::Products(args) = config.command else {
            return Err("expected products command".into());
        };

        assert_eq!(args.category, "all");
        assert_eq!(args.price, "all");
        assert_eq!(args.sort, "popular");
        assert_eq!(args.page, 1);

        Ok(())
    }
}
