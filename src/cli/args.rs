use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cart-pricing")]
#[command(about = "Price a basket of items, apply coupons and check out")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file path (overrides CATALOG_PATH)
    #[arg(short, long, global = true)]
    pub catalog: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a final price from raw costs
    Calc {
        /// Item costs in minor currency units (e.g. cents)
        costs: Vec<u64>,
        /// Discount percentage between 0 and 100
        #[arg(short, long)]
        discount: Option<f64>,
    },
    /// List catalog items
    Items,
    /// List catalog coupons
    Coupons,
    /// Price catalog items without checking out
    Quote {
        /// Item SKU, repeat for multiple items
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Coupon code
        #[arg(long)]
        coupon: Option<String>,
    },
    /// Build a cart from catalog items and check out
    Checkout {
        /// Item SKU, repeat for multiple items
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Coupon code
        #[arg(long)]
        coupon: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calc() {
        let args = Args::try_parse_from(["cart-pricing", "calc", "250", "150", "100", "-d", "10"])
            .unwrap();
        match args.command {
            Commands::Calc { costs, discount } => {
                assert_eq!(costs, vec![250, 150, 100]);
                assert_eq!(discount, Some(10.0));
            }
            _ => panic!("expected calc command"),
        }
    }

    #[test]
    fn test_parse_checkout_with_repeated_items() {
        let args = Args::try_parse_from([
            "cart-pricing",
            "--catalog",
            "shop.json",
            "checkout",
            "-i",
            "TEA-01",
            "--item",
            "CAKE-02",
            "--coupon",
            "tenoff",
            "--yes",
        ])
        .unwrap();
        assert_eq!(args.catalog.as_deref(), Some("shop.json"));
        match args.command {
            Commands::Checkout { items, coupon, yes } => {
                assert_eq!(items, vec!["TEA-01", "CAKE-02"]);
                assert_eq!(coupon.as_deref(), Some("tenoff"));
                assert!(yes);
            }
            _ => panic!("expected checkout command"),
        }
    }

    #[test]
    fn test_negative_cost_rejected() {
        assert!(Args::try_parse_from(["cart-pricing", "calc", "-5"]).is_err());
    }

    #[test]
    fn test_quote_requires_item() {
        assert!(Args::try_parse_from(["cart-pricing", "quote"]).is_err());
    }
}
