use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, theme::ColorfulTheme};

use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    database::repositories::{CatalogError, CatalogRepository, JsonCatalogRepository},
    models::{coupon::Coupon, item::Item},
    services::{CartError, CheckoutRouter, ConsoleCheckoutRouter, PriceCalculator, ShoppingCart},
    utils::{
        formatting::{format_coupon_table, format_item_table, format_money, format_price_breakdown},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    config: Config,
    catalog: Option<Arc<dyn CatalogRepository>>,
    router: Arc<dyn CheckoutRouter>,
}

impl CliApp {
    /// The catalog is loaded from `config.catalog_path` on first use, so
    /// `calc` works without a catalog file.
    pub fn new(config: Config) -> Self {
        let router = Arc::new(ConsoleCheckoutRouter::new(config.currency_symbol.clone()));
        Self {
            config,
            catalog: None,
            router,
        }
    }

    pub fn with_collaborators(
        config: Config,
        catalog: Arc<dyn CatalogRepository>,
        router: Arc<dyn CheckoutRouter>,
    ) -> Self {
        Self {
            config,
            catalog: Some(catalog),
            router,
        }
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        self.execute(args.command).await
    }

    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Calc { costs, discount } => self.handle_calc(costs, discount).await,
            Commands::Items => self.handle_list_items().await,
            Commands::Coupons => self.handle_list_coupons().await,
            Commands::Quote { items, coupon } => self.handle_quote(items, coupon).await,
            Commands::Checkout { items, coupon, yes } => {
                self.handle_checkout(items, coupon, yes).await
            }
        }
    }

    async fn catalog(&self) -> Result<Arc<dyn CatalogRepository>> {
        if let Some(catalog) = &self.catalog {
            return Ok(catalog.clone());
        }

        let catalog = JsonCatalogRepository::load(&self.config.catalog_path)
            .await
            .with_context(|| format!("Failed to load catalog from {}", self.config.catalog_path))?;
        Ok(Arc::new(catalog))
    }

    fn money(&self, amount: u64) -> String {
        format_money(amount, &self.config.currency_symbol)
    }

    async fn handle_calc(&self, costs: Vec<u64>, discount: Option<f64>) -> Result<()> {
        let coupon = match discount.map(Coupon::percentage).transpose() {
            Ok(coupon) => coupon,
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("Invalid discount: {}", e);
                return Ok(());
            }
        };

        let items: Vec<Item> = costs.into_iter().map(Item::with_cost).collect();
        let breakdown = PriceCalculator::breakdown(&items, coupon.as_ref());

        println!(
            "{}",
            format_price_breakdown(&breakdown, coupon.as_ref(), &self.config.currency_symbol)
        );
        info!("Calculated final price {} for {} items", breakdown.total, items.len());
        Ok(())
    }

    async fn handle_list_items(&self) -> Result<()> {
        let catalog = self.catalog().await?;

        match catalog.list_items().await {
            Ok(items) if items.is_empty() => println!("{} No items in catalog", INFO),
            Ok(items) => {
                println!("{} {}", INFO, style(format!("Found {} items", items.len())).bold());
                println!("{}", format_item_table(&items, &self.config.currency_symbol));
            }
            Err(e) => {
                println!("{} Failed to list items: {}", CROSS, style(&e).red());
                error!("Failed to list items: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_list_coupons(&self) -> Result<()> {
        let catalog = self.catalog().await?;

        match catalog.list_coupons().await {
            Ok(coupons) if coupons.is_empty() => println!("{} No coupons in catalog", INFO),
            Ok(coupons) => {
                println!("{} {}", INFO, style(format!("Found {} coupons", coupons.len())).bold());
                println!("{}", format_coupon_table(&coupons));
            }
            Err(e) => {
                println!("{} Failed to list coupons: {}", CROSS, style(&e).red());
                error!("Failed to list coupons: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_quote(&self, skus: Vec<String>, coupon_code: Option<String>) -> Result<()> {
        let catalog = self.catalog().await?;

        match build_cart(catalog.as_ref(), &skus, coupon_code.as_deref()).await {
            Ok(cart) => {
                println!("{} {}", CART, style("Quote").bold().cyan());
                println!("{}", format_item_table(cart.items(), &self.config.currency_symbol));
                println!(
                    "{}",
                    format_price_breakdown(&cart.breakdown(), cart.coupon(), &self.config.currency_symbol)
                );
            }
            Err(e) => {
                println!("{} Failed to build quote: {}", CROSS, style(&e).red());
                error!("Failed to build quote: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_checkout(
        &self,
        skus: Vec<String>,
        coupon_code: Option<String>,
        yes: bool,
    ) -> Result<()> {
        let catalog = self.catalog().await?;

        let mut cart = match build_cart(catalog.as_ref(), &skus, coupon_code.as_deref()).await {
            Ok(cart) => cart,
            Err(e) => {
                println!("{} Failed to build cart: {}", CROSS, style(&e).red());
                error!("Failed to build cart: {}", e);
                return Ok(());
            }
        };

        // Confirm checkout unless --yes is used
        if !yes {
            let theme = ColorfulTheme::default();
            let confirm = Confirm::with_theme(&theme)
                .with_prompt(format!("Pay {} for {} items?", self.money(cart.total()), cart.len()))
                .default(true)
                .interact()?;

            if !confirm {
                println!("Checkout cancelled");
                return Ok(());
            }
        }

        match cart.checkout(self.router.as_ref()).await {
            Ok(receipt) => {
                println!(
                    "{} Charged {} for {} items",
                    CHECKMARK,
                    style(self.money(receipt.amount_charged)).green(),
                    receipt.item_count
                );
                info!("Checkout completed: cart {}", receipt.cart_id);
            }
            Err(e) => {
                println!("{} Checkout failed: {}", CROSS, style(&e).red());
                error!("Checkout failed: {}", e);
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
enum BuildCartError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown coupon: {0}")]
    UnknownCoupon(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

async fn build_cart(
    catalog: &dyn CatalogRepository,
    skus: &[String],
    coupon_code: Option<&str>,
) -> Result<ShoppingCart, BuildCartError> {
    let mut cart = ShoppingCart::new();

    for sku in skus {
        let item = catalog
            .find_item(sku)
            .await?
            .ok_or_else(|| BuildCartError::UnknownItem(sku.clone()))?;
        cart.add_item(item);
    }

    if let Some(code) = coupon_code {
        let coupon = catalog
            .find_coupon(code)
            .await?
            .ok_or_else(|| {
                warn!("Coupon '{}' not found in catalog", code);
                BuildCartError::UnknownCoupon(code.to_string())
            })?;
        cart.apply_coupon(coupon);
    }

    if cart.is_empty() {
        return Err(CartError::EmptyCart.into());
    }

    Ok(cart)
}
