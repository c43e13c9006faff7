use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    models::{coupon::Coupon, item::Item},
    services::{
        checkout::{CheckoutError, CheckoutReceipt, CheckoutRequest, CheckoutRouter},
        price_calculator::{PriceBreakdown, PriceCalculator},
    },
};

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Item '{0}' is not in the cart")]
    ItemNotInCart(String),

    #[error("Checkout failed: {0}")]
    CheckoutError(#[from] CheckoutError),
}

/// One shopping session: the selected items and at most one coupon.
///
/// Each caller owns its own cart; there is no shared instance. Prices are
/// always recomputed from the current contents.
#[derive(Debug, Clone)]
pub struct ShoppingCart {
    id: Uuid,
    created_at: DateTime<Utc>,
    items: Vec<Item>,
    coupon: Option<Coupon>,
}

impl Default for ShoppingCart {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            items: Vec::new(),
            coupon: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: Item) {
        debug!("Cart {}: adding item {} ({})", self.id, item.sku, item.cost);
        self.items.push(item);
    }

    /// Removes the first line with a matching SKU.
    pub fn remove_item(&mut self, sku: &str) -> Result<Item, CartError> {
        let position = self
            .items
            .iter()
            .position(|item| item.sku == sku)
            .ok_or_else(|| CartError::ItemNotInCart(sku.to_string()))?;

        debug!("Cart {}: removing item {}", self.id, sku);
        Ok(self.items.remove(position))
    }

    /// Replaces any coupon already applied.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        debug!(
            "Cart {}: applying coupon {} ({}%)",
            self.id,
            coupon.code(),
            coupon.discount_percentage()
        );
        self.coupon = Some(coupon);
    }

    pub fn remove_coupon(&mut self) -> Option<Coupon> {
        self.coupon.take()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        PriceCalculator::breakdown(&self.items, self.coupon.as_ref())
    }

    pub fn total(&self) -> u64 {
        PriceCalculator::calculate_final_price(&self.items, self.coupon.as_ref())
    }

    /// Prices the cart and hands it to `router`. The cart is cleared only
    /// when the router accepts the order.
    pub async fn checkout(
        &mut self,
        router: &dyn CheckoutRouter,
    ) -> Result<CheckoutReceipt, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let request = CheckoutRequest {
            cart_id: self.id,
            items: self.items.clone(),
            coupon_code: self.coupon.as_ref().map(|c| c.code().to_string()),
            breakdown: self.breakdown(),
        };
        info!(
            "Checking out cart {} with {} items, total {}",
            self.id,
            request.items.len(),
            request.breakdown.total
        );

        let receipt = router.route_to_checkout(request).await.map_err(|e| {
            error!("Checkout failed for cart {}: {}", self.id, e);
            CartError::CheckoutError(e)
        })?;

        self.clear();
        Ok(receipt)
    }
}
