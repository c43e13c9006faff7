use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    models::item::Item,
    services::price_calculator::PriceBreakdown,
    utils::formatting::{format_checkout_summary, format_money},
};

/// Everything the checkout flow needs: the priced cart and its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub cart_id: Uuid,
    pub items: Vec<Item>,
    pub coupon_code: Option<String>,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub cart_id: Uuid,
    pub amount_charged: u64,
    pub item_count: usize,
    pub completed_at: DateTime<Utc>,
}

impl CheckoutReceipt {
    pub fn for_request(request: &CheckoutRequest) -> Self {
        Self {
            cart_id: request.cart_id,
            amount_charged: request.breakdown.total,
            item_count: request.items.len(),
            completed_at: Utc::now(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout rejected: {0}")]
    Rejected(String),
}

/// Receives a priced cart and takes it through checkout.
#[async_trait]
pub trait CheckoutRouter: Send + Sync {
    async fn route_to_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError>;
}

/// Prints the order summary to stdout and accepts it.
pub struct ConsoleCheckoutRouter {
    currency_symbol: String,
}

impl ConsoleCheckoutRouter {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }
}

#[async_trait]
impl CheckoutRouter for ConsoleCheckoutRouter {
    async fn route_to_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        println!("{}", format_checkout_summary(&request, &self.currency_symbol));

        let receipt = CheckoutReceipt::for_request(&request);
        info!(
            "Checkout completed for cart {}: {}",
            receipt.cart_id,
            format_money(receipt.amount_charged, &self.currency_symbol)
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_router_charges_total() {
        let router = ConsoleCheckoutRouter::new("$");
        let request = CheckoutRequest {
            cart_id: Uuid::new_v4(),
            items: vec![Item::with_cost(300), Item::with_cost(200)],
            coupon_code: Some("TENOFF".to_string()),
            breakdown: PriceBreakdown {
                subtotal: 500,
                discount: 50,
                total: 450,
            },
        };

        let receipt = router.route_to_checkout(request.clone()).await.unwrap();
        assert_eq!(receipt.cart_id, request.cart_id);
        assert_eq!(receipt.amount_charged, 450);
        assert_eq!(receipt.item_count, 2);
    }
}
