use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A purchasable unit. `cost` is in the smallest currency unit (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,
    pub name: String,
    pub cost: u64,
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreItemRequest {
    #[validate(length(min = 1, max = 32, message = "SKU must be 1-32 characters"))]
    #[validate(regex(
        path = "SKU_REGEX",
        message = "SKU can only contain letters, numbers, dashes and underscores"
    ))]
    pub sku: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[validate(custom = "validate_name")]
    pub name: String,

    pub cost: u64,
}

lazy_static::lazy_static! {
    static ref SKU_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl Item {
    pub fn new(request: StoreItemRequest) -> Result<Self, ItemError> {
        request.validate()?;

        Ok(Self {
            sku: request.sku,
            name: request.name.trim().to_string(),
            cost: request.cost,
        })
    }

    /// Shorthand for tests and the `calc` command, where only the cost matters.
    pub fn with_cost(cost: u64) -> Self {
        Self {
            sku: format!("ITEM-{}", cost),
            name: format!("Item {}", cost),
            cost,
        }
    }
}

impl TryFrom<StoreItemRequest> for Item {
    type Error = ItemError;

    fn try_from(request: StoreItemRequest) -> Result<Self, Self::Error> {
        Item::new(request)
    }
}
