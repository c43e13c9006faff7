use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    database::catalog_file::{CatalogFile, CatalogFileError},
    models::{
        coupon::{Coupon, CouponError},
        item::{Item, ItemError},
    },
};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid item '{sku}': {source}")]
    InvalidItem {
        sku: String,
        #[source]
        source: ItemError,
    },

    #[error("Invalid coupon '{code}': {source}")]
    InvalidCoupon {
        code: String,
        #[source]
        source: CouponError,
    },

    #[error("Duplicate SKU in catalog: {0}")]
    DuplicateSku(String),

    #[error("Duplicate coupon code in catalog: {0}")]
    DuplicateCoupon(String),

    #[error("Catalog file error: {0}")]
    FileError(#[from] CatalogFileError),
}

/// Read-only access to the products and coupons on offer
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError>;
    async fn find_item(&self, sku: &str) -> Result<Option<Item>, CatalogError>;
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CatalogError>;
    async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>, CatalogError>;
}

/// Catalog backed by a JSON file, validated and held in memory after loading
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    items: Vec<Item>,
    coupons: Vec<Coupon>,
}

impl JsonCatalogRepository {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = CatalogFile::read(path.as_ref()).await?;
        let repository = Self::from_file(file)?;

        info!(
            "Catalog loaded: {} items, {} coupons",
            repository.items.len(),
            repository.coupons.len()
        );
        Ok(repository)
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut items = Vec::with_capacity(file.items.len());
        let mut seen = HashSet::new();
        for request in file.items {
            let sku = request.sku.clone();
            let item = Item::new(request).map_err(|source| {
                warn!("Rejecting catalog item '{}': {}", sku, source);
                CatalogError::InvalidItem {
                    sku: sku.clone(),
                    source,
                }
            })?;
            if !seen.insert(item.sku.clone()) {
                return Err(CatalogError::DuplicateSku(item.sku));
            }
            items.push(item);
        }

        let mut coupons = Vec::with_capacity(file.coupons.len());
        let mut seen_codes = HashSet::new();
        for request in file.coupons {
            let code = request.code.clone();
            let coupon = Coupon::try_from(request).map_err(|source| {
                warn!("Rejecting catalog coupon '{}': {}", code, source);
                CatalogError::InvalidCoupon {
                    code: code.clone(),
                    source,
                }
            })?;
            // codes are normalized, so "half" and "HALF" collide here
            if !seen_codes.insert(coupon.code().to_string()) {
                return Err(CatalogError::DuplicateCoupon(coupon.code().to_string()));
            }
            coupons.push(coupon);
        }

        Ok(Self { items, coupons })
    }

    /// Builds a catalog from values that are already valid.
    pub fn from_parts(items: Vec<Item>, coupons: Vec<Coupon>) -> Self {
        Self { items, coupons }
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.clone())
    }

    async fn find_item(&self, sku: &str) -> Result<Option<Item>, CatalogError> {
        Ok(self.items.iter().find(|item| item.sku == sku).cloned())
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, CatalogError> {
        Ok(self.coupons.clone())
    }

    async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>, CatalogError> {
        let code = code.trim();
        Ok(self
            .coupons
            .iter()
            .find(|coupon| coupon.code().eq_ignore_ascii_case(code))
            .cloned())
    }
}
