use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{coupon::StoreCouponRequest, item::StoreItemRequest};

/// Raw, unvalidated contents of a catalog JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub items: Vec<StoreItemRequest>,
    #[serde(default)]
    pub coupons: Vec<StoreCouponRequest>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogFileError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogFile {
    pub async fn read(path: &Path) -> Result<Self, CatalogFileError> {
        tracing::info!("Reading catalog from {}", path.display());
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogFileError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;

        let file: CatalogFile =
            serde_json::from_str(&contents).map_err(|source| CatalogFileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "Catalog file has {} items and {} coupons",
            file.items.len(),
            file.coupons.len()
        );
        Ok(file)
    }
}
