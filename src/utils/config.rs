use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: String,
    pub currency_symbol: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "catalog.json".to_string(),
            currency_symbol: "$".to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            catalog_path: env::var("CATALOG_PATH").unwrap_or(defaults.catalog_path),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_catalog_path(mut self, catalog_path: Option<String>) -> anyhow::Result<Self> {
        if let Some(path) = catalog_path {
            self.catalog_path = path;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_path.trim().is_empty() {
            return Err(anyhow::anyhow!("CATALOG_PATH is not set"));
        }

        if !self.catalog_path.ends_with(".json") {
            return Err(anyhow::anyhow!("CATALOG_PATH must point to a .json file"));
        }

        if self.currency_symbol.is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_catalog_path_must_be_json() {
        let config = Config {
            catalog_path: "catalog.yaml".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            catalog_path: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_override() {
        let config = Config::default()
            .with_catalog_path(Some("shop/products.json".to_string()))
            .unwrap();
        assert_eq!(config.catalog_path, "shop/products.json");

        assert!(Config::default()
            .with_catalog_path(Some("products.txt".to_string()))
            .is_err());

        let unchanged = Config::default().with_catalog_path(None).unwrap();
        assert_eq!(unchanged.catalog_path, "catalog.json");
    }
}
