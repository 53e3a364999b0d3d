//! # Catalog State
//!
//! Holds the session's [`ProductCatalog`] and knows where it came from.
//!
//! ## Catalog Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WIDGET_CATALOG_PATH unset ──► built-in widgets                         │
//! │                                                                         │
//! │  WIDGET_CATALOG_PATH=file  ──► read JSON array of {sku, name, price}    │
//! │                                   │                                     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     ProductCatalog::replace_all (validates every item)  │
//! │                                   │                                     │
//! │                                   ├── ok     → catalog replaced         │
//! │                                   └── error  → warn!, catalog empty     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed load never aborts startup; the shell shows an empty product
//! list instead.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use widget_core::{CatalogItem, CoreError, ProductCatalog};

use super::ConfigState;

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The built-in widget line-up.
    Static,

    /// A JSON file holding an array of catalog items.
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_config(config: &ConfigState) -> Self {
        match &config.catalog_path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Static,
        }
    }

    /// Reads the full item list. Items are validated when they replace
    /// the catalog, not here.
    pub fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogLoadError> {
        match self {
            CatalogSource::Static => Ok(ProductCatalog::default_widgets().items().to_vec()),
            CatalogSource::File(path) => read_catalog_file(path),
        }
    }
}

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog file is not a valid item list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog is invalid: {0}")]
    Invalid(#[from] CoreError),
}

/// Reads and parses a catalog file.
pub fn read_catalog_file(path: &Path) -> Result<Vec<CatalogItem>, CatalogLoadError> {
    let raw = fs::read_to_string(path)?;
    parse_catalog(&raw)
}

/// Parses catalog JSON: `[{"sku": "item0001", "name": "Widget", "price": 9.99}, ...]`.
///
/// SKUs are trimmed and checked for shape while parsing.
pub fn parse_catalog(raw: &str) -> Result<Vec<CatalogItem>, CatalogLoadError> {
    Ok(serde_json::from_str(raw)?)
}

/// Managed catalog state.
#[derive(Debug)]
pub struct CatalogState {
    source: CatalogSource,
    catalog: ProductCatalog,
}

impl CatalogState {
    /// Creates a state around an already-built catalog.
    pub fn new(source: CatalogSource, catalog: ProductCatalog) -> Self {
        CatalogState { source, catalog }
    }

    /// Loads the catalog named by the configuration.
    ///
    /// Failures are logged and leave the catalog empty.
    pub fn load(config: &ConfigState) -> Self {
        let mut state = CatalogState::new(CatalogSource::from_config(config), ProductCatalog::empty());
        state.reload();
        state
    }

    /// Re-reads the source and replaces the catalog wholesale.
    ///
    /// Returns the number of products now in the catalog.
    pub fn reload(&mut self) -> usize {
        let loaded = self.source.fetch().and_then(|items| {
            self.catalog
                .replace_all(items)
                .map_err(CatalogLoadError::from)
        });

        match loaded {
            Ok(()) => {
                warn_on_unnumbered_skus(&self.catalog);
                info!(source = ?self.source, products = self.catalog.len(), "Catalog loaded");
            }
            Err(error) => {
                warn!(source = ?self.source, %error, "Failed to load catalog, continuing with none");
                self.catalog = ProductCatalog::empty();
            }
        }
        self.catalog.len()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }
}

fn warn_on_unnumbered_skus(catalog: &ProductCatalog) {
    for item in catalog.items() {
        if item.sku.numeric_suffix().is_none() {
            warn!(sku = %item.sku, "SKU has no numeric suffix; it will be listed after numbered items in the cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_by_default() {
        let state = CatalogState::load(&ConfigState::default());
        assert_eq!(state.source(), &CatalogSource::Static);
        assert_eq!(state.catalog().len(), 3);
    }

    fn temp_catalog(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "widget-shop-catalog-{}-{}.json",
            tag,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_catalog() {
        let items = parse_catalog(
            r#"[
                {"sku": "item0001", "name": "Widget", "price": 9.99},
                {"sku": "item0002", "name": "Premium Widget", "price": 19.99}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].price.cents(), 1999);
    }

    #[test]
    fn test_parse_catalog_trims_skus() {
        let items =
            parse_catalog(r#"[{"sku": " item0001 ", "name": "Widget", "price": 9.99}]"#).unwrap();
        let catalog = ProductCatalog::new(items).unwrap();

        assert_eq!(catalog.get("item0001").unwrap().sku.as_str(), "item0001");
        assert!(catalog.get(" item0001 ").is_none());
    }

    #[test]
    fn test_parse_catalog_errors() {
        assert!(matches!(
            parse_catalog("{not json"),
            Err(CatalogLoadError::Parse(_))
        ));
        assert!(matches!(
            parse_catalog(r#"[{"sku": "item 0001", "name": "Widget", "price": 9.99}]"#),
            Err(CatalogLoadError::Parse(_))
        ));
        assert!(matches!(
            parse_catalog(r#"[{"sku": "item0001", "name": "Widget", "price": 9.999}]"#),
            Err(CatalogLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_reload_rejects_invalid_items() {
        let invalid = [
            ("negative", r#"[{"sku": "item0001", "name": "Widget", "price": -1}]"#),
            (
                "duplicate",
                r#"[{"sku": "a0001", "name": "A", "price": 1}, {"sku": "a0001", "name": "B", "price": 2}]"#,
            ),
        ];

        for (tag, contents) in invalid {
            let path = temp_catalog(tag, contents);
            let mut state =
                CatalogState::new(CatalogSource::File(path.clone()), ProductCatalog::default_widgets());

            assert_eq!(state.reload(), 0, "{tag}");
            assert!(state.catalog().is_empty());
            fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_missing_file_leaves_catalog_empty() {
        let config = ConfigState {
            catalog_path: Some(PathBuf::from("/nonexistent/widget-catalog.json")),
            ..ConfigState::default()
        };
        let state = CatalogState::load(&config);

        assert!(matches!(state.source(), CatalogSource::File(_)));
        assert!(state.catalog().is_empty());
    }

    #[test]
    fn test_reload_from_file_replaces_catalog() {
        let path = temp_catalog("replace", r#"[{"sku": "gizmo0007", "name": "Gizmo", "price": 4.5}]"#);

        let mut state = CatalogState::new(CatalogSource::File(path.clone()), ProductCatalog::default_widgets());
        assert_eq!(state.reload(), 1);
        assert_eq!(state.catalog().get("gizmo0007").unwrap().price.cents(), 450);
        assert!(state.catalog().get("item0001").is_none());

        fs::remove_file(&path).unwrap();
        assert_eq!(state.reload(), 0);
    }
}
