//! Phone catalog and product capture.
//!
//! The catalog is static data: three brands, their model listings, and the
//! storage-tier price table. [`CatalogCaptureService`] materializes a
//! chosen configuration into a persisted [`Product`] at checkout time.

use thiserror::Error;

use cenphone_core::{Price, PriceError, ProductId, UserId};

use crate::db::{RepositoryError, Store};
use crate::models::Product;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The display price did not parse. Never silently zero.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Gateway/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Product not found.
    #[error("product not found")]
    ProductNotFound,
}

/// One model in the catalog listing.
#[derive(Debug, Clone, Copy)]
pub struct PhoneModel {
    /// Model name, e.g. "iPhone 15".
    pub name: &'static str,
    /// Base display price, e.g. "$899".
    pub base_price: &'static str,
    /// Offered storage capacities.
    pub storage_options: &'static [&'static str],
    /// Offered colors.
    pub colors: &'static [&'static str],
}

/// One brand and its model listing.
#[derive(Debug, Clone, Copy)]
pub struct PhoneBrand {
    /// Brand name as shown on the brand selection screen.
    pub name: &'static str,
    /// Models offered under this brand.
    pub models: &'static [PhoneModel],
}

/// Storage capacities priced by tier, independent of model.
const STORAGE_PRICES: &[(&str, &str)] = &[
    ("64 GB", "$699"),
    ("128 GB", "$799"),
    ("256 GB", "$899"),
    ("512 GB", "$999"),
];

/// The full brand/model listing.
pub const CATALOG: &[PhoneBrand] = &[
    PhoneBrand {
        name: "iPhone",
        models: &[
            PhoneModel {
                name: "iPhone 15",
                base_price: "$899",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Red", "Gold", "Silver"],
            },
            PhoneModel {
                name: "iPhone 15 Pro",
                base_price: "$999",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Graphite", "Silver", "Blue"],
            },
            PhoneModel {
                name: "iPhone 14",
                base_price: "$799",
                storage_options: &["64 GB", "128 GB", "256 GB"],
                colors: &["Blue", "Black", "Silver"],
            },
            PhoneModel {
                name: "iPhone 13",
                base_price: "$799",
                storage_options: &["64 GB", "128 GB", "256 GB"],
                colors: &["Blue", "Black", "Silver"],
            },
        ],
    },
    PhoneBrand {
        name: "Samsung",
        models: &[
            PhoneModel {
                name: "Galaxy S23",
                base_price: "$699",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Black", "White", "Silver"],
            },
            PhoneModel {
                name: "Galaxy Z Fold 5",
                base_price: "$1799",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Phantom Black", "Cream", "Silver"],
            },
            PhoneModel {
                name: "Galaxy Z Fold 6",
                base_price: "$1999",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Gray", "Green", "Silver"],
            },
            PhoneModel {
                name: "Galaxy S21",
                base_price: "$1999",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Gray", "Green", "Silver"],
            },
        ],
    },
    PhoneBrand {
        name: "Google Pixel",
        models: &[
            PhoneModel {
                name: "Google Pixel 9",
                base_price: "$699",
                storage_options: &["64 GB", "128 GB", "256 GB"],
                colors: &["Obsidian", "Snow", "Blue"],
            },
            PhoneModel {
                name: "Google Pixel 9 Pro",
                base_price: "$999",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Lemongrass", "Charcoal", "Silver"],
            },
            PhoneModel {
                name: "Google Pixel 8",
                base_price: "$599",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Mint", "Black", "Silver"],
            },
            PhoneModel {
                name: "Google Pixel 8 Pro",
                base_price: "$599",
                storage_options: &["128 GB", "256 GB", "512 GB"],
                colors: &["Mint", "Black", "Silver"],
            },
        ],
    },
];

/// Brand names in listing order.
#[must_use]
pub fn brands() -> Vec<&'static str> {
    CATALOG.iter().map(|b| b.name).collect()
}

/// The model listing for a brand, if the brand exists.
#[must_use]
pub fn models(brand: &str) -> Option<&'static [PhoneModel]> {
    CATALOG.iter().find(|b| b.name == brand).map(|b| b.models)
}

/// Look up one model by brand and name.
#[must_use]
pub fn find_model(brand: &str, name: &str) -> Option<&'static PhoneModel> {
    models(brand)?.iter().find(|m| m.name == name)
}

/// The display price for a storage tier, when the tier is priced.
#[must_use]
pub fn price_for_storage(storage: &str) -> Option<&'static str> {
    STORAGE_PRICES
        .iter()
        .find(|(tier, _)| *tier == storage)
        .map(|(_, price)| *price)
}

/// Materializes chosen phone configurations into persisted products.
pub struct CatalogCaptureService<'a, S> {
    store: &'a S,
}

impl<'a, S: Store> CatalogCaptureService<'a, S> {
    /// Create a new capture service over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Persist a chosen configuration as a new [`Product`].
    ///
    /// The price arrives as the display string shown to the shopper
    /// (e.g. `"$899"`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] if the display price does
    /// not parse as a non-negative decimal, or
    /// [`CatalogError::Repository`] if the write fails.
    pub fn capture_selection(
        &self,
        make: &str,
        model: &str,
        color: &str,
        storage: &str,
        price_display: &str,
        owner: Option<UserId>,
    ) -> Result<Product, CatalogError> {
        let price = Price::parse_display(price_display)?;

        let product = Product {
            id: ProductId::generate(),
            make: make.to_owned(),
            model: model.to_owned(),
            color: color.to_owned(),
            storage: storage.to_owned(),
            price,
            owner,
        };

        self.store.create_product(product.clone())?;
        tracing::info!(product_id = %product.id, model = %product.display_name(), "product captured");
        Ok(product)
    }

    /// Overwrite an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the ID resolves to
    /// nothing, or [`CatalogError::Repository`] if the write fails.
    pub fn update_product(&self, product: Product) -> Result<(), CatalogError> {
        self.store.update_product(product).map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::ProductNotFound,
            other => CatalogError::Repository(other),
        })
    }

    /// Hard-delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the ID resolves to
    /// nothing, or [`CatalogError::Repository`] if the delete fails.
    pub fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.store.delete_product(id).map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::ProductNotFound,
            other => CatalogError::Repository(other),
        })
    }
}
