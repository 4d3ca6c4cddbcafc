// SPDX-License-Identifier: MPL-2.0
//! Catalog store and product mapper.
//!
//! Lookup tables (brands, colors, sizes, categories, SEO names) and products
//! live together in one CBOR file. `create_product` applies connect-or-create
//! semantics: brand, category, sub-category, sizes and SEO names are created
//! on first use, while colors must already exist in the palette.

use crate::app::paths;
use crate::domain::catalog::{Category, NamedEntry, Product, ProductDraft, SizeOption};
use crate::error::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Store file name within the app data directory.
const CATALOG_FILE: &str = "catalog.cbor";

/// Colors available out of the box. The product form offers no way to invent
/// colors, so a fresh store starts with the full palette.
const DEFAULT_COLORS: [&str; 11] = [
    "blue", "gray", "red", "orange", "yellow", "green", "cyan", "purple", "pink", "white", "black",
];

/// The whole catalog, persisted as one CBOR file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStore {
    brands: Vec<NamedEntry>,
    colors: Vec<NamedEntry>,
    sizes: Vec<SizeOption>,
    categories: Vec<Category>,
    seo_names: Vec<NamedEntry>,
    products: Vec<Product>,
    next_id: u64,
}

impl CatalogStore {
    /// An empty catalog with the default color palette installed.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut store = Self::default();
        for name in DEFAULT_COLORS {
            let id = store.next_id();
            store.colors.push(NamedEntry {
                id,
                name: name.to_string(),
            });
        }
        store
    }

    /// Loads the catalog from the default location.
    ///
    /// A missing file yields a default catalog; a damaged file yields a
    /// default catalog plus a warning key for the notification area.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the catalog from a custom directory (tests, portable installs).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::store_file_path(base_dir) else {
            return (Self::with_defaults(), None);
        };

        if !path.exists() {
            return (Self::with_defaults(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(store) => (store, None),
                Err(_) => (
                    Self::with_defaults(),
                    Some("notification-catalog-parse-error".to_string()),
                ),
            },
            Err(_) => (
                Self::with_defaults(),
                Some("notification-catalog-read-error".to_string()),
            ),
        }
    }

    /// Saves the catalog, creating the data directory if needed.
    /// Returns an optional warning key if saving failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves the catalog to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::store_file_path(base_dir) else {
            return Some("notification-catalog-save-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-catalog-save-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("notification-catalog-save-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-catalog-save-error".to_string()),
        }
    }

    fn store_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(CATALOG_FILE);
            path
        })
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // =========================================================================
    // Lookup-table listings (descending by name, matching the admin form)
    // =========================================================================

    #[must_use]
    pub fn brands(&self) -> Vec<NamedEntry> {
        sorted_desc(self.brands.clone())
    }

    #[must_use]
    pub fn colors(&self) -> Vec<NamedEntry> {
        sorted_desc(self.colors.clone())
    }

    #[must_use]
    pub fn sizes(&self) -> Vec<SizeOption> {
        let mut sizes = self.sizes.clone();
        sizes.sort_by(|a, b| b.size.cmp(&a.size));
        sizes
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| b.name.cmp(&a.name));
        for category in &mut categories {
            category.sub_categories.sort_by(|a, b| b.name.cmp(&a.name));
        }
        categories
    }

    /// Sub-categories of the named category, or empty when it is unknown.
    #[must_use]
    pub fn sub_categories_of(&self, category_name: &str) -> Vec<NamedEntry> {
        self.categories
            .iter()
            .find(|category| category.name == category_name)
            .map(|category| sorted_desc(category.sub_categories.clone()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    // =========================================================================
    // Product mapping
    // =========================================================================

    /// Stores a validated draft as a product.
    ///
    /// Brand, category, sub-category, sizes and SEO names are created when
    /// they do not exist yet; colors must already be in the palette.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<&Product> {
        for color in &draft.colors {
            if !self
                .colors
                .iter()
                .any(|entry| entry.name.eq_ignore_ascii_case(color))
            {
                return Err(Error::Store(format!("unknown color: {color}")));
            }
        }

        self.connect_or_create_brand(&draft.brand);
        self.connect_or_create_category(&draft.category, &draft.sub_category);
        for entry in &draft.units {
            self.connect_or_create_size(&entry.size);
        }
        for seo_name in &draft.seo_names {
            self.connect_or_create_seo_name(seo_name);
        }

        let id = self.next_id();
        self.products.push(Product {
            id,
            name: draft.name,
            manufacturer_id: draft.manufacturer_id,
            price: draft.price,
            discount: draft.discount,
            gender: draft.gender,
            brand: draft.brand,
            category: draft.category,
            sub_category: draft.sub_category,
            colors: draft.colors,
            units: draft.units,
            seo_names: draft.seo_names,
            image_urls: draft.image_urls,
            created_at: Utc::now().timestamp(),
        });
        Ok(self.products.last().expect("just pushed"))
    }

    /// Removes a product. Returns `false` when the id is unknown.
    pub fn delete_product(&mut self, id: u64) -> bool {
        let before = self.products.len();
        self.products.retain(|product| product.id != id);
        self.products.len() != before
    }

    fn connect_or_create_brand(&mut self, name: &str) {
        // Brand is the one optional combobox; an empty pick interns nothing.
        if name.is_empty() {
            return;
        }
        if !self.brands.iter().any(|brand| brand.name == name) {
            let id = self.next_id();
            self.brands.push(NamedEntry {
                id,
                name: name.to_string(),
            });
        }
    }

    fn connect_or_create_category(&mut self, category_name: &str, sub_category_name: &str) {
        if !self
            .categories
            .iter()
            .any(|category| category.name == category_name)
        {
            let id = self.next_id();
            self.categories.push(Category {
                id,
                name: category_name.to_string(),
                sub_categories: Vec::new(),
            });
        }

        let already_present = self
            .categories
            .iter()
            .find(|category| category.name == category_name)
            .is_some_and(|category| {
                category
                    .sub_categories
                    .iter()
                    .any(|sub| sub.name == sub_category_name)
            });
        if !already_present {
            let sub_id = self.next_id();
            let category = self
                .categories
                .iter_mut()
                .find(|category| category.name == category_name)
                .expect("category interned above");
            category.sub_categories.push(NamedEntry {
                id: sub_id,
                name: sub_category_name.to_string(),
            });
        }
    }

    fn connect_or_create_size(&mut self, size: &str) {
        if !self.sizes.iter().any(|entry| entry.size == size) {
            let id = self.next_id();
            self.sizes.push(SizeOption {
                id,
                size: size.to_string(),
            });
        }
    }

    fn connect_or_create_seo_name(&mut self, name: &str) {
        if !self.seo_names.iter().any(|entry| entry.name == name) {
            let id = self.next_id();
            self.seo_names.push(NamedEntry {
                id,
                name: name.to_string(),
            });
        }
    }
}

fn sorted_desc(mut entries: Vec<NamedEntry>) -> Vec<NamedEntry> {
    entries.sort_by(|a, b| b.name.cmp(&a.name));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Gender, StockEntry};
    use tempfile::tempdir;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Air Runner".to_string(),
            manufacturer_id: "AR-001".to_string(),
            price: 79.95,
            discount: 0.0,
            gender: Gender::Male,
            brand: "Nike".to_string(),
            category: "zapatos".to_string(),
            sub_category: "Running".to_string(),
            colors: vec!["black".to_string(), "white".to_string()],
            units: vec![
                StockEntry {
                    size: "42".to_string(),
                    units: 4,
                },
                StockEntry {
                    size: "43".to_string(),
                    units: 0,
                },
            ],
            seo_names: vec!["air runner".to_string()],
            image_urls: vec![
                "a.png".to_string(),
                "b.png".to_string(),
                "c.png".to_string(),
            ],
        }
    }

    #[test]
    fn defaults_include_color_palette() {
        let store = CatalogStore::with_defaults();
        let colors = store.colors();
        assert_eq!(colors.len(), DEFAULT_COLORS.len());
        assert!(colors.iter().any(|color| color.name == "black"));
    }

    #[test]
    fn listings_are_sorted_descending() {
        let mut store = CatalogStore::with_defaults();
        store.create_product(draft()).expect("create succeeds");

        let colors = store.colors();
        let mut sorted = colors.clone();
        sorted.sort_by(|a, b| b.name.cmp(&a.name));
        assert_eq!(colors, sorted);
    }

    #[test]
    fn create_product_interns_lookup_rows() {
        let mut store = CatalogStore::with_defaults();
        store.create_product(draft()).expect("create succeeds");

        assert!(store.brands().iter().any(|brand| brand.name == "Nike"));
        assert!(store.sizes().iter().any(|size| size.size == "42"));
        assert_eq!(store.sub_categories_of("zapatos").len(), 1);

        // A second product reusing the same rows must not duplicate them.
        store.create_product(draft()).expect("create succeeds");
        assert_eq!(
            store
                .brands()
                .iter()
                .filter(|brand| brand.name == "Nike")
                .count(),
            1
        );
        assert_eq!(
            store
                .sizes()
                .iter()
                .filter(|size| size.size == "42")
                .count(),
            1
        );
        assert_eq!(store.sub_categories_of("zapatos").len(), 1);
    }

    #[test]
    fn create_product_rejects_unknown_color() {
        let mut store = CatalogStore::with_defaults();
        let mut bad = draft();
        bad.colors.push("chartreuse".to_string());
        assert!(store.create_product(bad).is_err());
        assert!(store.products().is_empty());
    }

    #[test]
    fn image_order_is_preserved() {
        let mut store = CatalogStore::with_defaults();
        let product = store.create_product(draft()).expect("create succeeds");
        assert_eq!(product.image_urls[0], "a.png");
        assert_eq!(product.image_urls.last().map(String::as_str), Some("c.png"));
    }

    #[test]
    fn delete_product_by_id() {
        let mut store = CatalogStore::with_defaults();
        let id = store.create_product(draft()).expect("create succeeds").id;
        assert!(store.delete_product(id));
        assert!(!store.delete_product(id));
        assert!(store.products().is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = tempdir().expect("create temp dir");
        let base = temp_dir.path().to_path_buf();

        let mut store = CatalogStore::with_defaults();
        store.create_product(draft()).expect("create succeeds");
        assert!(store.save_to(Some(base.clone())).is_none());

        let (loaded, warning) = CatalogStore::load_from(Some(base));
        assert!(warning.is_none());
        assert_eq!(store, loaded);
    }

    #[test]
    fn load_from_corrupted_file_returns_defaults_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        let base = temp_dir.path().to_path_buf();
        fs::write(base.join(CATALOG_FILE), "junk").expect("write file");

        let (store, warning) = CatalogStore::load_from(Some(base));
        assert_eq!(
            warning.as_deref(),
            Some("notification-catalog-parse-error")
        );
        assert!(store.products().is_empty());
        assert_eq!(store.colors().len(), DEFAULT_COLORS.len());
    }
}
