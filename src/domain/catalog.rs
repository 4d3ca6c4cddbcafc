// SPDX-License-Identifier: MPL-2.0
//! Catalog types shared between the product form and the catalog store.

use serde::{Deserialize, Serialize};

/// Product audience. The storefront knows exactly these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Kids,
}

impl Gender {
    /// All genders, in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Kids];
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Kids => write!(f, "Kids"),
        }
    }
}

/// A named lookup row (brand, color, SEO name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub id: u64,
    pub name: String,
}

/// A size option offered when composing size/stock rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: u64,
    pub size: String,
}

/// A category together with its sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub sub_categories: Vec<NamedEntry>,
}

/// Stock units for one size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub size: String,
    pub units: u32,
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub manufacturer_id: String,
    pub price: f64,
    pub discount: f64,
    pub gender: Gender,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub colors: Vec<String>,
    pub units: Vec<StockEntry>,
    pub seo_names: Vec<String>,
    /// Image references in display order; index 0 is the cover image.
    pub image_urls: Vec<String>,
    pub created_at: i64,
}

/// A fully validated product submission, ready for the catalog mapper.
///
/// Construction goes through the product form's validation, so every field
/// here already satisfies the business rules (name length, price floor,
/// image count, non-empty color and size selections).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub manufacturer_id: String,
    pub price: f64,
    pub discount: f64,
    pub gender: Gender,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub colors: Vec<String>,
    pub units: Vec<StockEntry>,
    pub seo_names: Vec<String>,
    /// Image references in display order; index 0 is the cover image.
    pub image_urls: Vec<String>,
}
