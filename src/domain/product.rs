use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier assigned by the store on creation.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown on the listing and detail pages.
    pub description: String,
    /// Category used as an exact-match filter facet.
    pub category: String,
    /// Price of the product, always greater than zero.
    pub price: f64,
    /// Customer rating, always within `1..=5`.
    pub rating: i32,
    /// Public-relative path to the uploaded image, if any.
    pub image: Option<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: i32,
    pub image: Option<String>,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and no image.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        rating: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
            rating,
            image: None,
        }
    }

    /// Attach the public path of an uploaded image to the payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Merge data applied when updating an existing product.
///
/// Every validated field is rewritten; `image` is only touched when a new
/// file was uploaded, so `None` leaves the stored path as-is.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: i32,
    pub image: Option<String>,
    /// Timestamp captured when the merge payload was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        rating: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            price,
            rating,
            image: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Replace the stored image path with a freshly uploaded one.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Ordering applied to a product listing.
///
/// `price` sorts ascending while any other requested sort falls back to
/// rating descending; the asymmetry is deliberate and mirrors the shipped
/// behavior of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAscending,
    RatingDescending,
}

impl ProductSort {
    /// Map a raw `sort` query parameter onto an ordering.
    pub fn from_param(param: &str) -> Self {
        if param == "price" {
            ProductSort::PriceAscending
        } else {
            ProductSort::RatingDescending
        }
    }
}

/// Query definition used to filter and order the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Optional exact category filter, AND-composed with `search`.
    pub category: Option<String>,
    /// Optional ordering; absent leaves stable id order.
    pub sort: Option<ProductSort>,
}

impl ProductListQuery {
    /// Construct a query matching every product in stable id order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to an exact category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Apply an ordering to the results.
    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = Some(sort);
        self
    }
}
