use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};

/// Multipart payload accepted by the create and update endpoints.
///
/// Every text field is optional at the extractor level so that a missing
/// field reaches the validation layer (and produces a form error) instead
/// of failing extraction with an opaque 400.
#[derive(Debug, MultipartForm)]
pub struct ProductMultipartForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub rating: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl ProductMultipartForm {
    /// Split the payload into the submitted text fields and the optional
    /// uploaded file.
    pub fn into_parts(self) -> (ProductForm, Option<TempFile>) {
        let form = ProductForm {
            name: self.name.map(Text::into_inner).unwrap_or_default(),
            description: self.description.map(Text::into_inner).unwrap_or_default(),
            category: self.category.map(Text::into_inner).unwrap_or_default(),
            price: self.price.map(Text::into_inner).unwrap_or_default(),
            rating: self.rating.map(Text::into_inner).unwrap_or_default(),
        };
        (form, self.image)
    }
}

/// Raw text fields submitted from the create/edit forms.
///
/// Serializes so a failed update can re-render the edit form with the
/// user's submitted values intact.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    /// Raw price text; validated as a number greater than zero.
    pub price: String,
    /// Raw rating text; validated as an integer in `1..=5`.
    pub rating: String,
}

/// Typed input produced only after every validation rule passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub rating: i32,
}

impl ProductInput {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct::new(
            self.name,
            self.description,
            self.category,
            self.price,
            self.rating,
        )
    }

    pub fn into_update_product(self) -> UpdateProduct {
        UpdateProduct::new(
            self.name,
            self.description,
            self.category,
            self.price,
            self.rating,
        )
    }
}

impl ProductForm {
    /// Apply every field rule and either produce the typed input or the
    /// full ordered list of failure messages.
    ///
    /// Rules are independent per field; the reported order is fixed as
    /// name, description, category, price, rating.
    pub fn validated(&self) -> Result<ProductInput, Vec<String>> {
        let mut errors = Vec::new();

        match self.validate() {
            Ok(()) => {}
            Err(validation_errors) => {
                collect_field_messages(&validation_errors, "name", &mut errors);
                collect_field_messages(&validation_errors, "description", &mut errors);
                collect_field_messages(&validation_errors, "category", &mut errors);
            }
        }

        let price = match self.price.parse::<f64>() {
            Ok(value) if value > 0.0 => Some(value),
            _ => {
                errors.push("Price must be a positive number".to_string());
                None
            }
        };

        let rating = match self.rating.parse::<i32>() {
            Ok(value) if (1..=5).contains(&value) => Some(value),
            _ => {
                errors.push("Rating must be between 1 and 5".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            // Both parses succeeded when no error was recorded.
            price: price.unwrap_or_default(),
            rating: rating.unwrap_or_default(),
        })
    }
}

fn collect_field_messages(errors: &ValidationErrors, field: &'static str, out: &mut Vec<String>) {
    if let Some(field_errors) = errors.field_errors().get(field) {
        for error in field_errors.iter() {
            if let Some(message) = error.message.as_ref() {
                out.push(message.to_string());
            }
        }
    }
}
