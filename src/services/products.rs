use actix_multipart::form::tempfile::TempFile;

use crate::domain::product::Product;
use crate::forms::products::ProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::uploads::ImageStore;

/// Validates the submitted fields, stores the optional image and inserts
/// the product.
///
/// The image is written before the row; a failed copy aborts the insert,
/// while an insert failing afterwards leaves the copied file behind.
pub fn create_product<R>(
    repo: &R,
    images: &ImageStore,
    form: &ProductForm,
    image: Option<TempFile>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let input = form.validated().map_err(ServiceError::Validation)?;

    let mut new_product = input.into_new_product();

    if let Some(file) = image.filter(|file| file.size > 0) {
        new_product = new_product.with_image(images.save(&file)?);
    }

    repo.create_product(&new_product).map_err(ServiceError::from)
}

/// Fetch a single product, mapping a missing row to `NotFound`.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Validates the submitted fields and merges them onto an existing
/// product. The stored image path is only replaced when a new non-empty
/// file was uploaded.
pub fn update_product<R>(
    repo: &R,
    images: &ImageStore,
    product_id: i32,
    form: &ProductForm,
    image: Option<TempFile>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let input = form.validated().map_err(ServiceError::Validation)?;

    let mut updates = input.into_update_product();

    if let Some(file) = image.filter(|file| file.size > 0) {
        updates = updates.with_image(images.save(&file)?);
    }

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a product, mapping a missing row to `NotFound`.
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}
