use crate::domain::product::Product;
use crate::repository::ProductReader;
use crate::services::ServiceResult;

/// Session key holding the ordered list of favorited product ids.
pub const FAVORITES_SESSION_KEY: &str = "favorites";

/// Append `product_id` to the favorites list unless it is already present.
pub fn add_favorite(mut favorites: Vec<i32>, product_id: i32) -> Vec<i32> {
    if !favorites.contains(&product_id) {
        favorites.push(product_id);
    }
    favorites
}

/// Remove `product_id` from the favorites list.
///
/// Removing an id that is not present, including from an empty list, is a
/// no-op.
pub fn remove_favorite(mut favorites: Vec<i32>, product_id: i32) -> Vec<i32> {
    favorites.retain(|id| *id != product_id);
    favorites
}

/// Load the products behind the session favorites list.
pub fn load_favorites_page<R>(repo: &R, favorites: &[i32]) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    if favorites.is_empty() {
        return Ok(Vec::new());
    }

    Ok(repo.list_products_by_ids(favorites)?)
}
