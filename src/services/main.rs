use serde::Deserialize;

use crate::domain::product::{Product, ProductListQuery, ProductSort};
use crate::repository::ProductReader;
use crate::services::ServiceResult;

/// Query parameters accepted by the catalog index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional search string matched against product names.
    pub search: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Optional sort: `price` ascending, anything else rating descending.
    pub sort: Option<String>,
}

/// Data required to render the catalog index template.
pub struct IndexPageData {
    /// Products matching the filters, in the requested order.
    pub products: Vec<Product>,
    /// Search term echoed back to the view when present.
    pub search: Option<String>,
    /// Category filter echoed back to the view when present.
    pub category: Option<String>,
    /// Sort parameter echoed back to the view when present.
    pub sort: Option<String>,
}

/// Loads the filtered, sorted product listing.
///
/// Empty-string parameters are treated the same as absent ones.
pub fn load_index_page<R>(repo: &R, query: IndexQuery) -> ServiceResult<IndexPageData>
where
    R: ProductReader + ?Sized,
{
    let IndexQuery {
        search,
        category,
        sort,
    } = query;

    let mut list_query = ProductListQuery::new();

    if let Some(term) = search.as_ref().filter(|term| !term.is_empty()) {
        list_query = list_query.search(term.as_str());
    }

    if let Some(value) = category.as_ref().filter(|value| !value.is_empty()) {
        list_query = list_query.category(value.as_str());
    }

    if let Some(param) = sort.as_ref().filter(|param| !param.is_empty()) {
        list_query = list_query.sort(ProductSort::from_param(param));
    }

    let products = repo.list_products(list_query)?;

    Ok(IndexPageData {
        products,
        search,
        category,
        sort,
    })
}
