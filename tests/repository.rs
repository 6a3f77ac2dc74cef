use product_catalog::domain::product::{
    NewProduct, ProductListQuery, ProductSort, UpdateProduct,
};
use product_catalog::repository::{DieselRepository, ProductReader, ProductWriter};
use product_catalog::repository::errors::RepositoryError;

mod common;

fn seed_catalog(repo: &DieselRepository) {
    let seed = [
        ("Pen", "Blue ink", "Office", 1.50, 4),
        ("Notebook", "Ruled pages", "Office", 3.20, 5),
        ("Mystery Novel", "A gripping read", "Books", 9.99, 3),
        ("Cookbook", "Recipes for every day", "Books", 14.50, 5),
        ("Desk Lamp", "Warm light", "Home", 24.00, 2),
    ];
    for (name, description, category, price, rating) in seed {
        repo.create_product(&NewProduct::new(name, description, category, price, rating))
            .expect("seed product");
    }
}

#[test]
fn create_product_assigns_id_and_returns_fields() {
    let test_db = common::TestDb::new("repo_create_product.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&NewProduct::new("Pen", "Blue ink", "Office", 1.50, 4))
        .expect("create product");

    assert!(created.id > 0);
    assert_eq!(created.name, "Pen");
    assert_eq!(created.description, "Blue ink");
    assert_eq!(created.category, "Office");
    assert_eq!(created.price, 1.50);
    assert_eq!(created.rating, 4);
    assert!(created.image.is_none());
}

#[test]
fn create_product_stores_image_path() {
    let test_db = common::TestDb::new("repo_create_product_image.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(
            &NewProduct::new("Pen", "Blue ink", "Office", 1.50, 4)
                .with_image("/uploads/123-pen.png"),
        )
        .expect("create product");

    assert_eq!(created.image.as_deref(), Some("/uploads/123-pen.png"));
}

#[test]
fn list_products_filters_by_exact_category() {
    let test_db = common::TestDb::new("repo_list_category.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let books = repo
        .list_products(ProductListQuery::new().category("Books"))
        .expect("list products");

    assert_eq!(books.len(), 2);
    assert!(books.iter().all(|product| product.category == "Books"));

    // Exact match is case-sensitive.
    let lowercase = repo
        .list_products(ProductListQuery::new().category("books"))
        .expect("list products");
    assert!(lowercase.is_empty());
}

#[test]
fn list_products_search_is_case_insensitive_substring() {
    let test_db = common::TestDb::new("repo_list_search.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let hits = repo
        .list_products(ProductListQuery::new().search("book"))
        .expect("list products");

    let names: Vec<&str> = hits.iter().map(|product| product.name.as_str()).collect();
    assert_eq!(names, vec!["Notebook", "Cookbook"]);
}

#[test]
fn list_products_composes_search_and_category() {
    let test_db = common::TestDb::new("repo_list_composed.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let hits = repo
        .list_products(ProductListQuery::new().search("book").category("Books"))
        .expect("list products");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Cookbook");
}

#[test]
fn list_products_sorts_price_ascending() {
    let test_db = common::TestDb::new("repo_sort_price.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let products = repo
        .list_products(ProductListQuery::new().sort(ProductSort::PriceAscending))
        .expect("list products");

    let prices: Vec<f64> = products.iter().map(|product| product.price).collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("comparable prices"));
    assert_eq!(prices, sorted);
}

#[test]
fn list_products_sorts_rating_descending() {
    let test_db = common::TestDb::new("repo_sort_rating.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let products = repo
        .list_products(ProductListQuery::new().sort(ProductSort::RatingDescending))
        .expect("list products");

    let ratings: Vec<i32> = products.iter().map(|product| product.rating).collect();
    let mut sorted = ratings.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ratings, sorted);
}

#[test]
fn list_products_without_sort_keeps_stable_id_order() {
    let test_db = common::TestDb::new("repo_default_order.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let products = repo
        .list_products(ProductListQuery::new())
        .expect("list products");

    let ids: Vec<i32> = products.iter().map(|product| product.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn list_products_by_ids_returns_only_requested() {
    let test_db = common::TestDb::new("repo_list_by_ids.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let all = repo
        .list_products(ProductListQuery::new())
        .expect("list products");
    let wanted = vec![all[0].id, all[3].id];

    let selected = repo
        .list_products_by_ids(&wanted)
        .expect("list products by ids");

    let ids: Vec<i32> = selected.iter().map(|product| product.id).collect();
    assert_eq!(ids, wanted);
}

#[test]
fn list_products_by_ids_with_empty_input_is_empty() {
    let test_db = common::TestDb::new("repo_list_by_ids_empty.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let selected = repo.list_products_by_ids(&[]).expect("list products by ids");

    assert!(selected.is_empty());
}

#[test]
fn update_product_merges_fields_and_keeps_image() {
    let test_db = common::TestDb::new("repo_update_product.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(
            &NewProduct::new("Pen", "Blue ink", "Office", 1.50, 4)
                .with_image("/uploads/123-pen.png"),
        )
        .expect("create product");

    let updated = repo
        .update_product(
            created.id,
            &UpdateProduct::new("Pen v2", "Black ink", "Office", 1.75, 5),
        )
        .expect("update product");

    assert_eq!(updated.name, "Pen v2");
    assert_eq!(updated.price, 1.75);
    assert_eq!(updated.rating, 5);
    // No new upload: the stored image path is untouched.
    assert_eq!(updated.image.as_deref(), Some("/uploads/123-pen.png"));
}

#[test]
fn update_product_replaces_image_when_uploaded() {
    let test_db = common::TestDb::new("repo_update_image.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&NewProduct::new("Pen", "Blue ink", "Office", 1.50, 4))
        .expect("create product");

    let updated = repo
        .update_product(
            created.id,
            &UpdateProduct::new("Pen", "Blue ink", "Office", 1.50, 4)
                .with_image("/uploads/456-pen.png"),
        )
        .expect("update product");

    assert_eq!(updated.image.as_deref(), Some("/uploads/456-pen.png"));
}

#[test]
fn update_missing_product_is_not_found() {
    let test_db = common::TestDb::new("repo_update_missing.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = repo.update_product(
        999,
        &UpdateProduct::new("Pen", "Blue ink", "Office", 1.50, 4),
    );

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn delete_product_removes_the_row() {
    let test_db = common::TestDb::new("repo_delete_product.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&NewProduct::new("Pen", "Blue ink", "Office", 1.50, 4))
        .expect("create product");

    repo.delete_product(created.id).expect("delete product");

    let found = repo
        .get_product_by_id(created.id)
        .expect("get product by id");
    assert!(found.is_none());
}

#[test]
fn delete_missing_product_is_not_found() {
    let test_db = common::TestDb::new("repo_delete_missing.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = repo.delete_product(999);

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}
