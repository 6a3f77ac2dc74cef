use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, delete, get, post, route, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::products::ProductMultipartForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_not_found, render_template};
use crate::services::favorites::{self, FAVORITES_SESSION_KEY};
use crate::services::products;
use crate::services::ServiceError;
use crate::uploads::ImageStore;

/// Read the favorites list out of the session, treating a missing or
/// unreadable entry as empty.
fn session_favorites(session: &Session) -> Vec<i32> {
    session
        .get::<Vec<i32>>(FAVORITES_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn store_favorites(session: &Session, favorites: &[i32]) -> Result<(), HttpResponse> {
    session
        .insert(FAVORITES_SESSION_KEY, favorites)
        .map_err(|err| {
            log::error!("Failed to store session favorites: {err}");
            HttpResponse::InternalServerError().finish()
        })
}

#[get("/products/new")]
pub async fn new_product_form(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "products");
    context.insert("errors", &Vec::<String>::new());
    render_template(&tera, "products/new.html", &context)
}

#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    let (fields, image) = form.into_parts();
    match products::create_product(repo.get_ref(), images.get_ref(), &fields, image) {
        Ok(_) => {
            FlashMessage::success("Product created.").send();
            redirect("/")
        }
        Err(ServiceError::Validation(errors)) => {
            // The create form is re-rendered with the errors only; the
            // submitted values are discarded, unlike the edit path.
            let mut context = base_context(&flash_messages, "products");
            context.insert("errors", &errors);
            render_template(&tera, "products/new.html", &context)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/favorites")]
pub async fn show_favorites(
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let favorites = session_favorites(&session);
    match favorites::load_favorites_page(repo.get_ref(), &favorites) {
        Ok(favorite_products) => {
            let mut context = base_context(&flash_messages, "favorites");
            context.insert("favorites", &favorite_products);
            render_template(&tera, "products/favorites.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list favorite products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{id}")]
pub async fn show_product(
    path: web::Path<i32>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    match products::get_product(repo.get_ref(), product_id) {
        Ok(product) => {
            let is_favorite = session_favorites(&session).contains(&product.id);
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &product);
            context.insert("is_favorite", &is_favorite);
            render_template(&tera, "products/detail.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, "products");
            render_not_found(&tera, &context)
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{id}/edit")]
pub async fn edit_product_form(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    match products::get_product(repo.get_ref(), product_id) {
        Ok(product) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &product);
            context.insert("product_id", &product.id);
            context.insert("errors", &Vec::<String>::new());
            render_template(&tera, "products/edit.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, "products");
            render_not_found(&tera, &context)
        }
        Err(err) => {
            log::error!("Failed to load product {product_id} for editing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

// POST doubles as a method override for plain HTML forms.
#[route("/products/{id}", method = "PUT", method = "POST")]
pub async fn update_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    images: web::Data<ImageStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let (fields, image) = form.into_parts();
    match products::update_product(repo.get_ref(), images.get_ref(), product_id, &fields, image) {
        Ok(product) => {
            FlashMessage::success("Product updated.").send();
            redirect(&format!("/products/{}", product.id))
        }
        Err(ServiceError::Validation(errors)) => {
            // The edit form is re-rendered with the submitted values so
            // the user can correct them in place.
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &fields);
            context.insert("product_id", &product_id);
            context.insert("errors", &errors);
            render_template(&tera, "products/edit.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, "products");
            render_not_found(&tera, &context)
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    match products::delete_product(repo.get_ref(), product_id) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, "products");
            render_not_found(&tera, &context)
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{id}/favorite")]
pub async fn add_favorite(path: web::Path<i32>, session: Session) -> impl Responder {
    let product_id = path.into_inner();
    let favorites = favorites::add_favorite(session_favorites(&session), product_id);
    if let Err(response) = store_favorites(&session, &favorites) {
        return response;
    }
    redirect(&format!("/products/{product_id}"))
}

#[post("/products/{id}/unfavorite")]
pub async fn remove_favorite(path: web::Path<i32>, session: Session) -> impl Responder {
    let product_id = path.into_inner();
    let favorites = favorites::remove_favorite(session_favorites(&session), product_id);
    if let Err(response) = store_favorites(&session, &favorites) {
        return response;
    }
    redirect(&format!("/products/{product_id}"))
}
