use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, HttpResponseBuilder};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

pub mod main;
pub mod products;

/// Flash message shaped for the alert block in the base template.
#[derive(Debug, Serialize)]
struct Alert {
    category: &'static str,
    message: String,
}

/// Build the template context shared by every page: pending flash
/// messages and the currently active navigation entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            category: match message.level() {
                Level::Error => "danger",
                Level::Warning => "warning",
                _ => "success",
            },
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Issue a 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Render `name` with the given context, mapping render failures to an
/// opaque 500.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, name, context, StatusCode::OK)
}

/// Like [`render_template`] but with an explicit response status, used
/// for not-found pages.
pub fn render_template_with_status(
    tera: &Tera,
    name: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponseBuilder::new(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Render the shared not-found page with a 404 status.
pub fn render_not_found(tera: &Tera, context: &Context) -> HttpResponse {
    render_template_with_status(tera, "main/not_found.html", context, StatusCode::NOT_FOUND)
}
