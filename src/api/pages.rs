// Navigation endpoints. Each one moves the shell to a destination and
// returns the view model the browser renders there.

use actix_web::{web, HttpResponse, Responder};

use crate::api::{error_response, AppState};
use crate::controllers::{FormView, ListView};
use crate::shell::Route;
use crate::utils::error::AppError;

/// GET / - List view
#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    responses(
        (status = 200, description = "List view with all users", body = ListView),
        (status = 500, description = "Failed to load users")
    )
)]
pub async fn list_page(state: web::Data<AppState>) -> impl Responder {
    log::info!("📋 GET / - Entering list view");

    let mut shell = state.shell.lock().await;
    match shell.navigate(Route::List).await {
        Ok(()) => match shell.list() {
            Some(list) => HttpResponse::Ok().json(list.view()),
            None => error_response(&AppError::Unexpected("list view not active".to_string())),
        },
        Err(e) => error_response(&e),
    }
}

/// GET /create - Empty form view
#[utoipa::path(
    get,
    path = "/create",
    tag = "Pages",
    responses(
        (status = 200, description = "Empty create form", body = FormView)
    )
)]
pub async fn create_page(state: web::Data<AppState>) -> impl Responder {
    log::info!("📝 GET /create - Entering create form");

    let mut shell = state.shell.lock().await;
    match shell.navigate(Route::Create).await {
        Ok(()) => match shell.form() {
            Some(form) => HttpResponse::Ok().json(form.view()),
            None => error_response(&AppError::Unexpected("form view not active".to_string())),
        },
        Err(e) => error_response(&e),
    }
}

/// GET /edit/{id} - Form view prefilled with the stored record
#[utoipa::path(
    get,
    path = "/edit/{id}",
    tag = "Pages",
    params(
        ("id" = String, Path, description = "Identifier of the user being edited")
    ),
    responses(
        (status = 200, description = "Prefilled edit form", body = FormView),
        (status = 404, description = "No user has that id; client should go back to the list"),
        (status = 500, description = "Failed to fetch the user")
    )
)]
pub async fn edit_page(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    log::info!("✏️ GET /edit/{} - Entering edit form", id);

    let mut shell = state.shell.lock().await;
    match shell.navigate(Route::Edit(id.into_inner())).await {
        Ok(()) => match shell.form() {
            Some(form) => HttpResponse::Ok().json(form.view()),
            None => error_response(&AppError::Unexpected("form view not active".to_string())),
        },
        Err(e) => {
            // The shell already fell back to the list; tell the client to follow
            let body = serde_json::json!({
                "success": false,
                "error": "Failed to fetch user details.",
                "redirect": Route::List.path()
            });
            match e {
                AppError::NotFound(_) => HttpResponse::NotFound().json(body),
                _ => HttpResponse::InternalServerError().json(body),
            }
        }
    }
}
