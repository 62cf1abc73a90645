// User actions invoked from the rendered views: search-as-you-type,
// confirmed delete, confirmed reset and form submission.

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::api::{error_response, AppState};
use crate::controllers::{FormView, ListView, SubmitOutcome};
use crate::shell::Route;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SearchRequest {
    pub term: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitFormRequest {
    /// Field name to entered value, one entry per rendered input
    pub values: BTreeMap<String, String>,
}

fn list_not_active() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": "List view is not active"
    }))
}

/// POST /api/v1/users/search - Filtra a lista carregada (sem refetch)
#[utoipa::path(
    post,
    path = "/api/v1/users/search",
    tag = "Users",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Filtered list view", body = ListView),
        (status = 400, description = "List view is not active")
    )
)]
pub async fn search_users(
    state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> impl Responder {
    log::debug!("🔍 POST /api/v1/users/search - term '{}'", request.term);

    let mut shell = state.shell.lock().await;
    match shell.list_mut() {
        Some(list) => {
            list.set_search_term(&request.term);
            HttpResponse::Ok().json(list.view())
        }
        None => list_not_active(),
    }
}

/// DELETE /api/v1/users/{id} - Remove usuário (confirmação já feita no browser)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Identifier of the user to delete")
    ),
    responses(
        (status = 200, description = "User removed; updated list view", body = ListView),
        (status = 400, description = "List view is not active"),
        (status = 500, description = "Store delete failed; list left unchanged")
    )
)]
pub async fn delete_user(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    log::info!("🗑️ DELETE /api/v1/users/{} - Deleting user", id);

    let mut shell = state.shell.lock().await;
    match shell.list_mut() {
        Some(list) => match list.delete(&id).await {
            Ok(()) => HttpResponse::Ok().json(list.view()),
            Err(e) => error_response(&e),
        },
        None => list_not_active(),
    }
}

/// POST /api/v1/users/reset - Volta a coleção para os dados iniciais
#[utoipa::path(
    post,
    path = "/api/v1/users/reset",
    tag = "Users",
    responses(
        (status = 200, description = "Collection reseeded; fresh list view", body = ListView),
        (status = 400, description = "List view is not active"),
        (status = 500, description = "Reset failed; previous records restored")
    )
)]
pub async fn reset_users(state: web::Data<AppState>) -> impl Responder {
    log::info!("🔄 POST /api/v1/users/reset - Resetting user collection");

    let mut shell = state.shell.lock().await;
    match shell.list_mut() {
        Some(list) => match list.reset().await {
            Ok(()) => HttpResponse::Ok().json(list.view()),
            Err(e) => error_response(&e),
        },
        None => list_not_active(),
    }
}

/// POST /api/v1/users/form - Submete o formulário ativo (create ou edit)
#[utoipa::path(
    post,
    path = "/api/v1/users/form",
    tag = "Users",
    request_body = SubmitFormRequest,
    responses(
        (status = 200, description = "Saved; client should follow the redirect"),
        (status = 400, description = "Form view is not active"),
        (status = 422, description = "Validation failed; form view with field errors", body = FormView),
        (status = 500, description = "Save failed; form view keeps the entered values", body = FormView)
    )
)]
pub async fn submit_form(
    state: web::Data<AppState>,
    request: web::Json<SubmitFormRequest>,
) -> impl Responder {
    let mut shell = state.shell.lock().await;
    let form = match shell.form_mut() {
        Some(form) => form,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Form view is not active"
            }));
        }
    };

    for (name, value) in &request.values {
        form.set_value(name, value.clone());
    }

    match form.submit().await {
        SubmitOutcome::Saved(user) => {
            log::info!("✅ Saved user {}", user.id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "id": user.id,
                "redirect": Route::List.path()
            }))
        }
        SubmitOutcome::Rejected => HttpResponse::UnprocessableEntity().json(form.view()),
        SubmitOutcome::Failed(AppError::NotFound(_)) => {
            HttpResponse::NotFound().json(form.view())
        }
        SubmitOutcome::Failed(_) => HttpResponse::InternalServerError().json(form.view()),
    }
}
