pub mod health;
pub mod pages;
pub mod swagger;
pub mod users;

use actix_web::HttpResponse;
use tokio::sync::Mutex;

use crate::shell::Shell;
use crate::utils::error::AppError;

/// Shared application state: one shell, one active view, one writer.
/// The mutex serializes UI actions the way a single browser tab would.
pub struct AppState {
    pub shell: Mutex<Shell>,
}

/// Standard error body with the status implied by the error kind
pub fn error_response(error: &AppError) -> HttpResponse {
    let body = serde_json::json!({
        "success": false,
        "error": error.to_string()
    });

    match error {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationFailed(_) => HttpResponse::UnprocessableEntity().json(body),
        AppError::PersistenceFailure(_) | AppError::Unexpected(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}
