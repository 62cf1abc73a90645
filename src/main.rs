mod api;
mod config;
mod controllers;
mod models;
mod seeds;
mod services;
mod shell;
mod storage;
mod utils;
mod validation;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./data".to_string());

    log::info!("🚀 Starting User Admin Service...");
    log::info!("💾 Storage directory: {}", storage_dir);

    let storage =
        storage::FileStore::new(&storage_dir).expect("Failed to initialize storage directory");
    let service = UserService::new(Arc::new(storage));

    // 🌱 First access seeds the collection; later boots just report the count
    match service.get_all().await {
        Ok(users) => log::info!("✅ User collection ready ({} users)", users.len()),
        Err(e) => log::error!("❌ Failed to initialize user collection: {}", e),
    }

    let state = web::Data::new(api::AppState {
        shell: tokio::sync::Mutex::new(shell::Shell::new(service)),
    });

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173") // Frontend Web (Vite)
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Pages (navigation destinations)
            .route("/", web::get().to(api::pages::list_page))
            .route("/create", web::get().to(api::pages::create_page))
            .route("/edit/{id}", web::get().to(api::pages::edit_page))
            // User actions
            .service(
                web::scope("/api/v1/users")
                    .route("/search", web::post().to(api::users::search_users))
                    .route("/reset", web::post().to(api::users::reset_users))
                    .route("/form", web::post().to(api::users::submit_form))
                    .route("/{id}", web::delete().to(api::users::delete_user)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
