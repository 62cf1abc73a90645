use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Admin Service API",
        version = "1.0.0",
        description = "Backend for the user administration UI. \n\n**Pages** return the view models the browser renders at `/`, `/create` and `/edit/{id}`; **Users** endpoints carry the actions triggered from those views (search, delete, reset, form submit). Form fields and validation rules come from a single configuration table on the server.",
        contact(
            name = "User Admin Service Team",
            email = "support@user-admin-service.com"
        )
    ),
    paths(
        // Pages
        crate::api::pages::list_page,
        crate::api::pages::create_page,
        crate::api::pages::edit_page,

        // User actions
        crate::api::users::search_users,
        crate::api::users::delete_user,
        crate::api::users::reset_users,
        crate::api::users::submit_form,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Views
            crate::controllers::ListView,
            crate::controllers::UserRow,
            crate::controllers::ListState,
            crate::controllers::FormView,
            crate::controllers::FieldView,
            crate::controllers::FormState,
            crate::config::FieldKind,
            crate::validation::FieldError,

            // Requests
            crate::api::users::SearchRequest,
            crate::api::users::SubmitFormRequest,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Pages", description = "Navigation destinations of the UI. Each returns the view model for that destination."),
        (name = "Users", description = "Actions on the user collection: search the loaded list, delete with confirmation, reset to seed data, submit the create/edit form."),
        (name = "Health", description = "Health check endpoint for monitoring service status.")
    )
)]
pub struct ApiDoc;
