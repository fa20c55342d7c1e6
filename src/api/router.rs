//! API Router with Swagger UI

use axum::routing::get;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::city::{CityResponse, CreateCityRequest, UpdateCityRequest};
use crate::api::dto::guide::{CreateGuideRequest, GuideResponse, UpdateGuideRequest};
use crate::api::dto::module::{CreateModuleRequest, ModuleResponse, UpdateModuleRequest};
use crate::api::dto::question::{CreateQuestionRequest, QuestionResponse, UpdateQuestionRequest};
use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::dto::{ErrorResponse, ErrorsResponse, MessageResponse};
use crate::api::handlers::{cities, guides, health, modules, questions, users, AppState};
use crate::shared::{FieldError, ListMeta, Paginated, PaginationMeta, SortMeta};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Cities
        cities::list_cities,
        cities::get_city,
        cities::create_city,
        cities::update_city,
        cities::delete_city,
        // Guides
        guides::list_guides,
        guides::get_guide,
        guides::create_guide,
        guides::update_guide,
        guides::delete_guide,
        // Modules
        modules::list_modules,
        modules::get_module,
        modules::list_module_questions,
        modules::create_module,
        modules::update_module,
        modules::delete_module,
        // Questions
        questions::list_questions,
        questions::get_question,
        questions::create_question,
        questions::update_question,
        questions::delete_question,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            // Common
            MessageResponse,
            ErrorsResponse,
            ErrorResponse,
            FieldError,
            PaginationMeta,
            SortMeta,
            ListMeta,
            // Health
            health::HealthResponse,
            // Cities
            CityResponse,
            CreateCityRequest,
            UpdateCityRequest,
            Paginated<CityResponse>,
            // Guides
            GuideResponse,
            CreateGuideRequest,
            UpdateGuideRequest,
            Paginated<GuideResponse>,
            // Modules
            ModuleResponse,
            CreateModuleRequest,
            UpdateModuleRequest,
            Paginated<ModuleResponse>,
            // Questions
            QuestionResponse,
            CreateQuestionRequest,
            UpdateQuestionRequest,
            Paginated<QuestionResponse>,
            // Users
            UserResponse,
            CreateUserRequest,
            UpdateUserRequest,
            Paginated<UserResponse>,
        )
    ),
    tags(
        (name = "Health", description = "Service availability check."),
        (name = "Cities", description = "Cities whose residents the platform serves. Names are unique."),
        (name = "Guides", description = "Educational guides, the top of the Guide → Module → Question hierarchy."),
        (name = "Modules", description = "Ordered units of a guide, each worth points."),
        (name = "Questions", description = "Interactive blocks inside a module."),
        (name = "Users", description = "Platform accounts: citizens, moderators and admins."),
    ),
    info(
        title = "EduGuides Content API",
        version = "1.0.0",
        description = "REST API for managing educational guide content.

## Pagination

Every list endpoint accepts `page` (1-based, default 1), `limit` (default 10),
`sortBy` (whitelisted per entity, default `createdAt`), `sortDirection`
(`ASC`/`DESC`, default `DESC`) and `search`. A non-blank `search` matches
case-insensitive substrings over the entity's text columns and replaces the
per-field filters. Responses are shaped as:
```json
{\"data\": [...], \"meta\": {\"pagination\": {...}, \"sort\": {...}}}
```

## Errors

Validation failures return 400 with `{\"errors\": [{\"field\", \"constraint\"}]}`
listing every violation. Missing entities return 404 and uniqueness conflicts
409, both with `{\"message\": ...}`.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let city_routes = Router::new()
        .route("/", get(cities::list_cities).post(cities::create_city))
        .route(
            "/{id}",
            get(cities::get_city)
                .put(cities::update_city)
                .delete(cities::delete_city),
        );

    let guide_routes = Router::new()
        .route("/", get(guides::list_guides).post(guides::create_guide))
        .route(
            "/{id}",
            get(guides::get_guide)
                .put(guides::update_guide)
                .delete(guides::delete_guide),
        );

    let module_routes = Router::new()
        .route("/", get(modules::list_modules).post(modules::create_module))
        .route(
            "/{id}",
            get(modules::get_module)
                .put(modules::update_module)
                .delete(modules::delete_module),
        )
        .route("/{id}/questions", get(modules::list_module_questions));

    let question_routes = Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/cities", city_routes)
        .nest("/api/v1/guides", guide_routes)
        .nest("/api/v1/modules", module_routes)
        .nest("/api/v1/questions", question_routes)
        .nest("/api/v1/users", user_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
