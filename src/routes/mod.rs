use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

mod health;
pub mod todos;

pub use health::health;

use crate::state::AppState;

pub const TODOS_PREFIX: &str = "/todos";

pub fn routes() -> Router<AppState> {
    let todo_router = Router::new()
        .route("/", get(todos::routes::list))
        .route("/create", post(todos::routes::create))
        .route(
            "/{id}",
            get(todos::routes::get)
                .put(todos::routes::update)
                .delete(todos::routes::delete),
        )
        .route("/priority/{priority}", get(todos::routes::by_priority))
        .route("/category/{category}", get(todos::routes::by_category))
        .route("/status/{status}", get(todos::routes::by_status))
        .route("/points/{evaluation_points}", get(todos::routes::by_points))
        .route("/due_date/{due_date}", get(todos::routes::by_due_date));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(TODOS_PREFIX, todo_router)
}

/// The full application: routes, state, CORS open to any origin, and
/// request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Todo API written in Rust"
}
