// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{community, interaction},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Public read routes and authenticated write routes under `/api/posts`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (post store, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let public_routes = Router::new()
        .route("/test", get(community::test_route))
        .route("/", get(community::list_posts))
        .route("/{id}", get(community::get_post));

    // Every mutation needs a caller identity.
    let protected_routes = Router::new()
        .route("/", post(community::create_post))
        .route("/{id}", delete(community::delete_post))
        .route("/like/{id}", post(interaction::like_post))
        .route("/unlike/{id}", post(interaction::unlike_post))
        .route("/comment/{id}", post(interaction::create_comment))
        .route(
            "/comment/{id}/{comment_id}",
            delete(interaction::delete_comment),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let post_routes: Router<AppState> = public_routes.merge(protected_routes);

    // `/api/posts/` is served as well as `/api/posts`.
    let collection_routes: Router<AppState> = Router::new()
        .route("/api/posts/", get(community::list_posts))
        .merge(
            Router::new()
                .route("/api/posts/", post(community::create_post))
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        );

    Router::new()
        .nest("/api/posts", post_routes)
        .merge(collection_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
