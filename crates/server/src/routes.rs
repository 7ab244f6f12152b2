use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use serde_json::Value;
use service::{PokemonStore, ServiceError};

use crate::errors::ApiError;

/// Header that must be present (any value) on the gated root route.
pub const GATE_HEADER: &str = "only-in-header";

async fn gate(headers: HeaderMap) -> Result<Json<Health>, ApiError> {
    if headers.contains_key(GATE_HEADER) {
        Ok(Json(Health { status: "ok" }))
    } else {
        Err(ApiError::MissingGateHeader)
    }
}

async fn list_pokemons(State(store): State<PokemonStore>) -> Json<Vec<Value>> {
    Json(store.list().await)
}

async fn create_pokemon(
    State(store): State<PokemonStore>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    store.create(payload).await.map(Json).map_err(|e| match e {
        ServiceError::Validation(msg) => ApiError::Validation(msg),
        ServiceError::NotFound(_) => ApiError::NotFound(String::new()),
    })
}

async fn get_pokemon(
    State(store): State<PokemonStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match store.get(&id).await {
        Some(rec) => Ok(Json(rec)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// PUT /pokemons — the record to replace is addressed by the body's `id`.
async fn update_pokemon_by_body(
    State(store): State<PokemonStore>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = payload
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    replace_record(&store, id, payload).await
}

/// PUT /pokemons/:id — same replace, addressed by path.
async fn update_pokemon(
    State(store): State<PokemonStore>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    replace_record(&store, id, payload).await
}

async fn replace_record(
    store: &PokemonStore,
    id: String,
    payload: Value,
) -> Result<Json<Value>, ApiError> {
    store.replace(&id, payload).await.map(Json).map_err(|e| match e {
        ServiceError::Validation(msg) => ApiError::Validation(msg),
        ServiceError::NotFound(_) => ApiError::NotFound(id),
    })
}

async fn delete_pokemon(
    State(store): State<PokemonStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if store.remove(&id).await {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::DeleteMissing(id))
    }
}

/// Build the full application router over an injected store.
pub fn build_router(store: PokemonStore, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", any(gate))
        .route(
            "/pokemons",
            get(list_pokemons)
                .post(create_pokemon)
                .put(update_pokemon_by_body),
        )
        .route(
            "/pokemons/:id",
            get(get_pokemon).put(update_pokemon).delete(delete_pokemon),
        )
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
