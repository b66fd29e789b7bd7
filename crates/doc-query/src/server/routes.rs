//! HTTP routes

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{Error, Result};
use crate::pipeline::{self, DocumentSource};
use crate::types::{query::QueryRequest, response::QueryResponse};

use super::state::AppState;
use super::ui;

/// Build the full router with middleware.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let max_upload = state.config().server.max_upload_size;

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        // Short paths plus the versioned API prefix serve the same handlers.
        .route("/query", post(query_url))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(max_upload)),
        )
        .nest("/api/v1", api_routes(max_upload))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn api_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route("/query", post(query_url))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(max_upload)),
        )
}

/// GET / - form UI
async fn home() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// POST /api/v1/query - answer questions about a document fetched by URL
async fn query_url(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    tracing::info!(
        url = %request.documents,
        questions = request.questions.len(),
        "query request"
    );

    let answers = pipeline::answer_questions(
        &state,
        DocumentSource::Url(request.documents),
        &request.questions,
    )
    .await?;

    Ok(Json(QueryResponse { answers }))
}

/// POST /api/v1/upload - answer questions about an uploaded file
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<QueryResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut questions: Option<Vec<String>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("failed to read multipart field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "questions" {
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::internal(format!("failed to read questions field: {e}")))?;
            questions = Some(serde_json::from_slice(&data)?);
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload-{}.pdf", uuid::Uuid::new_v4()));
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("failed to read file: {e}")))?;
        file = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file.ok_or_else(|| Error::internal("multipart request is missing the file field"))?;
    let questions = questions
        .ok_or_else(|| Error::internal("multipart request is missing the questions field"))?;

    tracing::info!(
        filename = %filename,
        size = data.len(),
        questions = questions.len(),
        "upload request"
    );

    let answers =
        pipeline::answer_questions(&state, DocumentSource::Upload { filename, data }, &questions)
            .await?;

    Ok(Json(QueryResponse { answers }))
}
