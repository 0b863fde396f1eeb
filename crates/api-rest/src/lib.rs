//! # API REST
//!
//! HTTP surface for the OSCE case viewer.
//!
//! Handles:
//! - the HTML page (`GET /`, `POST /` with the page's multipart form)
//! - the JSON API (`POST /api/render`, `GET /api/sample`, `GET /health`)
//! - OpenAPI/Swagger documentation and CORS
//!
//! Every request is one self-contained render pass. Session state arrives with the request
//! (query string, form fields or JSON body); nothing is stored between requests.

#![warn(rust_2018_idioms)]

use api_shared::{ErrorRes, HealthRes, HealthService, RenderReq, RenderRes};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use osce_core::constants::{
    ACTION_RUN_DIAGNOSIS, FIELD_ACTION, FIELD_SCENARIO_DOCUMENT, FIELD_SCENARIO_FILE,
    FIELD_SCENARIO_FILENAME, FIELD_USE_SAMPLE,
};
use osce_core::{
    sample_case, HtmlRenderer, Page, ScenarioError, ScenarioService, Session, Upload,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Room for form fields and multipart framing on top of the upload itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<ScenarioService>,
    renderer: HtmlRenderer,
}

impl AppState {
    pub fn new(service: Arc<ScenarioService>) -> Self {
        Self {
            service,
            renderer: HtmlRenderer::new("/"),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, index, submit, render_page, sample),
    components(schemas(HealthRes, RenderReq, RenderRes, ErrorRes))
)]
struct ApiDoc;

/// Build the application router.
///
/// The request body limit allows a fresh upload plus a carried one, plus form overhead.
pub fn router(state: AppState) -> Router {
    let body_limit = state
        .service
        .config()
        .max_upload_bytes()
        .saturating_mul(2)
        .saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health))
        .route("/api/render", post(render_page))
        .route("/api/sample", get(sample))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP status for a failed render pass.
fn status_for(err: &ScenarioError) -> StatusCode {
    match err {
        ScenarioError::Parse(_) | ScenarioError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ScenarioError::Schema { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ScenarioError::Io(_) | ScenarioError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn html_page(state: &AppState, session: &Session) -> Response {
    match state.service.render_or_failure(session) {
        Ok(page) => Html(state.renderer.render(&page)).into_response(),
        Err((err, page)) => (status_for(&err), Html(state.renderer.render(&page))).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Query overrides for the initial page.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct PageQuery {
    /// Overrides the configured "Use Sample Case" default.
    use_sample: Option<bool>,
    /// Run the simulated diagnosis immediately.
    run_diagnosis: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/",
    params(PageQuery),
    responses(
        (status = 200, description = "Rendered page", body = String, content_type = "text/html")
    )
)]
/// Render the page for a fresh session.
///
/// Without a query string the session uses the configured default toggle state and carries no
/// upload.
#[axum::debug_handler]
async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let mut session = state.service.default_session();
    if let Some(use_sample) = query.use_sample {
        session.use_sample = use_sample;
    }
    session.run_diagnosis = query.run_diagnosis.unwrap_or(false);

    html_page(&state, &session)
}

#[utoipa::path(
    post,
    path = "/",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rendered page", body = String, content_type = "text/html"),
        (status = 400, description = "Malformed or rejected upload", body = String, content_type = "text/html"),
        (status = 422, description = "Scenario does not match the schema", body = String, content_type = "text/html")
    )
)]
/// Render the page for a submitted form.
///
/// # Errors
/// Returns `400 Bad Request` if the multipart body itself cannot be read; render failures come
/// back as an error page with the status from [`status_for`].
#[axum::debug_handler]
async fn submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    match session_from_form(multipart).await {
        Ok(session) => html_page(&state, &session),
        Err(e) => {
            tracing::error!("Multipart form error: {:?}", e);
            e.into_response()
        }
    }
}

/// Read the page form into a session.
///
/// A checkbox is only submitted when ticked, so its absence means "off". A freshly chosen file
/// wins over the document carried from the previous pass.
async fn session_from_form(mut multipart: Multipart) -> Result<Session, MultipartError> {
    let mut session = Session::default();
    let mut fresh: Option<Upload> = None;
    let mut carried_document: Option<String> = None;
    let mut carried_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_USE_SAMPLE => {
                let value = field.text().await?;
                session.use_sample = matches!(value.as_str(), "true" | "on" | "1");
            }
            FIELD_ACTION => {
                session.run_diagnosis = field.text().await? == ACTION_RUN_DIAGNOSIS;
            }
            FIELD_SCENARIO_FILE => {
                let filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty, unnamed part when no file was chosen.
                if filename.is_some() || !bytes.is_empty() {
                    fresh = Some(Upload::new(filename, bytes.to_vec()));
                }
            }
            FIELD_SCENARIO_DOCUMENT => {
                carried_document = Some(field.text().await?).filter(|t| !t.is_empty());
            }
            FIELD_SCENARIO_FILENAME => {
                carried_filename = Some(field.text().await?).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    session.upload = fresh.or_else(|| {
        carried_document.map(|doc| Upload::new(carried_filename, doc.into_bytes()))
    });
    Ok(session)
}

#[utoipa::path(
    post,
    path = "/api/render",
    request_body = RenderReq,
    responses(
        (status = 200, description = "Rendered page model", body = RenderRes),
        (status = 400, description = "Malformed or rejected document", body = ErrorRes),
        (status = 422, description = "Scenario does not match the schema", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Render a session and return the page model as JSON.
///
/// # Errors
/// Returns the failure class and message with the status from [`status_for`].
#[axum::debug_handler]
async fn render_page(
    State(state): State<AppState>,
    Json(req): Json<RenderReq>,
) -> Result<Json<RenderRes>, (StatusCode, Json<ErrorRes>)> {
    let session = Session {
        use_sample: req.use_sample,
        upload: req
            .document
            .map(|doc| Upload::new(req.filename, doc.into_bytes())),
        run_diagnosis: req.run_diagnosis,
    };

    let page = state.service.render(&session).map_err(error_response)?;
    page_to_res(&page).map(Json).map_err(error_response)
}

fn page_to_res(page: &Page) -> Result<RenderRes, ScenarioError> {
    let page = serde_json::to_value(page).map_err(ScenarioError::Serialization)?;
    Ok(RenderRes { page })
}

fn error_response(err: ScenarioError) -> (StatusCode, Json<ErrorRes>) {
    tracing::warn!("Render error: {:?}", err);
    (
        status_for(&err),
        Json(ErrorRes {
            kind: err.kind().into(),
            message: err.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/sample",
    responses(
        (status = 200, description = "The built-in sample scenario", body = Object)
    )
)]
/// Return the built-in sample scenario document.
#[axum::debug_handler]
async fn sample(State(_state): State<AppState>) -> Json<serde_json::Value> {
    Json(sample_case())
}
