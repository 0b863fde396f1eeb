//! # API Shared
//!
//! Shared request/response types for the OSCE APIs.
//!
//! Contains:
//! - JSON wire types for the REST API (`RenderReq`, `RenderRes`, `ErrorRes`, `HealthRes`)
//! - Shared services like `HealthService`
//!
//! Types derive `utoipa::ToSchema` so they appear in the OpenAPI document.

pub mod health;

pub use health::HealthService;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One render pass requested over the JSON API.
///
/// Mirrors the page's sidebar: the sample toggle, an optional uploaded document (raw text, so
/// malformed JSON is reported the same way as a bad upload) and the diagnosis action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RenderReq {
    #[serde(default = "default_use_sample")]
    pub use_sample: bool,
    /// Raw scenario document text.
    #[serde(default)]
    pub document: Option<String>,
    /// Client-side file name of `document`, if known.
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub run_diagnosis: bool,
}

fn default_use_sample() -> bool {
    true
}

/// A rendered page model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RenderRes {
    /// The page: `title`, `sidebar` and ordered `blocks`, each block tagged by `kind`.
    #[schema(value_type = Object)]
    pub page: serde_json::Value,
}

/// Error body for failed render passes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// `parse_error`, `schema_error`, `invalid_input`, ...
    pub kind: String,
    pub message: String,
}
