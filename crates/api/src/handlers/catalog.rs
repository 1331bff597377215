//! Handlers for the static catalogues the front ends render from.

use axum::Json;
use onlycard_core::fields::{FieldDef, ABOUT_FIELDS, MIN_FILLED_FIELDS};
use onlycard_core::platform::{PlatformDef, PLATFORMS};
use onlycard_core::theme::{Surface, ThemeId};
use serde::Serialize;

use crate::response::DataResponse;

/// One selectable theme.
#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    pub id: ThemeId,
    pub label: &'static str,
    pub preview_asset: &'static str,
    /// Whether the web preview draws this theme.
    pub web_supported: bool,
}

/// The About field registry plus the save threshold.
#[derive(Debug, Serialize)]
pub struct FieldCatalog {
    pub fields: Vec<FieldDef>,
    pub min_filled: usize,
}

/// GET /api/v1/themes
pub async fn list_themes() -> Json<DataResponse<Vec<ThemeInfo>>> {
    let data = ThemeId::ALL
        .into_iter()
        .map(|id| ThemeInfo {
            id,
            label: id.label(),
            preview_asset: id.preview_asset(),
            web_supported: id.supported_on(Surface::Web),
        })
        .collect();
    Json(DataResponse { data })
}

/// GET /api/v1/platforms
pub async fn list_platforms() -> Json<DataResponse<Vec<PlatformDef>>> {
    Json(DataResponse {
        data: PLATFORMS.to_vec(),
    })
}

/// GET /api/v1/fields
pub async fn list_fields() -> Json<DataResponse<FieldCatalog>> {
    Json(DataResponse {
        data: FieldCatalog {
            fields: ABOUT_FIELDS.to_vec(),
            min_filled: MIN_FILLED_FIELDS,
        },
    })
}
