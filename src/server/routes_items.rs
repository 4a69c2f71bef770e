//! Item submission, lookup, listing, and search routes.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use mercato_common::{Error, ItemId};
use mercato_db::models::ItemView;
use serde::{Deserialize, Serialize};

use super::{run_blocking, AppContext, AppError};
use crate::catalog::{ImageUpload, NewItem};

pub fn item_routes() -> Router<AppContext> {
    Router::new()
        .route("/items", get(list_items).post(add_item))
        .route("/items/:id", get(get_item))
        .route("/search", get(search_items))
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub message: String,
    pub item: ItemView,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemView>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

/// POST /items
///
/// Multipart form with text fields `name` and `category` and an optional
/// file field `image`.
async fn add_item(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AddItemResponse>), AppError> {
    let new_item = read_item_form(multipart).await?;

    let catalog = ctx.catalog.clone();
    let item = run_blocking(move || catalog.submit_item(new_item)).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddItemResponse {
            message: format!("Item '{}' added successfully!", item.name),
            item,
        }),
    ))
}

/// GET /items
async fn list_items(State(ctx): State<AppContext>) -> Result<Json<ItemsResponse>, AppError> {
    let catalog = ctx.catalog.clone();
    let items = run_blocking(move || catalog.list_items()).await?;
    Ok(Json(ItemsResponse { items }))
}

/// GET /items/:id
async fn get_item(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ItemView>, AppError> {
    let item_id: ItemId = id
        .parse()
        .map_err(|_| Error::validation(format!("Invalid item ID: {id:?}")))?;

    let catalog = ctx.catalog.clone();
    let item = run_blocking(move || catalog.get_item(item_id))
        .await?
        .ok_or_else(|| Error::not_found("item", item_id))?;

    Ok(Json(item))
}

/// GET /search?keyword=...
async fn search_items(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ItemsResponse>, AppError> {
    let keyword = params
        .keyword
        .ok_or_else(|| Error::validation("missing query parameter 'keyword'"))?;

    let catalog = ctx.catalog.clone();
    let items = run_blocking(move || catalog.search_items(&keyword)).await?;
    Ok(Json(ItemsResponse { items }))
}

/// Collect the submission fields from a multipart body.
///
/// An `image` part with no filename and no bytes is what browsers send for
/// an empty file input; it counts as no image.
async fn read_item_form(mut multipart: Multipart) -> Result<NewItem, Error> {
    let mut name = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed form data: {e}")))?
    {
        match field.name() {
            Some("name") => name = Some(read_text(field).await?),
            Some("category") => category = Some(read_text(field).await?),
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(format!("failed to read image: {e}")))?;
                if !(filename.is_empty() && data.is_empty()) {
                    image = Some(ImageUpload { filename, data });
                }
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    Ok(NewItem {
        name: name.ok_or_else(|| Error::validation("missing form field 'name'"))?,
        category: category.ok_or_else(|| Error::validation("missing form field 'category'"))?,
        image,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Error> {
    let field_name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| Error::validation(format!("invalid form field '{field_name}': {e}")))
}
