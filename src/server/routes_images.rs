//! Stored image serving.

use std::path::Path as FsPath;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use mercato_common::paths::content_type_for;
use tokio_util::io::ReaderStream;

use super::{run_blocking, AppContext, AppError};

/// Create image-related routes.
pub fn image_routes() -> Router<AppContext> {
    Router::new().route("/images/:image_name", get(serve_image))
}

/// Serve an image file by its stored filename.
///
/// Stored names are content hashes, so responses are cacheable forever.
async fn serve_image(
    State(ctx): State<AppContext>,
    Path(image_name): Path<String>,
) -> Result<Response, AppError> {
    let catalog = ctx.catalog.clone();
    let name = image_name.clone();
    let file = run_blocking(move || catalog.open_image(&name)).await?;

    let stream = ReaderStream::new(tokio::fs::File::from_std(file));
    let body = Body::from_stream(stream);

    Ok((
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
            (header::CONTENT_TYPE, content_type_for(FsPath::new(&image_name))),
        ],
        body,
    )
        .into_response())
}
