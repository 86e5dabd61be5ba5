pub mod artists;
pub mod pages;
pub mod shows;
pub mod venues;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, HeaderMap},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    flash::{self, FlashMessage},
    state::AppState,
};

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))

        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route("/venues/create", get(venues::create_venue_form).post(venues::create_venue))
        .route("/venues/:id", get(venues::show_venue))
        .route("/venues/:id/edit", get(venues::edit_venue_form).post(venues::edit_venue))
        .route("/venues/:id/delete", post(venues::delete_venue))

        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route("/artists/create", get(artists::create_artist_form).post(artists::create_artist))
        .route("/artists/:id", get(artists::show_artist))
        .route("/artists/:id/edit", get(artists::edit_artist_form).post(artists::edit_artist))

        // Shows
        .route("/shows", get(shows::list_shows))
        .route("/shows/create", get(shows::create_show_form).post(shows::create_show))

        .fallback(pages::not_found)
        .layer(middleware::from_fn(flash::clear_after_display))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Numeric `:id` segment. Anything that does not parse as an `i32` is a
/// missing record, not a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => Err(AppError::NotFound(rejection.body_text())),
        }
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Sends the browser to `to` with a notification queued.
/// HTMX requests get an `HX-Redirect` header and a 200 instead of a 303.
fn redirect_with(headers: &HeaderMap, message: FlashMessage, to: &str) -> Response {
    if is_htmx(headers) {
        (message, [("HX-Redirect", to.to_string())]).into_response()
    } else {
        (message, Redirect::to(to)).into_response()
    }
}
