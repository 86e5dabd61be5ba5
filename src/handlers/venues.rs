use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use crate::{
    db::repositories::VenueRepository,
    error::{AppError, PersistError, Result},
    flash::{Flash, FlashMessage},
    forms::{FormFields, VenueForm},
    services::directory,
    state::AppState,
    templates::{venue_detail_page, venue_form_page, venue_search_page, venues_page, FormMode},
};

use super::{redirect_with, RecordId, SearchForm};

/// Venues grouped by city and state
pub async fn list_venues(
    State(state): State<AppState>,
    Flash(flash): Flash,
) -> Result<Html<String>> {
    let areas = directory::venue_areas(&state.db, Utc::now()).await?;
    Ok(Html(venues_page(&areas, flash.as_ref()).into_string()))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Flash(flash): Flash,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = directory::search_venues(&state.db, &search.search_term, Utc::now()).await?;
    tracing::debug!("Venue search '{}' matched {}", search.search_term, results.count);
    Ok(Html(venue_search_page(&results, flash.as_ref()).into_string()))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Flash(flash): Flash,
    RecordId(id): RecordId,
) -> Result<Html<String>> {
    let venue = directory::venue_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    Ok(Html(venue_detail_page(&venue, flash.as_ref()).into_string()))
}

pub async fn create_venue_form(Flash(flash): Flash) -> Html<String> {
    Html(venue_form_page(FormMode::Create, &VenueForm::default(), None, flash.as_ref()).into_string())
}

pub async fn create_venue(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = VenueForm::from_fields(&FormFields::from(pairs));

    match VenueRepository::new(state.db.clone()).create(&form).await {
        Ok(venue) => {
            tracing::info!("Listed venue {} ({})", venue.name, venue.id);
            (
                FlashMessage::success(format!("Venue {} was successfully listed!", venue.name)),
                Redirect::to("/"),
            )
                .into_response()
        }
        Err(PersistError::Validation(message)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(venue_form_page(FormMode::Create, &form, Some(&message), None).into_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Venue {} could not be listed: {}", form.name, e);
            (
                FlashMessage::error(format!("An error occurred. Venue {} could not be listed.", form.name)),
                Redirect::to("/venues/create"),
            )
                .into_response()
        }
    }
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Flash(flash): Flash,
    RecordId(id): RecordId,
) -> Result<Html<String>> {
    let venue = VenueRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

    let form = VenueForm::from_model(&venue);
    Ok(Html(venue_form_page(FormMode::Edit(id), &form, None, flash.as_ref()).into_string()))
}

pub async fn edit_venue(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = VenueForm::from_fields(&FormFields::from(pairs));

    match VenueRepository::new(state.db.clone()).update(id, &form).await {
        Ok(venue) => {
            tracing::info!("Updated venue {} ({})", venue.name, venue.id);
            Ok((
                FlashMessage::success(format!("Venue {} was successfully updated!", venue.name)),
                Redirect::to(&format!("/venues/{}", id)),
            )
                .into_response())
        }
        Err(PersistError::Validation(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(venue_form_page(FormMode::Edit(id), &form, Some(&message), None).into_string()),
        )
            .into_response()),
        Err(PersistError::NotFound) => Err(AppError::NotFound(format!("Venue {} not found", id))),
        Err(e) => {
            tracing::warn!("Venue {} could not be updated: {}", id, e);
            Ok((
                FlashMessage::error(format!("An error occurred. Venue {} could not be updated.", form.name)),
                Redirect::to(&format!("/venues/{}/edit", id)),
            )
                .into_response())
        }
    }
}

/// Deletes the venue together with its shows
pub async fn delete_venue(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    headers: HeaderMap,
) -> Result<Response> {
    match VenueRepository::new(state.db.clone()).delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted venue {}", id);
            Ok(redirect_with(
                &headers,
                FlashMessage::success(format!("Venue {} was deleted.", id)),
                "/",
            ))
        }
        Err(PersistError::NotFound) => Err(AppError::NotFound(format!("Venue {} not found", id))),
        Err(e) => {
            tracing::warn!("Venue {} could not be deleted: {}", id, e);
            Ok(redirect_with(
                &headers,
                FlashMessage::error(format!("An error occurred. Venue {} could not be deleted.", id)),
                &format!("/venues/{}", id),
            ))
        }
    }
}
