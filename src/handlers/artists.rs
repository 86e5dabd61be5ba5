use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use crate::{
    db::repositories::ArtistRepository,
    error::{AppError, PersistError, Result},
    flash::{Flash, FlashMessage},
    forms::{ArtistForm, FormFields},
    services::directory,
    state::AppState,
    templates::{artist_detail_page, artist_form_page, artist_search_page, artists_page, FormMode},
};

use super::{RecordId, SearchForm};

pub async fn list_artists(
    State(state): State<AppState>,
    Flash(flash): Flash,
) -> Result<Html<String>> {
    let artists = directory::artist_listing(&state.db, Utc::now()).await?;
    Ok(Html(artists_page(&artists, flash.as_ref()).into_string()))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Flash(flash): Flash,
    Form(search): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = directory::search_artists(&state.db, &search.search_term, Utc::now()).await?;
    tracing::debug!("Artist search '{}' matched {}", search.search_term, results.count);
    Ok(Html(artist_search_page(&results, flash.as_ref()).into_string()))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Flash(flash): Flash,
    RecordId(id): RecordId,
) -> Result<Html<String>> {
    let artist = directory::artist_detail(&state.db, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    Ok(Html(artist_detail_page(&artist, flash.as_ref()).into_string()))
}

pub async fn create_artist_form(Flash(flash): Flash) -> Html<String> {
    Html(artist_form_page(FormMode::Create, &ArtistForm::default(), None, flash.as_ref()).into_string())
}

pub async fn create_artist(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ArtistForm::from_fields(&FormFields::from(pairs));

    match ArtistRepository::new(state.db.clone()).create(&form).await {
        Ok(artist) => {
            tracing::info!("Listed artist {} ({})", artist.name, artist.id);
            (
                FlashMessage::success(format!("Artist {} was successfully listed!", artist.name)),
                Redirect::to("/"),
            )
                .into_response()
        }
        Err(PersistError::Validation(message)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(artist_form_page(FormMode::Create, &form, Some(&message), None).into_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Artist {} could not be listed: {}", form.name, e);
            (
                FlashMessage::error(format!("An error occurred. Artist {} could not be listed.", form.name)),
                Redirect::to("/artists/create"),
            )
                .into_response()
        }
    }
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Flash(flash): Flash,
    RecordId(id): RecordId,
) -> Result<Html<String>> {
    let artist = ArtistRepository::new(state.db.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let form = ArtistForm::from_model(&artist);
    Ok(Html(artist_form_page(FormMode::Edit(id), &form, None, flash.as_ref()).into_string()))
}

pub async fn edit_artist(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = ArtistForm::from_fields(&FormFields::from(pairs));

    match ArtistRepository::new(state.db.clone()).update(id, &form).await {
        Ok(artist) => {
            tracing::info!("Updated artist {} ({})", artist.name, artist.id);
            Ok((
                FlashMessage::success(format!("Artist {} was successfully updated!", artist.name)),
                Redirect::to(&format!("/artists/{}", id)),
            )
                .into_response())
        }
        Err(PersistError::Validation(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(artist_form_page(FormMode::Edit(id), &form, Some(&message), None).into_string()),
        )
            .into_response()),
        Err(PersistError::NotFound) => Err(AppError::NotFound(format!("Artist {} not found", id))),
        Err(e) => {
            tracing::warn!("Artist {} could not be updated: {}", id, e);
            Ok((
                FlashMessage::error(format!("An error occurred. Artist {} could not be updated.", form.name)),
                Redirect::to(&format!("/artists/{}/edit", id)),
            )
                .into_response())
        }
    }
}
