use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    db::repositories::ShowRepository,
    error::{PersistError, Result},
    flash::{Flash, FlashMessage},
    forms::{FormFields, ShowForm},
    services::directory,
    state::AppState,
    templates::{show_form_page, shows_page},
};

pub async fn list_shows(
    State(state): State<AppState>,
    Flash(flash): Flash,
) -> Result<Html<String>> {
    let shows = directory::show_listing(&state.db).await?;
    Ok(Html(shows_page(&shows, flash.as_ref()).into_string()))
}

pub async fn create_show_form(Flash(flash): Flash) -> Html<String> {
    Html(show_form_page(&ShowForm::default(), None, flash.as_ref()).into_string())
}

/// A show naming a venue or artist that does not exist is rejected by the
/// foreign keys and reported like any other failed write.
pub async fn create_show(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ShowForm::from_fields(&FormFields::from(pairs));

    match ShowRepository::new(state.db.clone()).create(&form).await {
        Ok(show) => {
            tracing::info!(
                "Listed show {} (venue {}, artist {})",
                show.id,
                show.venue_id,
                show.artist_id
            );
            (
                FlashMessage::success("Show was successfully listed!"),
                Redirect::to("/shows"),
            )
                .into_response()
        }
        Err(PersistError::Validation(message)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(show_form_page(&form, Some(&message), None).into_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Show could not be listed: {}", e);
            (
                FlashMessage::error("An error occurred. Show could not be listed."),
                Redirect::to("/shows/create"),
            )
                .into_response()
        }
    }
}
