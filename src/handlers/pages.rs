use axum::{http::Uri, response::Html};

use crate::{error::AppError, flash::Flash, templates::home_page};

pub async fn index(Flash(flash): Flash) -> Html<String> {
    Html(home_page(flash.as_ref()).into_string())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
