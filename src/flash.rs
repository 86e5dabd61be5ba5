//! One-shot notifications carried between requests in a cookie
//!
//! A handler attaches a [`FlashMessage`] to its (usually redirect) response.
//! The next page extracts it with [`Flash`] and renders it, and
//! [`clear_after_display`] drops the cookie once a page has been served.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponseParts, Response, ResponseParts},
};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "stagebook_flash";

const CLEAR_FLASH_COOKIE: &str = "stagebook_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    fn to_cookie(&self) -> Option<HeaderValue> {
        let json = serde_json::to_string(self).ok()?;
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            urlencoding::encode(&json)
        );
        HeaderValue::from_str(&cookie).ok()
    }

    fn from_cookie_value(raw: &str) -> Option<Self> {
        let json = urlencoding::decode(raw).ok()?;
        serde_json::from_str(&json).ok()
    }
}

impl IntoResponseParts for FlashMessage {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        match self.to_cookie() {
            Some(cookie) => {
                res.headers_mut().append(header::SET_COOKIE, cookie);
            }
            None => tracing::warn!("Dropping flash message that cannot be encoded: {}", self.message),
        }
        Ok(res)
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then_some(value)
        })
}

/// The notification waiting to be shown, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(pub Option<FlashMessage>);

impl Flash {
    pub fn message(&self) -> Option<&FlashMessage> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = cookie_value(&parts.headers, FLASH_COOKIE)
            .and_then(FlashMessage::from_cookie_value);
        Ok(Flash(message))
    }
}

/// Expires a pending flash once a non-redirect response has gone out,
/// unless that response queued a new one.
pub async fn clear_after_display(req: Request, next: Next) -> Response {
    let pending = cookie_value(req.headers(), FLASH_COOKIE).is_some();
    let mut response = next.run(req).await;

    if pending
        && !response.status().is_redirection()
        && !response.headers().contains_key(header::SET_COOKIE)
    {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH_COOKIE));
    }

    response
}
