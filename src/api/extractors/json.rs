//! JSON body extractor that leaves validation to the services.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON request body. An empty body reads as `{}` so request types with
/// defaults surface missing fields as validation issues.
///
/// # Example
///
/// ```rust,ignore
/// async fn apply(ApiJson(draft): ApiJson<ApplicationDraft>) {
///     // draft.cover_note is None for an empty body
/// }
/// ```
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice(b"{}")
        } else {
            serde_json::from_slice(&bytes)
        }
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Note {
        text: Option<String>,
    }

    async fn extract(body: &'static str) -> Result<Note, AppError> {
        let request = Request::builder().body(Body::from(body)).unwrap();
        ApiJson::<Note>::from_request(request, &()).await.map(|ApiJson(v)| v)
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        assert!(extract("").await.unwrap().text.is_none());
        assert!(extract("  \n").await.unwrap().text.is_none());
    }

    #[tokio::test]
    async fn test_parses_body() {
        assert_eq!(extract(r#"{"text":"hi"}"#).await.unwrap().text.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        assert!(matches!(extract("{nope").await, Err(AppError::BadRequest(_))));
    }
}
