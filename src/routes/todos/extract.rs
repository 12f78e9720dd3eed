use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{ApiError, ValidationErrors};

/// JSON body extractor whose rejections are validation errors naming the
/// offending field, instead of axum's plain-text `JsonRejection`.
pub struct JsonBody<T>(pub T);

fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or("").trim())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Err(ValidationErrors::single("body", "expected Content-Type: application/json").into());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationErrors::single("body", e.body_text()))?;

        let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
        let parsed: Result<T, serde_path_to_error::Error<serde_json::Error>> =
            serde_path_to_error::deserialize(&mut deserializer);

        match parsed {
            Ok(value) => Ok(JsonBody(value)),
            Err(err) => {
                // syntax errors have no usable path ("?" or ".")
                let field = match err.inner().classify() {
                    Category::Syntax | Category::Eof => "body".to_string(),
                    _ => match err.path().to_string() {
                        path if path == "." || path == "?" => "body".to_string(),
                        path => path,
                    },
                };
                Err(ValidationErrors::single(field, err.into_inner().to_string()).into())
            }
        }
    }
}
