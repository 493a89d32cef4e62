use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::{ValidationError, ValidationErrors};

/// `Json<T>` whose rejections are rendered by [`AppError`] instead of axum's
/// plain-text bodies.
#[derive(Debug, Clone)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(AppJson(value))
    }
}

/// Well-formed JSON of the wrong shape is a validation failure; anything
/// else about the body is a bad request.
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => body_shape_error(err.body_text()),
        other => AppError::BadRequest(anyhow::anyhow!(other.body_text())),
    }
}

/// Validation error reported against the request body as a whole.
pub fn body_shape_error(message: impl Into<String>) -> AppError {
    let message: String = message.into();
    let mut error = ValidationError::new("body");
    error.message = Some(message.into());
    let mut errors = ValidationErrors::new();
    errors.add("body", error);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn request(body: &'static str, content_type: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(axum::body::Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let result =
            AppJson::<Payload>::from_request(request("{}", Some("application/json")), &()).await;

        match result {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.to_string().contains("name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_type_is_a_validation_error() {
        let result = AppJson::<Payload>::from_request(
            request(r#"{"name":5}"#, Some("application/json")),
            &(),
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn syntax_and_content_type_problems_are_bad_requests() {
        let result =
            AppJson::<Payload>::from_request(request("{oops", Some("application/json")), &())
                .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = AppJson::<Payload>::from_request(request(r#"{"name":"a"}"#, None), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
