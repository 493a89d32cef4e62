use crate::middleware::json::{body_shape_error, AppJson};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use service_core::error::AppError;

/// Drop every object key whose value is `""`, descending into nested
/// objects. Arrays and scalars are returned untouched.
///
/// An empty form input means "leave as is", not "erase".
pub fn remove_blank_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !matches!(v, Value::String(s) if s.is_empty()))
                .map(|(k, v)| (k, remove_blank_fields(v)))
                .collect(),
        ),
        other => other,
    }
}

/// JSON body extractor that runs [`remove_blank_fields`] before
/// deserializing into `T`.
#[derive(Debug, Clone)]
pub struct NonBlankJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for NonBlankJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(raw) = AppJson::<Value>::from_request(req, state).await?;

        let value = serde_json::from_value(remove_blank_fields(raw))
            .map_err(|e| body_shape_error(format!("Invalid request body: {}", e)))?;

        Ok(NonBlankJson(value))
    }
}
