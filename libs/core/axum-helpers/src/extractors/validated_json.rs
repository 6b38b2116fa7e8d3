//! JSON extractor that also runs `validator` checks.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserialize the body as JSON and validate it.
///
/// Both a body that cannot be read as `T` and a failed validation are rejected
/// with `400 Bad Request` and the standard error envelope; validation failures
/// list the offending fields under `details`.
///
/// ```ignore
/// async fn add_product(ValidatedJson(req): ValidatedJson<AddProductRequest>) -> Response {
///     // req passed validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
