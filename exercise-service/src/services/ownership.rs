use crate::models::Owned;
use service_core::error::AppError;

/// Fail with 401 unless `caller_id` owns `record`.
pub fn require_ownership<R: Owned + ?Sized>(record: &R, caller_id: &str) -> Result<(), AppError> {
    if record.owner_id() == caller_id {
        Ok(())
    } else {
        Err(AppError::Unauthorized(anyhow::anyhow!(
            "The requested resource is not owned by the requesting user"
        )))
    }
}
