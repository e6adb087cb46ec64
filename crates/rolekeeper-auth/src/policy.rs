//! Access policy for administrative operations.

use rolekeeper_core::{AppError, ErrorKind};

/// Whether `actual_role` is the privileged role. Comparison ignores case.
pub fn is_privileged(required_role: &str, actual_role: &str) -> bool {
    actual_role.to_lowercase() == required_role.to_lowercase()
}

/// Permits the call when the caller holds `required_role`, otherwise fails with
/// [`ErrorKind::Forbidden`].
///
/// # Example
///
/// ```ignore
/// authorize("administrator", &claims.role)?;
/// ```
pub fn authorize(required_role: &str, actual_role: &str) -> Result<(), AppError> {
    if is_privileged(required_role, actual_role) {
        Ok(())
    } else {
        Err(ErrorKind::Forbidden.into())
    }
}
