//! Claims carried by a bearer token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity and role of the caller.
///
/// Both fields must be present and string-typed in the token's claim set; a token
/// missing either one does not decode. Registered claims such as `exp` are checked by
/// the verifier and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub username: String,
    pub role: String,
}
