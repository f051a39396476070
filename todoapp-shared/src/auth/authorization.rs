//! Role checks
//!
//! Admin-only operations require `Role::Admin` in the token. Todo ownership is
//! not checked here: the model queries filter on `id = $1 AND owner_id = $2`.
//!
//! # Example
//!
//! ```no_run
//! use todoapp_shared::auth::authorization::require_role;
//! use todoapp_shared::auth::middleware::AuthContext;
//! use todoapp_shared::models::user::Role;
//!
//! fn admin_only(auth: &AuthContext) -> Result<(), Box<dyn std::error::Error>> {
//!     require_role(auth, Role::Admin)?;
//!     Ok(())
//! }
//! ```

use super::middleware::AuthContext;
use crate::models::user::Role;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller doesn't have the required role
    #[error("Authentication failed!")]
    InsufficientRole { required: Role, actual: Role },
}

/// Checks that the caller holds `required`
///
/// Roles are not hierarchical beyond admin implying user.
pub fn require_role(auth: &AuthContext, required: Role) -> Result<(), AuthzError> {
    let allowed = match required {
        Role::User => true,
        Role::Admin => auth.is_admin(),
    };

    if !allowed {
        tracing::debug!(user_id = auth.user_id, role = %auth.role, %required, "Role check failed");
        return Err(AuthzError::InsufficientRole {
            required,
            actual: auth.role,
        });
    }

    Ok(())
}
