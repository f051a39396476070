//! Username and password login
//!
//! Unknown usernames and wrong passwords fail the same way, so a caller cannot
//! tell which of the two was wrong.

use sqlx::PgPool;

use super::middleware::AuthError;
use super::password::verify_password;
use crate::models::user::User;

/// Looks up a user by username and checks the password against the stored hash
///
/// # Errors
///
/// - `AuthError::InvalidCredentials` if the username is unknown or the password is wrong
/// - `AuthError::Database` if the lookup fails
/// - `AuthError::Password` if the stored hash cannot be parsed
///
/// # Example
///
/// ```no_run
/// # use todoapp_shared::auth::credentials::authenticate;
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = authenticate(&pool, "shahan", "test1234").await?;
/// println!("Logged in as {}", user.username);
/// # Ok(())
/// # }
/// ```
pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<User, AuthError> {
    let Some(user) = User::find_by_username(pool, username).await? else {
        tracing::debug!(username, "Login attempt for unknown user");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &user.hashed_password)? {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
