use tower_sessions::Session;

use crate::constants::SESSION_USER_KEY;
use crate::error::{AppError, Result};
use crate::models::SessionUser;

/// The logged-in user, if any
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>> {
    Ok(session.get::<SessionUser>(SESSION_USER_KEY).await?)
}

/// The logged-in user, or `Err(Unauthorized)` which redirects to the login page
pub async fn require_user(session: &Session) -> Result<SessionUser> {
    current_user(session).await?.ok_or(AppError::Unauthorized)
}

/// Mark the session as logged in for `email`, issuing a fresh session id
pub async fn log_in(session: &Session, email: &str) -> Result<()> {
    session.cycle_id().await?;
    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                email: email.to_string(),
            },
        )
        .await?;
    Ok(())
}

/// Drop everything stored for this session
pub async fn log_out(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
