use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use tower_sessions::Session;

use crate::constants::MSG_LOGO_SAVE_FAILED;
use crate::error::Result;
use crate::models::{LogoForm, LogoRequest};
use crate::routes::session::require_user;
use crate::views::{self, Flash};
use crate::AppState;

pub async fn generate_form(session: Session) -> Result<Response> {
    require_user(&session).await?;
    Ok(views::generate_page(None, None, None).into_response())
}

/// Generate a logo, upload it and record it for the logged-in user
///
/// On success the page shows the image inline with a download link. A failed
/// inference call shows the generic generation message; a failure after the
/// image exists (upload or record write) says the logo could not be saved.
pub async fn generate_logo(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LogoForm>,
) -> Result<Response> {
    let user = require_user(&session).await?;

    let request = match LogoRequest::try_from(form) {
        Ok(request) => request,
        Err(e) => {
            e.log();
            return Ok((
                StatusCode::BAD_REQUEST,
                views::generate_page(None, None, Some(Flash::error(e.user_message()))),
            )
                .into_response());
        }
    };

    match state.studio.create_logo(&user.email, &request).await {
        Ok(created) => Ok(views::generate_page(Some(&request), Some(&created), None).into_response()),
        Err(e) => {
            e.log();
            let message = if e.is_generation_failure() {
                e.user_message()
            } else {
                MSG_LOGO_SAVE_FAILED.to_string()
            };
            Ok((
                e.status_code(),
                views::generate_page(Some(&request), None, Some(Flash::error(message))),
            )
                .into_response())
        }
    }
}
