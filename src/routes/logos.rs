use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::constants::MSG_LOGOS_UNAVAILABLE;
use crate::error::Result;
use crate::routes::session::require_user;
use crate::views::{self, Flash};
use crate::AppState;

/// "My Logos" page for the logged-in user
pub async fn list_logos(State(state): State<AppState>, session: Session) -> Result<Response> {
    let user = require_user(&session).await?;
    Ok(render_home(&state, &user.email, Vec::new()).await)
}

/// Render every record in the user's collection, or an error message if the
/// collection cannot be read
pub(crate) async fn render_home(state: &AppState, email: &str, mut flashes: Vec<Flash>) -> Response {
    match state.studio.list_logos(email).await {
        Ok(logos) => views::home_page(&logos, &flashes).into_response(),
        Err(e) => {
            e.log();
            flashes.push(Flash::error(MSG_LOGOS_UNAVAILABLE));
            (e.status_code(), views::home_page(&[], &flashes)).into_response()
        }
    }
}
