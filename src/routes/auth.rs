use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::constants::{MSG_ACCOUNT_CREATED, MSG_AUTH_FAILED, MSG_LOGGED_OUT};
use crate::error::{AppError, Result};
use crate::models::CredentialsForm;
use crate::routes::logos::render_home;
use crate::routes::session::{current_user, log_in, log_out};
use crate::views::{self, Flash};
use crate::AppState;

/// `/`: send visitors to their logos or to the login page
pub async fn index(session: Session) -> Result<Redirect> {
    Ok(match current_user(&session).await? {
        Some(_) => Redirect::to("/logos"),
        None => Redirect::to("/login"),
    })
}

pub async fn login_form(session: Session) -> Result<Response> {
    if current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/logos").into_response());
    }
    Ok(views::login_page("", None).into_response())
}

/// Log in by email.
///
/// The auth provider is only asked whether an account exists for the email;
/// the password is not checked. Any failure becomes the same generic message.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let email = form.email();

    match state.auth.get_user_by_email(email).await {
        Ok(account) => {
            log_in(&session, email).await?;
            tracing::info!("User {} logged in", account.uid);

            let welcome = Flash::success(format!("Welcome back, {email}!"));
            Ok(render_home(&state, email, vec![welcome]).await)
        }
        Err(e) => {
            e.log();
            Ok((
                AppError::AuthenticationFailed.status_code(),
                views::login_page(email, Some(Flash::error(MSG_AUTH_FAILED))),
            )
                .into_response())
        }
    }
}

pub async fn signup_form() -> Response {
    views::signup_page("", None).into_response()
}

/// Create an account. The new user still has to log in afterwards.
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let email = form.email();

    match state.auth.create_user(email, &form.password).await {
        Ok(account) => {
            tracing::info!("Account {} created", account.uid);
            views::signup_page("", Some(Flash::success(MSG_ACCOUNT_CREATED))).into_response()
        }
        Err(e) => {
            e.log();
            let message = match &e {
                AppError::UserCreation(_) => e.user_message(),
                other => format!("Error creating user: {}", other.user_message()),
            };
            (
                e.status_code(),
                views::signup_page(email, Some(Flash::error(message))),
            )
                .into_response()
        }
    }
}

pub async fn logout(session: Session) -> Result<Response> {
    log_out(&session).await?;
    Ok(views::login_page("", Some(Flash::info(MSG_LOGGED_OUT))).into_response())
}
