//! src/routes/logout.rs

use crate::domain::LogoutStatus;
use crate::error::DashResult;
use crate::session_state::TypedSession;
use crate::utils::logout_redirect;
use actix_web::HttpResponse;

#[tracing::instrument(name = "Log out", skip(session), fields(username = tracing::field::Empty))]
pub async fn log_out(session: TypedSession) -> DashResult<HttpResponse> {
    if let Some(user) = session.get_user()? {
        tracing::Span::current().record("username", tracing::field::display(&user.username));
    }
    session.log_out();
    Ok(logout_redirect(
        "You have been logged out.",
        LogoutStatus::Success,
    ))
}
