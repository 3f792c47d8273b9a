//! src/routes/login/get.rs

use crate::configuration::{DashboardSettings, WebSsoSettings};
use crate::csrf::CsrfToken;
use crate::domain::{LoginContext, LogoutStatus};
use crate::error::DashResult;
use crate::routes::{LoginPage, LoginPanel};
use crate::session_state::{SessionCheck, TypedSession};
use crate::startup::SessionTimeout;
use crate::utils::{
    logout_redirect, read_logout_cookie, removal_cookie, see_other, HOME_PATH,
    LOGOUT_REASON_COOKIE, LOGOUT_STATUS_COOKIE, SESSION_TIMED_OUT,
};
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use std::collections::HashMap;

#[tracing::instrument(
    name = "Render login page",
    skip_all,
    fields(is_authenticated = tracing::field::Empty)
)]
pub async fn login_form(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    session: TypedSession,
    flash_messages: IncomingFlashMessages,
    dashboard: web::Data<DashboardSettings>,
    websso: web::Data<WebSsoSettings>,
    timeout: web::Data<SessionTimeout>,
) -> DashResult<HttpResponse> {
    let requested_next = query.get(&dashboard.redirect_field_name).cloned();
    let is_authenticated = match session.check_user(timeout.0)? {
        SessionCheck::Active(_) => true,
        SessionCheck::Anonymous => false,
        // The purged session cannot hold a fresh token, so start over.
        SessionCheck::Expired => {
            return Ok(logout_redirect(SESSION_TIMED_OUT, LogoutStatus::Failure))
        }
    };
    tracing::Span::current().record("is_authenticated", is_authenticated);
    // A logged in user only lands here on purpose when a resource was denied.
    if is_authenticated && requested_next.is_none() {
        return Ok(see_other(HOME_PATH));
    }

    let logout_status = read_logout_cookie(&req, LOGOUT_STATUS_COOKIE);
    let context = LoginContext {
        is_authenticated,
        next: requested_next.clone(),
        requested_next,
        logout_reason: read_logout_cookie(&req, LOGOUT_REASON_COOKIE),
        logout_status: LogoutStatus::parse(logout_status.as_deref()),
        ..LoginContext::from_settings(&dashboard, &websso)
    };
    let csrf_token = CsrfToken::get_or_create(&session)?;
    let form_errors: Vec<String> = flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect();

    let mut response = HttpResponse::Ok();
    // The logout reason is shown once.
    if context.logout_reason.is_some() {
        response
            .cookie(removal_cookie(LOGOUT_REASON_COOKIE))
            .cookie(removal_cookie(LOGOUT_STATUS_COOKIE));
    }
    let panel =
        LoginPanel::from_settings(&context, &csrf_token, form_errors, &dashboard, &websso);
    LoginPage::new(panel).respond(response)
}
