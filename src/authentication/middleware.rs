//! src/authentication/middleware.rs

use crate::configuration::DashboardSettings;
use crate::domain::LogoutStatus;
use crate::session_state::{SessionCheck, SessionUser, TypedSession};
use crate::startup::SessionTimeout;
use crate::utils::{login_path_with_next, logout_redirect, see_other, SESSION_TIMED_OUT};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    web, FromRequest, HttpMessage,
};
use actix_web_lab::middleware::Next;

pub const ADMIN_ROLE: &str = "admin";
const DEFAULT_REDIRECT_FIELD_NAME: &str = "next";

/// Path and query of the request, used as `next` on the login page.
fn requested_path(req: &ServiceRequest) -> String {
    match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{}", req.path(), query),
    }
}

fn redirect_field_name(req: &ServiceRequest) -> String {
    req.app_data::<web::Data<DashboardSettings>>()
        .map(|s| s.redirect_field_name.clone())
        .unwrap_or_else(|| DEFAULT_REDIRECT_FIELD_NAME.to_string())
}

/// Send the user to the login page, remembering what they asked for.
fn redirect_to_login<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    let location = login_path_with_next(&redirect_field_name(&req), Some(&requested_path(&req)));
    req.into_response(see_other(&location)).map_into_right_body()
}

pub async fn reject_anonymous_users<B: MessageBody>(
    mut req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;
    let timeout = req
        .app_data::<web::Data<SessionTimeout>>()
        .map(|t| t.0)
        .unwrap_or(SessionTimeout::default().0);

    match session.check_user(timeout)? {
        SessionCheck::Active(user) => {
            req.extensions_mut().insert(user);
            next.call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        }
        SessionCheck::Expired => {
            let response = logout_redirect(SESSION_TIMED_OUT, LogoutStatus::Failure);
            Ok(req.into_response(response).map_into_right_body())
        }
        SessionCheck::Anonymous => {
            tracing::debug!(path = %req.path(), "Anonymous request to a protected resource");
            Ok(redirect_to_login(req))
        }
    }
}

/// Must run inside `reject_anonymous_users`, which provides the `SessionUser`.
pub async fn reject_users_without_admin_role<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let is_admin = req
        .extensions()
        .get::<SessionUser>()
        .is_some_and(|user| user.has_role(ADMIN_ROLE));
    if is_admin {
        next.call(req)
            .await
            .map(ServiceResponse::map_into_left_body)
    } else {
        tracing::info!(path = %req.path(), "Permission denied");
        Ok(redirect_to_login(req))
    }
}
